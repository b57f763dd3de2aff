use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;

static DEFAULT_DB_NAME: &str = "todolist.sqlite3";
static LOG_DIR_NAME: &str = "logs";
static ENV_DATA_DIR: &str = "TODOLIST_DATA_DIR";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "todolist", "todolist"));

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    db_path: PathBuf,
    log_dir: PathBuf,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving the data directory using the provided override,
    /// environment variables, and platform defaults.
    pub fn discover(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir_override)?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }
        Self::from_data_dir(data_dir)
    }

    /// Construct [`AppConfig`] directly from a resolved data directory.
    pub fn from_data_dir(data_dir: PathBuf) -> Result<Self> {
        let db_path = data_dir.join(DEFAULT_DB_NAME);
        let log_dir = data_dir.join(LOG_DIR_NAME);
        Ok(Self {
            data_dir,
            db_path,
            log_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Directory for rolling log files; created lazily by whoever installs the writer.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        return Ok(PathBuf::from(env_dir));
    }

    if cfg!(debug_assertions) {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dev_dir = manifest_dir.join("..").join("tmp").join("dev-todolist");
        return Ok(dev_dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(base) = BaseDirs::new() {
            return Ok(base.home_dir().join(".todolist"));
        }
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".todolist"));
    }

    Ok(env::current_dir()?.join(".todolist"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn derives_paths_from_data_dir() {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");

        assert_eq!(config.data_dir(), dir.path());
        assert_eq!(config.db_path(), dir.path().join("todolist.sqlite3"));
        assert_eq!(config.log_dir(), dir.path().join("logs"));
    }

    #[test]
    fn discover_creates_override_directory() {
        let dir = TempDir::new().expect("temp dir");
        let nested = dir.path().join("nested").join("data");
        let config = AppConfig::discover(Some(nested.clone())).expect("discover");

        assert!(nested.is_dir());
        assert_eq!(config.data_dir(), nested.as_path());
    }
}
