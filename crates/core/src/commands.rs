use std::path::Path;

use anyhow::{anyhow, Result};

use crate::config::AppConfig;
use crate::model::{Category, TaskStore};
use crate::mutation::Intent;
use crate::services::{Change, MutationOutcome, TasksService};
use crate::transfer;

/// Tasks of one category as stored on disk.
pub fn list_tasks(config: &AppConfig, category: Category) -> Result<Vec<String>> {
    let service = TasksService::new(config)?;
    Ok(service.load().tasks(category).to_vec())
}

/// Apply a single intent to `category` and return the saved snapshot.
///
/// Rejections and failed saves become errors, which is what one-shot commands want.
pub fn apply_intent(config: &AppConfig, category: Category, intent: Intent) -> Result<TaskStore> {
    let mut service = TasksService::new(config)?;
    let store = service.load().with_selected(category);
    settle(service.apply(&store, category, intent))
}

/// Write `category` to `path`, one task per line. Returns the number of tasks written.
pub fn export_category(config: &AppConfig, category: Category, path: &Path) -> Result<usize> {
    let tasks = list_tasks(config, category)?;
    Ok(transfer::export_tasks(path, &tasks)?)
}

/// Replace `category` with the lines of `path` and return the saved snapshot.
pub fn import_category(config: &AppConfig, category: Category, path: &Path) -> Result<TaskStore> {
    let mut service = TasksService::new(config)?;
    let store = service.load().with_selected(category);
    settle(transfer::import_tasks(&mut service, &store, category, path)?)
}

fn settle(outcome: MutationOutcome) -> Result<TaskStore> {
    match outcome.change {
        Change::Saved(_) | Change::Unchanged => Ok(outcome.store),
        Change::Rejected(err) => Err(anyhow!(err)),
        Change::Unsaved(_, err) => Err(anyhow!(err).context("task list was not saved")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    #[test]
    fn apply_intent_persists_between_calls() {
        let (config, _dir) = temp_config();
        apply_intent(&config, Category::Other, Intent::Add("Walk dog".into())).unwrap();
        apply_intent(&config, Category::Other, Intent::Add("Feed cat".into())).unwrap();
        apply_intent(&config, Category::Other, Intent::Reorder { from: 1, to: 0 }).unwrap();

        assert_eq!(
            list_tasks(&config, Category::Other).unwrap(),
            vec!["Feed cat".to_string(), "Walk dog".to_string()]
        );
        assert!(list_tasks(&config, Category::Personal).unwrap().is_empty());
    }

    #[test]
    fn apply_intent_reports_rejections() {
        let (config, _dir) = temp_config();
        let err = apply_intent(&config, Category::Work, Intent::Reorder { from: 0, to: 1 })
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn export_and_import_move_a_category_between_stores() {
        let (source, source_dir) = temp_config();
        let (target, _target_dir) = temp_config();
        apply_intent(&source, Category::Work, Intent::Add("Draft memo".into())).unwrap();
        apply_intent(&source, Category::Work, Intent::Add("Book room".into())).unwrap();

        let file = source_dir.path().join("work.txt");
        assert_eq!(export_category(&source, Category::Work, &file).unwrap(), 2);

        let store = import_category(&target, Category::Personal, &file).unwrap();
        assert_eq!(
            store.tasks(Category::Personal),
            ["Draft memo", "Book room"].map(String::from).as_slice()
        );
        assert_eq!(
            list_tasks(&target, Category::Personal).unwrap(),
            vec!["Draft memo".to_string(), "Book room".to_string()]
        );
    }
}
