use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{Category, TaskStore};
use crate::mutation::Intent;
use crate::services::{MutationOutcome, TasksService};

pub const DEFAULT_EXPORT_FILE: &str = "tasks.txt";

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to write tasks to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read tasks from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One task per line. Embedded line breaks become spaces so every task stays on its own line.
pub fn render_lines(tasks: &[String]) -> String {
    let mut out = String::new();
    for task in tasks {
        let flattened: String = task
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        out.push_str(&flattened);
        out.push('\n');
    }
    out
}

pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

pub fn export_tasks(path: &Path, tasks: &[String]) -> Result<usize, TransferError> {
    fs::write(path, render_lines(tasks)).map_err(|source| TransferError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), count = tasks.len(), "exported tasks");
    Ok(tasks.len())
}

pub fn read_tasks(path: &Path) -> Result<Vec<String>, TransferError> {
    let text = fs::read_to_string(path).map_err(|source| TransferError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_lines(&text))
}

/// Replace `category` with the contents of `path` and persist it right away.
///
/// A read failure leaves the store untouched.
pub fn import_tasks(
    service: &mut TasksService,
    store: &TaskStore,
    category: Category,
    path: &Path,
) -> Result<MutationOutcome, TransferError> {
    let tasks = read_tasks(path)?;
    tracing::info!(path = %path.display(), count = tasks.len(), %category, "importing tasks");
    Ok(service.apply(store, category, Intent::Replace(tasks)))
}
