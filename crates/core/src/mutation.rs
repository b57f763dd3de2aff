//! Pure task mutations. Every function takes a snapshot and returns a new one; nothing here
//! touches storage.

use thiserror::Error;

use crate::model::{Category, TaskStore};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task text cannot be empty")]
    EmptyText,
    #[error("Index {index} is out of range for a list of {len} tasks")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Delete(String),
    Reorder { from: usize, to: usize },
    Edit { index: usize, text: String },
    Replace(Vec<String>),
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Add(_) => "add",
            Intent::Delete(_) => "delete",
            Intent::Reorder { .. } => "reorder",
            Intent::Edit { .. } => "edit",
            Intent::Replace(_) => "replace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub store: TaskStore,
    pub list_changed: bool,
}

impl Applied {
    fn changed(store: TaskStore) -> Self {
        Self {
            store,
            list_changed: true,
        }
    }

    fn unchanged(store: TaskStore) -> Self {
        Self {
            store,
            list_changed: false,
        }
    }
}

pub fn apply(
    store: &TaskStore,
    category: Category,
    intent: Intent,
) -> Result<Applied, ValidationError> {
    match intent {
        Intent::Add(text) => add_task(store, category, &text),
        Intent::Delete(task) => Ok(delete_task(store, category, &task)),
        Intent::Reorder { from, to } => reorder_task(store, category, from, to),
        Intent::Edit { index, text } => edit_task(store, category, &text, index),
        Intent::Replace(tasks) => Ok(replace_tasks(store, category, tasks)),
    }
}

pub fn add_task(
    store: &TaskStore,
    category: Category,
    text: &str,
) -> Result<Applied, ValidationError> {
    let text = require_text(text)?;
    let mut tasks = store.tasks(category).to_vec();
    tasks.push(text.to_string());

    let next = store
        .clone()
        .replace_tasks(category, tasks)
        .map_ui(|ui| {
            ui.task_text.clear();
            ui.show_add_dialog = false;
        });
    Ok(Applied::changed(next))
}

/// Removes every task equal to `task`. An absent task still closes the delete dialog.
pub fn delete_task(store: &TaskStore, category: Category, task: &str) -> Applied {
    let current = store.tasks(category);
    let remaining: Vec<String> = current.iter().filter(|t| *t != task).cloned().collect();
    let list_changed = remaining.len() != current.len();

    let next = store
        .clone()
        .replace_tasks(category, remaining)
        .map_ui(|ui| {
            ui.show_delete_dialog = false;
            ui.task_to_delete = None;
        });

    if list_changed {
        Applied::changed(next)
    } else {
        Applied::unchanged(next)
    }
}

pub fn reorder_task(
    store: &TaskStore,
    category: Category,
    from: usize,
    to: usize,
) -> Result<Applied, ValidationError> {
    let current = store.tasks(category);
    check_index(from, current.len())?;
    check_index(to, current.len())?;
    if from == to {
        return Ok(Applied::unchanged(store.clone()));
    }

    let mut tasks = current.to_vec();
    let item = tasks.remove(from);
    tasks.insert(to, item);
    Ok(Applied::changed(store.clone().replace_tasks(category, tasks)))
}

pub fn edit_task(
    store: &TaskStore,
    category: Category,
    new_text: &str,
    index: usize,
) -> Result<Applied, ValidationError> {
    let new_text = require_text(new_text)?;
    let current = store.tasks(category);
    check_index(index, current.len())?;

    let mut tasks = current.to_vec();
    tasks[index] = new_text.to_string();

    let next = store
        .clone()
        .replace_tasks(category, tasks)
        .map_ui(|ui| {
            ui.task_text.clear();
            ui.show_add_dialog = false;
            ui.edit_index = None;
        });
    Ok(Applied::changed(next))
}

/// Replaces a whole category, dropping blank entries.
pub fn replace_tasks(store: &TaskStore, category: Category, tasks: Vec<String>) -> Applied {
    let tasks: Vec<String> = tasks
        .into_iter()
        .filter(|task| !task.trim().is_empty())
        .collect();
    Applied::changed(store.clone().replace_tasks(category, tasks))
}

fn require_text(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(trimmed)
}

fn check_index(index: usize, len: usize) -> Result<(), ValidationError> {
    if index < len {
        Ok(())
    } else {
        Err(ValidationError::IndexOutOfRange { index, len })
    }
}
