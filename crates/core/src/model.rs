use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Personal,
    Work,
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Personal, Category::Work, Category::Other];

    pub fn id(&self) -> usize {
        match self {
            Category::Personal => 0,
            Category::Work => 1,
            Category::Other => 2,
        }
    }

    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Other => "Other",
        }
    }

    pub fn storage_key(&self) -> &'static str {
        match self {
            Category::Personal => "personal_tasks",
            Category::Work => "work_tasks",
            Category::Other => "other_tasks",
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.id() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.id() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "personal" | "0" => Ok(Category::Personal),
            "work" | "1" => Ok(Category::Work),
            "other" | "others" | "2" => Ok(Category::Other),
            other => Err(anyhow!(
                "Unknown category '{}': expected personal|work|other",
                other
            )),
        }
    }
}

impl ValueEnum for Category {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// Interaction-scoped state. Never persisted; cleared when a dialog is confirmed or dismissed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiFlags {
    pub show_add_dialog: bool,
    pub show_delete_dialog: bool,
    pub show_details_dialog: bool,
    pub task_to_delete: Option<String>,
    pub selected_task: Option<String>,
    pub task_text: String,
    pub edit_index: Option<usize>,
}

impl UiFlags {
    pub fn is_editing(&self) -> bool {
        self.edit_index.is_some()
    }
}

/// Immutable snapshot of every list plus the transient UI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    lists: [Vec<String>; 3],
    selected: Category,
    ui: UiFlags,
}

impl TaskStore {
    pub fn new(personal: Vec<String>, work: Vec<String>, other: Vec<String>) -> Self {
        Self {
            lists: [personal, work, other],
            selected: Category::Personal,
            ui: UiFlags::default(),
        }
    }

    pub fn selected_category(&self) -> Category {
        self.selected
    }

    pub fn current_tasks(&self) -> &[String] {
        self.tasks(self.selected)
    }

    pub fn tasks(&self, category: Category) -> &[String] {
        &self.lists[category.id()]
    }

    pub fn ui(&self) -> &UiFlags {
        &self.ui
    }

    pub fn total_len(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn with_selected(mut self, category: Category) -> Self {
        self.selected = category;
        self
    }

    pub fn with_ui(mut self, ui: UiFlags) -> Self {
        self.ui = ui;
        self
    }

    pub fn map_ui(mut self, update: impl FnOnce(&mut UiFlags)) -> Self {
        update(&mut self.ui);
        self
    }

    pub fn replace_tasks(mut self, category: Category, tasks: Vec<String>) -> Self {
        self.lists[category.id()] = tasks;
        self
    }
}
