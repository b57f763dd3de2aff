pub use todolist_tui::cli;
pub use todolist_tui::commands;
pub use todolist_tui::config;
pub use todolist_tui::logging;
pub use todolist_tui::tui;
pub use todolist_tui::AppConfig;

pub use todolist_core as core;
pub use todolist_core::model;
pub use todolist_core::persistence;
pub use todolist_core::transfer;
