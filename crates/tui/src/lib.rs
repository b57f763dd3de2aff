pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use todolist_core as core;
pub use todolist_core::model;
pub use todolist_core::persistence;
pub use todolist_core::transfer;

pub use todolist_core::AppConfig;
