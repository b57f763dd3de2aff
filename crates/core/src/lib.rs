pub mod commands;
pub mod config;
pub mod drag;
pub mod mail;
pub mod model;
pub mod mutation;
pub mod notify;
pub mod persistence;
pub mod services;
pub mod transfer;

pub use config::AppConfig;
pub use drag::{DragController, DragState, ReorderIntent, Viewport, VisibleRow};
pub use model::*;
pub use mutation::{Intent, ValidationError};
pub use persistence::{PersistenceError, PersistenceGateway};
pub use services::{Change, MutationOutcome, TasksService};
