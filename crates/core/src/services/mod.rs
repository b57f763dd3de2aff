pub mod tasks;

pub use tasks::{Change, MutationOutcome, TasksService};
