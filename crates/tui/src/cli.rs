use std::path::PathBuf;

use clap::{value_parser, Args, Parser, Subcommand};

use crate::model::Category;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "todolist",
    version,
    about = "Three-category to-do list with drag-to-reorder, for the terminal.",
    after_help = "Examples:\n  todolist                 Launch the TUI (same as `todolist tui`)\n  todolist add -c work Send the report\n  todolist move 3 1\n  todolist export -c other ~/tasks.txt"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the tracing filter (e.g. "info", "todolist_core=debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the terminal UI (default command)
    Tui,
    /// Print the tasks of a category
    List(ListArgs),
    /// Append a task to a category
    Add(AddArgs),
    /// Remove every task whose text matches exactly
    Delete(DeleteArgs),
    /// Move a task to another position (1-based)
    Move(MoveArgs),
    /// Replace the text of a task (1-based position)
    Edit(EditArgs),
    /// Write a category to a text file, one task per line
    Export(ExportArgs),
    /// Replace a category with the lines of a text file
    Import(ImportArgs),
    /// Print a mailto: link carrying the category as a backup
    Email(CategoryArg),
}

#[derive(Args, Debug, Clone, Copy)]
pub struct CategoryArg {
    /// Category to operate on
    #[arg(short, long, value_enum, default_value_t = Category::Personal)]
    pub category: Category,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: CategoryArg,

    /// Emit the tasks as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[command(flatten)]
    pub target: CategoryArg,

    /// Task text; words are joined with spaces
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: CategoryArg,

    /// Exact task text to remove; words are joined with spaces
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct MoveArgs {
    #[command(flatten)]
    pub target: CategoryArg,

    #[arg(value_name = "FROM", value_parser = value_parser!(u64).range(1..))]
    pub from: u64,

    #[arg(value_name = "TO", value_parser = value_parser!(u64).range(1..))]
    pub to: u64,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    #[command(flatten)]
    pub target: CategoryArg,

    #[arg(value_name = "POSITION", value_parser = value_parser!(u64).range(1..))]
    pub position: u64,

    /// Replacement text; words are joined with spaces
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub target: CategoryArg,

    #[arg(value_name = "PATH", default_value = todolist_core::transfer::DEFAULT_EXPORT_FILE)]
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    #[command(flatten)]
    pub target: CategoryArg,

    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}
