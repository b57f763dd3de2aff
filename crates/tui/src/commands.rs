use std::fmt;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Result};

use crate::cli::{AddArgs, CliCommand, DeleteArgs, EditArgs, ListArgs, MoveArgs};
use crate::config::AppConfig;
use crate::core::commands as core_commands;
use crate::core::mail::MailDraft;
use crate::core::mutation::Intent;
use crate::model::Category;

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::List(args) => handle_list(config, &args, &mut writer),
        CliCommand::Add(args) => handle_add(config, &args, &mut writer),
        CliCommand::Delete(args) => handle_delete(config, &args, &mut writer),
        CliCommand::Move(args) => handle_move(config, &args, &mut writer),
        CliCommand::Edit(args) => handle_edit(config, &args, &mut writer),
        CliCommand::Export(args) => {
            handle_export(config, args.target.category, &args.path, &mut writer)
        }
        CliCommand::Import(args) => {
            handle_import(config, args.target.category, &args.path, &mut writer)
        }
        CliCommand::Email(args) => handle_email(config, args.category, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_list<W: Write>(config: &AppConfig, args: &ListArgs, mut writer: W) -> Result<()> {
    let category = args.target.category;
    let tasks = core_commands::list_tasks(config, category)?;
    if args.json {
        let payload = serde_json::json!({ "category": category, "tasks": tasks });
        writeln!(writer, "{}", serde_json::to_string_pretty(&payload)?)?;
        return Ok(());
    }

    if tasks.is_empty() {
        writeln!(writer, "No {} tasks", category.label())?;
        return Ok(());
    }
    for (position, task) in tasks.iter().enumerate() {
        writeln!(writer, "{:>3}. {}", position + 1, task)?;
    }
    Ok(())
}

fn handle_add<W: Write>(config: &AppConfig, args: &AddArgs, mut writer: W) -> Result<()> {
    let category = args.target.category;
    let text = args.text.join(" ");
    let store = core_commands::apply_intent(config, category, Intent::Add(text))?;
    let tasks = store.tasks(category);
    if let Some(added) = tasks.last() {
        writeln!(
            writer,
            "Added to {} #{}: {}",
            category.label(),
            tasks.len(),
            added
        )?;
    }
    Ok(())
}

fn handle_delete<W: Write>(config: &AppConfig, args: &DeleteArgs, mut writer: W) -> Result<()> {
    let category = args.target.category;
    let text = args.text.join(" ");
    let before = core_commands::list_tasks(config, category)?.len();
    let store = core_commands::apply_intent(config, category, Intent::Delete(text.clone()))?;
    let removed = before.saturating_sub(store.tasks(category).len());

    writeln!(writer, "{}", SummaryLine::deleted(removed))?;
    if removed == 0 {
        writeln!(writer, "Not found: {}", text)?;
    }
    Ok(())
}

fn handle_move<W: Write>(config: &AppConfig, args: &MoveArgs, mut writer: W) -> Result<()> {
    let category = args.target.category;
    let from = to_index(args.from)?;
    let to = to_index(args.to)?;
    let store = core_commands::apply_intent(config, category, Intent::Reorder { from, to })?;
    if let Some(task) = store.tasks(category).get(to) {
        writeln!(writer, "Moved '{}' to position {}", task, args.to)?;
    }
    Ok(())
}

fn handle_edit<W: Write>(config: &AppConfig, args: &EditArgs, mut writer: W) -> Result<()> {
    let category = args.target.category;
    let index = to_index(args.position)?;
    let intent = Intent::Edit {
        index,
        text: args.text.join(" "),
    };
    let store = core_commands::apply_intent(config, category, intent)?;
    if let Some(task) = store.tasks(category).get(index) {
        writeln!(writer, "Updated #{}: {}", args.position, task)?;
    }
    Ok(())
}

fn handle_export<W: Write>(
    config: &AppConfig,
    category: Category,
    path: &Path,
    mut writer: W,
) -> Result<()> {
    let count = core_commands::export_category(config, category, path)?;
    writeln!(
        writer,
        "Exported {} {} to {}",
        count,
        plural(count),
        path.display()
    )?;
    Ok(())
}

fn handle_import<W: Write>(
    config: &AppConfig,
    category: Category,
    path: &Path,
    mut writer: W,
) -> Result<()> {
    let store = core_commands::import_category(config, category, path)?;
    let count = store.tasks(category).len();
    writeln!(
        writer,
        "Imported {} {} into {}",
        count,
        plural(count),
        category.label()
    )?;
    Ok(())
}

fn handle_email<W: Write>(config: &AppConfig, category: Category, mut writer: W) -> Result<()> {
    let tasks = core_commands::list_tasks(config, category)?;
    writeln!(writer, "{}", MailDraft::backup(category, &tasks).to_mailto())?;
    Ok(())
}

fn to_index(position: u64) -> Result<usize> {
    let position = usize::try_from(position)?;
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow!("positions start at 1"))
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "task"
    } else {
        "tasks"
    }
}

enum SummaryLine {
    Deleted(usize),
    NoneDeleted,
}

impl SummaryLine {
    fn deleted(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Deleted(count)
        } else {
            SummaryLine::NoneDeleted
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::Deleted(count) => write!(f, "Deleted {} {}", count, plural(*count)),
            SummaryLine::NoneDeleted => write!(f, "No tasks deleted"),
        }
    }
}
