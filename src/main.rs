use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = todolist::cli::Cli::parse();
    let config = todolist::config::from_cli(&cli)?;
    let log_filter = cli.log_filter.as_deref();

    match cli.command.clone() {
        Some(todolist::cli::CliCommand::Tui) | None => {
            let _guard = todolist::logging::init_file_logging(&config, log_filter)?;
            todolist::tui::run(config)?;
        }
        Some(command) => {
            todolist::logging::init_stderr_logging(log_filter)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            todolist::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
