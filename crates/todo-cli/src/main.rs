//! `todo` - command-line front end for todo-core.
//!
//! One-shot subcommands load the list, apply a single change, and save it
//! back. `todo shell` keeps the list in memory and saves only on request.

mod render;
mod shell;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use todo_core::{TodoConfig, TodoError, TodoList};

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Keep a simple task list in a text file")]
struct Cli {
    /// Task file to read and write
    #[arg(short, long, global = true, default_value = todo_core::config::DEFAULT_STORE_FILE)]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show all items
    List {
        /// Print the items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an item; words are joined with spaces
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete items by index
    Delete {
        #[arg(required = true, num_args = 1..)]
        indices: Vec<usize>,
    },
    /// Toggle completion of items by index
    Toggle {
        #[arg(required = true, num_args = 1..)]
        indices: Vec<usize>,
    },
    /// Remove all completed items
    ClearCompleted,
    /// Interactive session reading commands from stdin
    Shell,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = TodoConfig::with_store_path(cli.file);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(&config, cli.command, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("todo: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Todo(#[from] TodoError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn run<W: Write>(config: &TodoConfig, command: Command, out: &mut W) -> Result<(), CliError> {
    let mut list = TodoList::open(config)?;

    match command {
        Command::List { json: true } => render::write_json(out, list.items())?,
        Command::List { json: false } => render::write_items(out, list.items())?,
        Command::Add { text } => {
            let text = text.join(" ");
            if list.add(Some(text.as_str())) {
                list.save()?;
                let index = list.len() - 1;
                if let Some(item) = list.get(index) {
                    writeln!(out, "Added {index}: {}", item.text)?;
                }
            } else {
                writeln!(out, "Nothing to add")?;
            }
        }
        Command::Delete { indices } => {
            let removed = list.delete_indices(&indices)?;
            list.save()?;
            for item in removed {
                writeln!(out, "Deleted: {}", item.text)?;
            }
        }
        Command::Toggle { indices } => {
            list.toggle(&indices)?;
            list.save()?;
            render::write_items(out, list.items())?;
        }
        Command::ClearCompleted => {
            let removed = list.clear_completed();
            if removed > 0 {
                list.save()?;
            }
            writeln!(out, "Removed {removed} completed item(s)")?;
        }
        Command::Shell => {
            let stdin = io::stdin();
            shell::run(&mut list, stdin.lock(), out)?;
        }
    }

    Ok(())
}
