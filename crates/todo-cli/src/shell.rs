//! Interactive session: one command per input line.
//!
//! Saving is explicit here. The list is redrawn whenever the core reports a
//! change, so commands themselves only print status messages.

use std::io::{self, BufRead, Write};

use todo_core::event_bus::{EventReceiver, TryRecvError};
use todo_core::{BroadcastEvent, TodoList};

use crate::render::write_items;

const HELP: &str = "\
commands:
  add <text>         add an item
  del <i> [i ...]    delete items by index
  toggle <i> [i ...] toggle completion
  clear              remove completed items
  list               show the list
  save               write the list to disk
  load               replace the list from disk
  help               show this message
  quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(String),
    Delete(Vec<usize>),
    Toggle(Vec<usize>),
    Clear,
    List,
    Save,
    Load,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" | "a" => ShellCommand::Add(rest.to_string()),
        "del" | "delete" | "rm" => ShellCommand::Delete(parse_indices(rest)?),
        "toggle" | "t" => ShellCommand::Toggle(parse_indices(rest)?),
        "clear" => ShellCommand::Clear,
        "list" | "ls" => ShellCommand::List,
        "save" => ShellCommand::Save,
        "load" => ShellCommand::Load,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other}")),
    };

    Ok(Some(command))
}

/// Parse indices separated by spaces and/or commas.
pub fn parse_indices(input: &str) -> Result<Vec<usize>, String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| format!("not an index: {part}"))
        })
        .collect()
}

/// Run the session until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(list: &mut TodoList, input: R, out: &mut W) -> io::Result<()> {
    let mut changes = list.subscribe();
    write_items(out, list.items())?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{message} (try 'help')")?;
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }
        execute(list, command, out)?;

        if drain_changes(&mut changes) {
            write_items(out, list.items())?;
        }
    }

    Ok(())
}

fn execute<W: Write>(list: &mut TodoList, command: ShellCommand, out: &mut W) -> io::Result<()> {
    let path = display_path(list);
    match command {
        ShellCommand::Add(text) => {
            list.add(Some(text.as_str()));
        }
        ShellCommand::Delete(indices) => {
            if let Err(e) = list.delete_indices(&indices) {
                writeln!(out, "Delete failed: {e}")?;
            }
        }
        ShellCommand::Toggle(indices) => {
            if let Err(e) = list.toggle(&indices) {
                writeln!(out, "Toggle failed: {e}")?;
            }
        }
        ShellCommand::Clear => {
            list.clear_completed();
        }
        ShellCommand::List => write_items(out, list.items())?,
        ShellCommand::Save => match list.save() {
            Ok(()) => writeln!(out, "Saved to {path}")?,
            Err(e) => writeln!(out, "Save failed: {e}")?,
        },
        ShellCommand::Load => match list.load() {
            Ok(()) => writeln!(out, "Loaded from {path}")?,
            Err(e) => writeln!(out, "Load failed: {e}")?,
        },
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Quit => {}
    }
    Ok(())
}

/// Consume pending change events; true if any arrived.
fn drain_changes(rx: &mut EventReceiver) -> bool {
    let mut changed = false;
    loop {
        match rx.try_recv() {
            Ok(event) => {
                log::debug!("change event: {}", describe(&event));
                changed = true;
            }
            Err(TryRecvError::Lagged(_)) => changed = true,
            Err(_) => return changed,
        }
    }
}

fn describe(event: &BroadcastEvent) -> String {
    match event.as_change() {
        Some(change) => format!("{:?} ({} items)", change.kind, change.len),
        None => event.event_type.clone(),
    }
}

fn display_path(list: &TodoList) -> String {
    std::env::current_dir()
        .map(|dir| dir.join(list.path()))
        .unwrap_or_else(|_| list.path().to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use todo_core::TodoConfig;

    mod parse {
        use super::*;

        #[test]
        fn blank_line_is_none() {
            assert_eq!(parse_command("   "), Ok(None));
        }

        #[test]
        fn add_keeps_rest_of_line() {
            assert_eq!(
                parse_command("add  buy | milk "),
                Ok(Some(ShellCommand::Add("buy | milk".to_string())))
            );
        }

        #[test]
        fn indices_accept_spaces_and_commas() {
            assert_eq!(
                parse_command("del 2, 0 3"),
                Ok(Some(ShellCommand::Delete(vec![2, 0, 3])))
            );
            assert_eq!(
                parse_command("TOGGLE 1"),
                Ok(Some(ShellCommand::Toggle(vec![1])))
            );
        }

        #[test]
        fn bad_index_is_error() {
            assert_eq!(parse_indices("1 x"), Err("not an index: x".to_string()));
            assert!(parse_command("del -1").is_err());
        }

        #[test]
        fn unknown_command_is_error() {
            assert_eq!(
                parse_command("frobnicate"),
                Err("unknown command: frobnicate".to_string())
            );
        }
    }

    mod session {
        use super::*;

        fn run_script(list: &mut TodoList, script: &str) -> String {
            let mut out = Vec::new();
            run(list, script.as_bytes(), &mut out).unwrap();
            String::from_utf8(out).unwrap()
        }

        #[test]
        fn mutations_redraw_and_save_is_explicit() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("todos.txt");
            let mut list = TodoList::new(&TodoConfig::with_store_path(&path));

            let output = run_script(&mut list, "add A\nadd B\ntoggle 0\n");

            assert!(output.contains("0: [✓] A"));
            assert!(output.contains("1: [ ] B"));
            assert!(!path.exists());

            let output = run_script(&mut list, "save\nquit\nadd never\n");
            assert!(output.contains("Saved to"));
            assert_eq!(fs::read_to_string(&path).unwrap(), "1|A\n0|B\n");
            assert_eq!(list.len(), 2);
        }

        #[test]
        fn errors_are_reported_not_fatal() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("missing").join("todos.txt");
            let mut list = TodoList::new(&TodoConfig::with_store_path(&path));

            let output = run_script(&mut list, "add A\ndel 4\nsave\nbogus\n");

            assert!(output.contains("Delete failed: Index 4 is out of range"));
            assert!(output.contains("Save failed: Failed to write"));
            assert!(output.contains("unknown command: bogus"));
            assert_eq!(list.len(), 1);
        }

        #[test]
        fn load_replaces_list() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("todos.txt");
            fs::write(&path, "0|from disk\n").unwrap();
            let mut list = TodoList::new(&TodoConfig::with_store_path(&path));

            let output = run_script(&mut list, "add scratch\nload\n");

            assert!(output.contains("Loaded from"));
            assert_eq!(list.items(), &[todo_core::Item::new("from disk")]);
        }
    }
}
