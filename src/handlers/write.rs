use anyhow::Result;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::context::AppContext;
use crate::domain::audio::format_time;
use crate::domain::{AutosaveController, Clock, KeyValueStore, SystemClock};
use crate::handlers::journal::{describe_commit, find_entry_id, print_entry_list};
use crate::presentation::header_label;

enum InputEvent {
    Line(String),
    Eof,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SessionAction {
    Continue,
    Quit,
}

const HELP: &str = "\
Type to write; every line is added to the draft and auto-saved.
  :new           start a new entry
  :open <entry>  continue an entry (list position, id or id prefix)
  :rm <entry>    delete an entry
  :list          list saved entries
  :draft         show the current draft
  :clear         empty the draft
  :help          show this help
  :quit          save and leave
  :quit!         leave without saving the last unsaved changes
Start a line with '::' to write a literal ':'.";

fn append_line(draft: &str, line: &str) -> String {
    if draft.is_empty() {
        line.to_string()
    } else {
        format!("{}\n{}", draft, line)
    }
}

/// Applies one line of user input to the journal.
pub(crate) fn apply_line<S: KeyValueStore, C: Clock>(
    journal: &mut AutosaveController<S, C>,
    line: &str,
) -> Result<SessionAction> {
    if let Some(literal) = line.strip_prefix("::") {
        let text = append_line(journal.draft_text(), &format!(":{}", literal));
        journal.set_text(text);
        return Ok(SessionAction::Continue);
    }

    let Some(command) = line.strip_prefix(':') else {
        let text = append_line(journal.draft_text(), line);
        journal.set_text(text);
        return Ok(SessionAction::Continue);
    };

    let (name, arg) = match command.trim().split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match name {
        "q" | "quit" | "exit" => return Ok(SessionAction::Quit),
        "q!" | "quit!" => {
            journal.cancel();
            return Ok(SessionAction::Quit);
        }
        "new" => {
            journal.new_entry();
            println!("── {}", header_label(None, None));
        }
        "open" => match find_entry_id(journal, arg) {
            Ok(id) => {
                journal.open(&id)?;
                println!(
                    "── {}",
                    header_label(journal.active_entry_id(), journal.active_entry())
                );
                println!("{}", journal.draft_text());
            }
            Err(e) => println!("⚠ {}", e),
        },
        "rm" | "delete" => match find_entry_id(journal, arg) {
            Ok(id) => {
                journal.delete(&id);
                println!("✓ Entry deleted");
                if journal.active_entry_id().is_none() && journal.draft_text().is_empty() {
                    println!("── {}", header_label(None, None));
                }
            }
            Err(e) => println!("⚠ {}", e),
        },
        "list" | "ls" => print_entry_list(&journal.entries().list()),
        "draft" => {
            println!(
                "── {}",
                header_label(journal.active_entry_id(), journal.active_entry())
            );
            println!("{}", journal.draft_text());
        }
        "clear" => journal.set_text(""),
        "help" | "h" => println!("{}", HELP),
        other => println!("⚠ Unknown command ':{}'. Type :help for commands.", other),
    }

    Ok(SessionAction::Continue)
}

fn spawn_stdin_reader() -> mpsc::Receiver<InputEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(InputEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    log::warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
        let _ = tx.send(InputEvent::Eof);
    });
    rx
}

pub fn handle_write(open: Option<String>, new: bool, ctx: &AppContext) -> Result<()> {
    let mut journal = ctx.journal();

    if new {
        journal.new_entry();
    } else if let Some(query) = open {
        let id = find_entry_id(&journal, &query)?;
        journal.open(&id)?;
    }

    println!("\nOne Page Journal");
    println!(
        "── {}",
        header_label(journal.active_entry_id(), journal.active_entry())
    );
    if !journal.draft_text().is_empty() {
        println!("{}", journal.draft_text());
    }
    println!("(type :help for commands, :quit or Ctrl-D to finish)\n");

    let started = SystemClock.now_ms();
    let rx = spawn_stdin_reader();

    loop {
        let event = match journal.time_until_commit() {
            Some(wait) => rx.recv_timeout(Duration::from_millis(wait)),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match event {
            Ok(InputEvent::Line(line)) => {
                if apply_line(&mut journal, &line)? == SessionAction::Quit {
                    break;
                }
            }
            Ok(InputEvent::Eof) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        if let Some(outcome) = journal.tick() {
            eprintln!("  · {}", describe_commit(&outcome));
        }
    }

    if let Some(outcome) = journal.flush() {
        eprintln!("  · {}", describe_commit(&outcome));
    }
    let elapsed = (SystemClock.now_ms() - started) as f64 / 1000.0;
    println!(
        "✓ All changes saved after {} of writing. You showed up today.",
        format_time(elapsed)
    );
    Ok(())
}
