use anyhow::{Context, Result};

use crate::cli::input;
use crate::context::AppContext;
use crate::domain::{AutosaveController, Clock, CommitOutcome, Entry, KeyValueStore};
use crate::presentation::{format_date_time, header_label, preview, resolve_entry, short_id};

pub(crate) fn find_entry_id<S: KeyValueStore, C: Clock>(
    journal: &AutosaveController<S, C>,
    query: &str,
) -> Result<String> {
    let entries = journal.entries().list();
    resolve_entry(&entries, query)
        .map(|e| e.id.clone())
        .with_context(|| format!("No entry matches '{}'. Use 'dr list' to see entries.", query))
}

pub(crate) fn print_entry_list(entries: &[&Entry]) {
    if entries.is_empty() {
        println!("No entries yet.");
        return;
    }

    println!("\nSaved entries:");
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "  {:>2}. [{}] {}",
            i + 1,
            short_id(&entry.id),
            format_date_time(entry.updated_at)
        );
        for line in preview(&entry.text, 2, 72).lines() {
            println!("      {}", line);
        }
    }
}

pub(crate) fn describe_commit(outcome: &CommitOutcome) -> String {
    match outcome {
        CommitOutcome::DraftOnly => "draft saved".to_string(),
        CommitOutcome::Created(id) => format!("saved as new entry [{}]", short_id(id)),
        CommitOutcome::Amended(id) => format!("entry [{}] updated", short_id(id)),
    }
}

/// Commits edited text for the open entry. Unchanged text is not committed, so
/// the entry keeps its `updated_at` and list position.
pub(crate) fn apply_edit<S: KeyValueStore, C: Clock>(
    journal: &mut AutosaveController<S, C>,
    text: String,
) -> Option<CommitOutcome> {
    let unchanged = journal
        .active_entry()
        .is_some_and(|entry| entry.text == text.trim());
    if unchanged {
        return None;
    }

    journal.set_text(text);
    journal.flush()
}

pub fn handle_list(ctx: &AppContext) -> Result<()> {
    let journal = ctx.journal();
    print_entry_list(&journal.entries().list());
    Ok(())
}

pub fn handle_show(query: &str, ctx: &AppContext) -> Result<()> {
    let journal = ctx.journal();
    let id = find_entry_id(&journal, query)?;
    let entry = journal
        .entries()
        .get(&id)
        .with_context(|| format!("Entry '{}' not found", id))?;

    println!("\nEntry: {}", entry.id);
    println!("Started: {}", format_date_time(entry.created_at));
    println!("Updated: {}", format_date_time(entry.updated_at));
    println!("\n{}", entry.text);
    Ok(())
}

pub fn handle_new(ctx: &AppContext) -> Result<()> {
    let mut journal = ctx.journal();
    journal.new_entry();
    println!("✓ Ready for a new entry. Run 'dr write' to start.");
    Ok(())
}

pub fn handle_edit(query: &str, ctx: &AppContext) -> Result<()> {
    let mut journal = ctx.journal();
    let id = find_entry_id(&journal, query)?;
    journal.open(&id)?;

    let Some(text) = input::edit_text(journal.draft_text())? else {
        println!("Editor closed without saving. Entry unchanged.");
        return Ok(());
    };

    match apply_edit(&mut journal, text) {
        Some(outcome) => println!("✓ {}", describe_commit(&outcome)),
        None => println!("No changes. Entry unchanged."),
    }
    Ok(())
}

pub fn handle_rm(query: &str, yes: bool, ctx: &AppContext) -> Result<()> {
    let mut journal = ctx.journal();
    let id = find_entry_id(&journal, query)?;

    if !yes {
        let text = journal
            .entries()
            .get(&id)
            .map(|e| preview(&e.text, 1, 40))
            .unwrap_or_default();
        if !input::prompt_confirm_delete(&text)? {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let was_active = journal.active_entry_id() == Some(id.as_str());
    if journal.delete(&id) {
        println!("✓ Entry [{}] deleted", short_id(&id));
        if was_active {
            println!("  It was open, so the draft was cleared.");
        }
    } else {
        println!("⚠ Entry [{}] was already gone", short_id(&id));
    }
    Ok(())
}

pub fn handle_draft(ctx: &AppContext) -> Result<()> {
    let journal = ctx.journal();
    println!(
        "\n{}",
        header_label(journal.active_entry_id(), journal.active_entry())
    );

    if journal.draft_text().is_empty() {
        println!("\n(empty draft)");
    } else {
        println!("\n{}", journal.draft_text());
    }
    Ok(())
}
