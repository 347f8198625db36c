use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Editor, Input, Password};

use crate::domain::{PlannerField, PlannerPage};

pub fn prompt_license_key() -> Result<String> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt("License key")
        .interact()
        .context("Failed to read license key")
}

pub fn prompt_confirm_delete(preview: &str) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete entry \"{}\"?", preview))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

pub fn prompt_confirm_reset_plan() -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Clear today's page?")
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

/// Opens `$EDITOR` on `text`. `None` when the editor was closed without saving.
pub fn edit_text(text: &str) -> Result<Option<String>> {
    Editor::new()
        .require_save(true)
        .edit(text)
        .context("Failed to open editor")
}

pub fn prompt_planner_page(current: &PlannerPage) -> Result<PlannerPage> {
    let mut page = current.clone();

    println!("\nFill in today's page (enter keeps the current value):");

    for field in PlannerField::ALL {
        let value: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} ({})", field.label(), field.placeholder()))
            .with_initial_text(current.get(field))
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read '{}'", field.label()))?;

        page.set(field, value);
    }

    Ok(page)
}
