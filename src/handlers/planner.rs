use anyhow::Result;

use crate::cli::{input, PlanCommands};
use crate::context::AppContext;
use crate::domain::planner::PLANNER_KEY;
use crate::domain::{Clock, KeyValueStore, PlannerField, PlannerPage, SystemClock};
use crate::presentation::format_day;

fn load_page<S: KeyValueStore>(store: &S) -> PlannerPage {
    store.get_json(PLANNER_KEY).unwrap_or_default()
}

fn save_page<S: KeyValueStore>(store: &S, page: &PlannerPage) {
    if !store.set_json(PLANNER_KEY, page) {
        println!("⚠ Could not save the page on this device; it will be lost after this run.");
    }
}

fn print_page(page: &PlannerPage) {
    println!("\nToday’s Page");
    println!("{}", format_day(SystemClock.now_ms()));

    for field in PlannerField::ALL {
        let value = page.get(field);
        println!("\n{}", field.label());
        if value.trim().is_empty() {
            println!("  ({})", field.placeholder());
        } else {
            for line in value.lines() {
                println!("  {}", line);
            }
        }
    }

    println!("\nWhen you’re done, close the terminal like a ritual. You showed up today.");
}

pub fn handle_plan(subcommand: Option<PlanCommands>, ctx: &AppContext) -> Result<()> {
    let store = &*ctx.store;
    let mut page = load_page(store);

    match subcommand.unwrap_or(PlanCommands::Show) {
        PlanCommands::Show => print_page(&page),
        PlanCommands::Set { field, text } => {
            page.set(field, text.join(" "));
            save_page(store, &page);
            println!("✓ {} updated", field.label());
        }
        PlanCommands::Edit => {
            let updated = input::prompt_planner_page(&page)?;
            save_page(store, &updated);
            print_page(&updated);
        }
        PlanCommands::Reset => {
            if page.is_empty() {
                println!("Today's page is already empty.");
                return Ok(());
            }
            if !input::prompt_confirm_reset_plan()? {
                println!("Reset cancelled.");
                return Ok(());
            }
            store.remove(PLANNER_KEY);
            println!("✓ Today's page cleared");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;

    #[test]
    fn test_page_survives_store_round_trip() {
        let store = MemoryStore::new();
        assert!(load_page(&store).is_empty());

        let mut page = PlannerPage::default();
        page.set(PlannerField::Focus, "Finish the draft");
        page.set(PlannerField::Priority1, "Call the bank");
        save_page(&store, &page);

        assert_eq!(load_page(&store), page);
    }

    #[test]
    fn test_corrupt_page_loads_empty() {
        let store = MemoryStore::new();
        store.set(PLANNER_KEY, "[1, 2");
        assert!(load_page(&store).is_empty());
    }
}
