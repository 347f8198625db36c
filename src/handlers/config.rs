use anyhow::Result;
use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config::{expand_home, Config};

pub fn handle_config(subcommand: Option<ConfigCommands>, config_dir: &Path) -> Result<()> {
    let mut config = Config::load(config_dir)?;

    match subcommand {
        None => {
            println!("\nCurrent Configuration:");
            println!("  Data Dir: {}", config.data_dir.display());
            println!("  Audio Dir: {}", config.audio_dir.display());
            println!("  Autosave Delay: {} ms", config.autosave_delay_ms);
            match config.storage_quota() {
                Some(bytes) => println!("  Storage Quota: {} bytes", bytes),
                None => println!("  Storage Quota: unlimited"),
            }
            println!(
                "  Session Max Age: {} days",
                config.session_max_age_days
            );
            println!(
                "  Product Id: {}",
                config.product_id().unwrap_or_else(|| "(not set)".to_string())
            );
            println!(
                "  Session Secret: {}",
                if config.session_secret().is_some() {
                    "set"
                } else {
                    "(generated on first unlock)"
                }
            );
        }
        Some(ConfigCommands::DataDir { path }) => {
            let expanded_path = expand_home(&path)?;
            config.data_dir = expanded_path.clone();
            config.save(config_dir)?;
            println!("✓ Data directory updated to: {}", expanded_path.display());
        }
        Some(ConfigCommands::AudioDir { path }) => {
            let expanded_path = expand_home(&path)?;
            config.audio_dir = expanded_path.clone();
            config.save(config_dir)?;
            println!("✓ Audio directory updated to: {}", expanded_path.display());
        }
        Some(ConfigCommands::AutosaveDelay { millis }) => {
            if millis == 0 {
                anyhow::bail!("Autosave delay must be at least 1 ms");
            }
            config.autosave_delay_ms = millis;
            config.save(config_dir)?;
            println!("✓ Autosave delay updated to: {} ms", millis);
        }
        Some(ConfigCommands::StorageQuota { bytes }) => {
            config.storage_quota_bytes = bytes;
            config.save(config_dir)?;
            if bytes == 0 {
                println!("✓ Storage quota removed");
            } else {
                println!("✓ Storage quota updated to: {} bytes", bytes);
            }
        }
        Some(ConfigCommands::ProductId { id }) => {
            let id = id.trim().to_string();
            if id.is_empty() {
                anyhow::bail!("Product id cannot be empty");
            }
            config.gumroad_product_id = Some(id.clone());
            config.save(config_dir)?;
            println!("✓ Product id updated to: {}", id);
        }
        Some(ConfigCommands::SessionMaxAge { days }) => {
            if days == 0 {
                anyhow::bail!("Session lifetime must be at least 1 day");
            }
            config.session_max_age_days = days;
            config.save(config_dir)?;
            println!("✓ Session lifetime updated to: {} days", days);
        }
    }

    Ok(())
}
