use anyhow::{Context, Result};
use rand::RngCore;

use crate::cli::input;
use crate::context::AppContext;
use crate::domain::license::unlock;
use crate::domain::{Clock, SessionToken, SystemClock, UnlockRequest};
use crate::infrastructure::GumroadVerifier;
use crate::presentation::format_date_time;

/// Returns the configured secret, generating and saving one on first use.
fn resolve_session_secret(ctx: &mut AppContext) -> Result<String> {
    if let Some(secret) = ctx.config.session_secret() {
        return Ok(secret);
    }

    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    let secret: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();

    ctx.config.session_secret = Some(secret.clone());
    ctx.config
        .save(&ctx.config_dir)
        .context("Failed to save generated session secret")?;
    log::info!("Generated a new session secret");

    Ok(secret)
}

pub fn handle_unlock(key: Option<String>, ctx: &mut AppContext) -> Result<()> {
    let license_key = match key {
        Some(key) => key,
        None => input::prompt_license_key()?,
    };

    let product_id = ctx.config.product_id();
    let secret = resolve_session_secret(ctx)?;
    let verifier = GumroadVerifier::new(ctx.config.increment_uses_count)?;

    println!("🔐 Verifying license...");
    let token = unlock(
        &verifier,
        UnlockRequest {
            product_id: product_id.as_deref(),
            license_key: &license_key,
            secret: secret.as_bytes(),
            now: SystemClock.now_ms(),
        },
    )?;

    ctx.session().save_session(&token)?;

    println!("✓ Unlocked. Welcome to your daily reset.");
    println!(
        "  Session valid until {}",
        format_date_time(token.expires_at(ctx.config.session_max_age_days))
    );
    Ok(())
}

pub fn handle_lock(ctx: &AppContext) -> Result<()> {
    ctx.session().clear_session()?;
    println!("✓ Logged out. Session cleared.");
    Ok(())
}

pub fn handle_status(ctx: &AppContext) -> Result<()> {
    let now = SystemClock.now_ms();

    let Some(raw) = ctx.session().load_token(now)? else {
        println!("🔒 Locked. Run 'dr unlock' with your license key.");
        return Ok(());
    };

    match SessionToken::parse(&raw) {
        Some(token) if !token.is_expired(now, ctx.config.session_max_age_days) => {
            println!("🔓 Unlocked");
            println!("   Since: {}", format_date_time(token.issued_at()));
            println!(
                "   Until: {}",
                format_date_time(token.expires_at(ctx.config.session_max_age_days))
            );
        }
        _ => {
            println!("🔒 Session is no longer valid. Run 'dr unlock' again.");
            return Ok(());
        }
    }

    let journal = ctx.journal();
    println!("   Journal entries: {}", journal.entries().len());
    if journal.draft_text().trim().is_empty() {
        println!("   Draft: empty");
    } else {
        println!(
            "   Draft: {} characters{}",
            journal.draft_text().chars().count(),
            if journal.active_entry_id().is_some() {
                " (editing a saved entry)"
            } else {
                " (not saved as an entry yet)"
            }
        );
    }

    Ok(())
}
