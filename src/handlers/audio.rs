use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::AudioCommands;
use crate::context::AppContext;
use crate::config::expand_home;
use crate::domain::audio::{AudioLibrary, Track, TrackSource, UploadOutcome};
use crate::domain::KeyValueStore;

fn print_tracks<S: KeyValueStore>(library: &AudioLibrary<S>) {
    let selected = library.selected().map(|t| t.id);
    let prefs = library.preferences();

    println!("\nFocus audio:");
    for track in library.tracks() {
        let marker = if selected.as_deref() == Some(track.id.as_str()) {
            "▶"
        } else {
            " "
        };
        let hint = track
            .duration_hint
            .as_deref()
            .map(|h| format!(" ({})", h))
            .unwrap_or_default();
        println!("  {} {:<16} {}{}", marker, track.id, track.title, hint);
        if let TrackSource::File(path) = &track.source {
            if !Path::new(path).exists() {
                println!("      ⚠ missing file: {}", path);
            }
        }
    }
    println!("\nVolume: {:.0}%", prefs.volume * 100.0);
}

fn describe_track(track: &Track) -> String {
    format!("{} [{}]", track.title, track.id)
}

pub fn handle_audio(subcommand: AudioCommands, ctx: &AppContext) -> Result<()> {
    let mut library = AudioLibrary::new(ctx.store.clone(), &ctx.config.audio_dir);

    match subcommand {
        AudioCommands::List => print_tracks(&library),
        AudioCommands::Add { file } => {
            let path = expand_home(&file)?;
            let bytes = fs::read(&path)
                .with_context(|| format!("Failed to read audio file: {}", path.display()))?;

            match library.upload(&path, &bytes) {
                UploadOutcome::Stored(track) => {
                    println!("✓ Saved {}", describe_track(&track));
                }
                UploadOutcome::Temporary { track, reason } => {
                    println!("⚠ {}", reason);
                    println!("  Using {} for this run only.", describe_track(&track));
                }
            }
        }
        AudioCommands::Clear => {
            if library.clear() {
                println!("✓ Your audio was removed");
            } else {
                println!("No stored audio to remove.");
            }
        }
        AudioCommands::Export { id, output } => {
            let bytes = library.stored_bytes(&id)?;
            let path = expand_home(&output)?;
            if path.exists() {
                bail!("Output file already exists: {}", path.display());
            }
            fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Exported {} bytes to {}", bytes.len(), path.display());
        }
        AudioCommands::Select { id } => {
            let track = library.find(&id)?;
            let mut prefs = library.preferences();
            prefs.selected_track = Some(track.id.clone());
            if !library.save_preferences(&prefs) {
                println!("⚠ Could not save your selection on this device.");
            }
            println!("✓ Selected {}", describe_track(&track));
        }
        AudioCommands::Volume { level } => {
            let mut prefs = library.preferences();
            prefs.set_volume(level);
            if !library.save_preferences(&prefs) {
                println!("⚠ Could not save the volume on this device.");
            }
            println!("✓ Volume set to {:.0}%", prefs.volume * 100.0);
        }
    }

    Ok(())
}
