use clap::{Parser, Subcommand};

use crate::domain::PlannerField;

#[derive(Parser)]
#[command(name = "dr")]
#[command(about = "Daily reset: a calm start, one page journal and planner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Unlock with your license key")]
    Unlock {
        #[arg(help = "License key (prompted when omitted)")]
        key: Option<String>,
    },

    #[command(about = "Log out and forget the session")]
    Lock,

    #[command(about = "Show session and journal status")]
    Status,

    #[command(about = "Write in the journal (auto-saves as you type)")]
    Write {
        #[arg(long, help = "Entry to continue (list position, id or id prefix)")]
        open: Option<String>,

        #[arg(long, conflicts_with = "open", help = "Start a new entry")]
        new: bool,
    },

    #[command(about = "Start a new entry, discarding the current draft")]
    New,

    #[command(about = "List saved entries, most recently updated first")]
    List,

    #[command(about = "Show an entry")]
    Show {
        #[arg(help = "List position, id or id prefix")]
        entry: String,
    },

    #[command(about = "Edit an entry in your $EDITOR")]
    Edit {
        #[arg(help = "List position, id or id prefix")]
        entry: String,
    },

    #[command(about = "Delete an entry")]
    Rm {
        #[arg(help = "List position, id or id prefix")]
        entry: String,

        #[arg(short, long, help = "Skip confirmation")]
        yes: bool,
    },

    #[command(about = "Show the unsaved draft")]
    Draft,

    #[command(about = "Today's planner page")]
    Plan {
        #[command(subcommand)]
        subcommand: Option<PlanCommands>,
    },

    #[command(about = "Manage audio tracks")]
    Audio {
        #[command(subcommand)]
        subcommand: AudioCommands,
    },

    #[command(about = "Manage configuration")]
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigCommands>,
    },

    #[command(about = "Generate shell completion script")]
    Completion {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

impl Commands {
    /// Page the command belongs to; `None` for local tooling that is never gated.
    pub fn route(&self) -> Option<&'static str> {
        match self {
            Commands::Unlock { .. } => Some("/api/license"),
            Commands::Lock => Some("/api/logout"),
            Commands::Status => Some("/access"),
            Commands::Write { .. }
            | Commands::New
            | Commands::List
            | Commands::Show { .. }
            | Commands::Edit { .. }
            | Commands::Rm { .. }
            | Commands::Draft
            | Commands::Plan { .. }
            | Commands::Audio { .. } => Some("/"),
            Commands::Config { .. } | Commands::Completion { .. } => None,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    #[command(about = "Show today's page")]
    Show,

    #[command(about = "Set one field")]
    Set {
        #[arg(value_parser = parse_planner_field, help = "focus, p1, p2, p3, win or gratitude")]
        field: PlannerField,

        #[arg(help = "New text (empty clears the field)")]
        text: Vec<String>,
    },

    #[command(about = "Fill in the page interactively")]
    Edit,

    #[command(about = "Clear the page")]
    Reset,
}

#[derive(Subcommand)]
pub enum AudioCommands {
    #[command(about = "List tracks")]
    List,

    #[command(about = "Add your own audio file")]
    Add {
        #[arg(help = "Path to an audio file")]
        file: String,
    },

    #[command(about = "Remove your stored audio file")]
    Clear,

    #[command(about = "Write a stored track to a file")]
    Export {
        #[arg(help = "Track id")]
        id: String,

        #[arg(help = "Output file")]
        output: String,
    },

    #[command(about = "Select the track to play")]
    Select {
        #[arg(help = "Track id")]
        id: String,
    },

    #[command(about = "Set playback volume (0.0 - 1.0)")]
    Volume {
        #[arg(help = "Volume between 0.0 and 1.0")]
        level: f32,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Set the journal data directory")]
    DataDir {
        #[arg(help = "Directory path")]
        path: String,
    },

    #[command(about = "Set the directory holding the built-in tracks")]
    AudioDir {
        #[arg(help = "Directory path")]
        path: String,
    },

    #[command(about = "Set the autosave delay")]
    AutosaveDelay {
        #[arg(help = "Delay in milliseconds")]
        millis: u64,
    },

    #[command(about = "Set the storage quota (0 for unlimited)")]
    StorageQuota {
        #[arg(help = "Quota in bytes")]
        bytes: u64,
    },

    #[command(about = "Set the Gumroad product id")]
    ProductId {
        #[arg(help = "Product id")]
        id: String,
    },

    #[command(about = "Set the session lifetime")]
    SessionMaxAge {
        #[arg(help = "Days")]
        days: u64,
    },
}

fn parse_planner_field(s: &str) -> Result<PlannerField, String> {
    s.parse()
}
