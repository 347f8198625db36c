mod cli;
mod config;
mod context;
mod domain;
mod handlers;
mod infrastructure;
mod presentation;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::get_config_dir;
use context::AppContext;
use handlers::{audio, completion, config as config_handler, journal, planner, session, write};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_dir = get_config_dir()?;

    match cli.command {
        Commands::Config { subcommand } => config_handler::handle_config(subcommand, &config_dir),
        Commands::Completion { shell } => completion::handle_completion(&shell),
        command => {
            let mut ctx = AppContext::load(&config_dir)?;
            if let Some(route) = command.route() {
                ctx.require_access(route)?;
            }
            dispatch(command, &mut ctx)
        }
    }
}

fn dispatch(command: Commands, ctx: &mut AppContext) -> Result<()> {
    match command {
        Commands::Unlock { key } => session::handle_unlock(key, ctx),
        Commands::Lock => session::handle_lock(ctx),
        Commands::Status => session::handle_status(ctx),
        Commands::Write { open, new } => write::handle_write(open, new, ctx),
        Commands::New => journal::handle_new(ctx),
        Commands::List => journal::handle_list(ctx),
        Commands::Show { entry } => journal::handle_show(&entry, ctx),
        Commands::Edit { entry } => journal::handle_edit(&entry, ctx),
        Commands::Rm { entry, yes } => journal::handle_rm(&entry, yes, ctx),
        Commands::Draft => journal::handle_draft(ctx),
        Commands::Plan { subcommand } => planner::handle_plan(subcommand, ctx),
        Commands::Audio { subcommand } => audio::handle_audio(subcommand, ctx),
        Commands::Config { subcommand } => {
            config_handler::handle_config(subcommand, &ctx.config_dir)
        }
        Commands::Completion { shell } => completion::handle_completion(&shell),
    }
}
