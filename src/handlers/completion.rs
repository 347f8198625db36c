use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells};
use std::io;

use crate::cli::Cli;

pub fn handle_completion(shell: &str) -> Result<()> {
    let mut cmd = Cli::command();

    match shell.to_lowercase().as_str() {
        "bash" => {
            generate(shells::Bash, &mut cmd, "dr", &mut io::stdout());
            println!();
            println!("# To enable completion, add the following to your shell config:");
            println!("#   eval \"$(dr completion bash)\"");
        }
        "zsh" => {
            generate(shells::Zsh, &mut cmd, "dr", &mut io::stdout());
            println!();
            println!("# To enable completion, add the following to your shell config:");
            println!("#   eval \"$(dr completion zsh)\"");
        }
        "fish" => {
            generate(shells::Fish, &mut cmd, "dr", &mut io::stdout());
            println!();
            println!("# To enable completion, save to ~/.config/fish/completions/dr.fish:");
            println!("#   dr completion fish > ~/.config/fish/completions/dr.fish");
        }
        _ => {
            return Err(anyhow::anyhow!(
                "Unsupported shell: {}. Supported shells: bash, zsh, fish",
                shell
            ));
        }
    }

    Ok(())
}
