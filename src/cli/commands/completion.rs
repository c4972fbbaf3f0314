use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

const BIN_NAME: &str = "treepeek";

/// Generate shell completion scripts.
///
/// The script goes to stdout so it can be piped or `eval`ed; installation
/// hints go to stderr.
pub fn execute(shell: Shell, quiet: bool) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());

    if quiet {
        return Ok(());
    }

    eprintln!("\n{}", "Installation Instructions:".bold());
    match shell {
        Shell::Bash => {
            eprintln!("  Add the following to your ~/.bashrc or ~/.bash_profile:");
            eprintln!("  {}", "eval \"$(treepeek completion bash 2>/dev/null)\"".cyan());
        },
        Shell::Zsh => {
            eprintln!("  Save the script to a file in your fpath:");
            eprintln!(
                "  {}",
                "treepeek completion zsh > ~/.local/share/zsh/site-functions/_treepeek".cyan()
            );
        },
        Shell::Fish => {
            eprintln!("  Save the completion script:");
            eprintln!(
                "  {}",
                "treepeek completion fish > ~/.config/fish/completions/treepeek.fish".cyan()
            );
        },
        Shell::PowerShell => {
            eprintln!("  Add the following to your PowerShell profile:");
            eprintln!(
                "  {}",
                "Invoke-Expression (& treepeek completion powershell | Out-String)".cyan()
            );
        },
        _ => {
            eprintln!(
                "  Please refer to your shell's documentation for installing completion scripts."
            );
        },
    }

    Ok(())
}
