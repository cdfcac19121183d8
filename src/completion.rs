//! # Shell Completion Module
//!
//! This module provides shell completion functionality for Maestro, including:
//! - Generation of completion scripts for various shells
//! - Custom completion for playlist names from the store
//! - Integration with clap's completion system
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! maestro completion bash > ~/.local/share/bash-completion/completions/maestro
//!
//! # Generate zsh completions
//! maestro completion zsh > ~/.config/zsh/completions/_maestro
//! ```

use anyhow::Result;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;

use crate::config;
use crate::store;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Convert our Shell enum to clap_complete's Shell enum
pub fn shell_to_completion_shell(shell: &crate::cli::Shell) -> CompletionShell {
    match shell {
        crate::cli::Shell::Bash => CompletionShell::Bash,
        crate::cli::Shell::Zsh => CompletionShell::Zsh,
        crate::cli::Shell::Fish => CompletionShell::Fish,
        crate::cli::Shell::PowerShell => CompletionShell::PowerShell,
        crate::cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Get stored playlist names for completion.
///
/// Returns both ids and display names so `play` and `remove` can be
/// tab-completed either way. Errors (no data directory, no store yet) fold
/// into an empty list; completion must never fail loudly.
pub fn get_playlist_completions() -> Result<Vec<String>> {
    let data_dir = match config::get_data_dir() {
        Ok(dir) => dir,
        Err(_) => return Ok(Vec::new()),
    };

    let conn = match store::connect(&data_dir) {
        Ok(conn) => conn,
        Err(_) => return Ok(Vec::new()),
    };

    match store::list_playlists(&conn) {
        Ok(summaries) => {
            let mut completions = Vec::new();
            for summary in summaries {
                if !completions.contains(&summary.name) {
                    completions.push(summary.name.clone());
                }
                if !completions.contains(&summary.id) {
                    completions.push(summary.id);
                }
            }
            completions.sort();
            Ok(completions)
        }
        Err(_) => Ok(Vec::new()),
    }
}

/// Print available playlist completions, one per line.
/// This is used by shell completion systems to get dynamic completions.
pub fn print_playlist_completions() -> Result<()> {
    for completion in get_playlist_completions()? {
        if completion.contains(' ') || completion.contains('\t') {
            println!("\"{}\"", completion.replace('"', "\\\""));
        } else {
            println!("{completion}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_conversion() {
        assert_eq!(
            shell_to_completion_shell(&crate::cli::Shell::Bash),
            CompletionShell::Bash
        );
        assert_eq!(
            shell_to_completion_shell(&crate::cli::Shell::Zsh),
            CompletionShell::Zsh
        );
    }

    #[test]
    fn test_get_playlist_completions_never_panics() {
        // Must stay quiet even with no store on disk.
        let result = get_playlist_completions();
        assert!(result.is_ok());
    }
}
