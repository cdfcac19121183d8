//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Maestro using Clap derive
//! macros. It provides a type-safe way to parse command-line arguments and
//! route them to appropriate functionality.
//!
//! ## Commands
//!
//! - `import`: Add a playlist JSON export to the store
//! - `list`: Display all stored playlists
//! - `remove`: Delete a playlist from the store
//! - `play`: Run an interactive quiz on a stored playlist
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! maestro import ~/Downloads/road-trip.json
//! maestro play "Road Trip" --opponent
//! maestro list
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
///
/// Uses Clap derive macros to automatically generate argument parsing,
/// help text, and validation. The main structure contains only a subcommand
/// since all functionality is accessed through specific commands.
#[derive(Parser)]
#[command(name = "maestro")]
#[command(about = "Maestro: voice-driven music trivia - playlists in, quiz out")]
#[command(version)]
pub struct Args {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
///
/// Each variant corresponds to a major piece of functionality in Maestro.
/// Command arguments are embedded directly in the enum variants for
/// type safety and automatic validation.
#[derive(Subcommand)]
pub enum Command {
    /// Import a playlist from a JSON export
    ///
    /// Reads a playlist export file and stores it in the local database,
    /// replacing any previously imported playlist with the same id. A playable
    /// playlist needs at least 4 tracks.
    Import {
        /// Path to the playlist JSON file
        file: PathBuf,
    },

    /// List all stored playlists
    ///
    /// Displays every imported playlist with its track count, sorted
    /// alphabetically by name.
    List,

    /// Remove a stored playlist
    ///
    /// Deletes the playlist and all of its tracks from the store.
    Remove {
        /// Playlist id or name to remove
        playlist: String,
    },

    /// Play a quiz on a stored playlist
    ///
    /// Starts an interactive game session on the given playlist. The session
    /// asks for the number of players and the game length, then plays track
    /// previews and scores typed guesses. Flags override the persisted
    /// settings for this run only.
    Play {
        /// Playlist id or name to quiz on
        ///
        /// Matched first against playlist ids, then against names.
        #[arg(value_hint = clap::ValueHint::Other)]
        playlist: String,

        /// Add a simulated opponent to the roster
        #[arg(long)]
        opponent: bool,

        /// Seconds of each track preview to play
        #[arg(long)]
        duration: Option<u32>,

        /// Disallow repeating a song during a turn
        #[arg(long)]
        no_repeat: bool,

        /// Disable the difficulty bonus for obscure tracks
        #[arg(long)]
        no_bonus: bool,
    },

    /// Show or update persisted game settings
    ///
    /// Without flags, prints the current settings. With flags, updates the
    /// settings file so future games use them by default.
    Settings {
        /// Persist: add a simulated opponent by default
        #[arg(long)]
        opponent: Option<bool>,

        /// Persist: seconds of each track preview to play
        #[arg(long)]
        duration: Option<u32>,

        /// Persist: whether repeating a song is allowed
        #[arg(long)]
        repeat: Option<bool>,

        /// Persist: whether the difficulty bonus is applied
        #[arg(long)]
        bonus: Option<bool>,
    },

    /// Generate shell completions
    ///
    /// Generates completion scripts for various shells to enable tab
    /// completion of commands, subcommands, and stored playlist names.
    ///
    /// Usage: maestro completion bash > ~/.local/share/bash-completion/completions/maestro
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// List stored playlist names for completion (hidden command)
    #[command(hide = true)]
    CompletePlaylists,
}
