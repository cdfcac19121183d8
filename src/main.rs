//! # Maestro - Voice-Driven Music Trivia
//!
//! Maestro turns any imported playlist into a guess-the-song quiz. The quiz
//! core is host-agnostic (a voice assistant would feed it speech transcripts);
//! this binary is the console host: it prints what the session wants spoken
//! and played, and feeds typed lines back in as transcripts.
//!
//! ## Architecture
//!
//! - `cli`: Command-line interface definitions
//! - `store`: SQLite playlist persistence
//! - `session`: The quiz state machine
//! - `text`: Transcript normalization and keyword matching
//! - `player` / `round`: Scoring and turn bookkeeping
//! - `config`: Data directory and persisted settings
//!
//! ## Usage
//!
//! ```bash
//! # Import a playlist export
//! maestro import road-trip.json
//!
//! # See what's stored
//! maestro list
//!
//! # Play a quiz with a simulated opponent
//! maestro play "Road Trip" --opponent
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::info;

use maestro::cli;
use maestro::completion;
use maestro::config;
use maestro::model::MIN_NUM_TRACKS;
use maestro::session::{GameSettings, InfoItem, QuizSession};
use maestro::store;
use maestro::phrases::EnglishPhrases;

/// Main entry point for the Maestro application.
///
/// Initializes logging, parses command-line arguments, and routes commands
/// to the appropriate module functions. All operations return Results for
/// consistent error handling throughout the application.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug maestro play ...` - Enable debug logging
/// - `RUST_LOG=maestro::session=debug maestro play ...` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Import { file } => {
            let playlist = store::read_playlist_file(&file)?;
            let data_dir = config::get_data_dir()?;
            let mut conn = store::connect(&data_dir)?;
            store::save_playlist(&mut conn, &playlist)?;

            println!(
                "Imported '{}' with {} tracks.",
                playlist.name,
                playlist.tracks.len()
            );
            if playlist.tracks.len() < MIN_NUM_TRACKS {
                println!(
                    "Note: a playable playlist needs at least {MIN_NUM_TRACKS} tracks."
                );
            }
        }
        cli::Command::List => {
            let data_dir = config::get_data_dir()?;
            let conn = store::connect(&data_dir)?;
            let summaries = store::list_playlists(&conn)?;

            if summaries.is_empty() {
                println!("No playlists stored. Import one with: maestro import <file.json>");
            } else {
                for summary in summaries {
                    println!(
                        "{:<30} {:>4} tracks  [{}]",
                        summary.name, summary.num_tracks, summary.id
                    );
                }
            }
        }
        cli::Command::Remove { playlist } => {
            let data_dir = config::get_data_dir()?;
            let mut conn = store::connect(&data_dir)?;
            store::delete_playlist(&mut conn, &playlist)?;
            println!("Removed '{playlist}'.");
        }
        cli::Command::Play {
            playlist,
            opponent,
            duration,
            no_repeat,
            no_bonus,
        } => {
            let data_dir = config::get_data_dir()?;
            let conn = store::connect(&data_dir)?;
            let playlist = store::load_playlist(&conn, &playlist)?;
            info!("starting quiz on '{}'", playlist.name);

            let mut settings = config::load_settings(&data_dir)?;
            if opponent {
                settings.generated_opponent = true;
            }
            if let Some(secs) = duration {
                settings.song_duration_sec = secs;
            }
            if no_repeat {
                settings.repeat_allowed = false;
            }
            if no_bonus {
                settings.difficulty_compensation = false;
            }

            let session = QuizSession::new(playlist, settings, Box::new(EnglishPhrases));
            run_quiz(session)?;
        }
        cli::Command::Settings {
            opponent,
            duration,
            repeat,
            bonus,
        } => {
            let data_dir = config::get_data_dir()?;
            let mut settings = config::load_settings(&data_dir)?;

            let changed =
                opponent.is_some() || duration.is_some() || repeat.is_some() || bonus.is_some();
            if let Some(value) = opponent {
                settings.generated_opponent = value;
            }
            if let Some(value) = duration {
                settings.song_duration_sec = value;
            }
            if let Some(value) = repeat {
                settings.repeat_allowed = value;
            }
            if let Some(value) = bonus {
                settings.difficulty_compensation = value;
            }
            if changed {
                config::save_settings(&data_dir, &settings)?;
            }

            print_settings(&settings);
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(
                completion::shell_to_completion_shell(&shell),
                &mut cmd,
            );
        }
        cli::Command::CompletePlaylists => {
            // This is used by shell completion scripts to get stored playlists
            completion::print_playlist_completions()?;
        }
    }

    Ok(())
}

fn print_settings(settings: &GameSettings) {
    println!("song duration:           {} seconds", settings.song_duration_sec);
    println!("repeat allowed:          {}", settings.repeat_allowed);
    println!("difficulty bonus:        {}", settings.difficulty_compensation);
    println!("simulated opponent:      {}", settings.generated_opponent);
}

/// Drive one quiz session on stdin/stdout until it asks to exit.
///
/// Speech and feedback items print as dialogue lines; sound items print as
/// placeholders since the console cannot play audio. Typed input becomes a
/// single-candidate transcript list.
fn run_quiz(mut session: QuizSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let packet = session.get_current_info();
        let mut exit_requested = false;

        for item in &packet.items {
            match item {
                InfoItem::Speech(text) => println!("maestro> {text}"),
                InfoItem::GuessFeedback { text, .. } => println!("maestro> {text}"),
                InfoItem::SoundUrl(url) => println!(
                    "   ♪ playing {} seconds of {url}",
                    session.settings().song_duration_sec
                ),
                InfoItem::LocalSound(name) => println!("   ♪ [{name}]"),
                InfoItem::ExitRequest => exit_requested = true,
            }
        }

        if exit_requested || !packet.immediate_answer_needed {
            break;
        }

        print!("you> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF: treat like walking away from the microphone.
            break;
        }
        session.user_input(&[line.trim().to_string()]);
    }

    Ok(())
}
