//! Voice-driven music trivia engine: playlists in, quiz out.
//!
//! Core modules:
//! - [`session`] - The quiz state machine and dialogue controller
//! - [`text`] - Transcript normalization and fuzzy keyword matching
//! - [`player`] - Local players and the probabilistic simulated opponent
//! - [`round`] - Turn and round bookkeeping
//! - [`quiz_type`] - Game length catalogue and point constants
//!
//! ### Supporting Modules
//!
//! - [`model`] - Playlist and track records
//! - [`phrases`] - Localizable phrase templates ([`phrases::PhraseProvider`])
//! - [`store`] - SQLite playlist persistence
//! - [`config`] - Data directory and persisted settings
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation for enhanced UX
//!
//! ## Quick Start Example
//!
//! ```
//! use maestro::model::{Playlist, Track};
//! use maestro::phrases::EnglishPhrases;
//! use maestro::session::{GameSettings, QuizSession};
//!
//! let tracks = (0..4)
//!     .map(|i| Track {
//!         id: format!("t{i}"),
//!         name: format!("Song {i}"),
//!         artists: vec!["Some Artist".to_string()],
//!         album: "Some Album".to_string(),
//!         popularity: 50,
//!         preview_url: format!("https://example.com/{i}"),
//!         duration_ms: 30_000,
//!     })
//!     .collect();
//! let playlist = Playlist {
//!     id: "demo".to_string(),
//!     name: "Demo Mix".to_string(),
//!     tracks,
//! };
//!
//! // One session is one game; drive it with get_current_info / user_input.
//! let mut session = QuizSession::new(playlist, GameSettings::default(), Box::new(EnglishPhrases));
//! let packet = session.get_current_info();
//! assert!(packet.immediate_answer_needed);
//! session.user_input(&["two players".to_string()]);
//! ```
//!
//! ## Session Protocol
//!
//! The host (console, voice assistant, anything) alternates two calls:
//!
//! - [`session::QuizSession::get_current_info`] returns an ordered
//!   [`session::InfoPacket`] of things to say and play, plus a flag saying
//!   whether user speech should be solicited right away.
//! - [`session::QuizSession::user_input`] feeds candidate transcripts back in
//!   and advances the state machine.
//!
//! Both calls are synchronous; speech synthesis, recognition, and audio
//! playback are entirely the host's concern.
//!
//! ## Scoring
//!
//! - Correct title: 10 points. Correct artist: 10 points. Both can land in
//!   one guess.
//! - Difficulty compensation (optional): `round(10 * (1 - popularity/100))`
//!   bonus points per recorded turn, rewarding obscure tracks.
//! - A simulated opponent guesses with probability
//!   `clamp(ratio * difficulty / max(100 - popularity, 1), 0.1, 0.9)`
//!   per criterion, so familiar tracks are easier for it too.
//!
//! ## Error Handling
//!
//! Fallible operations return `Result<T, anyhow::Error>` with context
//! attached at each layer. Common error scenarios include:
//!
//! - Playlist store connection failures
//! - Malformed playlist JSON exports
//! - Missing playlists or settings files
//!
//! Unrecognized speech is not an error: the session loops through
//! "not understood" re-prompts and every such state is recoverable.
//!
//! ## Testing
//!
//! Run tests with:
//! ```bash
//! cargo test
//! cargo bench  # Criterion benchmarks for the matching hot path
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod model;
pub mod phrases;
pub mod player;
pub mod quiz_type;
pub mod round;
pub mod session;
pub mod store;
pub mod text;
