//! # Playlist Data Model
//!
//! Core records for the quiz: a [`Track`] as delivered by whatever metadata
//! collaborator feeds the game, and a [`Playlist`] owning an ordered track
//! list. Track metadata is read-only to the quiz; the playlist order is not —
//! shuffling at game configuration and at every (re)start is the quiz's own
//! responsibility, so the shuffle lives here rather than in a collaborator.

use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::{Deserialize, Serialize};

/// Minimum playlist size for a game to start at all.
pub const MIN_NUM_TRACKS: usize = 4;

/// One song as supplied by the metadata collaborator.
///
/// `popularity` runs 0–100, higher meaning more familiar and therefore easier
/// to guess. `preview_url` is an opaque reference the host resolves to actual
/// audio playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub popularity: u8,
    pub preview_url: String,
    pub duration_ms: u32,
}

/// An ordered, shuffleable collection of tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Shuffle the track order in place.
    pub fn shuffle(&mut self) {
        self.tracks.shuffle(&mut thread_rng());
    }

    /// Whether this playlist is large enough to start any game.
    #[must_use]
    pub fn has_enough_tracks(&self) -> bool {
        self.tracks.len() >= MIN_NUM_TRACKS
    }
}
