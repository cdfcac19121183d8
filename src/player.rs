//! # Player Models
//!
//! A [`Player`] is either a human (`Local`) whose guesses arrive as parsed
//! transcripts, or a simulated opponent (`Generated`) whose guesses are drawn
//! probabilistically from track popularity and configured skill averages. The
//! kind is an explicit enum payload, and the session controller dispatches on
//! it when deciding whether to auto-generate a guess.
//!
//! ## Generated Guess Model
//!
//! For a track with popularity `pop` and a player with average difficulty `d`
//! and per-criterion average hit ratio `r`:
//!
//! ```text
//! weight = d / max(100 - pop, 1)
//! p_hit  = clamp(r * weight, 0.1, 0.9)
//! ```
//!
//! Title and artist draws are independent. The clamp guarantees no track is a
//! guaranteed hit or a guaranteed miss, and the `max(.., 1)` keeps a
//! popularity-100 track finite instead of dividing by zero.

use rand::Rng;

use crate::model::Track;

/// Default skill parameters for a generated opponent.
pub const DEFAULT_AVG_DIFFICULTY: f64 = 33.0;
pub const DEFAULT_AVG_TITLE_HIT_RATIO: f64 = 0.5;
pub const DEFAULT_AVG_ARTIST_HIT_RATIO: f64 = 0.5;

/// Clamp bounds for the effective hit probability.
pub const MIN_HIT_PROBABILITY: f64 = 0.1;
pub const MAX_HIT_PROBABILITY: f64 = 0.9;

/// Who controls a player's guesses.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerKind {
    Local,
    Generated {
        avg_difficulty: f64,
        avg_title_hit_ratio: f64,
        avg_artist_hit_ratio: f64,
    },
}

impl PlayerKind {
    /// A generated opponent with the default skill averages.
    #[must_use]
    pub fn default_generated() -> Self {
        Self::Generated {
            avg_difficulty: DEFAULT_AVG_DIFFICULTY,
            avg_title_hit_ratio: DEFAULT_AVG_TITLE_HIT_RATIO,
            avg_artist_hit_ratio: DEFAULT_AVG_ARTIST_HIT_RATIO,
        }
    }
}

/// Outcome of a single simulated guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuessOutcome {
    pub title_hit: bool,
    pub artist_hit: bool,
}

/// One quiz participant with running score counters.
///
/// Created fresh at every game start, mutated only through
/// [`Player::record_guess`], discarded at game end or restart.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub kind: PlayerKind,
    pub num_guesses: u32,
    pub num_artist_hits: u32,
    pub num_title_hits: u32,
    pub artist_points: i32,
    pub title_points: i32,
    pub difficulty_points: i32,
}

impl Player {
    /// A fresh local player; the controller assigns the display name later.
    #[must_use]
    pub fn local(id: u32) -> Self {
        Self {
            id,
            name: format!("Player {id}"),
            kind: PlayerKind::Local,
            num_guesses: 0,
            num_artist_hits: 0,
            num_title_hits: 0,
            artist_points: 0,
            title_points: 0,
            difficulty_points: 0,
        }
    }

    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self.kind, PlayerKind::Generated { .. })
    }

    /// Record one turn's awarded points.
    ///
    /// Artist and title counters only move when the awarded value is positive.
    /// Difficulty compensation is recorded whenever it is non-negative, so a
    /// zero bonus still counts as a recorded event — that asymmetry is
    /// intentional and matches the scoring contract.
    pub fn record_guess(&mut self, artist_points: i32, title_points: i32, difficulty_points: i32) {
        self.num_guesses += 1;

        if artist_points > 0 {
            self.artist_points += artist_points;
            self.num_artist_hits += 1;
        }
        if title_points > 0 {
            self.title_points += title_points;
            self.num_title_hits += 1;
        }
        if difficulty_points >= 0 {
            self.difficulty_points += difficulty_points;
        }
    }

    /// Accumulated score, optionally including the difficulty bonus.
    #[must_use]
    pub fn points(&self, include_difficulty: bool) -> i32 {
        let base = self.artist_points + self.title_points;
        if include_difficulty {
            base + self.difficulty_points
        } else {
            base
        }
    }

    /// Draw a simulated guess for the given track.
    ///
    /// Local players never auto-guess; for them this returns the empty
    /// outcome. Title and artist are drawn independently.
    pub fn calculate_guess<R: Rng>(&self, track: &Track, rng: &mut R) -> GuessOutcome {
        match &self.kind {
            PlayerKind::Local => GuessOutcome::default(),
            PlayerKind::Generated {
                avg_difficulty,
                avg_title_hit_ratio,
                avg_artist_hit_ratio,
            } => {
                let title_p = hit_probability(*avg_title_hit_ratio, *avg_difficulty, track.popularity);
                let artist_p =
                    hit_probability(*avg_artist_hit_ratio, *avg_difficulty, track.popularity);

                GuessOutcome {
                    title_hit: rng.gen::<f64>() <= title_p,
                    artist_hit: rng.gen::<f64>() <= artist_p,
                }
            }
        }
    }
}

/// Effective hit probability for one criterion, clamped into
/// [[`MIN_HIT_PROBABILITY`], [`MAX_HIT_PROBABILITY`]].
#[must_use]
pub fn hit_probability(avg_ratio: f64, avg_difficulty: f64, popularity: u8) -> f64 {
    let denominator = f64::from((100 - i32::from(popularity)).max(1));
    let difficulty_weight = avg_difficulty / denominator;
    (avg_ratio * difficulty_weight).clamp(MIN_HIT_PROBABILITY, MAX_HIT_PROBABILITY)
}
