//! # Quiz Type Catalogue
//!
//! Four named game lengths with fixed round counts and shared point
//! constants. A [`QuizType`] is assembled once per game from a recognized
//! length label plus the caller-supplied session settings, and never mutated
//! afterward — reconfiguring picks a fresh instance.

/// Points for a correct title guess.
pub const POINT_FOR_TITLE: i32 = 10;
/// Points for a correct artist guess.
pub const POINT_FOR_ARTIST: i32 = 10;
/// Maximum difficulty-compensation bonus, reached at popularity 0.
pub const POINT_FOR_DIFFICULTY: i32 = POINT_FOR_ARTIST;

/// The four game lengths, differing only in round count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizVariant {
    OneShot,
    Short,
    Medium,
    Long,
}

impl QuizVariant {
    /// Rounds played per player.
    #[must_use]
    pub fn num_rounds(self) -> u32 {
        match self {
            Self::OneShot => 1,
            Self::Short => 3,
            Self::Medium => 5,
            Self::Long => 7,
        }
    }

    /// Spoken name of this game length.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::OneShot => "one-shot",
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Map a matched keyword label back to a variant.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "one-shot" => Some(Self::OneShot),
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }
}

/// Immutable per-game configuration: length plus caller-supplied settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizType {
    pub variant: QuizVariant,
    pub song_duration_sec: u32,
    pub repeat_allowed: bool,
    pub difficulty_compensation: bool,
}

impl QuizType {
    #[must_use]
    pub fn new(
        variant: QuizVariant,
        song_duration_sec: u32,
        repeat_allowed: bool,
        difficulty_compensation: bool,
    ) -> Self {
        Self {
            variant,
            song_duration_sec,
            repeat_allowed,
            difficulty_compensation,
        }
    }

    #[must_use]
    pub fn num_rounds(&self) -> u32 {
        self.variant.num_rounds()
    }
}
