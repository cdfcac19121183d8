//! # Phrase Provider
//!
//! All user-facing text leaves the quiz core through the [`PhraseProvider`]
//! capability: a keyed template lookup with positional arguments, plus a
//! random-variant lookup for the places the game should not sound robotic
//! (guess reactions, the opponent's stage name). The core never hardcodes a
//! language; swap the provider to localize the whole game.
//!
//! [`EnglishPhrases`] is the default pack the console host uses. Templates use
//! `{0}`, `{1}`, ... placeholders filled from the argument slice in order.

use std::collections::HashMap;

use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Every prompt, reaction, and announcement the quiz can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseKey {
    // Configuration flow
    Welcome,
    NotEnoughTracks,
    NumPlayersNotUnderstood,
    AskGameType,
    GameTypeNotUnderstood,
    GameTypeInvalid,
    SettingsSummary,
    RepeatOn,
    RepeatOff,
    Reconfigure,
    // Game flow
    GeneratedPlayerIntro,
    StartingGame,
    PlayerTurn,
    RepeatingSong,
    RevealTrack,
    TurnPoints,
    GeneratedGuessedBoth,
    GeneratedGuessedTitle,
    GeneratedGuessedArtist,
    GeneratedGuessedNone,
    // End of game
    EndGame,
    PlayerScore,
    Winner,
    Tie,
    NoWinner,
    AfterGamePrompt,
    Goodbye,
    // Variant sets
    GoodGuess,
    BadGuess,
    GeneratedName,
}

/// Localization capability consumed by the session controller.
pub trait PhraseProvider {
    /// Render the template for `key` with positional `args`.
    fn phrase(&self, key: PhraseKey, args: &[&str]) -> String;

    /// Pick one of the variant strings registered for `key`.
    fn random_variant(&self, key: PhraseKey) -> String;
}

lazy_static! {
    static ref ENGLISH_TEMPLATES: HashMap<PhraseKey, &'static str> = {
        let mut templates = HashMap::new();
        templates.insert(
            PhraseKey::Welcome,
            "Welcome to Maestro! The playlist {0} has {1} tracks. \
             How many players are joining, from one to four?",
        );
        templates.insert(
            PhraseKey::NotEnoughTracks,
            "The playlist {0} has only {1} tracks, but at least {2} are needed. \
             Please choose a bigger playlist.",
        );
        templates.insert(
            PhraseKey::NumPlayersNotUnderstood,
            "Sorry, I did not catch that. How many players, from one to four?",
        );
        templates.insert(
            PhraseKey::AskGameType,
            "{0} players, great. Which game would you like: one-shot, short, medium, or long?",
        );
        templates.insert(
            PhraseKey::GameTypeNotUnderstood,
            "Sorry, I did not catch that. One-shot, short, medium, or long?",
        );
        templates.insert(
            PhraseKey::GameTypeInvalid,
            "A {0} game with {1} players needs {2} tracks, but this playlist has only {3}. \
             Please pick a shorter game.",
        );
        templates.insert(
            PhraseKey::SettingsSummary,
            "Starting a {0} game: {1} rounds, {2} seconds per song, and repeating a song is {3}.",
        );
        templates.insert(PhraseKey::RepeatOn, "allowed");
        templates.insert(PhraseKey::RepeatOff, "not allowed");
        templates.insert(
            PhraseKey::Reconfigure,
            "Let's set up a new game on {0}. How many players, from one to four?",
        );
        templates.insert(
            PhraseKey::GeneratedPlayerIntro,
            "You are up against {0}. Good luck!",
        );
        templates.insert(PhraseKey::StartingGame, "Let the game begin!");
        templates.insert(PhraseKey::PlayerTurn, "{0}, round {1} of {2}. Listen closely!");
        templates.insert(PhraseKey::RepeatingSong, "Here it is one more time.");
        templates.insert(
            PhraseKey::RevealTrack,
            "It was {0} by {1}, from the album {2}.",
        );
        templates.insert(
            PhraseKey::TurnPoints,
            "That is {0} points, plus a difficulty bonus of {1}. Your total is {2}.",
        );
        templates.insert(
            PhraseKey::GeneratedGuessedBoth,
            "{0} knew the title and the artist, and now has {1} points.",
        );
        templates.insert(
            PhraseKey::GeneratedGuessedTitle,
            "{0} knew the title, and now has {1} points.",
        );
        templates.insert(
            PhraseKey::GeneratedGuessedArtist,
            "{0} knew the artist, and now has {1} points.",
        );
        templates.insert(
            PhraseKey::GeneratedGuessedNone,
            "{0} had no idea, and stays at {1} points.",
        );
        templates.insert(PhraseKey::EndGame, "The game is over!");
        templates.insert(PhraseKey::PlayerScore, "{0} finished with {1} points.");
        templates.insert(PhraseKey::Winner, "The winner is {0}. Congratulations!");
        templates.insert(PhraseKey::Tie, "It is a tie between {0}.");
        templates.insert(
            PhraseKey::NoWinner,
            "Nobody scored this time. Better luck next time!",
        );
        templates.insert(
            PhraseKey::AfterGamePrompt,
            "Say restart to play again, configure for a new game, or exit to quit.",
        );
        templates.insert(PhraseKey::Goodbye, "Thanks for playing. Goodbye!");
        templates
    };

    static ref ENGLISH_VARIANTS: HashMap<PhraseKey, Vec<&'static str>> = {
        let mut variants = HashMap::new();
        variants.insert(
            PhraseKey::GoodGuess,
            vec!["Well done!", "Excellent!", "Great ear!", "Nice one!"],
        );
        variants.insert(
            PhraseKey::BadGuess,
            vec!["Not this time.", "Tough one.", "No luck there.", "That one got away."],
        );
        variants.insert(
            PhraseKey::GeneratedName,
            vec!["Melody Mind", "DJ Circuit", "Miss Harmony", "Captain Chorus"],
        );
        variants
    };
}

/// The built-in English phrase pack.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPhrases;

impl PhraseProvider for EnglishPhrases {
    fn phrase(&self, key: PhraseKey, args: &[&str]) -> String {
        let template = ENGLISH_TEMPLATES.get(&key).copied().unwrap_or_default();
        let mut rendered = template.to_string();
        for (i, arg) in args.iter().enumerate() {
            rendered = rendered.replace(&format!("{{{i}}}"), arg);
        }
        rendered
    }

    fn random_variant(&self, key: PhraseKey) -> String {
        ENGLISH_VARIANTS
            .get(&key)
            .and_then(|options| options.choose(&mut thread_rng()))
            .map_or_else(String::new, |s| (*s).to_string())
    }
}
