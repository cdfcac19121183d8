//! # Integration Tests for Maestro
//!
//! This module contains integration tests that exercise full user-visible
//! workflows: importing and loading playlists, driving a complete quiz from
//! greeting to winner announcement, and persisting settings between runs.

use anyhow::Result;
use tempfile::TempDir;

use maestro::model::{Playlist, Track};
use maestro::phrases::EnglishPhrases;
use maestro::session::{GameSettings, InfoItem, QuizSession, QuizState};

/// A playlist whose tracks all share the same guessable tokens, so a full
/// game can be scripted without knowing the shuffle order.
fn uniform_playlist(count: usize, popularity: u8) -> Playlist {
    let tracks = (0..count)
        .map(|i| Track {
            id: format!("t{i}"),
            name: format!("Starlight {i}"),
            artists: vec!["Neon Harbor".to_string()],
            album: "City Nights".to_string(),
            popularity,
            preview_url: format!("https://example.com/preview/{i}"),
            duration_ms: 30_000,
        })
        .collect();
    Playlist {
        id: "pl-city".to_string(),
        name: "City Nights Mix".to_string(),
        tracks,
    }
}

fn new_session(count: usize, settings: GameSettings) -> QuizSession {
    QuizSession::new(uniform_playlist(count, 50), settings, Box::new(EnglishPhrases))
}

fn say(session: &mut QuizSession, text: &str) {
    session.user_input(&[text.to_string()]);
}

fn all_speech(packet_items: &[InfoItem]) -> String {
    packet_items
        .iter()
        .filter_map(|item| match item {
            InfoItem::Speech(text) | InfoItem::GuessFeedback { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

mod session_flows {
    use super::*;

    #[test]
    fn test_full_short_game_to_winner_and_exit() {
        let mut session = new_session(10, GameSettings::default());

        // Configure: 1 player, short game (3 rounds).
        let packet = session.get_current_info();
        assert!(packet.immediate_answer_needed);
        say(&mut session, "just one");
        session.get_current_info();
        say(&mut session, "make it short");

        // Three rounds, all guessed correctly: each worth 10+10+5.
        for round in 1..=3 {
            let packet = session.get_current_info();
            assert!(packet.immediate_answer_needed, "round {round} should await a guess");
            assert!(packet
                .items
                .iter()
                .any(|item| matches!(item, InfoItem::SoundUrl(_))));
            say(&mut session, "Starlight by Neon Harbor");
            session.get_current_info();

            if round < 3 {
                assert_eq!(session.state(), QuizState::ParseGuess);
            }
        }

        assert_eq!(session.state(), QuizState::RepeatEnd);
        assert_eq!(session.players()[0].points(true), 75);
        assert_eq!(session.players()[0].num_title_hits, 3);
        assert_eq!(session.players()[0].num_artist_hits, 3);

        say(&mut session, "exit");
        let packet = session.get_current_info();
        assert!(packet.items.contains(&InfoItem::ExitRequest));
        assert!(!packet.immediate_answer_needed);
    }

    #[test]
    fn test_two_player_game_tracks_scores_separately() {
        let mut session = new_session(10, GameSettings::default());
        session.get_current_info();
        say(&mut session, "two");
        session.get_current_info();
        say(&mut session, "one shot");
        session.get_current_info();

        // Player 1 nails both criteria, player 2 misses.
        say(&mut session, "Starlight by Neon Harbor");
        session.get_current_info();
        say(&mut session, "absolutely no idea");
        let packet = session.get_current_info();

        assert_eq!(session.state(), QuizState::RepeatEnd);
        assert_eq!(session.players()[0].points(true), 25);
        assert_eq!(session.players()[1].points(true), 5);

        let speech = all_speech(&packet.items);
        assert!(speech.contains("winner is Player 1"), "got: {speech}");
    }

    #[test]
    fn test_no_bonus_no_repeat_settings_are_honored() {
        let settings = GameSettings {
            difficulty_compensation: false,
            repeat_allowed: false,
            ..GameSettings::default()
        };
        let mut session = new_session(10, settings);
        session.get_current_info();
        say(&mut session, "one");
        session.get_current_info();
        say(&mut session, "one shot");
        session.get_current_info();

        // "again" is not a command when repeating is off, and misses score 0
        // with the bonus disabled.
        say(&mut session, "again");
        session.get_current_info();

        assert_eq!(session.state(), QuizState::RepeatEnd);
        assert_eq!(session.players()[0].num_guesses, 1);
        assert_eq!(session.players()[0].points(true), 0);
    }

    #[test]
    fn test_misheard_configuration_recovers() {
        let mut session = new_session(4, GameSettings::default());
        session.get_current_info();

        say(&mut session, "erm");
        assert_eq!(session.state(), QuizState::NumPlayersNotUnderstood);
        session.get_current_info();
        say(&mut session, "two");

        session.get_current_info();
        say(&mut session, "gibberish");
        assert_eq!(session.state(), QuizState::GameTypeNotUnderstood);
        session.get_current_info();

        // 2 players x 5 rounds won't fit in 4 tracks.
        say(&mut session, "medium");
        assert_eq!(session.state(), QuizState::GameTypeInvalid);
        session.get_current_info();

        say(&mut session, "one shot");
        let packet = session.get_current_info();
        assert_eq!(session.state(), QuizState::ParseGuess);
        assert!(packet.immediate_answer_needed);
    }

    #[test]
    fn test_restart_then_reconfigure_full_cycle() {
        let mut session = new_session(10, GameSettings::default());
        session.get_current_info();
        say(&mut session, "one");
        session.get_current_info();
        say(&mut session, "one shot");
        session.get_current_info();
        say(&mut session, "Starlight");
        session.get_current_info();

        // Restart keeps the roster and settings, resets scores.
        say(&mut session, "restart");
        session.get_current_info();
        assert_eq!(session.state(), QuizState::ParseGuess);
        assert_eq!(session.players()[0].num_guesses, 0);
        say(&mut session, "Neon Harbor");
        session.get_current_info();
        assert_eq!(session.state(), QuizState::RepeatEnd);

        // Reconfigure drops everything and asks for players again.
        say(&mut session, "configure");
        let packet = session.get_current_info();
        assert!(packet.immediate_answer_needed);
        assert!(session.players().is_empty());
        say(&mut session, "three");
        assert_eq!(session.state(), QuizState::GameTypeAsk);
    }

    #[test]
    fn test_opponent_mode_end_to_end() {
        let settings = GameSettings {
            generated_opponent: true,
            ..GameSettings::default()
        };
        let mut session = new_session(10, settings);
        session.get_current_info();
        say(&mut session, "one");
        session.get_current_info();
        say(&mut session, "short");
        session.get_current_info();

        for _ in 0..3 {
            say(&mut session, "Starlight by Neon Harbor");
            session.get_current_info();
        }

        assert_eq!(session.state(), QuizState::RepeatEnd);
        // Both seats played every round.
        assert_eq!(session.players()[0].num_guesses, 3);
        assert_eq!(session.players()[1].num_guesses, 3);
        assert!(session.players()[1].is_generated());
        // The opponent got a stage name, not a placeholder.
        assert_ne!(session.players()[1].name, "Player 2");
        // The human swept every criterion; the opponent can at best tie.
        assert!(session.players()[0].points(true) >= session.players()[1].points(true));
    }
}

mod store_flows {
    use super::*;
    use maestro::store;

    #[test]
    fn test_import_load_play_pipeline() -> Result<()> {
        let temp_dir = TempDir::new()?;

        // Import: JSON export file into the store.
        let playlist = uniform_playlist(6, 30);
        let export = temp_dir.path().join("export.json");
        std::fs::write(&export, serde_json::to_string(&playlist)?)?;

        let parsed = store::read_playlist_file(&export)?;
        let mut conn = store::connect(temp_dir.path())?;
        store::save_playlist(&mut conn, &parsed)?;

        // Load and run a game on the stored copy.
        let loaded = store::load_playlist(&conn, "City Nights Mix")?;
        assert_eq!(loaded, playlist);

        let mut session =
            QuizSession::new(loaded, GameSettings::default(), Box::new(EnglishPhrases));
        session.get_current_info();
        say(&mut session, "one");
        session.get_current_info();
        say(&mut session, "one shot");
        session.get_current_info();
        say(&mut session, "Starlight");
        session.get_current_info();

        // Popularity 30 bonus is round(10 * 0.7) = 7.
        assert_eq!(session.players()[0].points(true), 17);
        Ok(())
    }

    #[test]
    fn test_list_reflects_imports_and_removals() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let mut conn = store::connect(temp_dir.path())?;

        let mut first = uniform_playlist(5, 50);
        first.id = "a".to_string();
        first.name = "Afternoon".to_string();
        let mut second = uniform_playlist(8, 50);
        second.id = "b".to_string();
        second.name = "Bedtime".to_string();

        store::save_playlist(&mut conn, &first)?;
        store::save_playlist(&mut conn, &second)?;

        let summaries = store::list_playlists(&conn)?;
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "Afternoon");
        assert_eq!(summaries[0].num_tracks, 5);
        assert_eq!(summaries[1].num_tracks, 8);

        store::delete_playlist(&mut conn, "Afternoon")?;
        assert_eq!(store::list_playlists(&conn)?.len(), 1);
        Ok(())
    }
}

mod settings_flows {
    use super::*;
    use maestro::config;

    #[test]
    fn test_settings_survive_reload() -> Result<()> {
        let temp_dir = TempDir::new()?;

        let mut settings = config::load_settings(temp_dir.path())?;
        assert_eq!(settings, GameSettings::default());

        settings.song_duration_sec = 30;
        settings.generated_opponent = true;
        config::save_settings(temp_dir.path(), &settings)?;

        let reloaded = config::load_settings(temp_dir.path())?;
        assert_eq!(reloaded, settings);
        Ok(())
    }
}
