//! # Quiz Session Controller
//!
//! The session controller is the turn-based dialogue engine behind the game:
//! it speaks through outbound [`InfoPacket`]s, listens through
//! [`QuizSession::user_input`], and walks an explicit finite state machine
//! from playlist greeting to winner announcement.
//!
//! ## Drive Loop
//!
//! The host calls the two entry points strictly alternately:
//!
//! ```text
//! get_current_info() -> packet      (speak / play the items)
//!        |                          if packet.immediate_answer_needed:
//!        v                              solicit speech from the user
//! user_input(transcripts) -> bool   (parse, score, advance the machine)
//! ```
//!
//! Both are plain synchronous functions; all genuinely asynchronous work
//! (speech synthesis, recognition, audio playback) lives host-side. One
//! session owns one game; there is no shared state across sessions.
//!
//! ## State Machine
//!
//! Configuration states (WELCOME through GAME_TYPE_INVALID) ask for the player
//! count and game length, looping through "not understood" re-prompts on bad
//! input — every error state is recoverable. Game states chain automatically:
//! a single packet carries the settings summary, opponent introduction, first
//! shuffle, and the first track preview, ending at PARSE_GUESS where the
//! machine waits for a transcript. After the last turn the END summary leads
//! to REPEAT_END, which accepts restart / configure / exit commands.
//!
//! ## Scoring
//!
//! A guess transcript is matched against per-track artist and title token
//! groups (plus the repeat command when allowed). Hits are worth 10 points
//! each; when difficulty compensation is enabled every recorded turn also
//! carries `round(10 * (1 - popularity/100))` bonus points, rewarding obscure
//! tracks. A generated opponent guesses immediately after the local player,
//! drawn probabilistically from track popularity (see [`crate::player`]).

use lazy_static::lazy_static;
use log::debug;
use rand::thread_rng;
use serde::{Deserialize, Serialize};

use crate::model::{Playlist, MIN_NUM_TRACKS};
use crate::phrases::{PhraseKey, PhraseProvider};
use crate::player::{Player, PlayerKind};
use crate::quiz_type::{QuizType, QuizVariant, POINT_FOR_ARTIST, POINT_FOR_DIFFICULTY, POINT_FOR_TITLE};
use crate::round::RoundState;
use crate::text::{self, KeywordGroup};

/// Local sound effect names the host maps to bundled audio.
pub const SOUND_DUEL: &str = "duel";
pub const SOUND_SUCCESS: &str = "success";
pub const SOUND_FAILURE: &str = "failure";
pub const SOUND_END: &str = "end_game";

const LABEL_ARTIST: &str = "artist";
const LABEL_TITLE: &str = "title";
const LABEL_REPEAT: &str = "repeat";
const CMD_RESTART: &str = "restart";
const CMD_CONFIGURE: &str = "configure";
const CMD_EXIT: &str = "exit";

const REPEAT_VARIANTS: [&str; 3] = ["repeat", "again", "replay"];

lazy_static! {
    /// Spoken player counts, with the homophones recognizers tend to produce.
    static ref NUMBER_GROUPS: Vec<KeywordGroup> = vec![
        KeywordGroup::new("1", &["one", "1"]),
        KeywordGroup::new("2", &["two", "2", "to", "too"]),
        KeywordGroup::new("3", &["three", "3"]),
        KeywordGroup::new("4", &["four", "4", "for"]),
    ];

    static ref GAME_TYPE_GROUPS: Vec<KeywordGroup> = vec![
        KeywordGroup::new("one-shot", &["oneshot", "shot", "one"]),
        KeywordGroup::new("short", &["short"]),
        KeywordGroup::new("medium", &["medium", "normal"]),
        KeywordGroup::new("long", &["long"]),
    ];

    static ref END_COMMAND_GROUPS: Vec<KeywordGroup> = vec![
        KeywordGroup::new(CMD_RESTART, &["restart", "rematch", "again"]),
        KeywordGroup::new(CMD_CONFIGURE, &["configure", "configuration", "setup", "new"]),
        KeywordGroup::new(CMD_EXIT, &["exit", "quit", "stop", "goodbye", "bye"]),
    ];
}

/// Position in the session's finite state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Welcome,
    NumPlayersNotUnderstood,
    GameTypeAsk,
    GameTypeNotUnderstood,
    GameTypeInvalid,
    StartGame,
    StartGameGeneratedPlayerInfo,
    StartGameFirstTurn,
    PlaySong,
    ParseGuess,
    RepeatSong,
    GuessFeedback,
    NextTurn,
    End,
    RepeatEnd,
    RestartGame,
    ConfigureGame,
    ExitGame,
}

/// One scored criterion in a guess-feedback item.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessCriterion {
    /// The correct answer, for display.
    pub truth: String,
    /// Whether the player guessed it.
    pub guess: bool,
    /// Whether the guess was accepted for points.
    pub accepted: bool,
}

/// A typed entry in an outbound information packet.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoItem {
    /// Text for the speech synthesizer.
    Speech(String),
    /// Audio the host should stream, typically a track preview.
    SoundUrl(String),
    /// A bundled sound effect, by name.
    LocalSound(String),
    /// Guess result: spoken text plus per-criterion detail for rendering.
    GuessFeedback {
        text: String,
        criteria: Vec<GuessCriterion>,
    },
    /// The session wants the host to shut it down.
    ExitRequest,
}

/// Ordered batch of things to say and play, plus whether the host should
/// solicit user speech right after emitting it.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPacket {
    pub items: Vec<InfoItem>,
    pub immediate_answer_needed: bool,
}

/// Caller-supplied game settings, persisted by the host between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub song_duration_sec: u32,
    pub repeat_allowed: bool,
    pub difficulty_compensation: bool,
    /// Add a simulated opponent to the roster.
    pub generated_opponent: bool,
    pub avg_difficulty: f64,
    pub avg_title_hit_ratio: f64,
    pub avg_artist_hit_ratio: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            song_duration_sec: 20,
            repeat_allowed: true,
            difficulty_compensation: true,
            generated_opponent: false,
            avg_difficulty: crate::player::DEFAULT_AVG_DIFFICULTY,
            avg_title_hit_ratio: crate::player::DEFAULT_AVG_TITLE_HIT_RATIO,
            avg_artist_hit_ratio: crate::player::DEFAULT_AVG_ARTIST_HIT_RATIO,
        }
    }
}

/// Final standings of one game.
#[derive(Debug, Clone, PartialEq)]
pub enum WinnerOutcome {
    Single(String),
    Tie(Vec<String>),
    NoWinner,
}

/// Scan all players for the winner.
///
/// A uniquely maximal score above zero wins; a zero maximum means nobody
/// scored; two or more players tied at the maximum are reported together.
#[must_use]
pub fn determine_winner(players: &[Player], include_difficulty: bool) -> WinnerOutcome {
    let mut best = 0;
    let mut names: Vec<String> = Vec::new();

    for player in players {
        let points = player.points(include_difficulty);
        if points > best {
            best = points;
            names = vec![player.name.clone()];
        } else if points == best {
            names.push(player.name.clone());
        }
    }

    if best <= 0 {
        WinnerOutcome::NoWinner
    } else if names.len() == 1 {
        WinnerOutcome::Single(names.remove(0))
    } else {
        WinnerOutcome::Tie(names)
    }
}

/// Bonus points for guessing a track of the given popularity.
///
/// `round(10 * (1 - popularity/100))`: a maximally obscure track yields the
/// full 10, a maximally familiar one yields 0.
#[must_use]
pub fn difficulty_compensation(popularity: u8) -> i32 {
    let ratio = 1.0 - f64::from(popularity) / 100.0;
    (f64::from(POINT_FOR_DIFFICULTY) * ratio).round() as i32
}

/// Outcome scalars of the most recent local-player turn, kept for feedback.
#[derive(Debug, Clone)]
struct TurnReport {
    title: String,
    artists: String,
    album: String,
    title_hit: bool,
    artist_hit: bool,
    artist_title_points: i32,
    difficulty_points: i32,
    all_points: i32,
}

/// Outcome of the simulated opponent's most recent auto-guess.
#[derive(Debug, Clone)]
struct OpponentReport {
    name: String,
    title_hit: bool,
    artist_hit: bool,
    all_points: i32,
}

/// One interactive quiz over one playlist.
///
/// Construct it, then drive it with alternating
/// [`get_current_info`](Self::get_current_info) /
/// [`user_input`](Self::user_input) calls until an [`InfoItem::ExitRequest`]
/// shows up.
pub struct QuizSession {
    state: QuizState,
    playlist: Playlist,
    settings: GameSettings,
    quiz_type: Option<QuizType>,
    round: Option<RoundState>,
    num_local_players: u32,
    invalid_choice: Option<QuizVariant>,
    generated_name: Option<String>,
    last_turn: Option<TurnReport>,
    last_opponent: Option<OpponentReport>,
    phrases: Box<dyn PhraseProvider>,
}

impl QuizSession {
    #[must_use]
    pub fn new(playlist: Playlist, settings: GameSettings, phrases: Box<dyn PhraseProvider>) -> Self {
        Self {
            state: QuizState::Welcome,
            playlist,
            settings,
            quiz_type: None,
            round: None,
            num_local_players: 0,
            invalid_choice: None,
            generated_name: None,
            last_turn: None,
            last_opponent: None,
            phrases,
        }
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    /// Current roster; empty before a game type has been chosen.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.round.as_ref().map_or(&[], |round| &round.players)
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Roster size including the generated opponent.
    fn total_players(&self) -> u32 {
        self.num_local_players + u32::from(self.settings.generated_opponent)
    }

    /// Build the next batch of things to say and play.
    ///
    /// Pure function of the current state, except that transient states
    /// (starting a game, rendering feedback, advancing the turn) chain into
    /// the packet until an input-accepting or terminal state is reached.
    pub fn get_current_info(&mut self) -> InfoPacket {
        let mut items = Vec::new();
        let mut immediate_answer_needed = false;

        loop {
            match self.state {
                QuizState::Welcome => {
                    if self.playlist.has_enough_tracks() {
                        items.push(InfoItem::Speech(self.phrases.phrase(
                            PhraseKey::Welcome,
                            &[&self.playlist.name, &self.playlist.tracks.len().to_string()],
                        )));
                        immediate_answer_needed = true;
                    } else {
                        items.push(InfoItem::Speech(self.phrases.phrase(
                            PhraseKey::NotEnoughTracks,
                            &[
                                &self.playlist.name,
                                &self.playlist.tracks.len().to_string(),
                                &MIN_NUM_TRACKS.to_string(),
                            ],
                        )));
                    }
                    break;
                }

                QuizState::NumPlayersNotUnderstood => {
                    items.push(InfoItem::Speech(
                        self.phrases.phrase(PhraseKey::NumPlayersNotUnderstood, &[]),
                    ));
                    immediate_answer_needed = true;
                    break;
                }

                QuizState::GameTypeAsk => {
                    items.push(InfoItem::Speech(self.phrases.phrase(
                        PhraseKey::AskGameType,
                        &[&self.num_local_players.to_string()],
                    )));
                    immediate_answer_needed = true;
                    break;
                }

                QuizState::GameTypeNotUnderstood => {
                    items.push(InfoItem::Speech(
                        self.phrases.phrase(PhraseKey::GameTypeNotUnderstood, &[]),
                    ));
                    immediate_answer_needed = true;
                    break;
                }

                QuizState::GameTypeInvalid => {
                    let variant = self.invalid_choice.unwrap_or(QuizVariant::OneShot);
                    let total = self.total_players();
                    let needed = variant.num_rounds() * total;
                    items.push(InfoItem::Speech(self.phrases.phrase(
                        PhraseKey::GameTypeInvalid,
                        &[
                            variant.display_name(),
                            &total.to_string(),
                            &needed.to_string(),
                            &self.playlist.tracks.len().to_string(),
                        ],
                    )));
                    immediate_answer_needed = true;
                    break;
                }

                QuizState::StartGame => {
                    if let Some(quiz_type) = self.quiz_type {
                        let repeat_word = if quiz_type.repeat_allowed {
                            self.phrases.phrase(PhraseKey::RepeatOn, &[])
                        } else {
                            self.phrases.phrase(PhraseKey::RepeatOff, &[])
                        };
                        items.push(InfoItem::Speech(self.phrases.phrase(
                            PhraseKey::SettingsSummary,
                            &[
                                quiz_type.variant.display_name(),
                                &quiz_type.num_rounds().to_string(),
                                &quiz_type.song_duration_sec.to_string(),
                                &repeat_word,
                            ],
                        )));
                    }
                    self.state = QuizState::StartGameGeneratedPlayerInfo;
                }

                QuizState::StartGameGeneratedPlayerInfo => {
                    if self.settings.generated_opponent {
                        let name = self.phrases.random_variant(PhraseKey::GeneratedName);
                        items.push(InfoItem::Speech(
                            self.phrases.phrase(PhraseKey::GeneratedPlayerIntro, &[&name]),
                        ));
                        items.push(InfoItem::LocalSound(SOUND_DUEL.to_string()));
                        self.generated_name = Some(name);
                    }
                    self.state = QuizState::StartGameFirstTurn;
                }

                QuizState::StartGameFirstTurn => {
                    self.playlist.shuffle();
                    if let Some(round) = &mut self.round {
                        round.clear_state();
                        if self.settings.generated_opponent {
                            if let Some(opponent) = round.players.last_mut() {
                                opponent.kind = PlayerKind::Generated {
                                    avg_difficulty: self.settings.avg_difficulty,
                                    avg_title_hit_ratio: self.settings.avg_title_hit_ratio,
                                    avg_artist_hit_ratio: self.settings.avg_artist_hit_ratio,
                                };
                                if let Some(name) = &self.generated_name {
                                    opponent.name = name.clone();
                                }
                            }
                        }
                    }
                    items.push(InfoItem::Speech(
                        self.phrases.phrase(PhraseKey::StartingGame, &[]),
                    ));
                    self.state = QuizState::PlaySong;
                }

                QuizState::PlaySong => {
                    if let (Some(round), Some(quiz_type)) = (&self.round, self.quiz_type) {
                        if let Some(player) = round.current_player() {
                            items.push(InfoItem::Speech(self.phrases.phrase(
                                PhraseKey::PlayerTurn,
                                &[
                                    &player.name,
                                    &round.current_round_index().to_string(),
                                    &quiz_type.num_rounds().to_string(),
                                ],
                            )));
                        }
                        if let Some(track) = self.playlist.tracks.get(round.current_track_index) {
                            items.push(InfoItem::SoundUrl(track.preview_url.clone()));
                        }
                    }
                    self.state = QuizState::ParseGuess;
                    immediate_answer_needed = true;
                    break;
                }

                QuizState::ParseGuess => {
                    // Re-entry while waiting for a guess: nothing new to say.
                    immediate_answer_needed = true;
                    break;
                }

                QuizState::RepeatSong => {
                    items.push(InfoItem::Speech(
                        self.phrases.phrase(PhraseKey::RepeatingSong, &[]),
                    ));
                    if let Some(round) = &self.round {
                        if let Some(track) = self.playlist.tracks.get(round.current_track_index) {
                            items.push(InfoItem::SoundUrl(track.preview_url.clone()));
                        }
                    }
                    self.state = QuizState::ParseGuess;
                    immediate_answer_needed = true;
                    break;
                }

                QuizState::GuessFeedback => {
                    if let Some(report) = &self.last_turn {
                        let any_hit = report.title_hit || report.artist_hit;
                        let sound = if any_hit { SOUND_SUCCESS } else { SOUND_FAILURE };
                        items.push(InfoItem::LocalSound(sound.to_string()));

                        let prefix = self.phrases.random_variant(if any_hit {
                            PhraseKey::GoodGuess
                        } else {
                            PhraseKey::BadGuess
                        });
                        let reveal = self.phrases.phrase(
                            PhraseKey::RevealTrack,
                            &[&report.title, &report.artists, &report.album],
                        );
                        let points = self.phrases.phrase(
                            PhraseKey::TurnPoints,
                            &[
                                &report.artist_title_points.to_string(),
                                &report.difficulty_points.to_string(),
                                &report.all_points.to_string(),
                            ],
                        );
                        items.push(InfoItem::GuessFeedback {
                            text: format!("{prefix} {reveal} {points}"),
                            criteria: vec![
                                GuessCriterion {
                                    truth: report.title.clone(),
                                    guess: report.title_hit,
                                    accepted: report.title_hit,
                                },
                                GuessCriterion {
                                    truth: report.artists.clone(),
                                    guess: report.artist_hit,
                                    accepted: report.artist_hit,
                                },
                            ],
                        });
                    }

                    if let Some(opponent) = &self.last_opponent {
                        let key = match (opponent.title_hit, opponent.artist_hit) {
                            (true, true) => PhraseKey::GeneratedGuessedBoth,
                            (true, false) => PhraseKey::GeneratedGuessedTitle,
                            (false, true) => PhraseKey::GeneratedGuessedArtist,
                            (false, false) => PhraseKey::GeneratedGuessedNone,
                        };
                        items.push(InfoItem::Speech(self.phrases.phrase(
                            key,
                            &[&opponent.name, &opponent.all_points.to_string()],
                        )));
                    }

                    self.state = QuizState::NextTurn;
                }

                QuizState::NextTurn => {
                    let finished = self.round.as_ref().map_or(true, |round| round.is_finished);
                    self.state = if finished { QuizState::End } else { QuizState::PlaySong };
                }

                QuizState::End => {
                    items.push(InfoItem::Speech(self.phrases.phrase(PhraseKey::EndGame, &[])));
                    self.push_end_summary(&mut items);
                    items.push(InfoItem::LocalSound(SOUND_END.to_string()));
                    items.push(InfoItem::Speech(
                        self.phrases.phrase(PhraseKey::AfterGamePrompt, &[]),
                    ));
                    self.state = QuizState::RepeatEnd;
                    immediate_answer_needed = true;
                    break;
                }

                QuizState::RepeatEnd => {
                    self.push_end_summary(&mut items);
                    items.push(InfoItem::Speech(
                        self.phrases.phrase(PhraseKey::AfterGamePrompt, &[]),
                    ));
                    immediate_answer_needed = true;
                    break;
                }

                QuizState::RestartGame => {
                    self.last_turn = None;
                    self.last_opponent = None;
                    self.state = QuizState::StartGameGeneratedPlayerInfo;
                }

                QuizState::ConfigureGame => {
                    self.quiz_type = None;
                    self.round = None;
                    self.num_local_players = 0;
                    self.invalid_choice = None;
                    self.generated_name = None;
                    self.last_turn = None;
                    self.last_opponent = None;
                    self.playlist.shuffle();
                    items.push(InfoItem::Speech(
                        self.phrases.phrase(PhraseKey::Reconfigure, &[&self.playlist.name]),
                    ));
                    immediate_answer_needed = true;
                    break;
                }

                QuizState::ExitGame => {
                    self.quiz_type = None;
                    self.round = None;
                    items.push(InfoItem::Speech(self.phrases.phrase(PhraseKey::Goodbye, &[])));
                    items.push(InfoItem::ExitRequest);
                    break;
                }
            }
        }

        InfoPacket {
            items,
            immediate_answer_needed,
        }
    }

    /// Feed recognized speech back into the machine.
    ///
    /// `transcripts` are the recognizer's candidate utterances, best first.
    /// Returns whether a new [`get_current_info`](Self::get_current_info)
    /// call is now warranted; input in non-accepting states is ignored.
    pub fn user_input(&mut self, transcripts: &[String]) -> bool {
        match self.state {
            QuizState::Welcome
            | QuizState::NumPlayersNotUnderstood
            | QuizState::ConfigureGame => self.handle_num_players(transcripts),
            QuizState::GameTypeAsk
            | QuizState::GameTypeNotUnderstood
            | QuizState::GameTypeInvalid => self.handle_game_type(transcripts),
            QuizState::ParseGuess => {
                self.handle_guess(transcripts);
                true
            }
            QuizState::RepeatEnd => {
                self.handle_end_command(transcripts);
                true
            }
            _ => false,
        }
    }

    fn handle_num_players(&mut self, transcripts: &[String]) -> bool {
        if self.state == QuizState::Welcome && !self.playlist.has_enough_tracks() {
            // Permanently blocked until the host supplies a bigger playlist.
            return false;
        }

        let matches = text::find_keyword_matches(transcripts, &NUMBER_GROUPS, true);
        match matches.first().and_then(|label| label.parse::<u32>().ok()) {
            Some(count) => {
                debug!("num players recognized: {count}");
                self.num_local_players = count;
                self.state = QuizState::GameTypeAsk;
            }
            None => {
                debug!("num players not understood: {transcripts:?}");
                self.state = QuizState::NumPlayersNotUnderstood;
            }
        }
        true
    }

    fn handle_game_type(&mut self, transcripts: &[String]) -> bool {
        let matches = text::find_keyword_matches(transcripts, &GAME_TYPE_GROUPS, true);
        match matches.first().and_then(|label| QuizVariant::from_label(label)) {
            Some(variant) => {
                let total = self.total_players();
                let needed = (variant.num_rounds() * total) as usize;

                if needed <= self.playlist.tracks.len() {
                    debug!("game type recognized: {}", variant.display_name());
                    self.quiz_type = Some(QuizType::new(
                        variant,
                        self.settings.song_duration_sec,
                        self.settings.repeat_allowed,
                        self.settings.difficulty_compensation,
                    ));
                    self.round = Some(RoundState::new(total, variant.num_rounds()));
                    self.invalid_choice = None;
                    self.state = QuizState::StartGame;
                } else {
                    debug!(
                        "game type {} needs {needed} tracks, playlist has {}",
                        variant.display_name(),
                        self.playlist.tracks.len()
                    );
                    self.invalid_choice = Some(variant);
                    self.state = QuizState::GameTypeInvalid;
                }
            }
            None => {
                self.state = QuizState::GameTypeNotUnderstood;
            }
        }
        true
    }

    fn handle_guess(&mut self, transcripts: &[String]) {
        let Some(quiz_type) = self.quiz_type else { return };
        let Some(round) = &mut self.round else { return };
        let Some(track) = self.playlist.tracks.get(round.current_track_index) else {
            return;
        };

        let mut groups = vec![
            KeywordGroup::from_phrases(LABEL_ARTIST, &track.artists),
            KeywordGroup::from_phrases(LABEL_TITLE, std::slice::from_ref(&track.name)),
        ];
        if quiz_type.repeat_allowed {
            groups.push(KeywordGroup::new(LABEL_REPEAT, &REPEAT_VARIANTS));
        }

        let matches = text::find_keyword_matches(transcripts, &groups, false);

        if quiz_type.repeat_allowed && matches.len() == 1 && matches[0] == LABEL_REPEAT {
            debug!("repeat requested");
            self.state = QuizState::RepeatSong;
            return;
        }

        let title_hit = matches.iter().any(|label| label == LABEL_TITLE);
        let artist_hit = matches.iter().any(|label| label == LABEL_ARTIST);
        let title_points = if title_hit { POINT_FOR_TITLE } else { 0 };
        let artist_points = if artist_hit { POINT_FOR_ARTIST } else { 0 };
        let bonus = if quiz_type.difficulty_compensation {
            difficulty_compensation(track.popularity)
        } else {
            0
        };

        let title = track.name.clone();
        let artists = text::join_for_display(&track.artists);
        let album = track.album.clone();

        let player_index = round.current_player_index;
        round.record_result(artist_points, title_points, bonus);
        let all_points = round.players[player_index].points(quiz_type.difficulty_compensation);

        debug!(
            "guess scored: title_hit={title_hit} artist_hit={artist_hit} bonus={bonus} total={all_points}"
        );

        self.last_turn = Some(TurnReport {
            title,
            artists,
            album,
            title_hit,
            artist_hit,
            artist_title_points: artist_points + title_points,
            difficulty_points: bonus,
            all_points,
        });

        // A simulated opponent takes its turns immediately, one per
        // consecutive generated seat in the turn order.
        self.last_opponent = None;
        loop {
            if round.is_finished {
                break;
            }
            let index = round.current_player_index;
            let Some(player) = round.players.get(index) else { break };
            if !player.is_generated() {
                break;
            }
            let Some(opponent_track) = self.playlist.tracks.get(round.current_track_index) else {
                break;
            };

            let outcome = player.calculate_guess(opponent_track, &mut thread_rng());
            let opponent_artist = if outcome.artist_hit { POINT_FOR_ARTIST } else { 0 };
            let opponent_title = if outcome.title_hit { POINT_FOR_TITLE } else { 0 };
            let opponent_bonus = if quiz_type.difficulty_compensation {
                difficulty_compensation(opponent_track.popularity)
            } else {
                0
            };

            round.record_result(opponent_artist, opponent_title, opponent_bonus);

            self.last_opponent = Some(OpponentReport {
                name: round.players[index].name.clone(),
                title_hit: outcome.title_hit,
                artist_hit: outcome.artist_hit,
                all_points: round.players[index].points(quiz_type.difficulty_compensation),
            });
        }

        self.state = QuizState::GuessFeedback;
    }

    fn handle_end_command(&mut self, transcripts: &[String]) {
        let matches = text::find_keyword_matches(transcripts, &END_COMMAND_GROUPS, true);
        match matches.first().map(String::as_str) {
            Some(CMD_RESTART) => {
                debug!("restart requested");
                self.state = QuizState::RestartGame;
            }
            Some(CMD_CONFIGURE) => {
                debug!("reconfigure requested");
                self.state = QuizState::ConfigureGame;
            }
            Some(CMD_EXIT) => {
                debug!("exit requested");
                self.state = QuizState::ExitGame;
            }
            _ => {
                // Unrecognized: stay and repeat the end summary.
            }
        }
    }

    /// Per-player scores plus the winner announcement.
    fn push_end_summary(&self, items: &mut Vec<InfoItem>) {
        let (Some(round), Some(quiz_type)) = (&self.round, self.quiz_type) else {
            return;
        };
        let include_difficulty = quiz_type.difficulty_compensation;

        for player in &round.players {
            items.push(InfoItem::Speech(self.phrases.phrase(
                PhraseKey::PlayerScore,
                &[&player.name, &player.points(include_difficulty).to_string()],
            )));
        }

        match determine_winner(&round.players, include_difficulty) {
            WinnerOutcome::Single(name) => {
                items.push(InfoItem::Speech(self.phrases.phrase(PhraseKey::Winner, &[&name])));
            }
            WinnerOutcome::Tie(names) => {
                items.push(InfoItem::Speech(self.phrases.phrase(
                    PhraseKey::Tie,
                    &[&text::join_for_display(&names)],
                )));
            }
            WinnerOutcome::NoWinner => {
                items.push(InfoItem::Speech(self.phrases.phrase(PhraseKey::NoWinner, &[])));
            }
        }
    }
}
