//! # Round Tracking
//!
//! Mutable turn and round bookkeeping for one quiz game: whose turn it is,
//! which track index is next, and whether the game is over. One
//! [`RoundState::record_result`] call is one completed turn — it credits the
//! current player, advances the turn order, and on wraparound advances the
//! round. After `num_players * num_rounds` recorded turns the game is
//! finished, `current_round` is clamped to `num_rounds`, and further calls
//! are ignored.

use crate::player::Player;

/// Turn, round, and roster state for one game.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub num_players: u32,
    pub num_rounds: u32,
    /// 1-based, never exceeds `num_rounds`.
    pub current_round: u32,
    /// 0-based index into `players`.
    pub current_player_index: usize,
    /// 0-based index into the shuffled track list.
    pub current_track_index: usize,
    pub players: Vec<Player>,
    pub is_finished: bool,
}

impl RoundState {
    #[must_use]
    pub fn new(num_players: u32, num_rounds: u32) -> Self {
        let mut state = Self {
            num_players,
            num_rounds,
            current_round: 1,
            current_player_index: 0,
            current_track_index: 0,
            players: Vec::new(),
            is_finished: false,
        };
        state.clear_state();
        state
    }

    /// Reset counters and reallocate a fresh roster of placeholder players.
    ///
    /// Display names and the generated kind are assigned afterwards by the
    /// session controller.
    pub fn clear_state(&mut self) {
        self.current_round = 1;
        self.current_player_index = 0;
        self.current_track_index = 0;
        self.is_finished = false;
        self.players = (1..=self.num_players).map(Player::local).collect();
    }

    /// Credit the current player and advance the turn order.
    ///
    /// A no-op once the game is finished, so a misbehaving caller cannot push
    /// the counters past the end.
    pub fn record_result(&mut self, artist_points: i32, title_points: i32, difficulty_points: i32) {
        if self.is_finished {
            return;
        }

        if let Some(player) = self.players.get_mut(self.current_player_index) {
            player.record_guess(artist_points, title_points, difficulty_points);
        }

        self.current_track_index += 1;
        self.current_player_index += 1;

        if self.current_player_index >= self.num_players as usize {
            self.current_player_index = 0;
            self.current_round += 1;

            if self.current_round > self.num_rounds {
                self.is_finished = true;
                self.current_round = self.num_rounds;
            }
        }
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    #[must_use]
    pub fn current_round_index(&self) -> u32 {
        self.current_round
    }
}
