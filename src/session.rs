//! Game session: owns the board, score and undo history, and drives the
//! engine one host input at a time.
//!
//! The session is a two-state machine (`Playing`, `GameOver`):
//! - [`GameSession::new_game`] always lands in `Playing` with two fresh tiles.
//! - [`GameSession::make_move`] is a no-op in `GameOver`; a move that changes
//!   nothing leaves no trace in history, score or board.
//! - [`GameSession::undo`] restores the previous snapshot and always returns
//!   to `Playing`.
//!
//! Calls must be serialized by the host; the session holds no locks.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::engine::{self, Board, ChangeEvent, Direction};
use crate::store::{BestScoreStore, MemoryBestScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    GameOver,
}

/// Snapshot pushed before every accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub board: Board,
    pub score: u64,
}

/// What a single call to [`GameSession::make_move`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub board_changed: bool,
    pub score_delta: u64,
    /// Merge events followed by the new-tile event, if any.
    pub events: Vec<ChangeEvent>,
    pub terminal: bool,
}

impl MoveOutcome {
    fn unchanged(terminal: bool) -> Self {
        Self { board_changed: false, score_delta: 0, events: Vec::new(), terminal }
    }
}

pub struct GameSession<S = MemoryBestScore, R = StdRng> {
    board: Board,
    score: u64,
    best: u64,
    history: VecDeque<HistoryEntry>,
    history_limit: Option<usize>,
    state: GameState,
    store: S,
    rng: R,
}

impl GameSession {
    /// A session with an in-memory best score and an entropy-seeded RNG.
    ///
    /// ```
    /// use slide_2048::session::GameSession;
    /// let mut s = GameSession::new();
    /// s.new_game();
    /// assert_eq!(s.board().count_empty(), 14);
    /// assert!(!s.is_game_over());
    /// ```
    pub fn new() -> Self {
        Self::with_rng(MemoryBestScore::default(), StdRng::from_entropy())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BestScoreStore, R: Rng> GameSession<S, R> {
    /// Build a session around a best-score store and an RNG. The board starts
    /// empty with score 0; call [`GameSession::new_game`] to deal the opening tiles.
    pub fn with_rng(store: S, rng: R) -> Self {
        let best = store.load();
        Self {
            board: Board::EMPTY,
            score: 0,
            best,
            history: VecDeque::new(),
            history_limit: None,
            state: GameState::Playing,
            store,
            rng,
        }
    }

    /// Keep at most `limit` undo snapshots, dropping the oldest first.
    /// `None` keeps every snapshot.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    /// Reset to an empty board, score 0, no history, then spawn two tiles.
    pub fn new_game(&mut self) {
        self.board = Board::EMPTY;
        self.score = 0;
        self.history.clear();
        self.state = GameState::Playing;
        engine::spawn_tile(&mut self.board, &mut self.rng);
        engine::spawn_tile(&mut self.board, &mut self.rng);
        info!(best = self.best, "new game");
    }

    /// Replace the board and score wholesale, clearing history. The terminal
    /// flag is recomputed from the board.
    pub fn resume(&mut self, board: Board, score: u64) {
        self.board = board;
        self.score = score;
        self.history.clear();
        self.state = if board.has_any_move() { GameState::Playing } else { GameState::GameOver };
        self.record_best();
    }

    /// Slide in `dir`. On a change: score the merges, spawn one tile, and
    /// re-check for game over.
    pub fn make_move(&mut self, dir: Direction) -> MoveOutcome {
        if self.state == GameState::GameOver {
            trace!(%dir, "move ignored: game over");
            return MoveOutcome::unchanged(true);
        }

        self.history.push_back(HistoryEntry { board: self.board, score: self.score });
        let shifted = engine::shift(&self.board, dir);
        if !shifted.changed {
            self.history.pop_back();
            trace!(%dir, "move ignored: board unchanged");
            return MoveOutcome::unchanged(false);
        }
        self.trim_history();

        self.board = shifted.board;
        self.score += shifted.score_delta;
        self.record_best();

        let mut events = shifted.events;
        events.extend(engine::spawn_tile(&mut self.board, &mut self.rng));

        let terminal = !self.board.has_any_move();
        if terminal {
            self.state = GameState::GameOver;
            info!(score = self.score, highest_tile = self.board.highest_tile(), "game over");
        }
        debug!(%dir, delta = shifted.score_delta, score = self.score, "move applied");

        MoveOutcome { board_changed: true, score_delta: shifted.score_delta, events, terminal }
    }

    /// Restore the previous snapshot. Returns false (and does nothing) when
    /// there is no history.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.history.pop_back() else {
            trace!("undo ignored: history empty");
            return false;
        };
        self.board = prev.board;
        self.score = prev.score;
        self.state = GameState::Playing;
        debug!(score = self.score, remaining = self.history.len(), "undo");
        true
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn best_score(&self) -> u64 {
        self.best
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn highest_tile(&self) -> u32 {
        self.board.highest_tile()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn record_best(&mut self) {
        if self.score <= self.best {
            return;
        }
        self.best = self.score;
        if let Err(e) = self.store.save(self.best) {
            warn!(best = self.best, error = %e, "failed to persist best score");
        }
    }

    fn trim_history(&mut self) {
        if let Some(limit) = self.history_limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Position;
    use crate::store::StoreError;

    fn seeded(seed: u64) -> GameSession<MemoryBestScore, StdRng> {
        GameSession::with_rng(MemoryBestScore::default(), StdRng::seed_from_u64(seed))
    }

    const STUCK: [[u32; 4]; 4] = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];

    #[test]
    fn starts_empty_and_playing() {
        let s = seeded(0);
        assert_eq!(*s.board(), Board::EMPTY);
        assert_eq!(s.score(), 0);
        assert_eq!(s.state(), GameState::Playing);
        assert!(!s.can_undo());
    }

    #[test]
    fn merge_scores_and_spawns() {
        let mut s = seeded(1);
        s.resume(Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);
        let out = s.make_move(Direction::Left);
        assert!(out.board_changed);
        assert_eq!(out.score_delta, 4);
        assert_eq!(s.score(), 4);
        assert_eq!(s.best_score(), 4);
        assert_eq!(s.board().get(Position::new(0, 0)), 4);
        assert_eq!(out.events.len(), 2);
        assert_eq!(out.events[0], ChangeEvent::Merge { position: Position::new(0, 0) });
        assert!(matches!(out.events[1], ChangeEvent::NewTile { .. }));
        assert_eq!(s.board().count_empty(), 14);
        assert_eq!(s.history_len(), 1);
    }

    #[test]
    fn unchanged_move_leaves_no_history() {
        let mut s = seeded(2);
        let start = Board::from_rows([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        s.resume(start, 12);
        let out = s.make_move(Direction::Left);
        assert_eq!(out, MoveOutcome::unchanged(false));
        assert_eq!(*s.board(), start);
        assert_eq!(s.score(), 12);
        assert_eq!(s.history_len(), 0);
    }

    #[test]
    fn game_over_blocks_moves_until_new_game() {
        let mut s = seeded(3);
        s.resume(Board::from_rows(STUCK), 100);
        assert!(s.is_game_over());
        for dir in Direction::ALL {
            let out = s.make_move(dir);
            assert!(!out.board_changed);
            assert!(out.terminal);
        }
        assert_eq!(s.history_len(), 0);
        s.new_game();
        assert!(!s.is_game_over());
        assert_eq!(s.score(), 0);
        assert_eq!(s.board().count_empty(), 14);
    }

    #[test]
    fn undo_restores_and_revives() {
        let mut s = seeded(4);
        let almost = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 0], [2, 4, 2, 4], [4, 2, 4, 2]]);
        s.resume(almost, 40);
        let out = s.make_move(Direction::Down);
        assert!(out.board_changed);
        let after_move = *s.board();
        assert!(s.undo());
        assert_eq!(*s.board(), almost);
        assert_eq!(s.score(), 40);
        assert_eq!(s.state(), GameState::Playing);
        assert!(!s.undo());
        assert_ne!(after_move, almost);
    }

    #[test]
    fn undo_from_game_over_returns_to_playing() {
        let mut s = seeded(5);
        // Moving right leaves only (0, 0) empty, and neither neighbour of it
        // can match a spawned 2 or 4.
        let b = Board::from_rows([
            [8, 0, 16, 32],
            [64, 128, 256, 512],
            [8, 16, 32, 64],
            [128, 256, 512, 1024],
        ]);
        s.resume(b, 0);
        let out = s.make_move(Direction::Right);
        assert!(out.board_changed);
        assert!(out.terminal);
        assert!(s.is_game_over());
        assert!(s.undo());
        assert!(!s.is_game_over());
        assert_eq!(*s.board(), b);
    }

    #[test]
    fn history_limit_drops_oldest() {
        let mut s = seeded(6).with_history_limit(Some(2));
        s.new_game();
        let mut accepted = 0;
        for dir in Direction::ALL.iter().cycle().take(40) {
            if s.make_move(*dir).board_changed {
                accepted += 1;
            }
            if s.is_game_over() {
                break;
            }
        }
        assert!(accepted >= 3);
        assert_eq!(s.history_len(), 2);
        assert!(s.undo());
        assert!(s.undo());
        assert!(!s.undo());
    }

    struct FailingStore;

    impl BestScoreStore for FailingStore {
        fn load(&self) -> u64 {
            0
        }

        fn save(&mut self, _best: u64) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn store_failure_does_not_abort_move() {
        let mut s = GameSession::with_rng(FailingStore, StdRng::seed_from_u64(7));
        s.resume(Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);
        let out = s.make_move(Direction::Left);
        assert!(out.board_changed);
        assert_eq!(s.best_score(), 4);
    }

    #[test]
    fn best_score_loaded_and_saved_only_when_exceeded() {
        let mut s = GameSession::with_rng(MemoryBestScore::new(10), StdRng::seed_from_u64(8));
        assert_eq!(s.best_score(), 10);
        s.resume(Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);
        s.make_move(Direction::Left);
        assert_eq!(s.best_score(), 10);
        assert_eq!(s.store().best(), 10);
        s.resume(Board::from_rows([[8, 8, 0, 0], [0; 4], [0; 4], [0; 4]]), 4);
        s.make_move(Direction::Left);
        assert_eq!(s.score(), 20);
        assert_eq!(s.store().best(), 20);
    }
}
