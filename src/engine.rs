//! Engine module: the 4x4 board, line resolution, whole-board shifts and
//! random tile spawning. Everything here is pure apart from the RNG handed in
//! to [`spawn_tile`].
//!
//! - `Board` is the grid with copy/equality/emptiness/mergeability helpers.
//! - [`resolve_line`] collapses one oriented row or column.
//! - [`shift`] applies it across the board for a [`Direction`].
//! - [`spawn_tile`] drops a 2 or 4 into a random empty cell.

mod board;
mod line;
mod moves;
mod spawn;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use board::{Board, Direction, ParseDirectionError, Position, SIZE};
pub use line::{resolve_line, LineMerge, ResolvedLine};
pub use moves::{can_shift, shift, ShiftResult};
pub use spawn::{random_tile_value, spawn_tile, FOUR_PROBABILITY};

/// Rendering hint produced by a move. Carries no state the engine reads back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeEvent {
    NewTile { position: Position },
    Merge { position: Position },
}

impl ChangeEvent {
    #[inline]
    pub fn position(&self) -> Position {
        match *self {
            ChangeEvent::NewTile { position } | ChangeEvent::Merge { position } => position,
        }
    }
}

impl Board {
    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use slide_2048::engine::{Board, Direction};
    /// let b = Board::from_rows([[2, 2, 2, 0], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(b.shift(Direction::Left).rows()[0], [4, 2, 0, 0]);
    /// ```
    #[inline]
    pub fn shift(self, dir: Direction) -> Self {
        moves::shift(&self, dir).board
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty slot, using the provided RNG.
    ///
    /// ```
    /// use slide_2048::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        spawn::spawn_tile(&mut self, rng);
        self
    }

    /// Perform a move then insert a random tile if the move changed the board.
    #[inline]
    pub fn make_move<R: Rng + ?Sized>(self, dir: Direction, rng: &mut R) -> Self {
        let moved = self.shift(dir);
        if moved != self { moved.with_random_tile(rng) } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn make_move_spawns_only_on_change() {
        let mut rng = StdRng::seed_from_u64(5);
        let stuck = Board::from_rows([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(stuck.make_move(Direction::Left, &mut rng), stuck);

        let moved = stuck.make_move(Direction::Right, &mut rng);
        assert_eq!(moved.rows()[0][2..], [2, 4]);
        assert_eq!(moved.count_empty(), 13);
    }

    #[test]
    fn change_event_serializes_with_kind_tag() {
        let ev = ChangeEvent::Merge { position: Position::new(0, 3) };
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(json, r#"{"kind":"merge","position":{"row":0,"col":3}}"#);
        assert_eq!(ev.position(), Position::new(0, 3));
    }
}
