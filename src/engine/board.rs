use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::line::merge_value;

/// Side length of the (fixed) square board.
pub const SIZE: usize = 4;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in wire order (`Up`, `Down`, `Left`, `Right`).
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Decode a direction from its wire index (0..4).
    ///
    /// Panics on any other value: an out-of-range index is a bug in the host,
    /// not a runtime condition the engine should paper over.
    pub fn from_index(idx: u8) -> Direction {
        match idx {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            3 => Direction::Right,
            other => panic!("invalid direction index {other}; expected 0..4"),
        }
    }

    /// Wire index of this direction (inverse of [`Direction::from_index`]).
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// True for `Left`/`Right`, i.e. moves that operate on rows.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when tiles travel toward the high index of a line (`Right`/`Down`).
    #[inline]
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction '{0}' (expected up, down, left or right)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// A cell coordinate, 0-indexed, both components in `0..SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < SIZE && col < SIZE, "position ({row}, {col}) out of bounds");
        Position { row, col }
    }
}

/// 4x4 grid of tile values. `0` is an empty cell; every other value is a
/// power of two >= 2.
///
/// `Board` is `Copy`, so snapshots are plain value copies with no aliasing.
/// Structural equality is the derived `PartialEq`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board([[u32; SIZE]; SIZE]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Build a board from row-major tile values.
    ///
    /// ```
    /// use slide_2048::engine::{Board, Position};
    /// let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(b.get(Position::new(0, 1)), 2);
    /// ```
    #[inline]
    pub fn from_rows(rows: [[u32; SIZE]; SIZE]) -> Self {
        debug_assert!(
            rows.iter().flatten().all(|&v| v == 0 || (v >= 2 && v.is_power_of_two())),
            "tiles must be 0 or a power of two >= 2"
        );
        Board(rows)
    }

    /// Borrow the rows of this board.
    #[inline]
    pub fn rows(&self) -> &[[u32; SIZE]; SIZE] {
        &self.0
    }

    /// Consume this board, returning its rows.
    #[inline]
    pub fn into_rows(self) -> [[u32; SIZE]; SIZE] {
        self.0
    }

    #[inline]
    pub fn get(&self, pos: Position) -> u32 {
        self.0[pos.row][pos.col]
    }

    #[inline]
    pub fn set(&mut self, pos: Position, value: u32) {
        self.0[pos.row][pos.col] = value;
    }

    /// Read line `idx` oriented so that tiles travel toward index 0 when
    /// moving in `dir`: rows for `Left`/`Right`, columns for `Up`/`Down`,
    /// reversed for `Right`/`Down`.
    pub(crate) fn read_line(&self, dir: Direction, idx: usize) -> [u32; SIZE] {
        let mut line = [0; SIZE];
        for (offset, slot) in line.iter_mut().enumerate() {
            *slot = self.get(line_position(dir, idx, offset));
        }
        line
    }

    /// Inverse of [`Board::read_line`]: write an oriented line back.
    pub(crate) fn write_line(&mut self, dir: Direction, idx: usize, line: [u32; SIZE]) {
        for (offset, &value) in line.iter().enumerate() {
            self.set(line_position(dir, idx, offset), value);
        }
    }

    /// Iterate over every cell as `(position, value)` in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, u32)> + '_ {
        self.0.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &value)| (Position { row, col }, value))
        })
    }

    /// Positions of empty cells in row-major order. Recomputed on every call.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.tiles().filter(|&(_, v)| v == 0).map(|(pos, _)| pos)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        self.0.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Return the highest tile value present (0 for an empty board).
    #[inline]
    pub fn highest_tile(&self) -> u32 {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    /// True iff some move could change the board: an empty cell exists or two
    /// row- or column-adjacent cells hold the same value.
    ///
    /// Scans the whole board on every call.
    pub fn has_any_move(&self) -> bool {
        if self.empty_cells().next().is_some() {
            return true;
        }
        let rows = &self.0;
        for r in 0..SIZE {
            for c in 0..SIZE - 1 {
                if merge_value(rows[r][c], rows[r][c + 1]).is_some() {
                    return true;
                }
            }
        }
        for c in 0..SIZE {
            for r in 0..SIZE - 1 {
                if merge_value(rows[r][c], rows[r + 1][c]).is_some() {
                    return true;
                }
            }
        }
        false
    }

    /// Return true if no legal moves remain.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        !self.has_any_move()
    }
}

/// Map an offset along an oriented line back to board coordinates.
///
/// For `Left`/`Up` the offset is the coordinate along the line; for
/// `Right`/`Down` it is `SIZE - 1 - offset`.
#[inline]
pub(crate) fn line_position(dir: Direction, line_idx: usize, offset: usize) -> Position {
    let along = if dir.is_reversed() { SIZE - 1 - offset } else { offset };
    if dir.is_horizontal() {
        Position { row: line_idx, col: along }
    } else {
        Position { row: along, col: line_idx }
    }
}

impl From<[[u32; SIZE]; SIZE]> for Board {
    fn from(rows: [[u32; SIZE]; SIZE]) -> Self {
        Board::from_rows(rows)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(SIZE * 8 - 1);
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{separator}")?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: u32) -> String {
    match val {
        0 => " ".repeat(7),
        x => format!("{x:^7}"),
    }
}
