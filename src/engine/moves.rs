use super::board::{Board, Direction, SIZE};
use super::line::resolve_line;
use super::ChangeEvent;

/// Outcome of sliding a board in one direction, before any spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftResult {
    /// The board after the slide. Identical to the input when `changed` is false.
    pub board: Board,
    pub changed: bool,
    pub score_delta: u64,
    /// Merge events, line by line in line-index order.
    pub events: Vec<ChangeEvent>,
}

/// Slide/merge every row (`Left`/`Right`) or column (`Up`/`Down`) of `board`
/// in `dir`. No randomness; the input board is never modified.
///
/// Only lines whose values actually differ are written to the result.
///
/// ```
/// use slide_2048::engine::{shift, Board, Direction};
/// let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
/// let r = shift(&b, Direction::Left);
/// assert!(r.changed);
/// assert_eq!(r.score_delta, 4);
/// assert_eq!(r.board.rows()[0], [4, 0, 0, 0]);
/// ```
pub fn shift(board: &Board, dir: Direction) -> ShiftResult {
    let mut next = *board;
    let mut changed = false;
    let mut score_delta = 0;
    let mut events = Vec::new();

    for line_idx in 0..SIZE {
        let line = board.read_line(dir, line_idx);
        let resolved = resolve_line(line);
        // Orientation is a bijection, so comparing oriented lines is the same
        // as comparing the board-relative row/column.
        if resolved.tiles == line {
            continue;
        }
        changed = true;
        score_delta += resolved.score();
        events.extend(resolved.merges.iter().map(|m| ChangeEvent::Merge {
            position: m.position(dir, line_idx),
        }));
        next.write_line(dir, line_idx, resolved.tiles);
    }

    ShiftResult { board: next, changed, score_delta, events }
}

/// True if shifting `board` in `dir` would change it.
#[inline]
pub fn can_shift(board: &Board, dir: Direction) -> bool {
    (0..SIZE).any(|idx| {
        let line = board.read_line(dir, idx);
        resolve_line(line).tiles != line
    })
}
