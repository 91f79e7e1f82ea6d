use rand::Rng;

use super::board::Board;
use super::ChangeEvent;

/// Probability that a spawned tile is a 4 rather than a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Draw a new tile value: 2 (90%) or 4 (10%).
#[inline]
pub fn random_tile_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_bool(FOUR_PROBABILITY) { 4 } else { 2 }
}

/// Place a random tile in a uniformly chosen empty cell.
///
/// Returns the new-tile event, or `None` (leaving the board untouched) when
/// the board is already full.
///
/// ```
/// use slide_2048::engine::{spawn_tile, Board};
/// use rand::{rngs::StdRng, SeedableRng};
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut b = Board::EMPTY;
/// assert!(spawn_tile(&mut b, &mut rng).is_some());
/// assert_eq!(b.count_empty(), 15);
/// ```
pub fn spawn_tile<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<ChangeEvent> {
    let empty = board.count_empty();
    if empty == 0 {
        return None;
    }
    let index = rng.gen_range(0..empty);
    let position = board.empty_cells().nth(index)?;
    board.set(position, random_tile_value(rng));
    Some(ChangeEvent::NewTile { position })
}
