use super::board::{line_position, Direction, Position, SIZE};

/// One merge produced while resolving a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMerge {
    /// Output index of the merged tile within the oriented line.
    pub index: usize,
    /// Value of the merged tile (and its contribution to the score).
    pub value: u32,
}

impl LineMerge {
    /// Board coordinates of this merge for line `line_idx` moved in `dir`.
    #[inline]
    pub fn position(&self, dir: Direction, line_idx: usize) -> Position {
        line_position(dir, line_idx, self.index)
    }
}

/// Result of collapsing one line toward index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine {
    pub tiles: [u32; SIZE],
    pub merges: Vec<LineMerge>,
}

impl ResolvedLine {
    /// Sum of all merged values in this line.
    #[inline]
    pub fn score(&self) -> u64 {
        self.merges.iter().map(|m| u64::from(m.value)).sum()
    }
}

/// Value of merging tiles `a` and `b`, or `None` when they cannot merge.
///
/// Equal tiles whose doubled value would not fit in a `u32` never merge.
#[inline]
pub(crate) fn merge_value(a: u32, b: u32) -> Option<u32> {
    if a != 0 && a == b { a.checked_mul(2) } else { None }
}

/// Collapse a line toward index 0: drop empties, merge equal neighbours
/// pairwise, pad with zeros.
///
/// A merged tile never merges again in the same pass, and the first matching
/// pair wins, so `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`.
///
/// ```
/// use slide_2048::engine::resolve_line;
/// let r = resolve_line([2, 0, 0, 2]);
/// assert_eq!(r.tiles, [4, 0, 0, 0]);
/// assert_eq!(r.score(), 4);
/// ```
pub fn resolve_line(line: [u32; SIZE]) -> ResolvedLine {
    let compacted: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut tiles = [0; SIZE];
    let mut merges = Vec::new();
    let mut out = 0;
    let mut i = 0;
    while i < compacted.len() {
        let val = compacted[i];
        let merged = compacted.get(i + 1).and_then(|&next| merge_value(val, next));
        if let Some(merged) = merged {
            tiles[out] = merged;
            merges.push(LineMerge { index: out, value: merged });
            i += 2;
        } else {
            tiles[out] = val;
            i += 1;
        }
        out += 1;
    }
    ResolvedLine { tiles, merges }
}
