//! Combines the Walking Distance and Inversion Distance tables into a single
//! admissible heuristic, and evaluates the four indices from a raw board.

use itertools::Itertools;

use crate::board::{Board, HEIGHT, NUM_CELLS, WIDTH};
use crate::heuristic::inversion_distance::InversionDistanceTable;
use crate::heuristic::walking_distance::{pack, PatternTable, WalkingDistanceTable};

/// Permutes tile *values* so that a vertical-axis pattern lookup can be
/// reused for the horizontal axis. `CONV[0] = 0` (the blank maps to itself).
pub const CONV: [u8; NUM_CELLS] = [0, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15, 4, 8, 12];

/// Permutes board *positions* to read the board as if transposed. Used
/// together with [`CONV`]; the two must never be interchanged.
pub const CONVP: [usize; NUM_CELLS] = [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15];

/// The four indices that fully describe the heuristic state of a board:
/// a Walking Distance pattern index and an inversion count, each for the
/// vertical and horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Indices {
    pub idx_v: u16,
    pub idx_h: u16,
    pub inv_v: u16,
    pub inv_h: u16,
}

/// `h = max(WDTBL[idx_v], IDTBL[inv_v]) + max(WDTBL[idx_h], IDTBL[inv_h])`.
#[must_use]
pub fn bound(wd: &WalkingDistanceTable, id: &InversionDistanceTable, indices: Indices) -> u8 {
    let vertical = wd.distance(indices.idx_v).max(id.get(indices.inv_v));
    let horizontal = wd.distance(indices.idx_h).max(id.get(indices.inv_h));
    vertical + horizontal
}

/// Goal-row-class of tile `t`: `(t - 1) / 4` for `t >= 1`.
fn goal_class(tile: u8) -> usize {
    ((tile - 1) / WIDTH as u8) as usize
}

/// Counts inversions among the non-blank values of `sequence`, in the
/// order the caller provides them (already axis-transformed if needed).
fn count_inversions(sequence: &[u8; NUM_CELLS]) -> u16 {
    (0..sequence.len())
        .tuple_combinations()
        .filter(|&(i, j)| {
            let (a, b) = (sequence[i], sequence[j]);
            a != 0 && b != 0 && a > b
        })
        .count() as u16
}

/// Builds the goal-row-class pattern table for a row-major sequence of 16
/// cell values (already axis-transformed if needed, with non-blank values
/// already remapped through [`CONV`] when computing the horizontal half).
fn goal_class_pattern(sequence: &[u8; NUM_CELLS]) -> PatternTable {
    let mut table = PatternTable::default();
    for (pos, &tile) in sequence.iter().enumerate() {
        if tile == 0 {
            continue;
        }
        let row = pos / WIDTH;
        table[row][goal_class(tile)] += 1;
    }
    table
}

/// Evaluates the full heuristic state of `board` from scratch: the four
/// indices, and the resulting `h` value.
#[must_use]
pub fn evaluate_full(
    wd: &WalkingDistanceTable,
    id: &InversionDistanceTable,
    board: &Board,
) -> (Indices, u8) {
    let cells = *board.cells();

    let idx_v = wd.index_of(pack(&goal_class_pattern(&cells)));
    let inv_v = count_inversions(&cells);

    let mut transposed = [0u8; NUM_CELLS];
    for i in 0..HEIGHT {
        for j in 0..WIDTH {
            transposed[i * WIDTH + j] = CONV[cells[j * WIDTH + i] as usize];
        }
    }
    let idx_h = wd.index_of(pack(&goal_class_pattern(&transposed)));

    let mut axis_flipped = [0u8; NUM_CELLS];
    for (k, &p) in CONVP.iter().enumerate() {
        axis_flipped[k] = CONV[cells[p] as usize];
    }
    let inv_h = count_inversions(&axis_flipped);

    let indices = Indices {
        idx_v,
        idx_h,
        inv_v,
        inv_h,
    };
    let h = bound(wd, id, indices);
    (indices, h)
}
