//! Solvability predicate: tile-inversion parity combined with blank-row parity.

use itertools::Itertools;

use crate::board::Board;

/// True iff `board` can reach the solved state by legal slides.
///
/// For a 4-wide board this is the classic rule: solvable iff
/// `inversion_count + blank_row_from_top` is odd.
#[must_use]
pub fn is_solvable(board: &Board) -> bool {
    let inversions = inversion_count(board.cells());
    let blank_row = Board::row(board.blank_position());
    (inversions + blank_row) % 2 == 1
}

/// Count of unordered pairs `(i, j)`, `i < j`, in row-major order whose
/// non-blank values are inverted (`cells[j] < cells[i]`).
fn inversion_count(cells: &[u8; crate::board::NUM_CELLS]) -> usize {
    (0..cells.len())
        .tuple_combinations()
        .filter(|&(i, j)| {
            let (a, b) = (cells[i], cells[j]);
            a != 0 && b != 0 && a > b
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_is_solvable() {
        assert!(is_solvable(&Board::solved()));
    }

    #[test]
    fn test_adjacent_swap_is_unsolvable() {
        let board: Board = "1 2 3 4 5 6 7 8 9 10 11 12 13 15 14 0"
            .parse()
            .unwrap();
        assert!(!is_solvable(&board));
    }

    #[test]
    fn test_one_move_is_solvable() {
        let board: Board = "1 2 3 4 5 6 7 8 9 10 11 12 13 14 0 15"
            .parse()
            .unwrap();
        assert!(is_solvable(&board));
    }

    #[test]
    fn test_korf_1_is_solvable() {
        let board: Board = "14 13 15 7 11 12 9 5 6 0 2 1 4 8 10 3"
            .parse()
            .unwrap();
        assert!(is_solvable(&board));
    }
}
