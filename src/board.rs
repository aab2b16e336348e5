//! Fixed-size 4x4 sliding-tile board: storage, parsing, and blank lookup.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// Board width and height; this crate only supports the 4x4 15-puzzle.
pub const WIDTH: usize = 4;
pub const HEIGHT: usize = 4;
pub const NUM_CELLS: usize = WIDTH * HEIGHT;

/// The canonical solved layout: tiles 1..15 in row-major order, blank last.
pub const SOLVED: [u8; NUM_CELLS] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0];

/// Error constructing a [`Board`] from 16 raw cell values.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected {expected} cells, found {found}")]
    WrongCellCount { expected: usize, found: usize },
    #[error("tile value {0} is out of range (must be 0..=15)")]
    TileOutOfRange(u32),
    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),
}

/// Error parsing a [`Board`] from its textual form.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("invalid integer: {0}")]
    InvalidInteger(#[from] ParseIntError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A 4x4 sliding-tile board, stored as 16 cells in row-major order.
///
/// Cell value `0` is the blank; values `1..=15` are tiles. A `Board` is
/// always a permutation of `0..=15` with no duplicates.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board([u8; NUM_CELLS]);

impl Board {
    /// Builds a board from 16 raw cell values, validating range and uniqueness.
    pub fn new(cells: [u8; NUM_CELLS]) -> Result<Self, BoardError> {
        let mut seen = [false; NUM_CELLS];
        for &tile in &cells {
            let tile = tile as usize;
            if tile >= NUM_CELLS {
                return Err(BoardError::TileOutOfRange(tile as u32));
            }
            if seen[tile] {
                return Err(BoardError::DuplicateTile(tile as u8));
            }
            seen[tile] = true;
        }
        Ok(Self(cells))
    }

    /// The canonical solved board.
    #[must_use]
    pub fn solved() -> Self {
        Self(SOLVED)
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.0 == SOLVED
    }

    #[must_use]
    pub fn cells(&self) -> &[u8; NUM_CELLS] {
        &self.0
    }

    #[must_use]
    pub fn cell(&self, pos: usize) -> u8 {
        self.0[pos]
    }

    #[must_use]
    pub fn row(pos: usize) -> usize {
        pos / WIDTH
    }

    #[must_use]
    pub fn col(pos: usize) -> usize {
        pos % WIDTH
    }

    /// Position of the unique blank cell.
    ///
    /// # Panics
    /// Panics if no cell holds `0`. A [`Board`] is only ever constructed
    /// through [`Board::new`]/[`FromStr`], both of which guarantee a blank
    /// exists, so this is an internal-consistency check, not recoverable.
    #[must_use]
    pub fn blank_position(&self) -> usize {
        self.0
            .iter()
            .position(|&tile| tile == 0)
            .expect("board has no blank cell")
    }

    /// Swaps the values at two cells, used by the solver to slide a tile.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.0).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.chunks(WIDTH) {
            for (i, tile) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{tile}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [0u8; NUM_CELLS];
        let mut found = 0usize;
        for token in s.split_whitespace() {
            let value: u32 = token.parse()?;
            let tile =
                u8::try_from(value).map_err(|_| BoardError::TileOutOfRange(value))?;
            if found >= NUM_CELLS {
                found += 1;
                continue;
            }
            cells[found] = tile;
            found += 1;
        }
        if found != NUM_CELLS {
            return Err(BoardError::WrongCellCount {
                expected: NUM_CELLS,
                found,
            }
            .into());
        }
        Ok(Board::new(cells)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved() {
        let board = Board::solved();
        assert!(board.is_solved());
        assert_eq!(board.blank_position(), 15);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let mut cells = SOLVED;
        cells[0] = 16;
        assert_eq!(
            Board::new(cells),
            Err(BoardError::TileOutOfRange(16))
        );
    }

    #[test]
    fn test_new_rejects_duplicate() {
        let mut cells = SOLVED;
        cells[0] = 2;
        assert_eq!(Board::new(cells), Err(BoardError::DuplicateTile(2)));
    }

    #[test]
    fn test_from_str_solved() {
        let board: Board = "1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 0".parse().unwrap();
        assert!(board.is_solved());
    }

    #[test]
    fn test_from_str_wrong_count() {
        let err = "1 2 3".parse::<Board>().unwrap_err();
        assert!(matches!(
            err,
            ParseBoardError::Board(BoardError::WrongCellCount {
                expected: 16,
                found: 3
            })
        ));
    }

    #[test]
    fn test_from_str_invalid_integer() {
        let err = "1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 x"
            .parse::<Board>()
            .unwrap_err();
        assert!(matches!(err, ParseBoardError::InvalidInteger(_)));
    }

    #[test]
    fn test_display_round_trip() {
        let board = Board::solved();
        let text = board.to_string();
        let parsed: Board = text.parse().unwrap();
        assert_eq!(board, parsed);
    }

    #[test]
    fn test_row_col() {
        assert_eq!(Board::row(5), 1);
        assert_eq!(Board::col(5), 1);
        assert_eq!(Board::row(0), 0);
        assert_eq!(Board::col(15), 3);
    }
}
