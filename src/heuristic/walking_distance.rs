//! BFS construction of the Walking Distance pattern, distance and link tables.

use std::collections::HashMap;

use crate::board::{HEIGHT, WIDTH};

/// Number of reachable goal-row-class patterns; the fixed point of the BFS
/// in [`WalkingDistanceTable::build`].
pub const WD_TABLE_SIZE: usize = 24964;

/// Sentinel stored in [`WalkingDistanceTable`] links meaning "no such
/// neighbor from this pattern".
pub const SENTINEL: u16 = WD_TABLE_SIZE as u16;

/// A 4x4 grid of goal-row-class counts: `table[i][j]` is the number of
/// tiles currently in row `i` whose solved row is `j`.
pub type PatternTable = [[u8; WIDTH]; HEIGHT];

const SOLVED_PATTERN_TABLE: PatternTable = [[4, 0, 0, 0], [0, 4, 0, 0], [0, 0, 4, 0], [0, 0, 0, 3]];

/// Packs a [`PatternTable`] into a 48-bit word: `(0, 0)` occupies the most
/// significant 3-bit field, iterated row-major (i-major, j-minor).
#[must_use]
pub fn pack(table: &PatternTable) -> u64 {
    let mut packed = 0u64;
    for row in table {
        for &count in row {
            packed = (packed << 3) | u64::from(count);
        }
    }
    packed
}

/// Inverse of [`pack`].
#[must_use]
pub fn unpack(mut packed: u64) -> PatternTable {
    let mut table = PatternTable::default();
    for row in table.iter_mut().rev() {
        for count in row.iter_mut().rev() {
            *count = (packed & 0x7) as u8;
            packed >>= 3;
        }
    }
    table
}

/// The Walking Distance tables: `WDPTN`, `WDTBL` and `WDLNK` from the
/// specification, built once by BFS and read-only afterwards.
pub struct WalkingDistanceTable {
    patterns: Vec<u64>,
    distances: Vec<u8>,
    /// `links[i][d][g]`: neighbor of pattern `i` under direction `d`
    /// (`0` = blank moves down, `1` = blank moves up) for goal-class `g`.
    links: Vec<[[u16; 4]; 2]>,
    index_of: HashMap<u64, u16>,
}

impl WalkingDistanceTable {
    /// Builds the table by breadth-first search from the solved pattern.
    ///
    /// # Panics
    /// Panics if the BFS does not terminate with exactly
    /// [`WD_TABLE_SIZE`] entries; that would indicate a broken pattern
    /// transition, not a bad input, so it is an assertion rather than a
    /// `Result`.
    #[must_use]
    pub fn build() -> Self {
        let pattern0 = pack(&SOLVED_PATTERN_TABLE);

        let mut patterns = Vec::with_capacity(WD_TABLE_SIZE);
        let mut distances = Vec::with_capacity(WD_TABLE_SIZE);
        let mut links: Vec<[[u16; 4]; 2]> = Vec::with_capacity(WD_TABLE_SIZE);
        let mut index_of = HashMap::with_capacity(WD_TABLE_SIZE);

        patterns.push(pattern0);
        distances.push(0);
        links.push([[SENTINEL; 4]; 2]);
        index_of.insert(pattern0, 0u16);

        let mut top = 0usize;
        while top < patterns.len() {
            let mut table = unpack(patterns[top]);
            let dist = distances[top] + 1;
            let blank_row = table
                .iter()
                .position(|row| row.iter().sum::<u8>() == 3)
                .expect("every WD pattern has exactly one row summing to 3");

            for (adjacent_row, dir) in [
                (blank_row.checked_add(1).filter(|&r| r < HEIGHT), 0u8),
                (blank_row.checked_sub(1), 1u8),
            ] {
                let Some(adjacent_row) = adjacent_row else {
                    continue;
                };

                for goal_class in 0..WIDTH {
                    if table[adjacent_row][goal_class] == 0 {
                        continue;
                    }

                    table[adjacent_row][goal_class] -= 1;
                    table[blank_row][goal_class] += 1;
                    let neighbor_pattern = pack(&table);

                    let neighbor = *index_of.entry(neighbor_pattern).or_insert_with(|| {
                        let idx = patterns.len() as u16;
                        patterns.push(neighbor_pattern);
                        distances.push(dist);
                        links.push([[SENTINEL; 4]; 2]);
                        idx
                    });

                    links[top][dir as usize][goal_class] = neighbor;
                    links[neighbor as usize][(dir ^ 1) as usize][goal_class] = top as u16;

                    table[adjacent_row][goal_class] += 1;
                    table[blank_row][goal_class] -= 1;
                }
            }

            top += 1;
        }

        assert_eq!(
            patterns.len(),
            WD_TABLE_SIZE,
            "WD pattern BFS terminated with {} entries, expected {WD_TABLE_SIZE}",
            patterns.len()
        );

        Self {
            patterns,
            distances,
            links,
            index_of,
        }
    }

    /// Minimum number of row-swaps to reach `index` from the solved pattern.
    #[must_use]
    pub fn distance(&self, index: u16) -> u8 {
        self.distances[index as usize]
    }

    /// Neighbor of `index` under `direction` for tiles of `goal_class`, or
    /// [`SENTINEL`] if no such neighbor exists.
    #[must_use]
    pub fn link(&self, index: u16, direction: u8, goal_class: usize) -> u16 {
        self.links[index as usize][direction as usize][goal_class]
    }

    /// Looks up the index of a packed pattern built from a board.
    ///
    /// # Panics
    /// Panics if `pattern` is not a reachable WD pattern; every pattern
    /// constructed from a valid board is reachable, so this indicates a
    /// corrupted table or a programming error, not bad input.
    #[must_use]
    pub fn index_of(&self, pattern: u64) -> u16 {
        *self
            .index_of
            .get(&pattern)
            .expect("pattern not found in Walking Distance table")
    }
}
