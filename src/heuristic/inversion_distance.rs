//! The Inversion Distance table: raw inversion count -> minimum adjacent swaps.

/// Largest raw inversion count that can occur along one axis of a 4x4 board
/// (`C(16, 2) = 120`; the table only needs to cover what the evaluator can
/// produce, `0..=105`, since each axis holds at most 15 non-blank tiles).
pub const ID_TABLE_SIZE: usize = 106;

/// `IDTBL[k] = k/3 + k%3`: each axis-parallel adjacent swap changes the
/// inversion count by at most 3, so this is the minimum number of swaps
/// needed to sort an axis with `k` inversions.
pub struct InversionDistanceTable([u8; ID_TABLE_SIZE]);

impl InversionDistanceTable {
    #[must_use]
    pub fn build() -> Self {
        let mut table = [0u8; ID_TABLE_SIZE];
        for (k, entry) in table.iter_mut().enumerate() {
            *entry = (k / 3 + k % 3) as u8;
        }
        Self(table)
    }

    #[must_use]
    pub fn get(&self, inversions: u16) -> u8 {
        self.0[inversions as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_inversions() {
        let id = InversionDistanceTable::build();
        assert_eq!(id.get(0), 0);
    }

    #[test]
    fn test_formula() {
        let id = InversionDistanceTable::build();
        assert_eq!(id.get(1), 1);
        assert_eq!(id.get(3), 1);
        assert_eq!(id.get(4), 2);
        assert_eq!(id.get(105), 35 + 0);
    }
}
