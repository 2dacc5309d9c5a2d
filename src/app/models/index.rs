//! Row selection for [`Data`](super::Data) tables
//!
//! Every row-reducing filter computes a [`RowIndex`] once and hands it to the
//! generic projection [`Data::slice`](super::Data::slice).

/// Selection of rows in a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIndex {
    /// One flag per row; `true` keeps the row
    Mask(Vec<bool>),

    /// Positions of the rows to keep, in output order
    Positions(Vec<usize>),
}

impl RowIndex {
    /// Select every row of a table with `len` rows
    pub fn all(len: usize) -> Self {
        RowIndex::Mask(vec![true; len])
    }

    /// Select no row of a table with `len` rows
    pub fn none(len: usize) -> Self {
        RowIndex::Mask(vec![false; len])
    }

    pub fn from_mask(mask: Vec<bool>) -> Self {
        RowIndex::Mask(mask)
    }

    pub fn from_positions(positions: Vec<usize>) -> Self {
        RowIndex::Positions(positions)
    }

    /// Build a mask by evaluating `keep` for each row position
    pub fn from_fn(len: usize, keep: impl FnMut(usize) -> bool) -> Self {
        RowIndex::Mask((0..len).map(keep).collect())
    }

    /// Number of rows this index selects
    pub fn selected(&self) -> usize {
        match self {
            RowIndex::Mask(mask) => mask.iter().filter(|keep| **keep).count(),
            RowIndex::Positions(positions) => positions.len(),
        }
    }

    /// Convert to a mask over a table with `len` rows
    ///
    /// Positions outside the table are ignored.
    pub fn to_mask(&self, len: usize) -> Vec<bool> {
        match self {
            RowIndex::Mask(mask) => mask.clone(),
            RowIndex::Positions(positions) => {
                let mut mask = vec![false; len];
                for &position in positions {
                    if let Some(slot) = mask.get_mut(position) {
                        *slot = true;
                    }
                }
                mask
            }
        }
    }

    /// True when this index keeps every row of a table with `len` rows, in order
    pub fn is_identity(&self, len: usize) -> bool {
        match self {
            RowIndex::Mask(mask) => mask.len() == len && mask.iter().all(|keep| *keep),
            RowIndex::Positions(positions) => {
                positions.len() == len && positions.iter().enumerate().all(|(i, p)| i == *p)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_counts() {
        assert_eq!(RowIndex::all(4).selected(), 4);
        assert_eq!(RowIndex::none(4).selected(), 0);
        assert_eq!(RowIndex::from_mask(vec![true, false, true]).selected(), 2);
        assert_eq!(RowIndex::from_positions(vec![3, 1]).selected(), 2);
    }

    #[test]
    fn test_positions_to_mask() {
        let index = RowIndex::from_positions(vec![0, 2, 9]);
        assert_eq!(index.to_mask(3), vec![true, false, true]);
    }

    #[test]
    fn test_from_fn() {
        let even = RowIndex::from_fn(5, |i| i % 2 == 0);
        assert_eq!(even.selected(), 3);
    }

    #[test]
    fn test_is_identity() {
        assert!(RowIndex::all(3).is_identity(3));
        assert!(RowIndex::from_positions(vec![0, 1, 2]).is_identity(3));
        assert!(!RowIndex::from_positions(vec![1, 0, 2]).is_identity(3));
        assert!(!RowIndex::from_mask(vec![true, false]).is_identity(2));
    }
}
