//! Square distance matrix.

/// N×N grid of nullable distances in meters, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<Option<f64>>,
}

impl DistanceMatrix {
    /// Matrix with every cell unset.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[row * self.size + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: Option<f64>) {
        self.cells[row * self.size + col] = value;
    }

    /// Rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        // chunks(0) panics, and an empty matrix has no rows anyway.
        self.cells.chunks(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<Option<f64>>> {
        self.rows().map(<[Option<f64>]>::to_vec).collect()
    }
}

impl From<Vec<Vec<Option<f64>>>> for DistanceMatrix {
    /// Build from rows; short rows are padded with unset cells.
    fn from(rows: Vec<Vec<Option<f64>>>) -> Self {
        let mut matrix = DistanceMatrix::new(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            for (j, value) in row.into_iter().enumerate().take(matrix.size) {
                matrix.set(i, j, value);
            }
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unset() {
        let matrix = DistanceMatrix::new(3);
        assert_eq!(matrix.size(), 3);
        assert!(matrix.rows().all(|row| row.iter().all(Option::is_none)));
        assert_eq!(matrix.rows().count(), 3);
    }

    #[test]
    fn test_set_and_get() {
        let mut matrix = DistanceMatrix::new(2);
        matrix.set(0, 1, Some(1500.4));
        assert_eq!(matrix.get(0, 1), Some(1500.4));
        assert_eq!(matrix.get(1, 0), None);
        assert_eq!(matrix.get(5, 0), None);
    }

    #[test]
    fn test_from_rows() {
        let matrix = DistanceMatrix::from(vec![vec![Some(0.0), Some(1.0)], vec![Some(2.0)]]);
        assert_eq!(
            matrix.to_rows(),
            vec![vec![Some(0.0), Some(1.0)], vec![Some(2.0), None]]
        );
    }

    #[test]
    fn test_empty_matrix_has_no_rows() {
        assert_eq!(DistanceMatrix::new(0).rows().count(), 0);
    }
}
