use super::ids::ResidueIndex;
use nalgebra::DMatrix;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PaeMatrixError {
    #[error("Flat PAE array of length {len} is not a perfect square and cannot be reshaped")]
    NotPerfectSquare { len: usize },
    #[error("PAE matrix is not square: {rows} rows but a row of {columns} columns")]
    NotSquare { rows: usize, columns: usize },
    #[error("Invalid PAE value {value} at row {row}, column {column}; must be finite and >= 0")]
    InvalidValue {
        row: usize,
        column: usize,
        value: f64,
    },
}

/// Square predicted-aligned-error matrix indexed by [`ResidueIndex`].
///
/// Row `i`, column `j` holds the expected position error of residue `j` when the
/// prediction is aligned on residue `i`. The matrix is not required to be symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct PaeMatrix {
    values: DMatrix<f64>,
}

impl PaeMatrix {
    /// Builds a matrix from row-major nested rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, PaeMatrixError> {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != n) {
            return Err(PaeMatrixError::NotSquare {
                rows: n,
                columns: bad.len(),
            });
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Self::from_row_major(n, flat)
    }

    /// Reshapes a flattened row-major array of length `n²` into an `n × n` matrix,
    /// so that `matrix[(i, j)] == flat[i * n + j]`.
    pub fn from_flat(values: Vec<f64>) -> Result<Self, PaeMatrixError> {
        let len = values.len();
        let n = len.isqrt();
        if n * n != len {
            return Err(PaeMatrixError::NotPerfectSquare { len });
        }
        Self::from_row_major(n, values)
    }

    /// Builds a matrix from column-major storage (e.g. Fortran-ordered arrays).
    pub fn from_column_major(n: usize, values: Vec<f64>) -> Result<Self, PaeMatrixError> {
        if values.len() != n * n {
            return Err(PaeMatrixError::NotSquare {
                rows: n,
                columns: values.len().checked_div(n).unwrap_or(0),
            });
        }
        Self::validated(DMatrix::from_vec(n, n, values))
    }

    fn from_row_major(n: usize, values: Vec<f64>) -> Result<Self, PaeMatrixError> {
        Self::validated(DMatrix::from_row_slice(n, n, &values))
    }

    fn validated(values: DMatrix<f64>) -> Result<Self, PaeMatrixError> {
        for row in 0..values.nrows() {
            for column in 0..values.ncols() {
                let value = values[(row, column)];
                if !value.is_finite() || value < 0.0 {
                    return Err(PaeMatrixError::InvalidValue { row, column, value });
                }
            }
        }
        Ok(Self { values })
    }

    /// Number of rows (and columns).
    pub fn dimension(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Error of residue `j` when aligned on residue `i`.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the matrix. Indices obtained from an
    /// [`AlignedComplex`](crate::engine::alignment::AlignedComplex) are always in range.
    #[inline]
    pub fn get(&self, i: ResidueIndex, j: ResidueIndex) -> f64 {
        self.values[(i.get(), j.get())]
    }

    /// Error for the unordered pair `{i, j}`: the larger of both alignment directions.
    #[inline]
    pub fn pair_error(&self, i: ResidueIndex, j: ResidueIndex) -> f64 {
        self.get(i, j).max(self.get(j, i))
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Copies the matrix into nested row-major vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: usize) -> ResidueIndex {
        ResidueIndex::new(i)
    }

    #[test]
    fn from_flat_reshapes_perfect_square_row_major() {
        let flat: Vec<f64> = (0..16).map(f64::from).collect();
        let matrix = PaeMatrix::from_flat(flat.clone()).unwrap();
        assert_eq!(matrix.dimension(), 4);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(matrix.get(idx(i), idx(j)), flat[i * 4 + j]);
            }
        }
    }

    #[test]
    fn from_flat_rejects_non_perfect_square() {
        let result = PaeMatrix::from_flat(vec![1.0; 15]);
        assert_eq!(result, Err(PaeMatrixError::NotPerfectSquare { len: 15 }));
    }

    #[test]
    fn from_flat_accepts_every_perfect_square_length() {
        for n in 0..8usize {
            let matrix = PaeMatrix::from_flat(vec![0.5; n * n]).unwrap();
            assert_eq!(matrix.dimension(), n);
        }
        for len in [2usize, 3, 5, 8, 10, 24, 26] {
            assert!(PaeMatrix::from_flat(vec![0.0; len]).is_err());
        }
    }

    #[test]
    fn from_rows_rejects_ragged_and_rectangular_input() {
        let ragged = vec![vec![0.0, 1.0], vec![2.0]];
        assert_eq!(
            PaeMatrix::from_rows(ragged),
            Err(PaeMatrixError::NotSquare {
                rows: 2,
                columns: 1
            })
        );

        let rectangular = vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]];
        assert!(matches!(
            PaeMatrix::from_rows(rectangular),
            Err(PaeMatrixError::NotSquare { rows: 2, columns: 3 })
        ));
    }

    #[test]
    fn from_rows_and_column_major_agree() {
        let by_rows = PaeMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
        let by_columns = PaeMatrix::from_column_major(2, vec![0.0, 2.0, 1.0, 3.0]).unwrap();
        assert_eq!(by_rows, by_columns);
        assert_eq!(by_rows.get(idx(0), idx(1)), 1.0);
        assert_eq!(by_rows.to_rows(), vec![vec![0.0, 1.0], vec![2.0, 3.0]]);
    }

    #[test]
    fn negative_and_non_finite_values_are_rejected() {
        let negative = PaeMatrix::from_flat(vec![0.0, -1.0, 0.0, 0.0]);
        assert!(matches!(
            negative,
            Err(PaeMatrixError::InvalidValue { row: 0, column: 1, .. })
        ));
        let nan = PaeMatrix::from_rows(vec![vec![0.0, 0.0], vec![f64::NAN, 0.0]]);
        assert!(matches!(
            nan,
            Err(PaeMatrixError::InvalidValue { row: 1, column: 0, .. })
        ));
    }

    #[test]
    fn pair_error_is_symmetric_maximum() {
        let matrix = PaeMatrix::from_rows(vec![vec![0.0, 4.0], vec![9.0, 0.0]]).unwrap();
        assert_eq!(matrix.pair_error(idx(0), idx(1)), 9.0);
        assert_eq!(matrix.pair_error(idx(1), idx(0)), 9.0);
    }

    #[test]
    fn empty_flat_array_yields_empty_matrix() {
        let matrix = PaeMatrix::from_flat(Vec::new()).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.dimension(), 0);
    }
}
