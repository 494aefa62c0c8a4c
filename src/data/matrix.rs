//! Dense column-major feature matrix.

/// Dense column-major `f32` matrix.
///
/// Column-major layout keeps each feature contiguous, which is the access
/// pattern of the split search during training. Missing values are stored as
/// `f32::NAN`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColMatrix {
    /// Values, column after column (`n_rows * n_cols`).
    values: Vec<f32>,
    n_rows: usize,
    n_cols: usize,
}

impl ColMatrix {
    /// Create a matrix from column-major values.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != n_rows * n_cols`.
    pub fn new(values: Vec<f32>, n_rows: usize, n_cols: usize) -> Self {
        assert_eq!(
            values.len(),
            n_rows * n_cols,
            "values length must equal n_rows * n_cols"
        );
        Self {
            values,
            n_rows,
            n_cols,
        }
    }

    /// Create a matrix from per-column vectors.
    ///
    /// # Panics
    ///
    /// Panics if the columns have inconsistent lengths.
    pub fn from_columns(columns: Vec<Vec<f32>>) -> Self {
        let n_cols = columns.len();
        let n_rows = columns.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for col in &columns {
            assert_eq!(col.len(), n_rows, "all columns must have the same length");
            values.extend_from_slice(col);
        }
        Self {
            values,
            n_rows,
            n_cols,
        }
    }

    /// Number of rows (samples).
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns (features).
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Contiguous slice of column `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col >= n_cols()`.
    #[inline]
    pub fn col_slice(&self, col: usize) -> &[f32] {
        assert!(col < self.n_cols, "column index out of bounds");
        &self.values[col * self.n_rows..(col + 1) * self.n_rows]
    }

    /// Element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.n_rows, "row index out of bounds");
        self.col_slice(col)[row]
    }

    /// Copy row `row` into `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `buf.len() < n_cols()` or `row >= n_rows()`.
    pub fn copy_row(&self, row: usize, buf: &mut [f32]) {
        assert!(buf.len() >= self.n_cols, "buffer too small for row");
        for col in 0..self.n_cols {
            buf[col] = self.get(row, col);
        }
    }

    /// New matrix containing only the given rows, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn select_rows(&self, rows: &[u32]) -> Self {
        let mut values = Vec::with_capacity(rows.len() * self.n_cols);
        for col in 0..self.n_cols {
            let src = self.col_slice(col);
            values.extend(rows.iter().map(|&r| src[r as usize]));
        }
        Self {
            values,
            n_rows: rows.len(),
            n_cols: self.n_cols,
        }
    }
}
