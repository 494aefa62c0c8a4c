//! Named-column frame built from CSV input.

use super::ColMatrix;

/// Errors raised by column lookups and selections.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FrameError {
    #[error("missing required column: {0}")]
    MissingColumn(String),
}

/// A single named column of `f32` values. Missing cells are `f32::NAN`.
#[derive(Debug, Clone)]
pub(crate) struct Column {
    pub name: String,
    pub values: Vec<f32>,
}

/// A frame of equally-sized named columns.
///
/// Frames are the pipeline's in-memory form of a CSV file. Operations that
/// derive data (`to_col_matrix`, `medians`) produce new values; `drop_column`
/// and `fill_missing` mutate the frame itself, which is always a copy of the
/// on-disk input.
#[derive(Debug, Clone)]
pub struct ColumnFrame {
    columns: Vec<Column>,
    n_rows: usize,
}

impl ColumnFrame {
    pub(crate) fn from_columns(columns: Vec<Column>, n_rows: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == n_rows));
        Self { columns, n_rows }
    }

    /// Number of rows in the frame.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns in the frame.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Column names, in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Values of the named column, if present.
    pub fn column(&self, name: &str) -> Option<&[f32]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Values of the named column, or an error naming the missing column.
    pub fn require_column(&self, name: &str) -> Result<&[f32], FrameError> {
        self.column(name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))
    }

    /// Remove the named column. Removing an absent column is a no-op.
    pub fn drop_column(&mut self, name: &str) {
        self.columns.retain(|c| c.name != name);
    }

    /// Column-wise median of the named column, ignoring NaN.
    ///
    /// Returns NaN when every value is missing. An even count of finite
    /// values averages the two middle elements.
    pub fn median(&self, name: &str) -> Result<f32, FrameError> {
        let values = self.require_column(name)?;
        let mut finite: Vec<f32> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if finite.is_empty() {
            return Ok(f32::NAN);
        }
        finite.sort_by(|a, b| a.total_cmp(b));
        let mid = finite.len() / 2;
        let median = if finite.len() % 2 == 1 {
            finite[mid]
        } else {
            (finite[mid - 1] + finite[mid]) / 2.0
        };
        Ok(median)
    }

    /// Replace NaN values in the named column with `fill`.
    pub fn fill_missing(&mut self, name: &str, fill: f32) -> Result<(), FrameError> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))?;
        for v in &mut column.values {
            if v.is_nan() {
                *v = fill;
            }
        }
        Ok(())
    }

    /// Select the named columns, in order, into a column-major matrix.
    pub fn to_col_matrix(&self, names: &[&str]) -> Result<ColMatrix, FrameError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            columns.push(self.require_column(name)?.to_vec());
        }
        Ok(ColMatrix::from_columns(columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> ColumnFrame {
        ColumnFrame::from_columns(
            vec![
                Column {
                    name: "a".into(),
                    values: vec![3.0, 1.0, f32::NAN, 2.0],
                },
                Column {
                    name: "b".into(),
                    values: vec![10.0, 20.0, 30.0, 40.0],
                },
            ],
            4,
        )
    }

    #[test]
    fn median_ignores_nan_and_averages_middle_pair() {
        let f = frame();
        // Finite values of "a" are [1, 2, 3]; odd count takes the middle.
        assert_eq!(f.median("a").unwrap(), 2.0);
        // "b" has an even count: (20 + 30) / 2.
        assert_eq!(f.median("b").unwrap(), 25.0);
    }

    #[test]
    fn median_of_all_missing_column_is_nan() {
        let f = ColumnFrame::from_columns(
            vec![Column {
                name: "x".into(),
                values: vec![f32::NAN, f32::NAN],
            }],
            2,
        );
        assert!(f.median("x").unwrap().is_nan());
    }

    #[test]
    fn fill_missing_replaces_only_nan() {
        let mut f = frame();
        f.fill_missing("a", 2.0).unwrap();
        assert_eq!(f.column("a").unwrap(), &[3.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn to_col_matrix_reports_missing_column() {
        let f = frame();
        let err = f.to_col_matrix(&["a", "missing"]).unwrap_err();
        assert!(matches!(err, FrameError::MissingColumn(name) if name == "missing"));
    }

    #[test]
    fn drop_column_removes_by_name() {
        let mut f = frame();
        f.drop_column("a");
        assert!(f.column("a").is_none());
        assert_eq!(f.n_cols(), 1);
    }
}
