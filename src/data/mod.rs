//! Tabular data handling for the training pipeline.
//!
//! The pipeline works with three representations:
//!
//! - [`ColumnFrame`]: named `f32` columns parsed from a CSV file. Cells that
//!   are empty or fail to parse as a number become `f32::NAN` (missing).
//! - [`ColMatrix`]: dense column-major storage handed to the trainer once the
//!   feature subset is fixed.
//! - [`SplitIndices`]: row indices for the train/validation partition.
//!
//! Missing values are represented as `f32::NAN` throughout.

mod csv;
mod frame;
mod matrix;
mod split;

pub use self::csv::{read_csv, CsvError};
pub use frame::{ColumnFrame, FrameError};
pub use matrix::ColMatrix;
pub use split::{bernoulli_split, SplitIndices};
