//! priceforest: a random forest regression pipeline for house prices.
//!
//! This crate provides a native Rust random forest regressor together with
//! the two halves of a minimal prediction pipeline:
//!
//! - [`pipeline`]: the training run — CSV ingestion, median imputation,
//!   train/validation split, forest fitting, RMSE evaluation, and artifact
//!   persistence.
//! - [`server`]: an HTTP service that loads the persisted artifacts once at
//!   startup and serves single-record predictions.
//!
//! The two halves are connected only through the artifacts written by
//! [`io::artifact`]; there is no feedback loop and no artifact versioning
//! beyond the format header.

pub mod data;
pub mod forest;
pub mod io;
pub mod pipeline;
pub mod server;
pub mod training;
