//! # Burn FastData
#![forbid(unsafe_code)]

/// Raw dataset readers
pub mod datasets;

/// Preprocessing pipelines
pub mod pipelines;

/// Utilities
pub mod utils;

pub use datasets::DatasetKind;
pub use pipelines::{Batch, Config, FastData, FastDataError, Record, Vocabulary};
