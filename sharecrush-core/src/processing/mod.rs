//! Pipeline orchestration for the model builder and the model applicator.

pub mod apply;
pub mod build;

pub use apply::{ApplyOutcome, apply_model};
pub use build::{BuildOutcome, build_model};

use std::path::Path;

/// Per-file progress callback invoked by both pipelines: current index
/// (1-based), total file count, and the file being processed.
pub type ProgressFn<'a> = &'a mut dyn FnMut(usize, usize, &Path);
