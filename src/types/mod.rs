//! Path types shared across the pipeline.

mod paths;

pub use paths::{
    PathValidationError, ScanTarget, existing_directory, resolve_path, resolve_path_from,
};
