//! Error types for the dataset model.

use thiserror::Error;

/// Result type alias using CdmError.
pub type CdmResult<T> = Result<T, CdmError>;

/// Errors raised while assembling a dataset from decoded parts.
#[derive(Debug, Error)]
pub enum CdmError {
    #[error("Array shape {shape:?} holds {expected} values but {actual} were supplied")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Variable '{variable}' uses undeclared dimension '{dimension}'")]
    UnknownDimension { variable: String, dimension: String },

    #[error("Variable '{variable}' data shape {data:?} does not match its dimensions {dims:?}")]
    DimensionMismatch {
        variable: String,
        data: Vec<usize>,
        dims: Vec<usize>,
    },

    #[error("Duplicate variable name: {0}")]
    DuplicateVariable(String),

    #[error("Unknown axis type: {0}")]
    UnknownAxisType(String),
}
