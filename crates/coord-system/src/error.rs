//! Error types for coordinate system assembly and grid lookup.

use thiserror::Error;

/// Errors raised by the coordinate builder and the grid index.
///
/// A point outside a grid is not an error; lookups return `None` for that.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordSysError {
    /// A coordinate system names an axis that is not registered.
    #[error("unresolved reference: coordinate system '{system}' names unknown axis '{axis}'")]
    UnresolvedReference { axis: String, system: String },

    /// The builder was already built.
    #[error("coordinate builder was already built and cannot be reused")]
    IllegalReuse,

    /// The axes cannot back a curvilinear grid index.
    #[error("invalid grid shape: {0}")]
    InvalidShape(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CoordSysError {
    /// Create an UnresolvedReference error.
    pub fn unresolved(axis: impl Into<String>, system: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            axis: axis.into(),
            system: system.into(),
        }
    }

    /// Create an InvalidShape error.
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidShape(msg.into())
    }
}

/// Result type for coordinate system operations.
pub type Result<T> = std::result::Result<T, CoordSysError>;
