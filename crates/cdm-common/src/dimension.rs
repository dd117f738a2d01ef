//! Dimensions.

use serde::{Deserialize, Serialize};

/// A named array dimension.
///
/// Two dimensions are the same dimension when name, length and sharing all
/// agree; a private `y` of length 10 is not the shared `y` of length 10.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub length: usize,
    pub shared: bool,
}

impl Dimension {
    /// Create a shared dimension.
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
            shared: true,
        }
    }

    /// Create a dimension private to one variable.
    pub fn private(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
            shared: false,
        }
    }
}
