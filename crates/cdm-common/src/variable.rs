//! Variables as delivered by a format reader.

use crate::{ArrayData, AxisType, Dimension};
use std::sync::Arc;

/// A materialised variable.
///
/// `coordinate` is `Some` when the reader turned this variable into a
/// coordinate axis; the inner value is its axis type, if one was identified.
#[derive(Debug, Clone)]
pub struct Variable {
    pub short_name: String,
    pub dimensions: Vec<Dimension>,
    pub data: Option<Arc<ArrayData>>,
    pub coordinate: Option<Option<AxisType>>,
}

impl Variable {
    /// A plain data variable without decoded values.
    pub fn new(short_name: impl Into<String>, dimensions: Vec<Dimension>) -> Self {
        Self {
            short_name: short_name.into(),
            dimensions,
            data: None,
            coordinate: None,
        }
    }

    /// A coordinate axis variable.
    pub fn coordinate_axis(
        short_name: impl Into<String>,
        axis_type: Option<AxisType>,
        dimensions: Vec<Dimension>,
        data: ArrayData,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            dimensions,
            data: Some(Arc::new(data)),
            coordinate: Some(axis_type),
        }
    }

    pub fn with_data(mut self, data: ArrayData) -> Self {
        self.data = Some(Arc::new(data));
        self
    }

    pub fn is_coordinate_axis(&self) -> bool {
        self.coordinate.is_some()
    }

    pub fn axis_type(&self) -> Option<AxisType> {
        self.coordinate.flatten()
    }

    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Dimension lengths.
    pub fn shape(&self) -> Vec<usize> {
        self.dimensions.iter().map(|d| d.length).collect()
    }
}
