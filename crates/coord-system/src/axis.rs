//! Coordinate axes and their canonical ordering.

use cdm_common::{ArrayData, AxisType, Dimension, Variable};
use std::cmp::Ordering;
use std::sync::Arc;

/// Name and type of an axis: all that canonical ordering looks at.
pub trait AxisIdentity {
    fn short_name(&self) -> &str;
    fn axis_type(&self) -> Option<AxisType>;
}

/// Total order on axes within a coordinate system.
///
/// Typed axes come before untyped ones. Typed axes follow
/// [`AxisType::axis_order`]; equal precedence, and untyped axes, fall back to
/// the short name.
pub fn compare_axes<A: AxisIdentity + ?Sized, B: AxisIdentity + ?Sized>(a: &A, b: &B) -> Ordering {
    match (a.axis_type(), b.axis_type()) {
        (Some(t1), Some(t2)) => t1
            .axis_order()
            .cmp(&t2.axis_order())
            .then_with(|| a.short_name().cmp(b.short_name())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.short_name().cmp(b.short_name()),
    }
}

/// Space-joined short names in canonical order.
///
/// Depends only on each axis's name and type, so any permutation of the same
/// axes yields the same string.
pub fn canonical_name<A: AxisIdentity>(axes: &[&A]) -> String {
    let mut sorted = axes.to_vec();
    sorted.sort_by(|a, b| compare_axes(*a, *b));
    sorted
        .iter()
        .map(|a| a.short_name())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Staged axis, registered with a [`crate::CoordinatesBuilder`] by name.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateAxisBuilder {
    pub short_name: String,
    pub axis_type: Option<AxisType>,
    pub dimensions: Vec<Dimension>,
}

impl CoordinateAxisBuilder {
    pub fn new(
        short_name: impl Into<String>,
        axis_type: Option<AxisType>,
        dimensions: Vec<Dimension>,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            axis_type,
            dimensions,
        }
    }

    /// Stage an axis for a variable the reader marked as a coordinate.
    pub fn from_variable(variable: &Variable) -> Self {
        Self {
            short_name: variable.short_name.clone(),
            axis_type: variable.axis_type(),
            dimensions: variable.dimensions.clone(),
        }
    }
}

impl AxisIdentity for CoordinateAxisBuilder {
    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn axis_type(&self) -> Option<AxisType> {
        self.axis_type
    }
}

/// A coordinate axis materialised in a dataset.
#[derive(Debug, Clone)]
pub struct CoordinateAxis {
    short_name: String,
    axis_type: Option<AxisType>,
    dimensions: Vec<Dimension>,
    data: Option<Arc<ArrayData>>,
}

impl CoordinateAxis {
    /// View a coordinate variable as an axis. `None` for data variables.
    pub fn from_variable(variable: &Variable) -> Option<Self> {
        let axis_type = variable.coordinate?;
        Some(Self {
            short_name: variable.short_name.clone(),
            axis_type,
            dimensions: variable.dimensions.clone(),
            data: variable.data.clone(),
        })
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_2d(&self) -> bool {
        self.rank() == 2
    }

    pub fn shape(&self) -> Vec<usize> {
        self.dimensions.iter().map(|d| d.length).collect()
    }

    /// Decoded coordinate values, if the reader supplied them.
    pub fn data(&self) -> Option<&ArrayData> {
        self.data.as_deref()
    }

    pub fn value_2d(&self, row: usize, col: usize) -> Option<f64> {
        self.data.as_ref()?.get_2d(row, col)
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data.as_ref()?.min_max()
    }
}

impl AxisIdentity for CoordinateAxis {
    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn axis_type(&self) -> Option<AxisType> {
        self.axis_type
    }
}
