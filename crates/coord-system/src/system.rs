//! Coordinate systems.

use crate::axis::{canonical_name, compare_axes, AxisIdentity, CoordinateAxis};
use crate::error::{CoordSysError, Result};
use crate::transform::{CoordinateTransform, TransformType};
use cdm_common::{AxisType, Dimension, Variable};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Staged coordinate system, keyed by its space-separated axis names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateSystemBuilder {
    /// Canonical space-joined axis short names.
    pub coord_axes_names: String,
    /// Names of transforms attached to this system.
    pub transform_names: Vec<String>,
}

impl CoordinateSystemBuilder {
    pub fn new(coord_axes_names: impl Into<String>) -> Self {
        Self {
            coord_axes_names: coord_axes_names.into(),
            transform_names: Vec::new(),
        }
    }

    pub fn add_transform_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.transform_names.contains(&name) {
            self.transform_names.push(name);
        }
        self
    }

    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.coord_axes_names.split_whitespace()
    }

    /// Bind against materialised axes and bound transforms.
    ///
    /// Every axis name must resolve. Transform names that did not bind are
    /// skipped.
    pub fn build(
        &self,
        axes: &[Arc<CoordinateAxis>],
        transforms: &[Arc<CoordinateTransform>],
    ) -> Result<CoordinateSystem> {
        let mut resolved = Vec::new();
        for name in self.axis_names() {
            let axis = axes
                .iter()
                .find(|a| a.short_name() == name)
                .ok_or_else(|| CoordSysError::unresolved(name, &self.coord_axes_names))?;
            resolved.push(Arc::clone(axis));
        }
        resolved.sort_by(|a, b| compare_axes(a.as_ref(), b.as_ref()));

        let mut bound = Vec::new();
        for name in &self.transform_names {
            match transforms.iter().find(|t| &t.name == name) {
                Some(t) => bound.push(Arc::clone(t)),
                None => debug!(
                    system = %self.coord_axes_names,
                    transform = %name,
                    "Transform not bound, leaving it off the coordinate system"
                ),
            }
        }

        let refs: Vec<&CoordinateAxis> = resolved.iter().map(|a| a.as_ref()).collect();
        Ok(CoordinateSystem {
            name: canonical_name(&refs),
            axes: resolved,
            transforms: bound,
        })
    }
}

/// A coordinate system bound to a dataset.
///
/// The name is always the canonical name of `axes`.
#[derive(Debug, Clone)]
pub struct CoordinateSystem {
    name: String,
    axes: Vec<Arc<CoordinateAxis>>,
    transforms: Vec<Arc<CoordinateTransform>>,
}

impl CoordinateSystem {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Axes in canonical order.
    pub fn axes(&self) -> &[Arc<CoordinateAxis>] {
        &self.axes
    }

    pub fn transforms(&self) -> &[Arc<CoordinateTransform>] {
        &self.transforms
    }

    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    /// First axis of the given type.
    pub fn find_axis(&self, axis_type: AxisType) -> Option<&CoordinateAxis> {
        self.axes
            .iter()
            .map(|a| a.as_ref())
            .find(|a| a.axis_type() == Some(axis_type))
    }

    pub fn lat_axis(&self) -> Option<&CoordinateAxis> {
        self.find_axis(AxisType::Lat)
    }

    pub fn lon_axis(&self) -> Option<&CoordinateAxis> {
        self.find_axis(AxisType::Lon)
    }

    pub fn x_axis(&self) -> Option<&CoordinateAxis> {
        self.find_axis(AxisType::GeoX)
    }

    pub fn y_axis(&self) -> Option<&CoordinateAxis> {
        self.find_axis(AxisType::GeoY)
    }

    /// Vertical axis: GeoZ, then Height, then Pressure.
    pub fn z_axis(&self) -> Option<&CoordinateAxis> {
        self.find_axis(AxisType::GeoZ)
            .or_else(|| self.find_axis(AxisType::Height))
            .or_else(|| self.find_axis(AxisType::Pressure))
    }

    pub fn time_axis(&self) -> Option<&CoordinateAxis> {
        self.find_axis(AxisType::Time)
    }

    pub fn contains_axis_type(&self, axis_type: AxisType) -> bool {
        self.find_axis(axis_type).is_some()
    }

    pub fn is_lat_lon(&self) -> bool {
        self.lat_axis().is_some() && self.lon_axis().is_some()
    }

    /// Lat/lon axes, or projection x/y axes with a projection transform.
    pub fn is_geo_referencing(&self) -> bool {
        self.is_lat_lon()
            || (self.x_axis().is_some() && self.y_axis().is_some() && self.projection().is_some())
    }

    pub fn projection(&self) -> Option<&CoordinateTransform> {
        self.find_transform(TransformType::Projection)
    }

    pub fn vertical_transform(&self) -> Option<&CoordinateTransform> {
        self.find_transform(TransformType::Vertical)
    }

    fn find_transform(&self, transform_type: TransformType) -> Option<&CoordinateTransform> {
        self.transforms
            .iter()
            .map(|t| t.as_ref())
            .find(|t| t.transform_type == transform_type)
    }

    /// Union of the dimensions of all axes.
    pub fn domain(&self) -> HashSet<&Dimension> {
        self.axes.iter().flat_map(|a| a.dimensions()).collect()
    }

    /// True if the axes span exactly the variable's dimensions.
    pub fn is_complete(&self, variable: &Variable) -> bool {
        let var_domain: HashSet<&Dimension> = variable.dimensions.iter().collect();
        self.domain() == var_domain
    }

    /// 2-D latitude and longitude axes with a common shape.
    pub fn horizontal_axes_2d(&self) -> Option<(&CoordinateAxis, &CoordinateAxis)> {
        let lat = self.lat_axis()?;
        let lon = self.lon_axis()?;
        (lat.is_2d() && lon.is_2d() && lat.shape() == lon.shape()).then_some((lat, lon))
    }
}
