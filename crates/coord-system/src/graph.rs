//! Immutable coordinate graph bound to a dataset.

use crate::axis::{AxisIdentity, CoordinateAxis};
use crate::builder::CoordinatesBuilder;
use crate::error::Result;
use crate::system::CoordinateSystem;
use crate::transform::CoordinateTransform;
use cdm_common::{Dataset, Variable};
use std::sync::Arc;
use tracing::{debug, warn};

/// Axes, systems and transforms of one dataset.
///
/// Produced once by [`CoordinatesBuilder::build`] and read-only afterwards,
/// so it can be shared across threads freely.
#[derive(Debug, Clone)]
pub struct CoordinateGraph {
    coord_axes: Vec<Arc<CoordinateAxis>>,
    coord_systems: Vec<CoordinateSystem>,
    coord_transforms: Vec<Arc<CoordinateTransform>>,
}

impl CoordinateGraph {
    pub(crate) fn from_builder(builder: &CoordinatesBuilder, dataset: &Dataset) -> Result<Self> {
        let coord_axes: Vec<Arc<CoordinateAxis>> = dataset
            .coordinate_variables()
            .filter_map(CoordinateAxis::from_variable)
            .map(Arc::new)
            .collect();

        for staged in builder.coord_axes() {
            if !coord_axes.iter().any(|a| a.short_name() == staged.short_name) {
                debug!(
                    axis = %staged.short_name,
                    dataset = %dataset.location(),
                    "Staged axis was not materialised in the dataset"
                );
            }
        }

        let coord_transforms: Vec<Arc<CoordinateTransform>> = builder
            .coord_transforms()
            .iter()
            .filter_map(|ct| match ct.build(dataset) {
                Some(transform) => Some(Arc::new(transform)),
                None => {
                    warn!(
                        transform = %ct.name,
                        unresolved = ?ct.unresolved_variables(dataset),
                        dataset = %dataset.location(),
                        "Coordinate transform failed to bind, dropping"
                    );
                    None
                }
            })
            .collect();

        let coord_systems = builder
            .coord_systems()
            .iter()
            .map(|cs| cs.build(&coord_axes, &coord_transforms))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            dataset = %dataset.location(),
            axes = coord_axes.len(),
            systems = coord_systems.len(),
            transforms = coord_transforms.len(),
            "Built coordinate graph"
        );

        Ok(Self {
            coord_axes,
            coord_systems,
            coord_transforms,
        })
    }

    pub fn coord_axes(&self) -> &[Arc<CoordinateAxis>] {
        &self.coord_axes
    }

    pub fn coord_systems(&self) -> &[CoordinateSystem] {
        &self.coord_systems
    }

    pub fn coord_transforms(&self) -> &[Arc<CoordinateTransform>] {
        &self.coord_transforms
    }

    pub fn find_coord_system(&self, name: &str) -> Option<&CoordinateSystem> {
        self.coord_systems.iter().find(|cs| cs.name() == name)
    }

    pub fn find_coord_axis(&self, short_name: &str) -> Option<&CoordinateAxis> {
        self.coord_axes
            .iter()
            .map(|a| a.as_ref())
            .find(|a| a.short_name() == short_name)
    }

    pub fn find_coord_transform(&self, name: &str) -> Option<&CoordinateTransform> {
        self.coord_transforms
            .iter()
            .map(|t| t.as_ref())
            .find(|t| t.name == name)
    }

    /// Systems whose axes span exactly the variable's dimensions.
    pub fn systems_for_variable(&self, variable: &Variable) -> Vec<&CoordinateSystem> {
        self.coord_systems
            .iter()
            .filter(|cs| cs.is_complete(variable))
            .collect()
    }
}
