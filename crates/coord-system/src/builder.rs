//! Mutable staging area for a dataset's coordinate graph.
//!
//! Axes, systems and transforms are registered by name and cross-reference
//! each other through name lookups into the builder's own collections. A
//! single [`CoordinatesBuilder::build`] call binds everything against the
//! dataset and yields an immutable [`CoordinateGraph`]; the builder refuses
//! any use after that.
//!
//! The builder is meant for one constructing thread and does no locking.

use crate::axis::{canonical_name, compare_axes, CoordinateAxisBuilder};
use crate::error::{CoordSysError, Result};
use crate::graph::CoordinateGraph;
use crate::system::CoordinateSystemBuilder;
use crate::transform::CoordinateTransformBuilder;
use cdm_common::{AxisType, Dataset, Dimension, Variable};
use std::collections::HashSet;

/// Staging builder for a [`CoordinateGraph`].
#[derive(Debug, Default)]
pub struct CoordinatesBuilder {
    coord_axes: Vec<CoordinateAxisBuilder>,
    coord_systems: Vec<CoordinateSystemBuilder>,
    coord_transforms: Vec<CoordinateTransformBuilder>,
    built: bool,
}

impl CoordinatesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn coord_axes(&self) -> &[CoordinateAxisBuilder] {
        &self.coord_axes
    }

    pub fn coord_systems(&self) -> &[CoordinateSystemBuilder] {
        &self.coord_systems
    }

    pub fn coord_transforms(&self) -> &[CoordinateTransformBuilder] {
        &self.coord_transforms
    }

    fn ensure_not_built(&self) -> Result<()> {
        if self.built {
            return Err(CoordSysError::IllegalReuse);
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------

    /// Register an axis. Duplicate names are kept; lookups take the first.
    pub fn add_coordinate_axis(&mut self, axis: CoordinateAxisBuilder) -> Result<&mut Self> {
        self.ensure_not_built()?;
        self.coord_axes.push(axis);
        Ok(self)
    }

    pub fn add_coordinate_axes<I>(&mut self, axes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = CoordinateAxisBuilder>,
    {
        self.ensure_not_built()?;
        self.coord_axes.extend(axes);
        Ok(self)
    }

    /// Register a system. No deduplication; see
    /// [`Self::find_or_add_coordinate_system`].
    pub fn add_coordinate_system(&mut self, system: CoordinateSystemBuilder) -> Result<&mut Self> {
        self.ensure_not_built()?;
        self.coord_systems.push(system);
        Ok(self)
    }

    pub fn add_coordinate_systems<I>(&mut self, systems: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = CoordinateSystemBuilder>,
    {
        self.ensure_not_built()?;
        self.coord_systems.extend(systems);
        Ok(self)
    }

    /// Register a transform unless one with the same name exists.
    ///
    /// A duplicate is ignored, not an overwrite.
    pub fn add_coordinate_transform(
        &mut self,
        transform: CoordinateTransformBuilder,
    ) -> Result<&mut Self> {
        self.ensure_not_built()?;
        if self.find_coordinate_transform(&transform.name).is_none() {
            self.coord_transforms.push(transform);
        }
        Ok(self)
    }

    pub fn add_coordinate_transforms<I>(&mut self, transforms: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = CoordinateTransformBuilder>,
    {
        for transform in transforms {
            self.add_coordinate_transform(transform)?;
        }
        Ok(self)
    }

    /// Canonicalise `axis_names` and return the matching system, registering
    /// it first if needed.
    pub fn find_or_add_coordinate_system(
        &mut self,
        axis_names: &str,
    ) -> Result<&CoordinateSystemBuilder> {
        self.ensure_not_built()?;
        let name = self.make_canonical_name(axis_names)?;
        let idx = match self
            .coord_systems
            .iter()
            .position(|cs| cs.coord_axes_names == name)
        {
            Some(idx) => idx,
            None => {
                self.coord_systems.push(CoordinateSystemBuilder::new(name));
                self.coord_systems.len() - 1
            }
        };
        Ok(&self.coord_systems[idx])
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    pub fn find_coordinate_axis(&self, short_name: &str) -> Option<&CoordinateAxisBuilder> {
        self.coord_axes.iter().find(|a| a.short_name == short_name)
    }

    /// Exact match on the canonical axis-name string.
    pub fn find_coordinate_system(&self, coord_axes_names: &str) -> Option<&CoordinateSystemBuilder> {
        self.coord_systems
            .iter()
            .find(|cs| cs.coord_axes_names == coord_axes_names)
    }

    pub fn find_coordinate_transform(&self, name: &str) -> Option<&CoordinateTransformBuilder> {
        self.coord_transforms.iter().find(|ct| ct.name == name)
    }

    /// Resolve a system's axis names, returned in canonical order.
    pub fn get_axes_for_system(
        &self,
        system: &CoordinateSystemBuilder,
    ) -> Result<Vec<&CoordinateAxisBuilder>> {
        let mut axes = self.resolve_axes(&system.coord_axes_names)?;
        axes.sort_by(|a, b| compare_axes(*a, *b));
        Ok(axes)
    }

    fn resolve_axes(&self, axis_names: &str) -> Result<Vec<&CoordinateAxisBuilder>> {
        axis_names
            .split_whitespace()
            .map(|name| {
                self.find_coordinate_axis(name)
                    .ok_or_else(|| CoordSysError::unresolved(name, axis_names))
            })
            .collect()
    }

    // ---------------------------------------------------------------------
    // Canonical names
    // ---------------------------------------------------------------------

    /// Canonical name for a space-separated list of registered axis names.
    pub fn make_canonical_name(&self, axis_names: &str) -> Result<String> {
        let axes = self.resolve_axes(axis_names)?;
        Ok(Self::make_canonical_name_for(&axes))
    }

    /// Canonical name for a list of axes. Independent of input order.
    pub fn make_canonical_name_for(axes: &[&CoordinateAxisBuilder]) -> String {
        canonical_name(axes)
    }

    // ---------------------------------------------------------------------
    // Membership
    // ---------------------------------------------------------------------

    /// True if the system's axes span exactly the variable's dimensions.
    pub fn is_complete(&self, system: &CoordinateSystemBuilder, variable: &Variable) -> Result<bool> {
        let var_domain: HashSet<&Dimension> = variable.dimensions.iter().collect();
        let cs_domain: HashSet<&Dimension> = self
            .get_axes_for_system(system)?
            .into_iter()
            .flat_map(|a| a.dimensions.iter())
            .collect();
        Ok(var_domain == cs_domain)
    }

    /// True if every given axis is one of the system's axes.
    pub fn contains_axes(
        &self,
        system: &CoordinateSystemBuilder,
        axes: &[&CoordinateAxisBuilder],
    ) -> Result<bool> {
        let cs_axes = self.get_axes_for_system(system)?;
        Ok(axes
            .iter()
            .all(|want| cs_axes.iter().any(|a| a.short_name == want.short_name)))
    }

    /// True if every given type appears on some axis of the system.
    pub fn contains_axis_types(
        &self,
        system: &CoordinateSystemBuilder,
        axis_types: &[AxisType],
    ) -> Result<bool> {
        let cs_axes = self.get_axes_for_system(system)?;
        Ok(axis_types
            .iter()
            .all(|want| cs_axes.iter().any(|a| a.axis_type == Some(*want))))
    }

    // ---------------------------------------------------------------------
    // Build
    // ---------------------------------------------------------------------

    /// Bind the staged graph against `dataset`. Only the first call succeeds.
    ///
    /// Axes are taken from the dataset's coordinate variables rather than the
    /// staged axes. Transforms that fail to bind are dropped. The builder is
    /// consumed even if binding a system fails.
    pub fn build(&mut self, dataset: &Dataset) -> Result<CoordinateGraph> {
        self.ensure_not_built()?;
        self.built = true;
        CoordinateGraph::from_builder(self, dataset)
    }
}
