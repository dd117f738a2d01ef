//! Coordinate system graph assembly and curvilinear grid lookup.
//!
//! Two pieces live here:
//!
//! - [`CoordinatesBuilder`] stages coordinate axes, systems and transforms by
//!   name and, in a single terminal [`CoordinatesBuilder::build`] call, binds
//!   them against a decoded [`cdm_common::Dataset`] into an immutable
//!   [`CoordinateGraph`].
//! - [`CurvilinearGridIndex`] answers "which (row, col) cell holds this
//!   lat/lon?" for 2-D latitude/longitude axes such as ocean model grids.
//!
//! # Data flow
//!
//! ```text
//! decoded Dataset
//!      │
//!      ▼
//! CoordinatesBuilder ──build()──► CoordinateGraph
//!                                      │
//!                                      ▼
//!                         CoordinateSystem (2-D lat/lon axes)
//!                                      │
//!                                      ▼
//!                             CurvilinearGridIndex
//!                                      │
//!                   find_coord_element(lat, lon) ─► Option<(row, col)>
//! ```
//!
//! # Example
//!
//! ```ignore
//! use coord_system::{CoordinatesBuilder, CurvilinearGridIndex, GridIndexConfig};
//!
//! let mut builder = CoordinatesBuilder::new();
//! builder.add_coordinate_axes(axis_builders)?;
//! builder.find_or_add_coordinate_system("lon lat time")?;
//! let graph = builder.build(&dataset)?;
//!
//! let cs = graph.find_coord_system("time lat lon").unwrap();
//! let index = CurvilinearGridIndex::from_system(cs, GridIndexConfig::default())?;
//! if let Some((row, col)) = index.find_coord_element(40.17, -73.95) {
//!     // read the data value at (row, col)
//! }
//! ```

pub mod axis;
pub mod builder;
pub mod config;
pub mod curvilinear;
pub mod error;
pub mod graph;
pub mod system;
pub mod transform;

pub use axis::{canonical_name, AxisIdentity, CoordinateAxis, CoordinateAxisBuilder};
pub use builder::CoordinatesBuilder;
pub use config::GridIndexConfig;
pub use curvilinear::CurvilinearGridIndex;
pub use error::{CoordSysError, Result};
pub use graph::CoordinateGraph;
pub use system::{CoordinateSystem, CoordinateSystemBuilder};
pub use transform::{
    CoordinateTransform, CoordinateTransformBuilder, ParamValue, TransformBinder,
    TransformParameter, TransformType,
};

// Re-export the dataset model so callers need a single dependency.
pub use cdm_common::{ArrayData, AxisType, Dataset, Dimension, LatLonBounds, Variable};
