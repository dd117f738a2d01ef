//! Common dataset model shared by the coordinate-system crates.
//!
//! These types stand in for the array storage layer: dimensions, decoded
//! coordinate arrays, variables and the dataset that owns them. Readers for
//! NetCDF/GRIB/HDF5 produce a [`Dataset`]; nothing in this crate does I/O.

pub mod array;
pub mod axis_type;
pub mod bounds;
pub mod dataset;
pub mod dimension;
pub mod error;
pub mod variable;

pub use array::ArrayData;
pub use axis_type::AxisType;
pub use bounds::LatLonBounds;
pub use dataset::{Dataset, DatasetBuilder};
pub use dimension::Dimension;
pub use error::{CdmError, CdmResult};
pub use variable::Variable;
