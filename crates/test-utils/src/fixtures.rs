//! Common test fixtures for coordinate-system tests.
//!
//! This module provides pre-built datasets shaped like the output of
//! common model readers.

use crate::generators::Mesh;
use cdm_common::{ArrayData, AxisType, Dataset, Dimension, Variable};

/// Dimension names used by the fixture datasets.
pub mod dims {
    pub const TIME: &str = "time";
    pub const DEPTH: &str = "depth";
    pub const ETA: &str = "eta_rho";
    pub const XI: &str = "xi_rho";
}

/// Variable names used by the fixture datasets.
pub mod vars {
    pub const TIME: &str = "time";
    pub const DEPTH: &str = "depth";
    pub const LAT: &str = "lat_rho";
    pub const LON: &str = "lon_rho";
    pub const TEMP: &str = "temp";
    pub const ZETA: &str = "zeta";
    pub const MASK: &str = "mask_rho";
}

/// Ocean-model-like dataset over a curvilinear mesh.
///
/// Coordinates: `time` (Time), `depth` (GeoZ), `lat_rho` (Lat, 2-D),
/// `lon_rho` (Lon, 2-D) and an untyped 2-D `mask_rho`. Data variables:
/// `temp(time, depth, eta_rho, xi_rho)` and `zeta(time, eta_rho, xi_rho)`.
pub fn ocean_dataset(mesh: &Mesh) -> Dataset {
    let time = Dimension::new(dims::TIME, 2);
    let depth = Dimension::new(dims::DEPTH, 3);
    let eta = Dimension::new(dims::ETA, mesh.nrows);
    let xi = Dimension::new(dims::XI, mesh.ncols);
    let shape_2d = vec![mesh.nrows, mesh.ncols];

    let grid = |values: Vec<f64>| {
        ArrayData::new(shape_2d.clone(), values).expect("mesh fields match mesh shape")
    };

    Dataset::builder("memory://ocean_his.nc")
        .add_dimension(time.clone())
        .add_dimension(depth.clone())
        .add_dimension(eta.clone())
        .add_dimension(xi.clone())
        .add_variable(Variable::coordinate_axis(
            vars::TIME,
            Some(AxisType::Time),
            vec![time.clone()],
            ArrayData::from_vec(vec![0.0, 3600.0]),
        ))
        .add_variable(Variable::coordinate_axis(
            vars::DEPTH,
            Some(AxisType::GeoZ),
            vec![depth.clone()],
            ArrayData::from_vec(vec![0.0, 10.0, 50.0]),
        ))
        .add_variable(Variable::coordinate_axis(
            vars::LAT,
            Some(AxisType::Lat),
            vec![eta.clone(), xi.clone()],
            grid(mesh.lat.clone()),
        ))
        .add_variable(Variable::coordinate_axis(
            vars::LON,
            Some(AxisType::Lon),
            vec![eta.clone(), xi.clone()],
            grid(mesh.lon.clone()),
        ))
        .add_variable(Variable::coordinate_axis(
            vars::MASK,
            None,
            vec![eta.clone(), xi.clone()],
            grid(vec![1.0; mesh.nrows * mesh.ncols]),
        ))
        .add_variable(Variable::new(
            vars::TEMP,
            vec![time.clone(), depth, eta.clone(), xi.clone()],
        ))
        .add_variable(Variable::new(vars::ZETA, vec![time, eta, xi]))
        .build()
        .expect("fixture dataset is consistent")
}
