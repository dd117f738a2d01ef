//! Point-to-cell lookup on 2-D curvilinear latitude/longitude grids.
//!
//! Ocean and atmosphere models often carry latitude and longitude as 2-D
//! fields over an (nrows × ncols) logical grid. Rows and columns are neither
//! parallel nor axis-aligned, so a binary search per axis does not work. The
//! index offers two lookups:
//!
//! - [`CurvilinearGridIndex::find_coord_element_force`] scans every cell and
//!   is the reference answer.
//! - [`CurvilinearGridIndex::find_coord_element`] walks from a seed cell using
//!   the local coordinate gradient and agrees with the scan whenever both
//!   find a cell; it falls back to the scan if the walk does not converge.
//!
//! Longitudes are compared as plain numbers. Callers querying across the
//! ±180° seam must normalise longitude to the grid's convention first.

mod cell;
mod search;

use crate::axis::{AxisIdentity, CoordinateAxis};
use crate::config::GridIndexConfig;
use crate::error::{CoordSysError, Result};
use crate::system::CoordinateSystem;
use cdm_common::LatLonBounds;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Marker for an empty seed cache.
const NO_HIT: u64 = u64::MAX;

/// Cell lookup over a pair of same-shaped 2-D lat/lon fields.
///
/// Immutable apart from the last-hit cache that seeds the next guided search.
/// The cache is a single atomic word: concurrent queries may pick up each
/// other's seeds but results are unaffected.
#[derive(Debug)]
pub struct CurvilinearGridIndex {
    nrows: usize,
    ncols: usize,
    /// Node latitudes, row-major.
    lat: Vec<f64>,
    /// Node longitudes, row-major.
    lon: Vec<f64>,
    /// Cell edge latitudes, (nrows + 1) × (ncols + 1).
    lat_edges: Vec<f64>,
    /// Cell edge longitudes, (nrows + 1) × (ncols + 1).
    lon_edges: Vec<f64>,
    bounds: LatLonBounds,
    config: GridIndexConfig,
    last_hit: AtomicU64,
}

impl CurvilinearGridIndex {
    /// Index two 2-D axes with the default configuration.
    pub fn new(lat_axis: &CoordinateAxis, lon_axis: &CoordinateAxis) -> Result<Self> {
        Self::with_config(lat_axis, lon_axis, GridIndexConfig::default())
    }

    pub fn with_config(
        lat_axis: &CoordinateAxis,
        lon_axis: &CoordinateAxis,
        config: GridIndexConfig,
    ) -> Result<Self> {
        for axis in [lat_axis, lon_axis] {
            if !axis.is_2d() {
                return Err(CoordSysError::invalid_shape(format!(
                    "axis '{}' has rank {}, expected 2",
                    axis.short_name(),
                    axis.rank()
                )));
            }
        }

        let (lat, lon) = match (lat_axis.data(), lon_axis.data()) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(CoordSysError::invalid_shape(format!(
                    "axes '{}' and '{}' must both carry decoded values",
                    lat_axis.short_name(),
                    lon_axis.short_name()
                )))
            }
        };

        if lat.shape() != lon.shape() {
            return Err(CoordSysError::invalid_shape(format!(
                "latitude shape {:?} differs from longitude shape {:?}",
                lat.shape(),
                lon.shape()
            )));
        }

        let shape = lat.shape();
        Self::from_arrays(
            shape[0],
            shape[1],
            lat.values().to_vec(),
            lon.values().to_vec(),
            config,
        )
    }

    /// Index the 2-D horizontal axes of a coordinate system.
    pub fn from_system(system: &CoordinateSystem, config: GridIndexConfig) -> Result<Self> {
        let (lat, lon) = system.horizontal_axes_2d().ok_or_else(|| {
            CoordSysError::invalid_shape(format!(
                "coordinate system '{}' has no 2-D lat/lon axes of equal shape",
                system.name()
            ))
        })?;
        Self::with_config(lat, lon, config)
    }

    /// Index raw row-major node fields.
    pub fn from_arrays(
        nrows: usize,
        ncols: usize,
        lat: Vec<f64>,
        lon: Vec<f64>,
        config: GridIndexConfig,
    ) -> Result<Self> {
        config.validate().map_err(CoordSysError::Config)?;

        if nrows < 2 || ncols < 2 {
            return Err(CoordSysError::invalid_shape(format!(
                "grid {}x{} needs at least 2 nodes per direction",
                nrows, ncols
            )));
        }
        if lat.len() != nrows * ncols || lon.len() != nrows * ncols {
            return Err(CoordSysError::invalid_shape(format!(
                "grid {}x{} expects {} values, got {} lat and {} lon",
                nrows,
                ncols,
                nrows * ncols,
                lat.len(),
                lon.len()
            )));
        }
        if lat.iter().chain(lon.iter()).any(|v| !v.is_finite()) {
            return Err(CoordSysError::invalid_shape(
                "coordinate fields contain non-finite values",
            ));
        }

        let lat_edges = cell::make_edges(&lat, nrows, ncols);
        let lon_edges = cell::make_edges(&lon, nrows, ncols);

        // A point may only sit within tolerance of directly adjacent cells.
        let min_width = (0..nrows)
            .flat_map(|row| (0..ncols).map(move |col| (row, col)))
            .filter_map(|(row, col)| {
                cell::cell_width(&cell::corners_at(&lat_edges, &lon_edges, ncols, row, col))
            })
            .fold(f64::INFINITY, f64::min);
        if min_width.is_finite() && 2.0 * config.edge_tolerance >= min_width {
            return Err(CoordSysError::Config(format!(
                "edge_tolerance {} must be below half the narrowest cell width {}",
                config.edge_tolerance, min_width
            )));
        }

        let bounds = LatLonBounds::from_points(
            lat_edges.iter().copied().zip(lon_edges.iter().copied()),
        )
        .ok_or_else(|| CoordSysError::invalid_shape("empty coordinate fields"))?;

        debug!(
            nrows,
            ncols,
            min_lat = bounds.min_lat,
            max_lat = bounds.max_lat,
            min_lon = bounds.min_lon,
            max_lon = bounds.max_lon,
            "Built curvilinear grid index"
        );

        Ok(Self {
            nrows,
            ncols,
            lat,
            lon,
            lat_edges,
            lon_edges,
            bounds,
            config,
            last_hit: AtomicU64::new(NO_HIT),
        })
    }

    /// (nrows, ncols).
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Extent of all cells, edges included.
    pub fn bounds(&self) -> &LatLonBounds {
        &self.bounds
    }

    pub fn config(&self) -> &GridIndexConfig {
        &self.config
    }

    /// (lat, lon) of the node at the center of a cell.
    pub fn node(&self, row: usize, col: usize) -> Option<(f64, f64)> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        let i = row * self.ncols + col;
        Some((self.lat[i], self.lon[i]))
    }

    /// (lat, lon) corners of a cell, in edge-walk order.
    pub fn cell_corners(&self, row: usize, col: usize) -> Option<[(f64, f64); 4]> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        Some(self.corners_xy(row, col).map(|(x, y)| (y, x)))
    }

    /// Last cell found by the guided search.
    pub fn last_hit(&self) -> Option<(usize, usize)> {
        match self.last_hit.load(Ordering::Relaxed) {
            NO_HIT => None,
            packed => Some(((packed >> 32) as usize, (packed & 0xFFFF_FFFF) as usize)),
        }
    }

    fn remember(&self, (row, col): (usize, usize)) {
        if self.config.use_seed_cache {
            let packed = ((row as u64) << 32) | (col as u64 & 0xFFFF_FFFF);
            self.last_hit.store(packed, Ordering::Relaxed);
        }
    }

    /// Corners as (lon, lat) = (x, y).
    fn corners_xy(&self, row: usize, col: usize) -> [(f64, f64); 4] {
        cell::corners_at(&self.lat_edges, &self.lon_edges, self.ncols, row, col)
    }

    fn cell_contains(&self, row: usize, col: usize, lat: f64, lon: f64) -> bool {
        cell::quad_contains(
            &self.corners_xy(row, col),
            lon,
            lat,
            self.config.edge_tolerance,
        )
    }

    /// Quick reject for points outside every cell.
    fn may_contain(&self, lat: f64, lon: f64) -> bool {
        !lat.is_nan()
            && !lon.is_nan()
            && self
                .bounds
                .expanded(self.config.edge_tolerance)
                .contains(lat, lon)
    }
}
