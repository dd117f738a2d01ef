//! Latitude/longitude bounding rectangles.

use serde::{Deserialize, Serialize};

/// An axis-aligned lat/lon rectangle in degrees.
///
/// No wrapping across the ±180° seam: `min_lon <= max_lon` always.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLonBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl LatLonBounds {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Smallest rectangle holding every (lat, lon) pair. NaN pairs are skipped.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points
            .into_iter()
            .filter(|(lat, lon)| !lat.is_nan() && !lon.is_nan())
            .fold(None, |acc: Option<Self>, (lat, lon)| match acc {
                None => Some(Self::new(lat, lon, lat, lon)),
                Some(mut b) => {
                    b.extend(lat, lon);
                    Some(b)
                }
            })
    }

    /// Grow to include a point.
    pub fn extend(&mut self, lat: f64, lon: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Check if a point is inside, boundary included.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    /// Copy grown by `margin` degrees on every side.
    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.min_lat - margin,
            self.min_lon - margin,
            self.max_lat + margin,
            self.max_lon + margin,
        )
    }
}
