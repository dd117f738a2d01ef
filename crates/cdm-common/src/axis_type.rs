//! Axis type classification.

use crate::error::CdmError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a coordinate axis.
///
/// Each type has a fixed precedence used to order the axes of a coordinate
/// system: run time first, then ensemble, time, vertical, y, x and the radial
/// axes. Types that share a precedence (e.g. `Lat` and `GeoY`) are ordered by
/// axis name by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisType {
    RunTime,
    Ensemble,
    Time,
    TimeOffset,
    GeoZ,
    Height,
    Pressure,
    GeoY,
    Lat,
    GeoX,
    Lon,
    RadialElevation,
    RadialAzimuth,
    RadialDistance,
    Spectral,
    /// Generic index-like axis with no physical meaning.
    Dimension,
}

impl AxisType {
    /// All axis types, in declaration order.
    pub const ALL: [AxisType; 16] = [
        AxisType::RunTime,
        AxisType::Ensemble,
        AxisType::Time,
        AxisType::TimeOffset,
        AxisType::GeoZ,
        AxisType::Height,
        AxisType::Pressure,
        AxisType::GeoY,
        AxisType::Lat,
        AxisType::GeoX,
        AxisType::Lon,
        AxisType::RadialElevation,
        AxisType::RadialAzimuth,
        AxisType::RadialDistance,
        AxisType::Spectral,
        AxisType::Dimension,
    ];

    /// Precedence of this type within a coordinate system (lower sorts first).
    pub fn axis_order(&self) -> u8 {
        match self {
            AxisType::RunTime => 0,
            AxisType::Ensemble | AxisType::Spectral => 1,
            AxisType::Time => 2,
            AxisType::TimeOffset | AxisType::GeoZ | AxisType::Height | AxisType::Pressure => 3,
            AxisType::GeoY | AxisType::Lat => 4,
            AxisType::GeoX | AxisType::Lon => 5,
            AxisType::RadialElevation => 6,
            AxisType::RadialAzimuth => 7,
            AxisType::RadialDistance => 8,
            AxisType::Dimension => 9,
        }
    }

    /// CF-style short code ("T", "Z", "Y", "X", ...).
    pub fn cf_axis_name(&self) -> &'static str {
        match self {
            AxisType::RunTime => "R",
            AxisType::Ensemble => "E",
            AxisType::Time => "T",
            AxisType::TimeOffset => "TO",
            AxisType::GeoZ | AxisType::Height | AxisType::Pressure => "Z",
            AxisType::GeoY | AxisType::Lat => "Y",
            AxisType::GeoX | AxisType::Lon => "X",
            AxisType::RadialElevation => "RE",
            AxisType::RadialAzimuth => "RA",
            AxisType::RadialDistance => "RD",
            AxisType::Spectral => "S",
            AxisType::Dimension => "D",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AxisType::RunTime => "RunTime",
            AxisType::Ensemble => "Ensemble",
            AxisType::Time => "Time",
            AxisType::TimeOffset => "TimeOffset",
            AxisType::GeoZ => "GeoZ",
            AxisType::Height => "Height",
            AxisType::Pressure => "Pressure",
            AxisType::GeoY => "GeoY",
            AxisType::Lat => "Lat",
            AxisType::GeoX => "GeoX",
            AxisType::Lon => "Lon",
            AxisType::RadialElevation => "RadialElevation",
            AxisType::RadialAzimuth => "RadialAzimuth",
            AxisType::RadialDistance => "RadialDistance",
            AxisType::Spectral => "Spectral",
            AxisType::Dimension => "Dimension",
        }
    }

    pub fn is_time(&self) -> bool {
        matches!(
            self,
            AxisType::RunTime | AxisType::Time | AxisType::TimeOffset
        )
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, AxisType::GeoZ | AxisType::Height | AxisType::Pressure)
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(
            self,
            AxisType::GeoX | AxisType::GeoY | AxisType::Lat | AxisType::Lon
        )
    }
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AxisType {
    type Err = CdmError;

    /// Parse a type name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AxisType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CdmError::UnknownAxisType(s.to_string()))
    }
}
