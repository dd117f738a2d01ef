//! Configuration for the curvilinear grid index.

use serde::{Deserialize, Serialize};

/// Tuning knobs for [`crate::CurvilinearGridIndex`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridIndexConfig {
    /// Step budget for the guided search before it gives up.
    pub max_steps: usize,

    /// Distance in degrees a point may lie outside a cell edge and still
    /// count as inside. Shared edges therefore belong to both cells.
    /// Index construction rejects values of half the narrowest cell width
    /// or more.
    pub edge_tolerance: f64,

    /// Seed the guided search with the last successful cell.
    pub use_seed_cache: bool,

    /// Run the exhaustive scan when the guided search does not converge.
    pub brute_force_fallback: bool,

    /// Cell count from which the exhaustive scan runs rows in parallel.
    pub parallel_threshold: usize,
}

impl Default for GridIndexConfig {
    fn default() -> Self {
        Self {
            max_steps: 32,
            edge_tolerance: 1e-9,
            use_seed_cache: true,
            brute_force_fallback: true,
            parallel_threshold: 65_536,
        }
    }
}

impl GridIndexConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_INDEX_MAX_STEPS") {
            if let Ok(steps) = val.parse() {
                config.max_steps = steps;
            }
        }

        if let Ok(val) = std::env::var("GRID_INDEX_EDGE_TOLERANCE") {
            if let Ok(tol) = val.parse() {
                config.edge_tolerance = tol;
            }
        }

        if let Ok(val) = std::env::var("GRID_INDEX_SEED_CACHE") {
            config.use_seed_cache = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("GRID_INDEX_BRUTE_FORCE_FALLBACK") {
            config.brute_force_fallback = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("GRID_INDEX_PARALLEL_THRESHOLD") {
            if let Ok(cells) = val.parse() {
                config.parallel_threshold = cells;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_steps == 0 {
            return Err("max_steps must be > 0".to_string());
        }

        if !self.edge_tolerance.is_finite() || self.edge_tolerance < 0.0 {
            return Err("edge_tolerance must be a finite value >= 0".to_string());
        }

        Ok(())
    }
}

fn parse_flag(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}
