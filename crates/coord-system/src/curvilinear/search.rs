//! Exhaustive and guided cell searches.

use super::CurvilinearGridIndex;
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, trace};

impl CurvilinearGridIndex {
    /// Exhaustive search: the first cell in row-major order containing the
    /// point, or `None` if no cell does.
    ///
    /// Large grids are scanned one row per task; the ordered reduction keeps
    /// the result identical to a sequential scan. Never touches the seed
    /// cache.
    pub fn find_coord_element_force(&self, lat: f64, lon: f64) -> Option<(usize, usize)> {
        if !self.may_contain(lat, lon) {
            return None;
        }

        if self.nrows * self.ncols >= self.config.parallel_threshold {
            (0..self.nrows)
                .into_par_iter()
                .find_map_first(|row| self.scan_row(row, lat, lon))
        } else {
            (0..self.nrows).find_map(|row| self.scan_row(row, lat, lon))
        }
    }

    fn scan_row(&self, row: usize, lat: f64, lon: f64) -> Option<(usize, usize)> {
        (0..self.ncols)
            .find(|&col| self.cell_contains(row, col, lat, lon))
            .map(|col| (row, col))
    }

    /// Guided search from the last hit (or the grid center).
    ///
    /// Returns the same cell as [`Self::find_coord_element_force`] whenever
    /// both find one.
    pub fn find_coord_element(&self, lat: f64, lon: f64) -> Option<(usize, usize)> {
        if !self.may_contain(lat, lon) {
            return None;
        }

        let seed = self.seed();
        let found = match self.walk(seed, lat, lon) {
            Some(cell) => Some(self.first_containing_near(cell, lat, lon).unwrap_or(cell)),
            None if self.config.brute_force_fallback => {
                debug!(
                    lat,
                    lon,
                    seed = ?seed,
                    max_steps = self.config.max_steps,
                    "Guided search did not converge, falling back to brute force"
                );
                self.find_coord_element_force(lat, lon)
            }
            None => None,
        };

        if let Some(cell) = found {
            self.remember(cell);
        }
        found
    }

    fn seed(&self) -> (usize, usize) {
        if self.config.use_seed_cache {
            if let Some(hit) = self.last_hit() {
                return hit;
            }
        }
        (self.nrows / 2, self.ncols / 2)
    }

    /// Newton walk over cell indices. Ends on a containing cell, a revisit,
    /// a stalled step or the step budget; the 3×3 box around the last cell
    /// is checked before giving up.
    fn walk(&self, start: (usize, usize), lat: f64, lon: f64) -> Option<(usize, usize)> {
        let mut visited = HashSet::new();
        let (mut row, mut col) = start;

        for step in 0..self.config.max_steps {
            if self.cell_contains(row, col, lat, lon) {
                return Some((row, col));
            }
            if !visited.insert((row, col)) {
                trace!(step, row, col, "Guided search revisited a cell");
                break;
            }

            match self.newton_step(row, col, lat, lon) {
                Some(next) if next != (row, col) => {
                    trace!(step, from = ?(row, col), to = ?next, "Guided search step");
                    (row, col) = next;
                }
                _ => break,
            }
        }

        self.box9(row, col, lat, lon)
    }

    /// Next cell from the linearised mapping (row, col) -> (lat, lon) at a
    /// node, clamped to the grid. `None` on a singular Jacobian.
    fn newton_step(&self, row: usize, col: usize, lat: f64, lon: f64) -> Option<(usize, usize)> {
        let (lat0, lon0) = self.node(row, col)?;
        let (dlat_drow, dlon_drow) = self.derivative(row, col, true);
        let (dlat_dcol, dlon_dcol) = self.derivative(row, col, false);

        let det = dlat_drow * dlon_dcol - dlat_dcol * dlon_drow;
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let (dlat, dlon) = (lat - lat0, lon - lon0);
        let drow = (dlat * dlon_dcol - dlat_dcol * dlon) / det;
        let dcol = (dlat_drow * dlon - dlon_drow * dlat) / det;

        let clamp = |base: usize, delta: f64, n: usize| -> usize {
            (base as f64 + delta).round().clamp(0.0, (n - 1) as f64) as usize
        };
        Some((clamp(row, drow, self.nrows), clamp(col, dcol, self.ncols)))
    }

    /// (dlat, dlon) per unit step along rows (`along_rows`) or columns.
    /// Central differences inside, one-sided at the boundary.
    fn derivative(&self, row: usize, col: usize, along_rows: bool) -> (f64, f64) {
        let (i, n) = if along_rows {
            (row, self.nrows)
        } else {
            (col, self.ncols)
        };
        let lo = i.saturating_sub(1);
        let hi = (i + 1).min(n - 1);
        let span = (hi - lo) as f64;

        let at = |k: usize| {
            if along_rows {
                self.node(k, col)
            } else {
                self.node(row, k)
            }
        };
        match (at(lo), at(hi)) {
            (Some((lat_lo, lon_lo)), Some((lat_hi, lon_hi))) if span > 0.0 => {
                ((lat_hi - lat_lo) / span, (lon_hi - lon_lo) / span)
            }
            _ => (0.0, 0.0),
        }
    }

    /// First containing cell, in row-major order, of the 3×3 box around
    /// (row, col).
    fn box9(&self, row: usize, col: usize, lat: f64, lon: f64) -> Option<(usize, usize)> {
        let rows = row.saturating_sub(1)..=(row + 1).min(self.nrows - 1);
        rows.flat_map(|r| {
            let cols = col.saturating_sub(1)..=(col + 1).min(self.ncols - 1);
            cols.map(move |c| (r, c))
        })
        .find(|&(r, c)| self.cell_contains(r, c, lat, lon))
    }

    /// A point on a shared edge or corner is inside up to four adjacent
    /// cells; pick the one the exhaustive scan would report.
    fn first_containing_near(
        &self,
        cell: (usize, usize),
        lat: f64,
        lon: f64,
    ) -> Option<(usize, usize)> {
        self.box9(cell.0, cell.1, lat, lon)
    }
}
