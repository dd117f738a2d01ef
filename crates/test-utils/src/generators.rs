//! Synthetic curvilinear meshes and query points.
//!
//! These generators create predictable 2-D latitude/longitude fields like the
//! ones ocean and atmosphere models write, plus deterministic query points
//! for comparing search strategies.

/// A pair of row-major node fields over an (nrows × ncols) grid.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub nrows: usize,
    pub ncols: usize,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
}

impl Mesh {
    fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> (f64, f64)) -> Self {
        let mut lat = Vec::with_capacity(nrows * ncols);
        let mut lon = Vec::with_capacity(nrows * ncols);
        for row in 0..nrows {
            for col in 0..ncols {
                let (y, x) = f(row, col);
                lat.push(y);
                lon.push(x);
            }
        }
        Self {
            nrows,
            ncols,
            lat,
            lon,
        }
    }

    /// (lat, lon) at a node.
    pub fn node(&self, row: usize, col: usize) -> (f64, f64) {
        let i = row * self.ncols + col;
        (self.lat[i], self.lon[i])
    }

    /// (min_lat, min_lon, max_lat, max_lon) over the nodes.
    pub fn node_extent(&self) -> (f64, f64, f64, f64) {
        let fold = |v: &[f64]| {
            v.iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                    (lo.min(x), hi.max(x))
                })
        };
        let (min_lat, max_lat) = fold(&self.lat);
        let (min_lon, max_lon) = fold(&self.lon);
        (min_lat, min_lon, max_lat, max_lon)
    }
}

/// Nearly rectilinear mesh with a small shear.
///
/// `lat = lat0 + step*row + shear*col`, `lon = lon0 + step*col + shear*row`.
///
/// # Example
///
/// ```
/// use test_utils::create_sheared_mesh;
///
/// let mesh = create_sheared_mesh(4, 4, 40.0, -74.0, 0.1, 0.01);
/// assert_eq!(mesh.lat.len(), 16);
/// let (lat, lon) = mesh.node(2, 2);
/// assert!((lat - 40.22).abs() < 1e-12);
/// assert!((lon + 73.78).abs() < 1e-12);
/// ```
pub fn create_sheared_mesh(
    nrows: usize,
    ncols: usize,
    lat0: f64,
    lon0: f64,
    step: f64,
    shear: f64,
) -> Mesh {
    Mesh::from_fn(nrows, ncols, |r, c| {
        let (r, c) = (r as f64, c as f64);
        (lat0 + step * r + shear * c, lon0 + step * c + shear * r)
    })
}

/// Regular mesh rotated by `angle_deg` around its first node.
///
/// Columns advance along (cos a, sin a) in (lon, lat), rows along
/// (-sin a, cos a).
pub fn create_rotated_mesh(
    nrows: usize,
    ncols: usize,
    lat0: f64,
    lon0: f64,
    step: f64,
    angle_deg: f64,
) -> Mesh {
    let (sin_a, cos_a) = angle_deg.to_radians().sin_cos();
    Mesh::from_fn(nrows, ncols, |r, c| {
        let (r, c) = (r as f64, c as f64);
        (
            lat0 + step * (c * sin_a + r * cos_a),
            lon0 + step * (c * cos_a - r * sin_a),
        )
    })
}

/// Annular-sector mesh: rows are arcs of growing radius around
/// (lat0, lon0), columns are rays. Spacing varies smoothly across the grid,
/// like the high-latitude part of a tripolar ocean grid.
pub fn create_curved_mesh(nrows: usize, ncols: usize, lat0: f64, lon0: f64, step: f64) -> Mesh {
    let inner_radius = 10.0 * step;
    let mid_radius = inner_radius + step * nrows as f64 / 2.0;
    let dtheta = step / mid_radius;
    let theta0 = std::f64::consts::FRAC_PI_4;
    Mesh::from_fn(nrows, ncols, |r, c| {
        let radius = inner_radius + step * r as f64;
        let theta = theta0 + dtheta * c as f64;
        (lat0 + radius * theta.sin(), lon0 + radius * theta.cos())
    })
}

/// `n × n` evenly spaced query points over the node extent, grown by
/// `margin` degrees on each side so that some points fall outside.
pub fn query_lattice(mesh: &Mesh, n: usize, margin: f64) -> Vec<(f64, f64)> {
    let (min_lat, min_lon, max_lat, max_lon) = mesh.node_extent();
    let (min_lat, min_lon) = (min_lat - margin, min_lon - margin);
    let (max_lat, max_lon) = (max_lat + margin, max_lon + margin);
    let denom = (n.max(2) - 1) as f64;

    let mut points = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let lat = min_lat + (max_lat - min_lat) * i as f64 / denom;
            let lon = min_lon + (max_lon - min_lon) * j as f64 / denom;
            points.push((lat, lon));
        }
    }
    points
}

/// Midpoints between horizontally and vertically adjacent nodes.
///
/// On an affine mesh these sit exactly on shared cell edges.
pub fn midpoints(mesh: &Mesh) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    for row in 0..mesh.nrows {
        for col in 0..mesh.ncols {
            let (lat, lon) = mesh.node(row, col);
            if col + 1 < mesh.ncols {
                let (lat2, lon2) = mesh.node(row, col + 1);
                points.push(((lat + lat2) / 2.0, (lon + lon2) / 2.0));
            }
            if row + 1 < mesh.nrows {
                let (lat2, lon2) = mesh.node(row + 1, col);
                points.push(((lat + lat2) / 2.0, (lon + lon2) / 2.0));
            }
        }
    }
    points
}
