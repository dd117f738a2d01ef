//! Cell geometry: edge points derived from nodes, and point-in-cell tests.
//!
//! Nodes are cell centers. The node field is padded by one ghost node on each
//! side through linear extrapolation; an edge point is the mean of the four
//! padded nodes around it. For an affine mesh this puts every node exactly at
//! the center of its cell.

/// Padded node value at (row, col), where row/col may be -1 or n.
fn padded(nodes: &[f64], nrows: usize, ncols: usize, row: isize, col: isize) -> f64 {
    let in_row = |r: usize| -> f64 {
        let at = |c: usize| nodes[r * ncols + c];
        if col < 0 {
            2.0 * at(0) - at(1)
        } else if col as usize >= ncols {
            2.0 * at(ncols - 1) - at(ncols - 2)
        } else {
            at(col as usize)
        }
    };

    if row < 0 {
        2.0 * in_row(0) - in_row(1)
    } else if row as usize >= nrows {
        2.0 * in_row(nrows - 1) - in_row(nrows - 2)
    } else {
        in_row(row as usize)
    }
}

/// Edge field of shape (nrows + 1) × (ncols + 1), row-major.
///
/// Requires at least 2 nodes in each direction.
pub(crate) fn make_edges(nodes: &[f64], nrows: usize, ncols: usize) -> Vec<f64> {
    let mut edges = Vec::with_capacity((nrows + 1) * (ncols + 1));
    for er in 0..=nrows as isize {
        for ec in 0..=ncols as isize {
            let sum = padded(nodes, nrows, ncols, er - 1, ec - 1)
                + padded(nodes, nrows, ncols, er - 1, ec)
                + padded(nodes, nrows, ncols, er, ec - 1)
                + padded(nodes, nrows, ncols, er, ec);
            edges.push(sum / 4.0);
        }
    }
    edges
}

/// Cells whose doubled area is below this fraction of their squared
/// perimeter are treated as zero-area.
const DEGENERATE_RATIO: f64 = 1e-12;

/// Corners of cell (row, col) as (x, y) = (lon, lat), in edge-walk order.
pub(crate) fn corners_at(
    lat_edges: &[f64],
    lon_edges: &[f64],
    ncols: usize,
    row: usize,
    col: usize,
) -> [(f64, f64); 4] {
    let w = ncols + 1;
    let at = |r: usize, c: usize| (lon_edges[r * w + c], lat_edges[r * w + c]);
    [
        at(row, col),
        at(row, col + 1),
        at(row + 1, col + 1),
        at(row + 1, col),
    ]
}

fn edge_lengths(corners: &[(f64, f64); 4]) -> [f64; 4] {
    std::array::from_fn(|i| {
        let (x0, y0) = corners[i];
        let (x1, y1) = corners[(i + 1) % 4];
        (x1 - x0).hypot(y1 - y0)
    })
}

/// Signed doubled area, taken relative to the first corner so that small
/// cells far from the origin keep their precision.
fn signed_area2(corners: &[(f64, f64); 4]) -> f64 {
    let (ox, oy) = corners[0];
    (0..4)
        .map(|i| {
            let (x0, y0) = corners[i];
            let (x1, y1) = corners[(i + 1) % 4];
            (x0 - ox) * (y1 - oy) - (x1 - ox) * (y0 - oy)
        })
        .sum()
}

fn is_degenerate(area2: f64, edges: &[f64; 4]) -> bool {
    let perimeter: f64 = edges.iter().sum();
    area2.abs() <= DEGENERATE_RATIO * perimeter * perimeter
}

/// Narrowest extent of a cell: its area over its longest edge.
/// `None` for a zero-area cell.
pub(crate) fn cell_width(corners: &[(f64, f64); 4]) -> Option<f64> {
    let area2 = signed_area2(corners);
    let edges = edge_lengths(corners);
    if is_degenerate(area2, &edges) {
        return None;
    }
    let longest = edges.iter().copied().fold(0.0, f64::max);
    Some(area2.abs() / 2.0 / longest)
}

/// Point-in-quadrilateral test in the (x, y) plane.
///
/// The point is inside when it lies on the inner side of all four edges,
/// allowing it to sit up to `tolerance` outside an edge. Either winding is
/// accepted. Zero-area cells contain nothing, whatever the tolerance.
pub(crate) fn quad_contains(corners: &[(f64, f64); 4], x: f64, y: f64, tolerance: f64) -> bool {
    let area2 = signed_area2(corners);
    let lengths = edge_lengths(corners);
    if is_degenerate(area2, &lengths) {
        return false;
    }
    let winding = area2.signum();

    for i in 0..4 {
        let (x0, y0) = corners[i];
        let (x1, y1) = corners[(i + 1) % 4];
        let len = lengths[i];
        if len == 0.0 {
            // collapsed edge, cell is a triangle
            continue;
        }
        let cross = (x1 - x0) * (y - y0) - (y1 - y0) * (x - x0);
        if winding * cross / len < -tolerance {
            return false;
        }
    }
    true
}
