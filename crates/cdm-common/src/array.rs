//! Decoded array values.

use crate::error::{CdmError, CdmResult};

/// Row-major array of decoded values.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayData {
    shape: Vec<usize>,
    values: Vec<f64>,
}

impl ArrayData {
    /// Wrap decoded values. The value count must equal the shape product.
    pub fn new(shape: Vec<usize>, values: Vec<f64>) -> CdmResult<Self> {
        let expected: usize = shape.iter().product();
        if expected != values.len() {
            return Err(CdmError::ShapeMismatch {
                shape,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { shape, values })
    }

    /// One-dimensional array.
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            shape: vec![values.len()],
            values,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at a flat index.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Value at (row, col) of a rank-2 array.
    pub fn get_2d(&self, row: usize, col: usize) -> Option<f64> {
        if self.rank() != 2 || row >= self.shape[0] || col >= self.shape[1] {
            return None;
        }
        self.values.get(row * self.shape[1] + col).copied()
    }

    /// Minimum and maximum, ignoring NaN. `None` if there are no finite values.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
