//! In-memory dataset assembled from decoded parts.

use crate::error::{CdmError, CdmResult};
use crate::{Dimension, Variable};

/// A decoded dataset: dimensions plus the variables that use them.
#[derive(Debug, Clone)]
pub struct Dataset {
    location: String,
    dimensions: Vec<Dimension>,
    variables: Vec<Variable>,
}

impl Dataset {
    pub fn builder(location: impl Into<String>) -> DatasetBuilder {
        DatasetBuilder {
            location: location.into(),
            dimensions: Vec::new(),
            variables: Vec::new(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn find_variable(&self, short_name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.short_name == short_name)
    }

    pub fn find_dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Variables materialised as coordinate axes, in dataset order.
    pub fn coordinate_variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| v.is_coordinate_axis())
    }
}

/// Staging area for a [`Dataset`].
#[derive(Debug)]
pub struct DatasetBuilder {
    location: String,
    dimensions: Vec<Dimension>,
    variables: Vec<Variable>,
}

impl DatasetBuilder {
    pub fn add_dimension(mut self, dimension: Dimension) -> Self {
        if !self.dimensions.contains(&dimension) {
            self.dimensions.push(dimension);
        }
        self
    }

    pub fn add_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Validate names, dimensions and data shapes, then freeze the dataset.
    ///
    /// Private dimensions need not be declared.
    pub fn build(self) -> CdmResult<Dataset> {
        for (i, var) in self.variables.iter().enumerate() {
            if self.variables[..i]
                .iter()
                .any(|v| v.short_name == var.short_name)
            {
                return Err(CdmError::DuplicateVariable(var.short_name.clone()));
            }

            if let Some(dim) = var
                .dimensions
                .iter()
                .find(|d| d.shared && !self.dimensions.contains(d))
            {
                return Err(CdmError::UnknownDimension {
                    variable: var.short_name.clone(),
                    dimension: dim.name.clone(),
                });
            }

            if let Some(data) = &var.data {
                let dims = var.shape();
                if data.shape() != dims.as_slice() {
                    return Err(CdmError::DimensionMismatch {
                        variable: var.short_name.clone(),
                        data: data.shape().to_vec(),
                        dims,
                    });
                }
            }
        }

        Ok(Dataset {
            location: self.location,
            dimensions: self.dimensions,
            variables: self.variables,
        })
    }
}
