//! Coordinate transforms and their binding to a dataset.

use cdm_common::Dataset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Kind of coordinate transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformType {
    /// Horizontal map projection.
    Projection,
    /// Vertical coordinate transform (sigma, hybrid pressure, ...).
    Vertical,
}

/// Value of a transform parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Number(f64),
    Numbers(Vec<f64>),
    Text(String),
    /// Short name of a dataset variable supplying the values.
    Variable(String),
}

/// A named transform parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformParameter {
    pub name: String,
    pub value: ParamValue,
}

impl TransformParameter {
    pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A transform bound to a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTransform {
    pub name: String,
    pub transform_type: TransformType,
    pub parameters: Vec<TransformParameter>,
}

impl CoordinateTransform {
    pub fn find_parameter(&self, name: &str) -> Option<&TransformParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Binds a staged transform against a dataset.
///
/// Returns `None` when the dataset cannot support the transform; the graph
/// builder then drops it.
pub trait TransformBinder: Send + Sync {
    fn bind(
        &self,
        transform: &CoordinateTransformBuilder,
        dataset: &Dataset,
    ) -> Option<CoordinateTransform>;
}

/// Staged transform, registered with a [`crate::CoordinatesBuilder`] by name.
#[derive(Clone)]
pub struct CoordinateTransformBuilder {
    pub name: String,
    pub transform_type: TransformType,
    pub parameters: Vec<TransformParameter>,
    binder: Option<Arc<dyn TransformBinder>>,
}

impl CoordinateTransformBuilder {
    pub fn new(name: impl Into<String>, transform_type: TransformType) -> Self {
        Self {
            name: name.into(),
            transform_type,
            parameters: Vec::new(),
            binder: None,
        }
    }

    pub fn add_parameter(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.parameters.push(TransformParameter::new(name, value));
        self
    }

    /// Replace the default binding rule.
    pub fn with_binder(mut self, binder: Arc<dyn TransformBinder>) -> Self {
        self.binder = Some(binder);
        self
    }

    /// Variable references that the dataset does not hold.
    pub fn unresolved_variables<'a>(&'a self, dataset: &Dataset) -> Vec<&'a str> {
        self.parameters
            .iter()
            .filter_map(|p| match &p.value {
                ParamValue::Variable(name) if dataset.find_variable(name).is_none() => {
                    Some(name.as_str())
                }
                _ => None,
            })
            .collect()
    }

    /// Bind against a dataset.
    ///
    /// Without a custom binder, binding succeeds when every variable
    /// reference resolves in the dataset.
    pub fn build(&self, dataset: &Dataset) -> Option<CoordinateTransform> {
        if let Some(binder) = &self.binder {
            return binder.bind(self, dataset);
        }

        if !self.unresolved_variables(dataset).is_empty() {
            return None;
        }

        Some(CoordinateTransform {
            name: self.name.clone(),
            transform_type: self.transform_type,
            parameters: self.parameters.clone(),
        })
    }
}

impl fmt::Debug for CoordinateTransformBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinateTransformBuilder")
            .field("name", &self.name)
            .field("transform_type", &self.transform_type)
            .field("parameters", &self.parameters)
            .field("custom_binder", &self.binder.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdm_common::{ArrayData, Dimension, Variable};

    fn dataset() -> Dataset {
        let k = Dimension::new("k", 2);
        Dataset::builder("memory://sigma")
            .add_dimension(k.clone())
            .add_variable(Variable::new("s_rho", vec![k]).with_data(ArrayData::from_vec(vec![-0.75, -0.25])))
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_binding_resolves_variables() {
        let ds = dataset();
        let ok = CoordinateTransformBuilder::new("sigma", TransformType::Vertical)
            .add_parameter("sigma", ParamValue::Variable("s_rho".into()))
            .add_parameter("standard_name", ParamValue::Text("ocean_s_coordinate".into()));
        let bound = ok.build(&ds).unwrap();
        assert_eq!(bound.name, "sigma");
        assert!(bound.find_parameter("standard_name").is_some());

        let missing = CoordinateTransformBuilder::new("sigma2", TransformType::Vertical)
            .add_parameter("depth", ParamValue::Variable("h".into()));
        assert_eq!(missing.unresolved_variables(&ds), vec!["h"]);
        assert!(missing.build(&ds).is_none());
    }

    struct Reject;

    impl TransformBinder for Reject {
        fn bind(&self, _: &CoordinateTransformBuilder, _: &Dataset) -> Option<CoordinateTransform> {
            None
        }
    }

    #[test]
    fn test_custom_binder_overrides_default() {
        let ct = CoordinateTransformBuilder::new("lambert", TransformType::Projection)
            .add_parameter("standard_parallel", ParamValue::Number(25.0))
            .with_binder(Arc::new(Reject));
        assert!(ct.build(&dataset()).is_none());
        assert!(format!("{:?}", ct).contains("custom_binder: true"));
    }
}
