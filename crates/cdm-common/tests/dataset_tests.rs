//! Tests for dataset assembly and validation.

use cdm_common::{ArrayData, AxisType, CdmError, Dataset, Dimension, Variable};

fn lat_lon_dims() -> (Dimension, Dimension) {
    (Dimension::new("y", 2), Dimension::new("x", 3))
}

// ============================================================================
// Dataset builder
// ============================================================================

#[test]
fn test_build_valid_dataset() {
    let (y, x) = lat_lon_dims();
    let lat = ArrayData::new(vec![2, 3], vec![10.0, 10.1, 10.2, 11.0, 11.1, 11.2]).unwrap();

    let ds = Dataset::builder("memory://test.nc")
        .add_dimension(y.clone())
        .add_dimension(x.clone())
        .add_dimension(y.clone())
        .add_variable(Variable::coordinate_axis(
            "lat",
            Some(AxisType::Lat),
            vec![y.clone(), x.clone()],
            lat,
        ))
        .add_variable(Variable::new("sst", vec![y, x]))
        .build()
        .unwrap();

    assert_eq!(ds.location(), "memory://test.nc");
    assert_eq!(ds.dimensions().len(), 2, "repeated dimension is added once");
    assert_eq!(ds.variables().len(), 2);
    assert_eq!(ds.coordinate_variables().count(), 1);

    let lat = ds.find_variable("lat").unwrap();
    assert_eq!(lat.axis_type(), Some(AxisType::Lat));
    assert_eq!(lat.shape(), vec![2, 3]);
    assert_eq!(lat.data.as_ref().unwrap().get_2d(1, 2), Some(11.2));
    assert!(ds.find_variable("lon").is_none());
}

#[test]
fn test_duplicate_variable_rejected() {
    let (y, _) = lat_lon_dims();
    let err = Dataset::builder("dup")
        .add_dimension(y.clone())
        .add_variable(Variable::new("a", vec![y.clone()]))
        .add_variable(Variable::new("a", vec![y]))
        .build()
        .unwrap_err();
    assert!(matches!(err, CdmError::DuplicateVariable(ref name) if name == "a"));
}

#[test]
fn test_undeclared_shared_dimension_rejected() {
    let (y, x) = lat_lon_dims();
    let err = Dataset::builder("undeclared")
        .add_dimension(y.clone())
        .add_variable(Variable::new("sst", vec![y, x]))
        .build()
        .unwrap_err();
    match err {
        CdmError::UnknownDimension {
            variable,
            dimension,
        } => {
            assert_eq!(variable, "sst");
            assert_eq!(dimension, "x");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_private_dimension_needs_no_declaration() {
    let strlen = Dimension::private("strlen", 8);
    let ds = Dataset::builder("private")
        .add_variable(Variable::new("station_name", vec![strlen]))
        .build()
        .unwrap();
    assert!(ds.dimensions().is_empty());
}

#[test]
fn test_data_shape_must_match_dimensions() {
    let (y, x) = lat_lon_dims();
    let transposed = ArrayData::new(vec![3, 2], vec![0.0; 6]).unwrap();
    let err = Dataset::builder("mismatch")
        .add_dimension(y.clone())
        .add_dimension(x.clone())
        .add_variable(Variable::coordinate_axis(
            "lon",
            Some(AxisType::Lon),
            vec![y, x],
            transposed,
        ))
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        CdmError::DimensionMismatch { ref data, ref dims, .. }
            if data == &vec![3, 2] && dims == &vec![2, 3]
    ));
}

#[test]
fn test_array_value_count_checked() {
    let err = ArrayData::new(vec![2, 2], vec![1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Array shape [2, 2] holds 4 values but 3 were supplied"
    );
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_axis_type_json() {
    let json = serde_json::to_string(&AxisType::RunTime).unwrap();
    assert_eq!(json, "\"RunTime\"");
    let back: AxisType = serde_json::from_str("\"GeoZ\"").unwrap();
    assert_eq!(back, AxisType::GeoZ);
    assert!(serde_json::from_str::<AxisType>("\"Sideways\"").is_err());
}

#[test]
fn test_axis_type_parse_round_trip() {
    for axis_type in AxisType::ALL {
        let parsed: AxisType = axis_type.as_str().parse().unwrap();
        assert_eq!(parsed, axis_type);
    }
    assert!(matches!(
        "Sideways".parse::<AxisType>(),
        Err(CdmError::UnknownAxisType(_))
    ));
}

#[test]
fn test_dimension_json() {
    let dim = Dimension::new("time", 24);
    let json = serde_json::to_value(&dim).unwrap();
    assert_eq!(json["name"], "time");
    assert_eq!(json["length"], 24);
    assert_eq!(json["shared"], true);

    let back: Dimension = serde_json::from_value(json).unwrap();
    assert_eq!(back, dim);
}
