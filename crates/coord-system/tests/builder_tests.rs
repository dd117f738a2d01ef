//! Tests for staging and building coordinate graphs.

use coord_system::{
    AxisIdentity, AxisType, CoordSysError, CoordinateAxisBuilder, CoordinateSystemBuilder,
    CoordinateTransformBuilder, CoordinatesBuilder, Dimension, ParamValue, TransformType,
    Variable,
};
use test_utils::fixtures::{self, vars};
use test_utils::create_sheared_mesh;

fn ocean() -> coord_system::Dataset {
    fixtures::ocean_dataset(&create_sheared_mesh(4, 4, 40.0, -74.0, 0.1, 0.01))
}

/// Axis builders for every coordinate variable of the dataset.
fn staged(ds: &coord_system::Dataset) -> CoordinatesBuilder {
    let mut builder = CoordinatesBuilder::new();
    builder
        .add_coordinate_axes(ds.coordinate_variables().map(CoordinateAxisBuilder::from_variable))
        .unwrap();
    builder
}

fn axis(name: &str, axis_type: Option<AxisType>) -> CoordinateAxisBuilder {
    CoordinateAxisBuilder::new(name, axis_type, vec![Dimension::new(name, 2)])
}

fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}

// ============================================================================
// Canonical names
// ============================================================================

#[test]
fn test_canonical_name_time_depth_lat_lon() {
    let axes = [
        axis("lon", Some(AxisType::Lon)),
        axis("depth", Some(AxisType::GeoZ)),
        axis("lat", Some(AxisType::Lat)),
        axis("time", Some(AxisType::Time)),
    ];
    for perm in permutations(&axes) {
        let refs: Vec<&CoordinateAxisBuilder> = perm.iter().collect();
        assert_eq!(
            CoordinatesBuilder::make_canonical_name_for(&refs),
            "time depth lat lon"
        );
    }
}

#[test]
fn test_canonical_name_is_permutation_invariant_with_untyped_axes() {
    let axes = [
        axis("station", None),
        axis("lat", Some(AxisType::Lat)),
        axis("y", Some(AxisType::GeoY)),
        axis("bin", None),
        axis("reftime", Some(AxisType::RunTime)),
    ];
    let expected = "reftime lat y bin station";
    for perm in permutations(&axes) {
        let refs: Vec<&CoordinateAxisBuilder> = perm.iter().collect();
        assert_eq!(CoordinatesBuilder::make_canonical_name_for(&refs), expected);
    }
}

#[test]
fn test_make_canonical_name_from_names() {
    let builder = staged(&ocean());
    assert_eq!(
        builder.make_canonical_name("lon_rho mask_rho time lat_rho depth").unwrap(),
        "time depth lat_rho lon_rho mask_rho"
    );
}

#[test]
fn test_make_canonical_name_unknown_axis() {
    let builder = staged(&ocean());
    let err = builder.make_canonical_name("lat_rho salinity").unwrap_err();
    assert!(matches!(
        err,
        CoordSysError::UnresolvedReference { ref axis, .. } if axis == "salinity"
    ));
}

// ============================================================================
// Systems
// ============================================================================

#[test]
fn test_find_coordinate_system_independent_of_axis_order() {
    let mut builder = staged(&ocean());
    let name = builder.make_canonical_name("lon_rho lat_rho time").unwrap();
    builder
        .add_coordinate_system(CoordinateSystemBuilder::new(name))
        .unwrap();

    for names in ["time lat_rho lon_rho", "lat_rho time lon_rho", "lon_rho time lat_rho"] {
        let canonical = builder.make_canonical_name(names).unwrap();
        let found = builder.find_coordinate_system(&canonical).unwrap();
        assert_eq!(found.coord_axes_names, "time lat_rho lon_rho");
    }
    assert!(builder.find_coordinate_system("lat_rho lon_rho").is_none());
}

#[test]
fn test_add_coordinate_system_does_not_dedup() {
    let mut builder = staged(&ocean());
    builder
        .add_coordinate_systems([
            CoordinateSystemBuilder::new("lat_rho lon_rho"),
            CoordinateSystemBuilder::new("lat_rho lon_rho"),
        ])
        .unwrap();
    assert_eq!(builder.coord_systems().len(), 2);
}

#[test]
fn test_get_axes_for_system_canonical_order() {
    let builder = staged(&ocean());
    let cs = CoordinateSystemBuilder::new("lon_rho depth lat_rho");
    let names: Vec<&str> = builder
        .get_axes_for_system(&cs)
        .unwrap()
        .iter()
        .map(|a| a.short_name.as_str())
        .collect();
    assert_eq!(names, vec!["depth", "lat_rho", "lon_rho"]);
}

#[test]
fn test_get_axes_for_system_unresolved() {
    let builder = staged(&ocean());
    let cs = CoordinateSystemBuilder::new("time lat lon");
    let err = builder.get_axes_for_system(&cs).unwrap_err();
    assert_eq!(
        err,
        CoordSysError::UnresolvedReference {
            axis: "lat".to_string(),
            system: "time lat lon".to_string(),
        }
    );
}

// ============================================================================
// Completeness and membership
// ============================================================================

#[test]
fn test_is_complete_exact_dimension_set() {
    let ds = ocean();
    let builder = staged(&ds);
    let temp = ds.find_variable(vars::TEMP).unwrap();
    let zeta = ds.find_variable(vars::ZETA).unwrap();

    let full = CoordinateSystemBuilder::new("time depth lat_rho lon_rho");
    let surface = CoordinateSystemBuilder::new("time lat_rho lon_rho");

    assert!(builder.is_complete(&full, temp).unwrap());
    assert!(builder.is_complete(&surface, zeta).unwrap());
    // Subset of the variable's dimensions
    assert!(!builder.is_complete(&surface, temp).unwrap());
    // Superset of the variable's dimensions
    assert!(!builder.is_complete(&full, zeta).unwrap());
}

#[test]
fn test_is_complete_dimension_length_matters() {
    let ds = ocean();
    let builder = staged(&ds);
    let surface = CoordinateSystemBuilder::new("time lat_rho lon_rho");

    // Same dimension names, different time length
    let other = Variable::new(
        "zeta_long",
        vec![
            Dimension::new("time", 5),
            Dimension::new("eta_rho", 4),
            Dimension::new("xi_rho", 4),
        ],
    );
    assert!(!builder.is_complete(&surface, &other).unwrap());

    let same = Variable::new(
        "zeta_copy",
        vec![
            Dimension::new("xi_rho", 4),
            Dimension::new("time", 2),
            Dimension::new("eta_rho", 4),
        ],
    );
    assert!(builder.is_complete(&surface, &same).unwrap());
}

#[test]
fn test_contains_axes_and_types() {
    let builder = staged(&ocean());
    let cs = CoordinateSystemBuilder::new("time lat_rho lon_rho");
    let lat = builder.find_coordinate_axis("lat_rho").unwrap();
    let lon = builder.find_coordinate_axis("lon_rho").unwrap();
    let depth = builder.find_coordinate_axis("depth").unwrap();

    assert!(builder.contains_axes(&cs, &[lat, lon]).unwrap());
    assert!(!builder.contains_axes(&cs, &[lat, depth]).unwrap());
    assert!(builder
        .contains_axis_types(&cs, &[AxisType::Lat, AxisType::Lon, AxisType::Time])
        .unwrap());
    assert!(!builder
        .contains_axis_types(&cs, &[AxisType::GeoZ])
        .unwrap());
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn test_add_coordinate_transform_keeps_first() {
    let mut builder = CoordinatesBuilder::new();
    builder
        .add_coordinate_transforms([
            CoordinateTransformBuilder::new("sigma", TransformType::Vertical)
                .add_parameter("a", ParamValue::Number(1.0)),
            CoordinateTransformBuilder::new("sigma", TransformType::Projection),
        ])
        .unwrap();
    assert_eq!(builder.coord_transforms().len(), 1);
    let kept = builder.find_coordinate_transform("sigma").unwrap();
    assert_eq!(kept.transform_type, TransformType::Vertical);
    assert_eq!(kept.parameters.len(), 1);
    assert!(builder.find_coordinate_transform("lambert").is_none());
}

// ============================================================================
// Build
// ============================================================================

#[test]
fn test_build_produces_graph() {
    let ds = ocean();
    let mut builder = staged(&ds);
    builder
        .find_or_add_coordinate_system("lon_rho lat_rho depth time")
        .unwrap();
    builder.find_or_add_coordinate_system("lon_rho lat_rho time").unwrap();
    builder
        .add_coordinate_transform(
            CoordinateTransformBuilder::new("depth_levels", TransformType::Vertical)
                .add_parameter("depth", ParamValue::Variable(vars::DEPTH.into())),
        )
        .unwrap();
    builder
        .add_coordinate_transform(
            CoordinateTransformBuilder::new("s_coordinate", TransformType::Vertical)
                .add_parameter("s", ParamValue::Variable("s_rho".into())),
        )
        .unwrap();
    builder
        .add_coordinate_system(
            CoordinateSystemBuilder::new("depth")
                .add_transform_name("depth_levels")
                .add_transform_name("s_coordinate"),
        )
        .unwrap();

    let graph = builder.build(&ds).unwrap();
    assert!(builder.is_built());

    assert_eq!(graph.coord_axes().len(), 5);
    assert_eq!(graph.coord_systems().len(), 3);
    // s_rho is not in the dataset
    assert_eq!(graph.coord_transforms().len(), 1);
    assert!(graph.find_coord_transform("s_coordinate").is_none());

    let cs = graph.find_coord_system("time depth lat_rho lon_rho").unwrap();
    assert!(cs.is_lat_lon());
    assert_eq!(cs.z_axis().unwrap().axis_type(), Some(AxisType::GeoZ));
    assert!(cs.is_complete(ds.find_variable(vars::TEMP).unwrap()));

    let depth_cs = graph.find_coord_system("depth").unwrap();
    assert_eq!(depth_cs.transforms().len(), 1);
    assert_eq!(depth_cs.vertical_transform().unwrap().name, "depth_levels");

    let zeta = ds.find_variable(vars::ZETA).unwrap();
    let names: Vec<&str> = graph
        .systems_for_variable(zeta)
        .iter()
        .map(|cs| cs.name())
        .collect();
    assert_eq!(names, vec!["time lat_rho lon_rho"]);
    assert!(graph.find_coord_axis(vars::MASK).is_some());
}

#[test]
fn test_build_twice_is_illegal_reuse() {
    let ds = ocean();
    let mut builder = staged(&ds);
    assert!(builder.build(&ds).is_ok());
    assert_eq!(builder.build(&ds).unwrap_err(), CoordSysError::IllegalReuse);
    assert_eq!(builder.build(&ds).unwrap_err(), CoordSysError::IllegalReuse);
}

#[test]
fn test_mutation_after_build_is_illegal_reuse() {
    let ds = ocean();
    let mut builder = staged(&ds);
    builder.build(&ds).unwrap();

    assert_eq!(
        builder.add_coordinate_axis(axis("x", None)).unwrap_err(),
        CoordSysError::IllegalReuse
    );
    assert_eq!(
        builder
            .add_coordinate_system(CoordinateSystemBuilder::new("time"))
            .unwrap_err(),
        CoordSysError::IllegalReuse
    );
    assert_eq!(
        builder
            .add_coordinate_transform(CoordinateTransformBuilder::new("p", TransformType::Projection))
            .unwrap_err(),
        CoordSysError::IllegalReuse
    );
    assert_eq!(
        builder.find_or_add_coordinate_system("time").unwrap_err(),
        CoordSysError::IllegalReuse
    );
    // Lookups still answer
    assert!(builder.find_coordinate_axis("time").is_some());
}

#[test]
fn test_build_uses_materialised_axes_not_staged_ones() {
    let ds = ocean();
    let mut builder = staged(&ds);
    builder
        .add_coordinate_axis(axis("ghost", Some(AxisType::Ensemble)))
        .unwrap();
    let name = builder.make_canonical_name("time ghost").unwrap();
    builder
        .add_coordinate_system(CoordinateSystemBuilder::new(name))
        .unwrap();

    let err = builder.build(&ds).unwrap_err();
    assert_eq!(err, CoordSysError::unresolved("ghost", "ghost time"));
    // The failed build still consumed the builder
    assert_eq!(builder.build(&ds).unwrap_err(), CoordSysError::IllegalReuse);
}

#[test]
fn test_graph_is_shareable_across_threads() {
    let ds = ocean();
    let mut builder = staged(&ds);
    builder.find_or_add_coordinate_system("time lat_rho lon_rho").unwrap();
    let graph = std::sync::Arc::new(builder.build(&ds).unwrap());

    std::thread::scope(|s| {
        for _ in 0..4 {
            let graph = std::sync::Arc::clone(&graph);
            s.spawn(move || {
                assert!(graph.find_coord_system("time lat_rho lon_rho").is_some());
            });
        }
    });
}
