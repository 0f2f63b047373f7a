use super::cylinder_mesh;
use crate::geom::{
    Axis, CenterStrategy, DegenerateReason, PlacementOptions, QuadMesh, ShellError, Tolerance,
    normalize, place,
};

fn options(length: f64) -> PlacementOptions {
    PlacementOptions {
        length: Some(length),
        axis: Axis::X,
        center: CenterStrategy::BoundsCenter,
        flip: None,
        scale_override: None,
    }
}

fn assert_close(a: &QuadMesh, b: &QuadMesh, eps: f64) {
    assert_eq!(a.positions.len(), b.positions.len());
    for (p, q) in a.positions.iter().zip(&b.positions) {
        for k in 0..3 {
            assert!((p[k] - q[k]).abs() < eps, "{p:?} vs {q:?}");
        }
    }
}

#[test]
fn scales_to_length_and_centers_bounds() {
    let mut mesh = cylinder_mesh(5, 8);
    let tol = Tolerance::default_geom();

    let scale = normalize(&mut mesh, &options(4.0), tol).expect("normalize");
    assert!((scale - 2.0).abs() < 1e-12);

    let bbox = mesh.bbox().expect("bbox");
    assert!((bbox.extent(Axis::X) - 4.0).abs() < 1e-12);
    assert!(tol.approx_eq_point3(bbox.center(), crate::geom::Point3::ORIGIN));
}

#[test]
fn normalize_is_idempotent() {
    let tol = Tolerance::default_geom();
    for center in [
        CenterStrategy::None,
        CenterStrategy::BoundsCenter,
        CenterStrategy::SurfaceCentroid,
    ] {
        let opts = PlacementOptions {
            center,
            ..options(3.0)
        };
        let mut once = cylinder_mesh(7, 12);
        normalize(&mut once, &opts, tol).expect("first normalize");
        let mut twice = once.clone();
        let scale = normalize(&mut twice, &opts, tol).expect("second normalize");

        assert!((scale - 1.0).abs() < 1e-12);
        assert_close(&once, &twice, 1e-9);
    }
}

#[test]
fn raw_placement_leaves_mesh_untouched() {
    let original = cylinder_mesh(3, 6);
    let mut mesh = original.clone();
    let scale = place(&mut mesh, &PlacementOptions::raw(), Tolerance::default_geom())
        .expect("place");
    assert_eq!(scale, 1.0);
    assert_eq!(mesh, original);
}

#[test]
fn surface_centroid_of_cylinder_is_on_axis() {
    let mut mesh = cylinder_mesh(5, 16);
    let centroid = mesh.surface_centroid().expect("non-zero area");
    assert!(centroid.x.abs() < 1e-9);
    assert!(centroid.y.abs() < 1e-9);
    assert!((centroid.z - 2.0).abs() < 1e-9);

    let opts = PlacementOptions {
        length: None,
        center: CenterStrategy::SurfaceCentroid,
        ..options(1.0)
    };
    normalize(&mut mesh, &opts, Tolerance::default_geom()).expect("normalize");
    let bbox = mesh.bbox().expect("bbox");
    assert!((bbox.min.z + 2.0).abs() < 1e-9);
}

#[test]
fn half_turn_runs_after_normalization() {
    let tol = Tolerance::default_geom();
    let opts = PlacementOptions {
        center: CenterStrategy::None,
        flip: Some(Axis::Y),
        ..options(2.0)
    };
    let mut mesh = cylinder_mesh(3, 4);
    place(&mut mesh, &opts, tol).expect("place");

    // Vertex 0 is (1, 0, 0): unchanged by the unit rescale, then mapped to (-1, 0, 0).
    let p = mesh.positions[0];
    assert!((p[0] + 1.0).abs() < 1e-12);
    assert!(p[1].abs() < 1e-12);
    assert!(p[2].abs() < 1e-12);
}

#[test]
fn zero_extent_requires_override() {
    let mut flat = cylinder_mesh(3, 6);
    for p in &mut flat.positions {
        p[0] = 0.0;
    }
    let tol = Tolerance::default_geom();

    let result = normalize(&mut flat.clone(), &options(1.0), tol);
    assert_eq!(
        result,
        Err(ShellError::DegenerateMesh(DegenerateReason::ZeroExtent { axis: Axis::X }))
    );

    let with_override = PlacementOptions {
        scale_override: Some(2.5),
        ..options(1.0)
    };
    let scale = normalize(&mut flat, &with_override, tol).expect("override applies");
    assert_eq!(scale, 2.5);
}

#[test]
fn invalid_options_are_rejected() {
    let mut mesh = cylinder_mesh(3, 6);
    let result = normalize(&mut mesh, &options(-1.0), Tolerance::default_geom());
    assert!(matches!(result, Err(ShellError::InvalidParameter { name: "length", .. })));
}

#[test]
fn center_strategy_parses_aliases() {
    assert_eq!(CenterStrategy::parse("mass"), Some(CenterStrategy::SurfaceCentroid));
    assert_eq!(CenterStrategy::parse(" Bounds "), Some(CenterStrategy::BoundsCenter));
    assert_eq!(CenterStrategy::parse("none"), Some(CenterStrategy::None));
    assert_eq!(CenterStrategy::parse("middle"), None);
}

fn scaled_cylinder(rings: usize, points: usize, factor: f64) -> QuadMesh {
    let mut mesh = cylinder_mesh(rings, points);
    for p in &mut mesh.positions {
        for c in p.iter_mut() {
            *c *= factor;
        }
    }
    mesh
}

#[test]
fn tiny_mesh_is_not_zero_extent() {
    let mut mesh = scaled_cylinder(4, 8, 1e-13);
    let tol = Tolerance::default_geom();

    let scale = normalize(&mut mesh, &options(1.0), tol).expect("tiny mesh normalizes");
    assert!((scale - 0.5e13).abs() < 1e-3 * 0.5e13);
    let bbox = mesh.bbox().expect("bbox");
    assert!((bbox.extent(Axis::X) - 1.0).abs() < 1e-9);
}

#[test]
fn extent_overflow_is_reported() {
    let mut mesh = cylinder_mesh(3, 6);
    for p in &mut mesh.positions {
        p[0] *= 1.5e308;
    }
    let with_override = PlacementOptions {
        scale_override: Some(2.0),
        ..options(1.0)
    };

    let result = normalize(&mut mesh, &with_override, Tolerance::default_geom());
    assert_eq!(result, Err(ShellError::PlacementOverflow { axis: Axis::X }));
}

#[test]
fn unrepresentable_scale_is_reported() {
    let mut mesh = scaled_cylinder(3, 6, 1e-310);
    let result = normalize(&mut mesh, &options(1.0), Tolerance::default_geom());
    assert_eq!(result, Err(ShellError::PlacementOverflow { axis: Axis::X }));
}
