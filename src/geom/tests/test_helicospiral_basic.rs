use crate::geom::{Helicospiral, Point3, ShellError, Tolerance};

fn assert_unit(v: crate::geom::Vec3) {
    assert!((v.length() - 1.0).abs() < 1e-12, "expected unit vector, got {v:?}");
}

#[test]
fn frame_is_orthonormal() {
    for &(b, d, z) in &[(0.1, 4.0, 0.0), (0.25, 1.5, 2.0), (-0.3, 0.7, -1.2), (0.0, 2.0, 5.0)] {
        let curve = Helicospiral::new(b, d, z).expect("valid helicospiral");
        for i in 0..50 {
            let frame = curve.frame(i as f64 * 0.37);
            assert_unit(frame.tangent);
            assert_unit(frame.normal);
            assert_unit(frame.binormal);
            assert!(frame.tangent.dot(frame.normal).abs() < 1e-12);
            assert!(frame.tangent.dot(frame.binormal).abs() < 1e-12);
            assert!(frame.normal.dot(frame.binormal).abs() < 1e-12);
        }
    }
}

#[test]
fn backbone_starts_at_d_and_z() {
    let curve = Helicospiral::new(0.1, 5.0, 2.0).expect("valid helicospiral");
    let tol = Tolerance::default_geom();
    assert!(tol.approx_eq_point3(curve.point(0.0), Point3::new(0.0, 5.0, 2.0)));
    assert!((curve.growth(10.0) - 1.0_f64.exp()).abs() < 1e-12);
}

#[test]
fn planar_tangent_follows_the_curve() {
    let curve = Helicospiral::new(0.12, 3.0, 0.0).expect("valid helicospiral");
    let h = 1e-6;
    for i in 1..20 {
        let t = i as f64 * 0.5;
        let derivative = curve.point(t + h).sub_point(curve.point(t - h));
        let direction = derivative.normalized().expect("non-zero derivative");
        let tangent = curve.frame(t).tangent;
        assert!((direction.dot(tangent) - 1.0).abs() < 1e-6, "t={t}");
    }
}

#[test]
fn backbone_radius_scales_with_d() {
    let base = Helicospiral::new(0.1, 2.0, 0.0).expect("valid helicospiral");
    let scaled = Helicospiral::new(0.1, 6.0, 0.0).expect("valid helicospiral");
    for i in 0..10 {
        let t = i as f64 * 1.3;
        let r0 = base.point(t).x.hypot(base.point(t).y);
        let r1 = scaled.point(t).x.hypot(scaled.point(t).y);
        assert!((r1 - 3.0 * r0).abs() < 1e-9 * r1.max(1.0));
    }
}

#[test]
fn undefined_frame_is_rejected() {
    let result = Helicospiral::new(0.1, 0.0, 0.0);
    assert!(matches!(result, Err(ShellError::InvalidParameter { name: "d", .. })));

    // A vertical helix still has a frame.
    assert!(Helicospiral::new(0.1, 0.0, 1.0).is_ok());
}

#[test]
fn overflowing_frame_names_the_large_constant() {
    for (b, d, z, expected) in [(0.1, 1e160, 0.0, "d"), (1e200, 1.0, 0.0, "b"), (0.1, 1.0, 1e300, "z")] {
        match Helicospiral::new(b, d, z) {
            Err(ShellError::InvalidParameter { name, reason }) => {
                assert_eq!(name, expected);
                assert!(reason.contains("overflows"), "{reason}");
            }
            other => panic!("expected overflow for ({b}, {d}, {z}), got {other:?}"),
        }
    }
}

#[test]
fn non_finite_constants_are_rejected() {
    assert!(matches!(
        Helicospiral::new(f64::NAN, 1.0, 0.0),
        Err(ShellError::InvalidParameter { name: "b", .. })
    ));
    assert!(matches!(
        Helicospiral::new(0.1, f64::INFINITY, 0.0),
        Err(ShellError::InvalidParameter { name: "d", .. })
    ));
    assert!(matches!(
        Helicospiral::new(0.1, 1.0, f64::NEG_INFINITY),
        Err(ShellError::InvalidParameter { name: "z", .. })
    ));
}
