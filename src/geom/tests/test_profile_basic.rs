use std::f64::consts::PI;

use crate::geom::{Helicospiral, Nodulation, Ornamentation, ProfileEvaluator, ShellError, Tolerance};

fn ornament() -> Ornamentation {
    Ornamentation {
        a: 1.0,
        phi: 0.0,
        psi: 0.0,
        c_depth: 0.0,
        c_n: 0.0,
        n_depth: 0.0,
        n: 0.0,
        nodulation: Nodulation::Axial,
    }
}

fn evaluator(ornament: Ornamentation) -> ProfileEvaluator {
    let curve = Helicospiral::new(0.1, 5.0, 0.0).expect("valid helicospiral");
    ProfileEvaluator::new(curve, ornament).expect("valid ornamentation")
}

#[test]
fn apex_collapses_to_backbone_point() {
    let profile = evaluator(Ornamentation {
        c_depth: 0.3,
        c_n: 12.0,
        n_depth: 0.5,
        ..ornament()
    });
    let apex = profile.curve().point(0.0);
    let tol = Tolerance::default_geom();
    for j in 0..16 {
        let theta = j as f64 * PI / 8.0;
        assert!(tol.approx_eq_point3(profile.point(0.0, theta), apex));
    }
}

#[test]
fn plain_cross_section_is_a_circle_of_envelope_radius() {
    let profile = evaluator(ornament());
    let t = 3.0;
    let basis = profile.ring_basis(t);
    let expected = Ornamentation::envelope(profile.curve().growth(t), t);
    assert!((basis.amplitude - expected).abs() < 1e-12);

    for j in 0..24 {
        let theta = j as f64 * PI / 12.0;
        let radius = profile.offset(&basis, theta).length();
        assert!((radius - expected).abs() < 1e-9, "theta={theta}");
    }
}

#[test]
fn offset_lies_in_normal_plane_without_rotation() {
    let profile = evaluator(Ornamentation {
        a: 2.0,
        phi: 0.4,
        n_depth: 0.3,
        ..ornament()
    });
    let basis = profile.ring_basis(4.2);
    for j in 0..12 {
        let offset = profile.offset(&basis, j as f64 * 0.5);
        assert!(offset.dot(basis.frame.tangent).abs() < 1e-9);
    }
}

#[test]
fn psi_rotates_offset_about_z() {
    let straight = evaluator(Ornamentation { a: 1.5, ..ornament() });
    let rotated = evaluator(Ornamentation {
        a: 1.5,
        psi: PI / 2.0,
        ..ornament()
    });
    let t = 2.0;
    let theta = 0.7;
    let a = straight.offset(&straight.ring_basis(t), theta);
    let b = rotated.offset(&rotated.ring_basis(t), theta);
    assert!((b.x + a.y).abs() < 1e-9);
    assert!((b.y - a.x).abs() < 1e-9);
    assert!((b.z - a.z).abs() < 1e-9);
}

#[test]
fn long_ribs_and_nodulation_modulate_amplitude() {
    let o = Ornamentation {
        c_depth: 0.3,
        c_n: 12.0,
        n_depth: 0.5,
        n: 4.0,
        ..ornament()
    };
    assert!((o.long_ribs(0.0) - 1.0).abs() < 1e-15);
    let t = PI / 24.0;
    assert!((o.long_ribs(t) - 1.3).abs() < 1e-12);

    let theta = PI / 2.0;
    assert!((o.nodulation_at(theta, theta.sin()) - 1.5).abs() < 1e-12);

    let periodic = Ornamentation {
        nodulation: Nodulation::Periodic,
        ..o
    };
    let theta = PI / 8.0;
    assert!((periodic.nodulation_at(theta, theta.sin()) - 1.5).abs() < 1e-12);
}

#[test]
fn non_finite_ornamentation_is_rejected() {
    let curve = Helicospiral::new(0.1, 5.0, 0.0).expect("valid helicospiral");
    let result = ProfileEvaluator::new(
        curve,
        Ornamentation {
            c_n: f64::NAN,
            ..ornament()
        },
    );
    assert!(matches!(result, Err(ShellError::InvalidParameter { name: "c_n", .. })));
}
