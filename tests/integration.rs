use shell_engine::geom::{Axis, CancelToken, CenterStrategy, PlacementOptions, ShellError};
use shell_engine::shell::{
    ContrerasGenerator, GeneratorRegistry, GrowthParameters, RaupParameters, ShellContext,
    ShellFamily, ShellSpec, generate_with_context,
};
use shell_engine::{generate_raup_mesh, generate_shell_mesh};

fn quick_params() -> GrowthParameters {
    GrowthParameters {
        t_max: 8.0,
        time_step: 0.125,
        points_in_circle: 10,
        ..GrowthParameters::default()
    }
}

#[test]
fn contreras_shell_through_public_api() {
    let shell = generate_shell_mesh(&quick_params()).expect("generation succeeds");

    assert_eq!(shell.family, ShellFamily::Contreras);
    assert_eq!(shell.mesh.ring_count, 64);
    assert_eq!(shell.mesh.points_per_ring, 20);
    assert_eq!(shell.mesh.quads.len(), 63 * 20 * 4);
    assert!(shell.smooth);
    shell.mesh.validate().expect("mesh validate");
}

#[test]
fn raw_placement_keeps_apex_on_backbone_start() {
    let params = GrowthParameters {
        d: 3.0,
        z: 1.5,
        placement: PlacementOptions::raw(),
        ..quick_params()
    };
    let shell = generate_shell_mesh(&params).expect("generation succeeds");

    // Every point of ring 0 is gamma(0) = (0, d, z).
    let apex = shell.mesh.ring(0).expect("first ring");
    for p in apex {
        assert!(p[0].abs() < 1e-12);
        assert!((p[1] - 3.0).abs() < 1e-12);
        assert!((p[2] - 1.5).abs() < 1e-12);
    }
}

#[test]
fn custom_length_and_axis_are_honoured() {
    let params = GrowthParameters {
        placement: PlacementOptions {
            length: Some(10.0),
            axis: Axis::Z,
            center: CenterStrategy::BoundsCenter,
            flip: None,
            scale_override: None,
        },
        z: 2.0,
        ..quick_params()
    };
    let generator = ContrerasGenerator::new(params).expect("valid parameters");
    let (shell, diagnostics) =
        generate_with_context(&generator, &mut ShellContext::new()).expect("generation succeeds");

    let bbox = shell.mesh.bbox().expect("bbox");
    assert!((bbox.extent(Axis::Z) - 10.0).abs() < 1e-9);
    assert!(diagnostics.scale_factor > 0.0);
}

#[test]
fn spec_overrides_resolve_through_registry() {
    let registry = GeneratorRegistry::default();
    let family = registry.resolve("helicospiral").expect("alias resolves");

    let mut spec = ShellSpec::defaults(family);
    for (key, value) in [("t", "4"), ("time_step", "0.25"), ("points_in_circle", "5")] {
        spec.set(key, value).expect("override applies");
    }
    let (shell, diagnostics) = spec.generate().expect("generation succeeds");

    assert_eq!(shell.mesh.ring_count, 16);
    assert_eq!(diagnostics.points_per_ring, 10);
    assert!(diagnostics.is_manifold());

    assert!(matches!(
        spec.set("wobble", "1"),
        Err(ShellError::InvalidParameter { name: "key", .. })
    ));
}

#[test]
fn raup_shell_through_public_api() {
    let params = RaupParameters {
        n_points: 16,
        n_circles: 64,
        t: 1.5,
        ..RaupParameters::default()
    };
    let shell = generate_raup_mesh(&params).expect("generation succeeds");

    assert_eq!(shell.family, ShellFamily::Raup);
    assert_eq!(shell.mesh.vertex_count(), 16 * 64);
    assert_eq!(shell.mesh.quad_count(), 16 * 63);
    shell.mesh.validate().expect("mesh validate");
}

#[test]
fn cancellation_from_another_handle() {
    let cancel = CancelToken::new();
    let mut ctx = ShellContext::with_cancel(cancel.clone());
    cancel.cancel();

    let generator = ContrerasGenerator::new(quick_params()).expect("valid parameters");
    let result = generate_with_context(&generator, &mut ctx);
    assert!(matches!(result, Err(ShellError::Cancelled { .. })));
}

#[test]
fn errors_render_readable_messages() {
    let err = ContrerasGenerator::new(GrowthParameters {
        time_step: -0.5,
        ..quick_params()
    })
    .expect_err("negative step is rejected");
    assert_eq!(
        err.to_string(),
        "invalid parameter `time_step`: must be finite and > 0, got -0.5"
    );
}
