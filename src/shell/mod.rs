//! Shell generation pipeline.
//!
//! `sample → finite check → stitch → place → diagnostics`, driven by any
//! [`MeshGenerator`]. Every call owns its output; there is no shared state
//! apart from the optional [`CancelToken`] in the [`ShellContext`].

mod color;
mod contreras;
mod params;
mod raup;
mod registry;

pub use color::Rgba;
pub use contreras::ContrerasGenerator;
pub use params::{GrowthParameters, RaupParameters};
pub use raup::RaupGenerator;
pub use registry::{GeneratorRegistry, MeshGenerator, ShellAppearance, ShellFamily, ShellSpec};

use crate::geom::{
    CancelToken, GeomMetrics, QuadMesh, ShellError, ShellMeshDiagnostics, TimingBucket, Tolerance,
    analyze_topology, check_finite, count_orientation, place, sample_rings,
};

/// A generated shell: the quad mesh plus the material hints for the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellMesh {
    pub family: ShellFamily,
    pub mesh: QuadMesh,
    pub color: Rgba,
    pub accent_color: Option<Rgba>,
    pub ramp_factor: Option<f64>,
    /// Shading hint; the topology is the same either way.
    pub smooth: bool,
}

#[derive(Debug, Default)]
pub struct ShellContext {
    pub tolerance: Tolerance,
    pub cancel: CancelToken,
    pub metrics: GeomMetrics,
}

impl ShellContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self {
            cancel,
            ..Self::default()
        }
    }
}

/// Generates a Contreras shell with default context.
pub fn generate_shell_mesh(params: &GrowthParameters) -> Result<ShellMesh, ShellError> {
    let generator = ContrerasGenerator::new(params.clone())?;
    generate_with_context(&generator, &mut ShellContext::new()).map(|(shell, _)| shell)
}

/// Generates a Raup shell with default context.
pub fn generate_raup_mesh(params: &RaupParameters) -> Result<ShellMesh, ShellError> {
    let generator = RaupGenerator::new(params.clone())?;
    generate_with_context(&generator, &mut ShellContext::new()).map(|(shell, _)| shell)
}

impl ShellSpec {
    /// Builds the generator for this spec and runs it with default context.
    pub fn generate(&self) -> Result<(ShellMesh, ShellMeshDiagnostics), ShellError> {
        let generator = self.build()?;
        generate_with_context(generator.as_ref(), &mut ShellContext::new())
    }
}

/// Runs the full pipeline for `generator`.
pub fn generate_with_context<G: MeshGenerator + ?Sized>(
    generator: &G,
    ctx: &mut ShellContext,
) -> Result<(ShellMesh, ShellMeshDiagnostics), ShellError> {
    ctx.metrics.begin();
    let tol = ctx.tolerance;
    let grid = generator.grid();
    let family = generator.family();

    log::debug!(
        "generating {} shell: {} rings x {} points",
        family.name(),
        grid.ring_count,
        grid.points_per_ring
    );

    let points = ctx
        .metrics
        .time(TimingBucket::Sampling, || sample_rings(generator, &ctx.cancel))?;
    ctx.metrics
        .time(TimingBucket::Validation, || check_finite(&points, grid))?;

    let mut mesh = ctx
        .metrics
        .time(TimingBucket::Stitching, || QuadMesh::from_rings(&points, grid));
    drop(points);

    let scale_factor = ctx.metrics.time(TimingBucket::Placement, || {
        place(&mut mesh, generator.placement(), tol)
    })?;
    ctx.metrics
        .time(TimingBucket::Validation, || check_finite_mesh(&mesh))?;

    let mut diagnostics = ctx
        .metrics
        .time(TimingBucket::Diagnostics, || diagnose(&mesh, tol));
    diagnostics.scale_factor = scale_factor;
    diagnostics.timing = ctx.metrics.end();

    log::debug!("{} shell done: {}", family.name(), diagnostics.summary());
    for warning in &diagnostics.warnings {
        log::warn!("{} shell: {warning}", family.name());
    }

    let appearance = generator.appearance();
    let shell = ShellMesh {
        family,
        mesh,
        color: appearance.color,
        accent_color: appearance.accent_color,
        ramp_factor: appearance.ramp_factor,
        smooth: appearance.smooth,
    };
    Ok((shell, diagnostics))
}

fn check_finite_mesh(mesh: &QuadMesh) -> Result<(), ShellError> {
    let p = mesh.points_per_ring.max(1);
    match mesh
        .positions
        .iter()
        .position(|v| !v.iter().all(|c| c.is_finite()))
    {
        Some(index) => Err(ShellError::NumericOverflow {
            ring: index / p,
            point: index % p,
        }),
        None => Ok(()),
    }
}

fn diagnose(mesh: &QuadMesh, tol: Tolerance) -> ShellMeshDiagnostics {
    let topology = analyze_topology(mesh, tol);
    let (outward, inward) = count_orientation(mesh, tol);

    let mut diagnostics = ShellMeshDiagnostics {
        vertex_count: mesh.vertex_count(),
        quad_count: mesh.quad_count(),
        ring_count: mesh.ring_count,
        points_per_ring: mesh.points_per_ring,
        collapsed_quad_count: topology.collapsed_quad_count,
        open_edge_count: topology.open_edge_count,
        non_manifold_edge_count: topology.non_manifold_edge_count,
        outward_quad_count: outward,
        inward_quad_count: inward,
        ..ShellMeshDiagnostics::new()
    };

    if topology.non_manifold_edge_count > 0 {
        diagnostics.add_warning("mesh has non-manifold edges");
    }
    if topology.collapsed_quad_count > mesh.points_per_ring {
        diagnostics.add_warning(format!(
            "{} collapsed quads beyond the apex band",
            topology.collapsed_quad_count - mesh.points_per_ring
        ));
    }
    if inward > outward {
        diagnostics.add_warning("faces wind toward the backbone; call flip_winding() for outward normals");
    }

    diagnostics
}
