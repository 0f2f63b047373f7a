//! Diagnostics for generated shell meshes.
//!
//! Diagnostics are collected while a shell is generated and returned next to
//! the mesh. They are meant for:
//!
//! - Validating topology (an open tube has exactly `2·P` boundary edges and no
//!   non-manifold edges)
//! - Spotting collapsed geometry (the apex ring at `t = 0` always collapses)
//! - Checking face orientation against the outward-normal convention
//! - Performance profiling (timing buckets)
//!
//! # Example
//!
//! ```ignore
//! use shell_engine::shell::{ContrerasGenerator, GrowthParameters, ShellContext, generate_with_context};
//!
//! let generator = ContrerasGenerator::new(GrowthParameters::default())?;
//! let (shell, diagnostics) = generate_with_context(&generator, &mut ShellContext::new())?;
//! if !diagnostics.is_manifold() {
//!     eprintln!("{}", diagnostics.summary());
//! }
//! ```

use std::fmt;

/// Topology, placement, and timing information for one generated shell.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ShellMeshDiagnostics {
    /// Total number of vertices in the final mesh.
    pub vertex_count: usize,

    /// Total number of quads in the final mesh.
    pub quad_count: usize,

    /// Number of rings (growth steps).
    pub ring_count: usize,

    /// Number of points on every ring.
    pub points_per_ring: usize,

    /// Number of quads with at least one zero-length edge.
    ///
    /// The band next to the apex ring is collapsed by construction, so a
    /// Contreras shell reports at least `points_per_ring` here.
    pub collapsed_quad_count: usize,

    /// Number of boundary edges (used by exactly one quad).
    ///
    /// The first and last rings of an open tube contribute `points_per_ring`
    /// edges each.
    pub open_edge_count: usize,

    /// Number of edges shared by more than two quads. Zero for a clean tube.
    pub non_manifold_edge_count: usize,

    /// Quads whose normal points away from the ring centroid.
    pub outward_quad_count: usize,

    /// Quads whose normal points toward the ring centroid.
    pub inward_quad_count: usize,

    /// Uniform scale applied by the normalizer (1.0 when no rescale was requested).
    pub scale_factor: f64,

    /// Optional timing breakdown by pipeline stage.
    ///
    /// Only populated when the `mesh_engine_metrics` feature is enabled
    /// and the target is not WASM.
    pub timing: Option<super::metrics::GeomTimingReport>,

    /// Human-readable warnings about the generated mesh.
    pub warnings: Vec<String>,
}

impl ShellMeshDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scale_factor: 1.0,
            ..Self::default()
        }
    }

    /// Returns `true` if no edge is shared by more than two quads.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count == 0
    }

    /// Returns `true` if the majority of oriented quads face away from the backbone.
    #[must_use]
    pub fn is_outward_facing(&self) -> bool {
        self.outward_quad_count >= self.inward_quad_count
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Returns a short summary string suitable for logging.
    ///
    /// Format: `"V:{vertices} Q:{quads} R:{rings}x{points} [issues...]"`
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "V:{} Q:{} R:{}x{}",
            self.vertex_count, self.quad_count, self.ring_count, self.points_per_ring
        )];

        if self.collapsed_quad_count > 0 {
            parts.push(format!("collapsed:{}", self.collapsed_quad_count));
        }
        if self.open_edge_count > 0 {
            parts.push(format!("open:{}", self.open_edge_count));
        }
        if self.non_manifold_edge_count > 0 {
            parts.push(format!("non-manifold:{}", self.non_manifold_edge_count));
        }
        if !self.is_outward_facing() {
            parts.push("inward".to_string());
        }
        if (self.scale_factor - 1.0).abs() > f64::EPSILON {
            parts.push(format!("scale:{:.6}", self.scale_factor));
        }

        parts.join(" ")
    }
}

impl fmt::Display for ShellMeshDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shell Mesh Diagnostics:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Quads: {}", self.quad_count)?;
        writeln!(f, "  Rings: {} x {}", self.ring_count, self.points_per_ring)?;
        writeln!(f, "  Collapsed quads: {}", self.collapsed_quad_count)?;
        writeln!(f, "  Open edges: {}", self.open_edge_count)?;
        writeln!(f, "  Non-manifold edges: {}", self.non_manifold_edge_count)?;
        writeln!(
            f,
            "  Orientation: {} outward / {} inward",
            self.outward_quad_count, self.inward_quad_count
        )?;
        writeln!(f, "  Scale factor: {}", self.scale_factor)?;
        if let Some(timing) = &self.timing {
            writeln!(f, "  Total time: {:.3} ms", timing.total_ms())?;
        }
        for warning in &self.warnings {
            writeln!(f, "  Warning: {warning}")?;
        }
        Ok(())
    }
}
