//! Rescaling, recentering, and orientation of generated meshes.
//!
//! [`normalize`] brings a mesh to a caller-chosen length along one axis and
//! moves its center to the origin. Applying it to its own output changes
//! nothing beyond floating-point noise. The half-turn in [`place`] runs once
//! after normalization, because repeating it would undo it.

use serde::{Deserialize, Serialize};

use super::error::{DegenerateReason, ShellError, require_positive};
use super::mesh::QuadMesh;
use super::{Axis, Tolerance, Transform, Vec3};

/// Which point of the mesh ends up at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterStrategy {
    /// Leave the mesh where the generator put it.
    None,
    /// Center of the axis-aligned bounding box.
    #[default]
    BoundsCenter,
    /// Area-weighted centroid of the surface.
    SurfaceCentroid,
}

impl CenterStrategy {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "bounds" | "bounds_center" => Some(Self::BoundsCenter),
            "centroid" | "surface_centroid" | "mass" => Some(Self::SurfaceCentroid),
            _ => None,
        }
    }
}

/// Caller-controlled placement of a generated shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacementOptions {
    /// Target extent along `axis`; `None` keeps the generator's own units.
    pub length: Option<f64>,
    /// Axis the target length is measured along.
    pub axis: Axis,
    pub center: CenterStrategy,
    /// Optional half-turn about this axis, applied after normalization.
    pub flip: Option<Axis>,
    /// Scale used when the extent along `axis` is zero.
    pub scale_override: Option<f64>,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            length: Some(1.0),
            axis: Axis::X,
            center: CenterStrategy::BoundsCenter,
            flip: Some(Axis::Y),
            scale_override: None,
        }
    }
}

impl PlacementOptions {
    /// No rescale, no recentering, no flip.
    #[must_use]
    pub const fn raw() -> Self {
        Self {
            length: None,
            axis: Axis::X,
            center: CenterStrategy::None,
            flip: None,
            scale_override: None,
        }
    }

    pub fn validate(&self) -> Result<(), ShellError> {
        if let Some(length) = self.length {
            require_positive("length", length)?;
        }
        if let Some(scale) = self.scale_override {
            require_positive("scale_override", scale)?;
        }
        Ok(())
    }
}

/// Scales `mesh` to `options.length` and recenters it. Returns the applied scale.
///
/// An extent that is zero relative to the largest side of the bounding box
/// uses `options.scale_override`. Without an override it fails with
/// `DegenerateMesh(ZeroExtent)`. A bounding box whose sides or scale are not
/// finite fails with `PlacementOverflow`.
pub fn normalize(
    mesh: &mut QuadMesh,
    options: &PlacementOptions,
    tol: Tolerance,
) -> Result<f64, ShellError> {
    options.validate()?;

    let Some(bbox) = mesh.bbox() else {
        return Ok(1.0);
    };
    if let Some(axis) = Axis::ALL.into_iter().find(|&axis| !bbox.extent(axis).is_finite()) {
        return Err(ShellError::PlacementOverflow { axis });
    }

    let scale = match options.length {
        Some(length) => {
            let extent = bbox.extent(options.axis);
            let span = bbox.size().max_component();
            if extent > tol.relative_to(span) {
                let scale = length / extent;
                if !scale.is_finite() {
                    return Err(ShellError::PlacementOverflow { axis: options.axis });
                }
                scale
            } else if let Some(scale) = options.scale_override {
                log::warn!(
                    "zero extent along {} axis; using scale override {scale}",
                    options.axis.name()
                );
                scale
            } else {
                return Err(ShellError::DegenerateMesh(DegenerateReason::ZeroExtent {
                    axis: options.axis,
                }));
            }
        }
        None => 1.0,
    };

    if scale != 1.0 {
        mesh.transform(Transform::uniform_scale(scale));
        if mesh.has_invalid_vertices() {
            return Err(ShellError::PlacementOverflow { axis: options.axis });
        }
    }

    let center = match options.center {
        CenterStrategy::None => None,
        CenterStrategy::BoundsCenter => mesh.bbox().map(|b| b.center()),
        CenterStrategy::SurfaceCentroid => mesh.surface_centroid().or_else(|| {
            log::warn!("surface has zero area; centering on bounding box instead");
            mesh.bbox().map(|b| b.center())
        }),
    };
    if let Some(center) = center {
        let offset = Vec3::new(-center.x, -center.y, -center.z);
        mesh.transform(Transform::translate(offset));
    }

    log::debug!(
        "normalized mesh: scale={scale}, center={:?}, axis={}",
        options.center,
        options.axis.name()
    );
    Ok(scale)
}

/// [`normalize`] followed by the optional half-turn. Returns the applied scale.
pub fn place(
    mesh: &mut QuadMesh,
    options: &PlacementOptions,
    tol: Tolerance,
) -> Result<f64, ShellError> {
    let scale = normalize(mesh, options, tol)?;
    if let Some(axis) = options.flip {
        mesh.transform(Transform::half_turn(axis));
    }
    Ok(scale)
}
