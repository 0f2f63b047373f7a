use super::Axis;

/// Why a generated shell has no usable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateReason {
    /// The mesh has zero extent along the normalization axis and no scale override was given.
    ZeroExtent { axis: Axis },
    /// The cross-section amplitude `a` is zero, so every ring collapses to a line segment.
    FlatCrossSection,
}

impl std::fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroExtent { axis } => {
                write!(f, "zero extent along the {} axis and no scale override", axis.name())
            }
            Self::FlatCrossSection => f.write_str("cross-section amplitude is zero"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShellError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("degenerate mesh: {0}")]
    DegenerateMesh(DegenerateReason),
    #[error("non-finite vertex at ring {ring}, point {point}")]
    NumericOverflow { ring: usize, point: usize },
    /// Vertices are finite but their spread or the scale derived from it is not.
    #[error("numeric overflow placing the mesh along the {} axis", .axis.name())]
    PlacementOverflow { axis: Axis },
    #[error("mesh generation cancelled after {completed_rings} rings")]
    Cancelled { completed_rings: usize },
}

impl ShellError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Rejects NaN/Inf inputs with a named `InvalidParameter`.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, ShellError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ShellError::invalid(name, format!("must be finite, got {value}")))
    }
}

/// Rejects values that are not finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ShellError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShellError::invalid(name, format!("must be finite and > 0, got {value}")))
    }
}
