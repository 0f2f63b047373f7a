//! Logarithmic helicospiral backbone and its analytic Frenet frame.
//!
//! The backbone of a coiled shell is
//!
//! ```text
//! gamma(t) = (d·sin t, d·cos t, z) · exp(b·t)
//! ```
//!
//! The radius and the elevation grow with the same exponential factor. The tangent,
//! normal and binormal have closed forms, so no numerical differentiation happens here.
//! The normal depends only on `b`.

use super::error::{ShellError, require_finite};
use super::{Point3, Vec3};

/// Local orthonormal basis along the backbone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrenetFrame {
    /// Unit vector pointing along the curve direction.
    pub tangent: Vec3,
    /// Unit vector perpendicular to the tangent, in the osculating plane.
    pub normal: Vec3,
    /// Unit vector perpendicular to both tangent and normal.
    pub binormal: Vec3,
}

/// Backbone constants `(b, d, z)` with the frame denominators precomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helicospiral {
    b: f64,
    d: f64,
    z: f64,
    tangent_denom: f64,
    normal_denom: f64,
    binormal_denom: f64,
}

impl Helicospiral {
    /// Validates the constants and precomputes the frame denominators.
    ///
    /// Fails with `InvalidParameter` when any constant is non-finite or a
    /// denominator vanishes or overflows. The tangent and binormal
    /// denominators vanish when `d = 0` and `b·z = 0`. An overflow names the
    /// constant of largest magnitude.
    pub fn new(b: f64, d: f64, z: f64) -> Result<Self, ShellError> {
        let b = require_finite("b", b)?;
        let d = require_finite("d", d)?;
        let z = require_finite("z", z)?;

        let b2 = b * b;
        let tangent_denom = ((b2 + 1.0) * d * d + b2 * z * z).sqrt();
        let normal_denom = (b2 + 1.0).sqrt();
        let binormal_denom = ((b2 + 1.0) * (d * d * (b2 + 1.0) + b2 * z * z)).sqrt();

        for (frame, denom) in [
            ("tangent", tangent_denom),
            ("normal", normal_denom),
            ("binormal", binormal_denom),
        ] {
            if !denom.is_finite() {
                let name = if b.abs() >= d.abs() && b.abs() >= z.abs() {
                    "b"
                } else if d.abs() >= z.abs() {
                    "d"
                } else {
                    "z"
                };
                return Err(ShellError::invalid(
                    name,
                    format!("{frame} frame denominator overflows for b={b}, d={d}, z={z}"),
                ));
            }
            if denom <= 0.0 {
                return Err(ShellError::invalid(
                    "d",
                    format!("{frame} frame is undefined for b={b}, d={d}, z={z}"),
                ));
            }
        }

        Ok(Self {
            b,
            d,
            z,
            tangent_denom,
            normal_denom,
            binormal_denom,
        })
    }

    #[must_use]
    pub const fn b(&self) -> f64 {
        self.b
    }

    #[must_use]
    pub const fn d(&self) -> f64 {
        self.d
    }

    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Growth factor `exp(b·t)`.
    #[must_use]
    pub fn growth(&self, t: f64) -> f64 {
        (self.b * t).exp()
    }

    /// Backbone point `gamma(t)`.
    #[must_use]
    pub fn point(&self, t: f64) -> Point3 {
        let (sin_t, cos_t) = t.sin_cos();
        self.point_with(t, sin_t, cos_t)
    }

    pub(crate) fn point_with(&self, t: f64, sin_t: f64, cos_t: f64) -> Point3 {
        let g = self.growth(t);
        Point3::new(self.d * sin_t * g, self.d * cos_t * g, self.z * g)
    }

    /// Frenet frame at `t`.
    #[must_use]
    pub fn frame(&self, t: f64) -> FrenetFrame {
        let (sin_t, cos_t) = t.sin_cos();
        self.frame_with(sin_t, cos_t)
    }

    pub(crate) fn frame_with(&self, sin_t: f64, cos_t: f64) -> FrenetFrame {
        let (b, d, z) = (self.b, self.d, self.z);
        let along = b * sin_t + cos_t;
        let across = b * cos_t - sin_t;

        let tangent = Vec3::new(d * along, d * across, -b * z) / self.tangent_denom;
        let normal = Vec3::new(across, -b * sin_t - cos_t, 0.0) / self.normal_denom;
        let binormal =
            Vec3::new(b * z * along, b * z * across, d * (b * b + 1.0)) / self.binormal_denom;

        FrenetFrame {
            tangent,
            normal,
            binormal,
        }
    }
}
