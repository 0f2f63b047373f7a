//! Cross-section ornamentation around the helicospiral backbone.
//!
//! For a growth parameter `t` and angle `theta` the surface point is
//!
//! ```text
//! lambda(t, theta) = gamma(t) + long_ribs(t) · e_term(t) · R_z(psi) · (vN + vB)
//! ```
//!
//! `e_term = exp(b·t) − 1/(t+1)` is zero at `t = 0`, so the shell starts from
//! a single apex point. `long_ribs` modulates the amplitude along the growth
//! axis. The nodulation term modulates it around the circumference.

use serde::{Deserialize, Serialize};

use super::error::{ShellError, require_finite};
use super::helicospiral::{FrenetFrame, Helicospiral};
use super::{Point3, Transform, Vec3};

/// How the circumferential nodulation term depends on `theta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nodulation {
    /// `1 + n_depth·sin(theta)`: one bulge per ring, ignoring `n`.
    #[default]
    Axial,
    /// `1 + n_depth·sin(n·theta)`: `n` nodules per ring.
    Periodic,
}

/// Ornamentation constants for one shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ornamentation {
    /// Aperture amplitude (elongation of the cross-section).
    pub a: f64,
    /// Cross-section phase.
    pub phi: f64,
    /// Rotation of the ornamentation pattern about the coiling (z) axis.
    pub psi: f64,
    /// Longitudinal rib depth.
    pub c_depth: f64,
    /// Longitudinal rib frequency.
    pub c_n: f64,
    /// Nodulation depth.
    pub n_depth: f64,
    /// Nodulation count (only used by [`Nodulation::Periodic`]).
    pub n: f64,
    pub nodulation: Nodulation,
}

impl Ornamentation {
    pub fn validate(&self) -> Result<(), ShellError> {
        require_finite("a", self.a)?;
        require_finite("phi", self.phi)?;
        require_finite("psi", self.psi)?;
        require_finite("c_depth", self.c_depth)?;
        require_finite("c_n", self.c_n)?;
        require_finite("n_depth", self.n_depth)?;
        require_finite("n", self.n)?;
        Ok(())
    }

    /// Growth-coupled amplitude envelope `exp(b·t) − 1/(t+1)`.
    #[must_use]
    pub fn envelope(growth: f64, t: f64) -> f64 {
        growth - 1.0 / (t + 1.0)
    }

    /// Longitudinal rib modulation `1 + c_depth·sin(c_n·t)`.
    #[must_use]
    pub fn long_ribs(&self, t: f64) -> f64 {
        1.0 + self.c_depth * (self.c_n * t).sin()
    }

    /// Circumferential modulation at `theta`.
    #[must_use]
    pub fn nodulation_at(&self, theta: f64, sin_theta: f64) -> f64 {
        match self.nodulation {
            Nodulation::Axial => 1.0 + self.n_depth * sin_theta,
            Nodulation::Periodic => 1.0 + self.n_depth * (self.n * theta).sin(),
        }
    }
}

/// Everything that depends only on `t`, computed once per ring.
#[derive(Debug, Clone, Copy)]
pub struct RingBasis {
    pub center: Point3,
    pub frame: FrenetFrame,
    /// `long_ribs · e_term`.
    pub amplitude: f64,
}

/// Evaluates `lambda(t, theta)` for one shell.
#[derive(Debug, Clone, Copy)]
pub struct ProfileEvaluator {
    curve: Helicospiral,
    ornament: Ornamentation,
    rotation: Transform,
    cos_phi: f64,
    sin_phi: f64,
}

impl ProfileEvaluator {
    pub fn new(curve: Helicospiral, ornament: Ornamentation) -> Result<Self, ShellError> {
        ornament.validate()?;
        let (sin_phi, cos_phi) = ornament.phi.sin_cos();
        Ok(Self {
            curve,
            ornament,
            rotation: Transform::rotate_z(ornament.psi),
            cos_phi,
            sin_phi,
        })
    }

    #[must_use]
    pub const fn curve(&self) -> &Helicospiral {
        &self.curve
    }

    #[must_use]
    pub const fn ornamentation(&self) -> &Ornamentation {
        &self.ornament
    }

    #[must_use]
    pub fn ring_basis(&self, t: f64) -> RingBasis {
        let (sin_t, cos_t) = t.sin_cos();
        let growth = self.curve.growth(t);
        RingBasis {
            center: self.curve.point_with(t, sin_t, cos_t),
            frame: self.curve.frame_with(sin_t, cos_t),
            amplitude: self.ornament.long_ribs(t) * Ornamentation::envelope(growth, t),
        }
    }

    /// Ornamentation offset `C(t, theta)` relative to the backbone point.
    #[must_use]
    pub fn offset(&self, basis: &RingBasis, theta: f64) -> Vec3 {
        let (sin_theta, cos_theta) = theta.sin_cos();
        let a = self.ornament.a;
        let modulation = self.ornament.nodulation_at(theta, sin_theta);

        let weight_n = (a * sin_theta * self.cos_phi + cos_theta * self.sin_phi) * modulation;
        let weight_b = (a * sin_theta * self.sin_phi - cos_theta * self.cos_phi) * modulation;

        let local = basis
            .frame
            .normal
            .mul_scalar(weight_n)
            .add(basis.frame.binormal.mul_scalar(weight_b));

        self.rotation.apply_vec(local).mul_scalar(basis.amplitude)
    }

    /// Surface point `lambda(t, theta)`.
    #[must_use]
    pub fn point(&self, t: f64, theta: f64) -> Point3 {
        let basis = self.ring_basis(t);
        basis.center.add_vec(self.offset(&basis, theta))
    }
}
