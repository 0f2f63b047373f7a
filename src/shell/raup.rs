//! Raup coiling model.
//!
//! A generating circle of `radius`, centered `r_c` from the coiling axis, is
//! swept around the axis. After a coiling angle `theta`, every point of the circle
//! is scaled by `g = W^(theta / 2π)` and lifted by `r_c·T·(g − 1)`. The result is
//! then mapped from cylindrical `(theta, r, y)` to Cartesian `(r cos θ, r sin θ, y)`.

use std::f64::consts::TAU;

use crate::geom::{
    PlacementOptions, Point3, RingGrid, RingSource, ShellError, require_finite, require_positive,
};

use super::color::Rgba;
use super::params::RaupParameters;
use super::registry::{MeshGenerator, ShellAppearance, ShellFamily};

#[derive(Debug, Clone)]
pub struct RaupGenerator {
    params: RaupParameters,
    /// Generating circle in the `(r, y)` half-plane, at `theta = 0`.
    circle: Vec<(f64, f64)>,
    grid: RingGrid,
    appearance: ShellAppearance,
}

impl RaupGenerator {
    /// Validates `params` and precomputes the generating circle.
    pub fn new(params: RaupParameters) -> Result<Self, ShellError> {
        require_positive("w", params.w)?;
        require_finite("t", params.t)?;
        require_finite("r_c", params.r_c)?;
        require_finite("y_0", params.y_0)?;
        require_positive("radius", params.radius)?;
        require_positive("n_rotations", params.n_rotations)?;
        require_finite("fac", params.fac)?;
        if params.n_points < 3 {
            return Err(ShellError::invalid(
                "n_points",
                format!("at least 3 points are required, got {}", params.n_points),
            ));
        }
        if params.n_circles < 2 {
            return Err(ShellError::invalid(
                "n_circles",
                format!("at least 2 circles are required, got {}", params.n_circles),
            ));
        }

        let grid = RingGrid::new(params.n_circles, params.n_points);
        grid.validate()?;
        params.placement.validate()?;

        let step = TAU / params.n_points as f64;
        let circle = (0..params.n_points)
            .map(|i| {
                let (sin, cos) = (i as f64 * step).sin_cos();
                (params.r_c + params.radius * cos, params.y_0 + params.radius * sin)
            })
            .collect();

        let appearance = ShellAppearance {
            color: Rgba::from_hex(&params.color)?,
            accent_color: Some(Rgba::from_hex(&params.accent_color)?),
            ramp_factor: Some(params.fac),
            smooth: params.smooth,
        };

        Ok(Self {
            params,
            circle,
            grid,
            appearance,
        })
    }

    #[must_use]
    pub const fn params(&self) -> &RaupParameters {
        &self.params
    }

    /// Coiling angle of ring `ring`; rings span `[0, n_rotations]` inclusive.
    #[must_use]
    pub fn ring_angle(&self, ring: usize) -> f64 {
        let last = (self.params.n_circles - 1) as f64;
        self.params.n_rotations * ring as f64 / last
    }
}

impl RingSource for RaupGenerator {
    fn grid(&self) -> RingGrid {
        self.grid
    }

    fn fill_ring(&self, ring: usize, out: &mut [Point3]) {
        let theta = self.ring_angle(ring);
        let growth = self.params.w.powf(theta / TAU);
        let lift = self.params.r_c * self.params.t * (growth - 1.0);
        let (sin_theta, cos_theta) = theta.sin_cos();

        for (slot, &(r0, y0)) in out.iter_mut().zip(&self.circle) {
            let r = r0 * growth;
            *slot = Point3::new(r * cos_theta, r * sin_theta, y0 * growth + lift);
        }
    }
}

impl MeshGenerator for RaupGenerator {
    fn family(&self) -> ShellFamily {
        ShellFamily::Raup
    }

    fn placement(&self) -> &PlacementOptions {
        &self.params.placement
    }

    fn appearance(&self) -> ShellAppearance {
        self.appearance
    }
}
