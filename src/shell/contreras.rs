//! Contreras helicospiral shell.
//!
//! Each ring sits on the logarithmic helicospiral backbone at `t_i = i·time_step`.
//! The cross-section is spanned by the backbone's normal and binormal, shaped by
//! the aperture amplitude `a`, and modulated by ribs and nodules.

use std::f64::consts::PI;

use crate::geom::{
    DegenerateReason, Helicospiral, Ornamentation, PlacementOptions, Point3, ProfileEvaluator,
    RingGrid, RingSource, ShellError, Tolerance, require_positive, whole_steps,
};

use super::color::Rgba;
use super::params::GrowthParameters;
use super::registry::{MeshGenerator, ShellAppearance, ShellFamily};

#[derive(Debug, Clone)]
pub struct ContrerasGenerator {
    params: GrowthParameters,
    profile: ProfileEvaluator,
    grid: RingGrid,
    theta_step: f64,
    appearance: ShellAppearance,
}

impl ContrerasGenerator {
    /// Validates `params` and prepares the evaluator.
    pub fn new(params: GrowthParameters) -> Result<Self, ShellError> {
        let curve = Helicospiral::new(params.b, params.d, params.z)?;
        let profile = ProfileEvaluator::new(
            curve,
            Ornamentation {
                a: params.a,
                phi: params.phi,
                psi: params.psi,
                c_depth: params.c_depth,
                c_n: params.c_n,
                n_depth: params.n_depth,
                n: params.n,
                nodulation: params.nodulation,
            },
        )?;

        if Tolerance::ZERO_LENGTH.approx_zero_f64(params.a) {
            return Err(ShellError::DegenerateMesh(DegenerateReason::FlatCrossSection));
        }

        let t_max = require_positive("t_max", params.t_max)?;
        let time_step = require_positive("time_step", params.time_step)?;
        if params.points_in_circle == 0 {
            return Err(ShellError::invalid("points_in_circle", "must be > 0"));
        }

        let grid = RingGrid::new(
            whole_steps(t_max, time_step),
            params.points_in_circle.saturating_mul(2),
        );
        grid.validate()?;
        params.placement.validate()?;

        let appearance = ShellAppearance {
            color: Rgba::from_hex(&params.color)?,
            accent_color: None,
            ramp_factor: None,
            smooth: params.smooth,
        };

        Ok(Self {
            theta_step: PI / params.points_in_circle as f64,
            params,
            profile,
            grid,
            appearance,
        })
    }

    #[must_use]
    pub const fn params(&self) -> &GrowthParameters {
        &self.params
    }

    #[must_use]
    pub const fn profile(&self) -> &ProfileEvaluator {
        &self.profile
    }

    /// Growth parameter of ring `ring`.
    #[must_use]
    pub fn ring_parameter(&self, ring: usize) -> f64 {
        ring as f64 * self.params.time_step
    }
}

impl RingSource for ContrerasGenerator {
    fn grid(&self) -> RingGrid {
        self.grid
    }

    fn fill_ring(&self, ring: usize, out: &mut [Point3]) {
        let basis = self.profile.ring_basis(self.ring_parameter(ring));
        for (j, slot) in out.iter_mut().enumerate() {
            let theta = j as f64 * self.theta_step;
            *slot = basis.center.add_vec(self.profile.offset(&basis, theta));
        }
    }
}

impl MeshGenerator for ContrerasGenerator {
    fn family(&self) -> ShellFamily {
        ShellFamily::Contreras
    }

    fn placement(&self) -> &PlacementOptions {
        &self.params.placement
    }

    fn appearance(&self) -> ShellAppearance {
        self.appearance
    }
}
