//! Parameter sets for the shell families.
//!
//! Both sets deserialize with `#[serde(default)]`, so a host only sends the
//! fields it wants to change. Unknown fields are rejected. [`GrowthParameters::set`]
//! and [`RaupParameters::set`] take string `key=value` overrides, as the CLI does,
//! and accept the same key aliases as the wire format.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::geom::{Axis, CenterStrategy, Nodulation, PlacementOptions, ShellError};

/// Parameters of the Contreras helicospiral shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrowthParameters {
    /// Helicospiral expansion rate.
    pub b: f64,
    /// Base coiling radius.
    pub d: f64,
    /// Vertical offset, grown with the same exponential as the radius.
    pub z: f64,
    /// Aperture amplitude.
    pub a: f64,
    pub phi: f64,
    pub psi: f64,
    pub c_depth: f64,
    pub c_n: f64,
    pub n_depth: f64,
    pub n: f64,
    pub nodulation: Nodulation,
    /// Total growth extent.
    #[serde(alias = "t")]
    pub t_max: f64,
    pub time_step: f64,
    /// Half the number of points per ring.
    pub points_in_circle: usize,
    /// Shading hint for the host; does not change the mesh.
    pub smooth: bool,
    pub color: String,
    pub placement: PlacementOptions,
}

impl Default for GrowthParameters {
    fn default() -> Self {
        Self {
            b: 0.1,
            d: 4.0,
            z: 0.0,
            a: 1.0,
            phi: 0.0,
            psi: 0.0,
            c_depth: 0.1,
            c_n: 70.0,
            n_depth: 0.0,
            n: 0.0,
            nodulation: Nodulation::Axial,
            t_max: 20.0,
            time_step: 0.25 / 30.0,
            points_in_circle: 40,
            smooth: true,
            color: "#000000".to_string(),
            placement: PlacementOptions::default(),
        }
    }
}

impl GrowthParameters {
    /// Applies one `key=value` override.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ShellError> {
        match key {
            "b" => self.b = parse_f64("b", value)?,
            "d" => self.d = parse_f64("d", value)?,
            "z" => self.z = parse_f64("z", value)?,
            "a" => self.a = parse_f64("a", value)?,
            "phi" => self.phi = parse_f64("phi", value)?,
            "psi" => self.psi = parse_f64("psi", value)?,
            "c_depth" => self.c_depth = parse_f64("c_depth", value)?,
            "c_n" => self.c_n = parse_f64("c_n", value)?,
            "n_depth" => self.n_depth = parse_f64("n_depth", value)?,
            "n" => self.n = parse_f64("n", value)?,
            "nodulation" => {
                self.nodulation = match value.trim().to_ascii_lowercase().as_str() {
                    "axial" => Nodulation::Axial,
                    "periodic" => Nodulation::Periodic,
                    _ => return Err(ShellError::invalid("nodulation", format!("unknown mode `{value}`"))),
                }
            }
            "t" | "t_max" => self.t_max = parse_f64("t_max", value)?,
            "time_step" => self.time_step = parse_f64("time_step", value)?,
            "points_in_circle" => self.points_in_circle = parse_usize("points_in_circle", value)?,
            "smooth" => self.smooth = parse_bool("smooth", value)?,
            "color" => self.color = value.trim().to_string(),
            other => return set_placement(&mut self.placement, other, value),
        }
        Ok(())
    }
}

/// Parameters of Raup's coiling model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RaupParameters {
    /// Whorl expansion rate per revolution.
    #[serde(alias = "W")]
    pub w: f64,
    /// Translation rate along the coiling axis.
    #[serde(alias = "T")]
    pub t: f64,
    /// Distance of the generating circle's center from the coiling axis.
    pub r_c: f64,
    /// Vertical offset of the generating circle.
    pub y_0: f64,
    /// Radius of the generating circle.
    pub radius: f64,
    /// Points on the generating circle.
    pub n_points: usize,
    /// Number of rings along the coil.
    pub n_circles: usize,
    /// Total coiling angle in radians.
    pub n_rotations: f64,
    pub smooth: bool,
    #[serde(alias = "color1")]
    pub color: String,
    /// Second colour of the host's colour ramp.
    #[serde(alias = "color2")]
    pub accent_color: String,
    /// Colour-ramp blend factor, passed through to the host.
    #[serde(alias = "Fac")]
    pub fac: f64,
    pub placement: PlacementOptions,
}

impl Default for RaupParameters {
    fn default() -> Self {
        Self {
            w: 2.5,
            t: 0.0,
            r_c: 0.06,
            y_0: 0.0,
            radius: 0.06,
            n_points: 50,
            n_circles: 1000,
            n_rotations: 8.0 * PI,
            smooth: true,
            color: "#000000".to_string(),
            accent_color: "#000000".to_string(),
            fac: 0.72,
            placement: PlacementOptions {
                length: None,
                axis: Axis::X,
                center: CenterStrategy::SurfaceCentroid,
                flip: Some(Axis::X),
                scale_override: None,
            },
        }
    }
}

impl RaupParameters {
    /// Applies one `key=value` override.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ShellError> {
        match key {
            "w" | "W" => self.w = parse_f64("w", value)?,
            "t" | "T" => self.t = parse_f64("t", value)?,
            "r_c" => self.r_c = parse_f64("r_c", value)?,
            "y_0" => self.y_0 = parse_f64("y_0", value)?,
            "radius" => self.radius = parse_f64("radius", value)?,
            "n_points" => self.n_points = parse_usize("n_points", value)?,
            "n_circles" => self.n_circles = parse_usize("n_circles", value)?,
            "n_rotations" => self.n_rotations = parse_f64("n_rotations", value)?,
            "smooth" => self.smooth = parse_bool("smooth", value)?,
            "color" | "color1" => self.color = value.trim().to_string(),
            "accent_color" | "color2" => self.accent_color = value.trim().to_string(),
            "fac" | "Fac" => self.fac = parse_f64("fac", value)?,
            other => return set_placement(&mut self.placement, other, value),
        }
        Ok(())
    }
}

fn set_placement(placement: &mut PlacementOptions, key: &str, value: &str) -> Result<(), ShellError> {
    match key {
        "length" => placement.length = parse_optional_f64("length", value)?,
        "scale_override" => placement.scale_override = parse_optional_f64("scale_override", value)?,
        "axis" => placement.axis = parse_axis("axis", value)?,
        "flip" => {
            placement.flip = if is_none(value) {
                None
            } else {
                Some(parse_axis("flip", value)?)
            }
        }
        "center" => {
            placement.center = CenterStrategy::parse(value).ok_or_else(|| {
                ShellError::invalid("center", format!("unknown strategy `{value}`"))
            })?;
        }
        _ => {
            return Err(ShellError::InvalidParameter {
                name: "key",
                reason: format!("unknown parameter `{key}`"),
            });
        }
    }
    Ok(())
}

fn is_none(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "none" | "off" | "")
}

fn parse_f64(name: &'static str, value: &str) -> Result<f64, ShellError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| ShellError::invalid(name, format!("`{value}` is not a number: {e}")))
}

fn parse_optional_f64(name: &'static str, value: &str) -> Result<Option<f64>, ShellError> {
    if is_none(value) {
        Ok(None)
    } else {
        parse_f64(name, value).map(Some)
    }
}

fn parse_usize(name: &'static str, value: &str) -> Result<usize, ShellError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|e| ShellError::invalid(name, format!("`{value}` is not a count: {e}")))
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ShellError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ShellError::invalid(name, format!("`{value}` is not a boolean"))),
    }
}

fn parse_axis(name: &'static str, value: &str) -> Result<Axis, ShellError> {
    Axis::parse(value).ok_or_else(|| ShellError::invalid(name, format!("unknown axis `{value}`")))
}
