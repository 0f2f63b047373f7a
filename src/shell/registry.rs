//! Shape families and how they are looked up.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geom::{PlacementOptions, RingSource, ShellError};

use super::color::Rgba;
use super::contreras::ContrerasGenerator;
use super::params::{GrowthParameters, RaupParameters};
use super::raup::RaupGenerator;

/// Material hints that travel with a generated mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShellAppearance {
    pub color: Rgba,
    pub accent_color: Option<Rgba>,
    /// Blend position between `color` and `accent_color` in the host's colour ramp.
    pub ramp_factor: Option<f64>,
    pub smooth: bool,
}

/// A validated shell model that can be sampled ring by ring.
///
/// Constructing a generator validates its parameters, so a generator that
/// exists is always ready to sample.
pub trait MeshGenerator: RingSource {
    fn family(&self) -> ShellFamily;
    fn placement(&self) -> &PlacementOptions;
    fn appearance(&self) -> ShellAppearance;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellFamily {
    Contreras,
    Raup,
}

impl ShellFamily {
    pub const ALL: &'static [Self] = &[Self::Contreras, Self::Raup];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Contreras => "contreras",
            Self::Raup => "raup",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Contreras => "helicospiral backbone with Frenet-frame ornamentation",
            Self::Raup => "generating circle coiled with Raup's W/T growth model",
        }
    }

    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Contreras => &["contreras", "helicospiral", "snail"],
            Self::Raup => &["raup", "raupian", "coil"],
        }
    }
}

/// Name-based lookup of shell families.
#[derive(Debug, Clone)]
pub struct GeneratorRegistry {
    by_name: HashMap<String, ShellFamily>,
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        for &family in ShellFamily::ALL {
            registry.register_names(family.aliases(), family);
        }
        registry
    }
}

impl GeneratorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    pub fn register_names(&mut self, names: &[&str], family: ShellFamily) {
        for name in names {
            self.by_name.insert(normalize_name(name), family);
        }
    }

    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ShellFamily> {
        self.by_name.get(&normalize_name(name)).copied()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parameters for any family, tagged by `family` on the wire.
///
/// ```json
/// { "family": "contreras", "b": 0.12, "points_in_circle": 20 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ShellSpec {
    Contreras(GrowthParameters),
    Raup(RaupParameters),
}

impl ShellSpec {
    /// Default parameters for `family`.
    #[must_use]
    pub fn defaults(family: ShellFamily) -> Self {
        match family {
            ShellFamily::Contreras => Self::Contreras(GrowthParameters::default()),
            ShellFamily::Raup => Self::Raup(RaupParameters::default()),
        }
    }

    #[must_use]
    pub const fn family(&self) -> ShellFamily {
        match self {
            Self::Contreras(_) => ShellFamily::Contreras,
            Self::Raup(_) => ShellFamily::Raup,
        }
    }

    /// Applies one `key=value` override to the wrapped parameters.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ShellError> {
        match self {
            Self::Contreras(params) => params.set(key, value),
            Self::Raup(params) => params.set(key, value),
        }
    }

    /// Validates the parameters and builds the matching generator.
    pub fn build(&self) -> Result<Box<dyn MeshGenerator>, ShellError> {
        Ok(match self {
            Self::Contreras(params) => Box::new(ContrerasGenerator::new(params.clone())?),
            Self::Raup(params) => Box::new(RaupGenerator::new(params.clone())?),
        })
    }
}
