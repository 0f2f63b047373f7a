use std::ops::Div;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Vec3
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub const fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Unit vector, or `None` for zero-length and non-finite input.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len.is_finite() && len > 0.0 {
            Some(self / len)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn mul_scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    #[must_use]
    pub const fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    #[must_use]
    pub const fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    /// Largest of the three components.
    #[must_use]
    pub fn max_component(self) -> f64 {
        self.x.max(self.y).max(self.z)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point3
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Position vector from the origin.
    #[must_use]
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[must_use]
    pub const fn add_vec(self, v: Vec3) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    #[must_use]
    pub const fn sub_point(self, rhs: Self) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Coordinate along `axis`.
    #[must_use]
    pub const fn coord(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Axis
// ─────────────────────────────────────────────────────────────────────────────

/// Principal world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transform
// ─────────────────────────────────────────────────────────────────────────────

/// Affine transform stored as a row-major 4×4 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: [[f64; 4]; 4],
}

impl Transform {
    #[must_use]
    pub const fn translate(offset: Vec3) -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, offset.x],
                [0.0, 1.0, 0.0, offset.y],
                [0.0, 0.0, 1.0, offset.z],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    #[must_use]
    pub const fn uniform_scale(s: f64) -> Self {
        Self::diagonal(s, s, s)
    }

    /// Rotation by `angle` radians about the Z axis.
    #[must_use]
    pub fn rotate_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [
                [c, -s, 0.0, 0.0],
                [s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Exact half-turn about a principal axis.
    ///
    /// Built from signs instead of `cos(PI)`/`sin(PI)` so the off-axis terms are
    /// exactly zero.
    #[must_use]
    pub const fn half_turn(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::diagonal(1.0, -1.0, -1.0),
            Axis::Y => Self::diagonal(-1.0, 1.0, -1.0),
            Axis::Z => Self::diagonal(-1.0, -1.0, 1.0),
        }
    }

    const fn diagonal(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            m: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    #[must_use]
    pub fn apply_point(self, p: Point3) -> Point3 {
        let v = self.apply_vec(p.to_vec3());
        Point3::new(v.x + self.m[0][3], v.y + self.m[1][3], v.z + self.m[2][3])
    }

    #[must_use]
    pub fn apply_vec(self, v: Vec3) -> Vec3 {
        let row = |r: [f64; 4]| r[0] * v.x + r[1] * v.y + r[2] * v.z;
        Vec3::new(row(self.m[0]), row(self.m[1]), row(self.m[2]))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BBox
// ─────────────────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min: Point3,
    pub max: Point3,
}

impl BBox {
    /// Tightest box around `points`, or `None` when there are none.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |bbox, p| Self {
                min: Point3::new(bbox.min.x.min(p.x), bbox.min.y.min(p.y), bbox.min.z.min(p.z)),
                max: Point3::new(bbox.max.x.max(p.x), bbox.max.y.max(p.y), bbox.max.z.max(p.z)),
            },
        ))
    }

    #[must_use]
    pub fn center(self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Side lengths along X, Y and Z.
    #[must_use]
    pub const fn size(self) -> Vec3 {
        self.max.sub_point(self.min)
    }

    /// Extent of the box along a single axis.
    #[must_use]
    pub const fn extent(self, axis: Axis) -> f64 {
        self.max.coord(axis) - self.min.coord(axis)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

/// Tolerance configuration for geometric comparisons.
///
/// - `Tolerance::default_geom()` - General geometry comparisons (1e-9)
/// - `Tolerance::ZERO_LENGTH` - Detecting degenerate/zero-length values (1e-12)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// Default geometric tolerance (1e-9).
    pub const DEFAULT: Self = Self { eps: 1e-9 };

    /// Tolerance for detecting zero-length/degenerate values (1e-12).
    pub const ZERO_LENGTH: Self = Self { eps: 1e-12 };

    #[must_use]
    pub const fn default_geom() -> Self {
        Self::DEFAULT
    }

    #[must_use]
    pub const fn eps_squared(self) -> f64 {
        self.eps * self.eps
    }

    /// Tolerance relative to a span, e.g. the size of a bounding box.
    #[must_use]
    pub fn relative_to(self, span: f64) -> f64 {
        self.eps * span.abs()
    }

    #[must_use]
    pub fn approx_zero_f64(self, a: f64) -> bool {
        a.abs() <= self.eps
    }

    #[must_use]
    pub fn approx_eq_point3(self, a: Point3, b: Point3) -> bool {
        a.sub_point(b).length_squared() <= self.eps_squared()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
