use std::collections::HashMap;

use super::sampler::RingGrid;
use super::stitch::{flip_quads, quads_to_triangles, stitch_open_tube};
use super::{BBox, Point3, Tolerance, Transform, Vec3};

/// Ring-structured quad mesh.
///
/// Vertices are stored ring after ring (`ring_count × points_per_ring`), so
/// vertex `i·P + j` is point `j` of ring `i`. Quads are stored flat, four
/// indices per face.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuadMesh {
    pub positions: Vec<[f64; 3]>,
    pub quads: Vec<u32>,
    pub ring_count: usize,
    pub points_per_ring: usize,
}

impl QuadMesh {
    /// Stitches a ring-major point buffer into an open tube.
    ///
    /// `points.len()` must equal `grid.vertex_count()`, and `grid` must have
    /// passed [`RingGrid::validate`].
    #[must_use]
    pub fn from_rings(points: &[Point3], grid: RingGrid) -> Self {
        debug_assert_eq!(points.len(), grid.vertex_count());
        Self {
            positions: points.iter().map(|p| p.to_array()).collect(),
            quads: stitch_open_tube(grid),
            ring_count: grid.ring_count,
            points_per_ring: grid.points_per_ring,
        }
    }

    #[must_use]
    pub const fn grid(&self) -> RingGrid {
        RingGrid::new(self.ring_count, self.points_per_ring)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.quads.len() / 4
    }

    /// Vertices of ring `index`, or `None` past the last ring.
    #[must_use]
    pub fn ring(&self, index: usize) -> Option<&[[f64; 3]]> {
        let start = index.checked_mul(self.points_per_ring)?;
        self.positions.get(start..start + self.points_per_ring)
    }

    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.positions.iter().copied().map(Point3::from_array)
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len();
        self.quads.iter().all(|&i| (i as usize) < n)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.quads.len() % 4 != 0 {
            return Err("mesh indices are not a quad list (len % 4 != 0)".to_string());
        }
        if self.positions.len() != self.ring_count * self.points_per_ring {
            return Err("vertex count does not match ring layout".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        Ok(())
    }

    /// Returns the position buffer as a flat slice: `[x0, y0, z0, x1, y1, z1, ...]`.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        self.positions.as_flattened()
    }

    /// Triangle list with two triangles per quad.
    #[must_use]
    pub fn triangle_indices(&self) -> Vec<u32> {
        quads_to_triangles(&self.quads)
    }

    #[must_use]
    pub fn bbox(&self) -> Option<BBox> {
        let points: Vec<Point3> = self.points().collect();
        BBox::from_points(&points)
    }

    /// Applies `transform` to every vertex in place.
    pub fn transform(&mut self, transform: Transform) {
        for p in &mut self.positions {
            *p = transform.apply_point(Point3::from_array(*p)).to_array();
        }
    }

    /// Reverses the face winding, turning every face normal around.
    pub fn flip_winding(&mut self) {
        flip_quads(&mut self.quads);
    }

    /// Area-weighted centroid of the surface, or `None` when the total area is zero.
    ///
    /// Each quad counts as its two triangles.
    #[must_use]
    pub fn surface_centroid(&self) -> Option<Point3> {
        let mut weighted = Vec3::ZERO;
        let mut total_area = 0.0;

        for tri in self.triangle_indices().chunks_exact(3) {
            let (Some(a), Some(b), Some(c)) = (
                self.point(tri[0]),
                self.point(tri[1]),
                self.point(tri[2]),
            ) else {
                continue;
            };
            let area = 0.5 * b.sub_point(a).cross(c.sub_point(a)).length();
            if !area.is_finite() || area <= 0.0 {
                continue;
            }
            let centroid = a.to_vec3().add(b.to_vec3()).add(c.to_vec3()).mul_scalar(1.0 / 3.0);
            weighted = weighted.add(centroid.mul_scalar(area));
            total_area += area;
        }

        (total_area > 0.0).then(|| Point3::from(weighted.mul_scalar(1.0 / total_area)))
    }

    /// Per-vertex normals averaged from the area-weighted face normals.
    #[must_use]
    pub fn smooth_normals(&self) -> Vec<[f64; 3]> {
        let mut normals = vec![[0.0, 0.0, 0.0]; self.positions.len()];

        for tri in self.triangle_indices().chunks_exact(3) {
            let (Some(a), Some(b), Some(c)) = (
                self.point(tri[0]),
                self.point(tri[1]),
                self.point(tri[2]),
            ) else {
                continue;
            };
            let n = b.sub_point(a).cross(c.sub_point(a));
            for &i in tri {
                let slot = &mut normals[i as usize];
                slot[0] += n.x;
                slot[1] += n.y;
                slot[2] += n.z;
            }
        }

        for n in &mut normals {
            *n = Vec3::new(n[0], n[1], n[2])
                .normalized()
                .map_or([0.0, 0.0, 1.0], Vec3::to_array);
        }

        normals
    }

    fn point(&self, index: u32) -> Option<Point3> {
        self.positions.get(index as usize).copied().map(Point3::from_array)
    }
}

/// Edge and face statistics of a quad mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct QuadTopology {
    pub open_edge_count: usize,
    pub non_manifold_edge_count: usize,
    pub collapsed_quad_count: usize,
}

pub(crate) fn analyze_topology(mesh: &QuadMesh, tol: Tolerance) -> QuadTopology {
    let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();
    let mut collapsed_quad_count = 0usize;

    for q in mesh.quads.chunks_exact(4) {
        if quad_is_collapsed(mesh, q, tol) {
            collapsed_quad_count += 1;
        }
        for k in 0..4 {
            let (ea, eb) = (q[k], q[(k + 1) % 4]);
            if ea == eb {
                continue;
            }
            let key = if ea <= eb { (ea, eb) } else { (eb, ea) };
            *edge_counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut topology = QuadTopology {
        collapsed_quad_count,
        ..QuadTopology::default()
    };
    for count in edge_counts.into_values() {
        if count == 1 {
            topology.open_edge_count += 1;
        } else if count > 2 {
            topology.non_manifold_edge_count += 1;
        }
    }
    topology
}

/// A quad with at least one zero-length edge, i.e. one that has folded into a
/// triangle or less.
fn quad_is_collapsed(mesh: &QuadMesh, q: &[u32], tol: Tolerance) -> bool {
    (0..4).any(|k| match (mesh.point(q[k]), mesh.point(q[(k + 1) % 4])) {
        (Some(a), Some(b)) => tol.approx_eq_point3(a, b),
        _ => true,
    })
}

/// Counts quads whose normal points away from (`outward`) or toward the
/// centroid of their first ring.
pub(crate) fn count_orientation(mesh: &QuadMesh, tol: Tolerance) -> (usize, usize) {
    let ring_centroids: Vec<Vec3> = (0..mesh.ring_count)
        .filter_map(|i| mesh.ring(i))
        .map(|ring| {
            let sum = ring
                .iter()
                .fold(Vec3::ZERO, |acc, p| acc.add(Vec3::new(p[0], p[1], p[2])));
            sum.mul_scalar(1.0 / ring.len().max(1) as f64)
        })
        .collect();

    let p = mesh.points_per_ring.max(1);
    let mut outward = 0usize;
    let mut inward = 0usize;

    for q in mesh.quads.chunks_exact(4) {
        let (Some(a), Some(b), Some(d)) = (mesh.point(q[0]), mesh.point(q[1]), mesh.point(q[3]))
        else {
            continue;
        };
        let Some(center) = ring_centroids.get(q[0] as usize / p) else {
            continue;
        };
        let normal = b.sub_point(a).cross(d.sub_point(a));
        let radial = a.to_vec3().sub(*center);
        let dot = normal.dot(radial);
        if dot > tol.eps {
            outward += 1;
        } else if dot < -tol.eps {
            inward += 1;
        }
    }

    (outward, inward)
}
