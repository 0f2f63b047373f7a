use crate::geom::{Point3, QuadMesh, RingGrid, RingSource};

mod test_helicospiral_basic;
mod test_normalize_basic;
mod test_profile_basic;
mod test_stitch_basic;

/// Unit circles stacked one unit apart along +Z.
pub(super) struct Cylinder {
    pub grid: RingGrid,
}

impl RingSource for Cylinder {
    fn grid(&self) -> RingGrid {
        self.grid
    }

    fn fill_ring(&self, ring: usize, out: &mut [Point3]) {
        let step = std::f64::consts::TAU / out.len() as f64;
        for (j, slot) in out.iter_mut().enumerate() {
            let (sin, cos) = (j as f64 * step).sin_cos();
            *slot = Point3::new(cos, sin, ring as f64);
        }
    }
}

pub(super) fn cylinder_mesh(rings: usize, points: usize) -> QuadMesh {
    let grid = RingGrid::new(rings, points);
    let source = Cylinder { grid };
    let points = crate::geom::sample_rings(&source, &crate::geom::CancelToken::new())
        .expect("cylinder samples");
    QuadMesh::from_rings(&points, grid)
}
