//! Connects consecutive rings into quads.

use super::sampler::RingGrid;

/// Quad indices for an open tube over `grid`, flattened as `[a, b, c, d, ...]`.
///
/// Quad `(i, j)` is
/// `(i·P + j, i·P + (j+1) mod P, (i+1)·P + (j+1) mod P, (i+1)·P + j)`.
/// The modulo closes every ring. No quad joins the last ring back to the
/// first, so both ends stay open.
///
/// The grid must have passed [`RingGrid::validate`], which keeps every index
/// within `u32`.
#[must_use]
pub fn stitch_open_tube(grid: RingGrid) -> Vec<u32> {
    let p = grid.points_per_ring;
    let mut quads = Vec::with_capacity(grid.quad_count() * 4);

    for ring in 0..grid.ring_count.saturating_sub(1) {
        let base = ring * p;
        let next = base + p;
        for j in 0..p {
            let j_next = (j + 1) % p;
            quads.extend_from_slice(&[
                (base + j) as u32,
                (base + j_next) as u32,
                (next + j_next) as u32,
                (next + j) as u32,
            ]);
        }
    }

    quads
}

/// Splits each quad `(a, b, c, d)` into triangles `(a, b, c)` and `(a, c, d)`.
#[must_use]
pub fn quads_to_triangles(quads: &[u32]) -> Vec<u32> {
    let mut triangles = Vec::with_capacity(quads.len() / 4 * 6);
    for q in quads.chunks_exact(4) {
        triangles.extend_from_slice(&[q[0], q[1], q[2]]);
        triangles.extend_from_slice(&[q[0], q[2], q[3]]);
    }
    triangles
}

/// Reverses the winding of every quad in place, keeping the first corner.
pub fn flip_quads(quads: &mut [u32]) {
    for q in quads.chunks_exact_mut(4) {
        q.swap(1, 3);
    }
}
