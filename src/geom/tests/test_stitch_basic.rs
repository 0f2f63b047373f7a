use crate::geom::{RingGrid, flip_quads, quads_to_triangles, stitch_open_tube};

#[test]
fn quads_follow_ring_layout() {
    let quads = stitch_open_tube(RingGrid::new(3, 4));

    assert_eq!(quads.len(), 2 * 4 * 4);
    assert_eq!(&quads[0..4], &[0, 1, 5, 4]);
    // Last quad of the first band wraps back to point 0.
    assert_eq!(&quads[12..16], &[3, 0, 4, 7]);
    assert_eq!(&quads[16..20], &[4, 5, 9, 8]);
}

#[test]
fn indices_stay_in_range() {
    let grid = RingGrid::new(17, 9);
    let quads = stitch_open_tube(grid);
    assert_eq!(quads.len(), grid.quad_count() * 4);
    assert!(quads.iter().all(|&i| (i as usize) < grid.vertex_count()));
}

#[test]
fn triangles_split_each_quad() {
    let triangles = quads_to_triangles(&[0, 1, 5, 4]);
    assert_eq!(triangles, vec![0, 1, 5, 0, 5, 4]);
}

#[test]
fn flip_keeps_first_corner() {
    let mut quads = vec![0, 1, 5, 4, 1, 2, 6, 5];
    flip_quads(&mut quads);
    assert_eq!(quads, vec![0, 4, 5, 1, 1, 5, 6, 2]);

    flip_quads(&mut quads);
    assert_eq!(quads, vec![0, 1, 5, 4, 1, 2, 6, 5]);
}
