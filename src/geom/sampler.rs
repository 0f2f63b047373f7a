//! Ring-major surface sampling.
//!
//! A [`RingSource`] knows how to fill one ring of points from its own growth
//! parameter. [`sample_rings`] evaluates every ring into a flat buffer laid out
//! ring after ring. With the `parallel` feature the rings are split into
//! disjoint output slices and filled on the rayon pool.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::Point3;
use super::error::ShellError;

/// Relative slack used when counting whole steps in a range, so that e.g.
/// `20 / (0.25 / 30)` yields 2400 rings and not 2399.
const STEP_COUNT_SLACK: f64 = 1e-9;

/// Shape of the sample grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingGrid {
    pub ring_count: usize,
    pub points_per_ring: usize,
}

impl RingGrid {
    #[must_use]
    pub const fn new(ring_count: usize, points_per_ring: usize) -> Self {
        Self {
            ring_count,
            points_per_ring,
        }
    }

    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.ring_count * self.points_per_ring
    }

    /// Quads of an open tube: one band between each pair of consecutive rings.
    #[must_use]
    pub const fn quad_count(&self) -> usize {
        self.ring_count.saturating_sub(1) * self.points_per_ring
    }

    /// Rejects grids that cannot be stitched or indexed with `u32`.
    pub fn validate(&self) -> Result<(), ShellError> {
        if self.ring_count < 2 {
            return Err(ShellError::invalid(
                "ring_count",
                format!("at least 2 rings are required, got {}", self.ring_count),
            ));
        }
        if self.points_per_ring < 2 {
            return Err(ShellError::invalid(
                "points_per_ring",
                format!("at least 2 points per ring are required, got {}", self.points_per_ring),
            ));
        }
        let total = self
            .ring_count
            .checked_mul(self.points_per_ring)
            .filter(|&n| u32::try_from(n).is_ok());
        if total.is_none() {
            return Err(ShellError::invalid(
                "ring_count",
                format!(
                    "{} rings x {} points exceeds the u32 index range",
                    self.ring_count, self.points_per_ring
                ),
            ));
        }
        Ok(())
    }
}

/// Number of whole `step`s that fit in `[0, extent)`.
///
/// Both arguments must already be finite and positive.
#[must_use]
pub fn whole_steps(extent: f64, step: f64) -> usize {
    let raw = extent / step;
    let count = (raw + raw * STEP_COUNT_SLACK).floor();
    if count.is_finite() && count > 0.0 {
        // Saturating float-to-int cast.
        count as usize
    } else {
        0
    }
}

/// Something that can evaluate a surface one ring at a time.
pub trait RingSource: Sync {
    fn grid(&self) -> RingGrid;

    /// Writes ring `ring` into `out`, which has exactly `points_per_ring` slots.
    fn fill_ring(&self, ring: usize, out: &mut [Point3]);
}

/// Cooperative cancellation flag shared between a caller and a running generation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Samples every ring of `source` into a flat, ring-major point buffer.
///
/// The token is checked before each ring.
pub fn sample_rings<S: RingSource + ?Sized>(
    source: &S,
    cancel: &CancelToken,
) -> Result<Vec<Point3>, ShellError> {
    let grid = source.grid();
    grid.validate()?;

    let mut points = vec![Point3::ORIGIN; grid.vertex_count()];
    fill_all(source, grid, &mut points, cancel)?;
    Ok(points)
}

#[cfg(not(feature = "parallel"))]
fn fill_all<S: RingSource + ?Sized>(
    source: &S,
    grid: RingGrid,
    points: &mut [Point3],
    cancel: &CancelToken,
) -> Result<(), ShellError> {
    for (ring, chunk) in points.chunks_exact_mut(grid.points_per_ring).enumerate() {
        if cancel.is_cancelled() {
            return Err(ShellError::Cancelled {
                completed_rings: ring,
            });
        }
        source.fill_ring(ring, chunk);
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn fill_all<S: RingSource + ?Sized>(
    source: &S,
    grid: RingGrid,
    points: &mut [Point3],
    cancel: &CancelToken,
) -> Result<(), ShellError> {
    use rayon::prelude::*;
    use std::sync::atomic::AtomicUsize;

    let completed = AtomicUsize::new(0);
    points
        .par_chunks_exact_mut(grid.points_per_ring)
        .enumerate()
        .for_each(|(ring, chunk)| {
            if cancel.is_cancelled() {
                return;
            }
            source.fill_ring(ring, chunk);
            completed.fetch_add(1, Ordering::Relaxed);
        });

    let completed_rings = completed.into_inner();
    if completed_rings < grid.ring_count {
        return Err(ShellError::Cancelled { completed_rings });
    }
    Ok(())
}

/// Fails with `NumericOverflow` at the first non-finite point.
pub fn check_finite(points: &[Point3], grid: RingGrid) -> Result<(), ShellError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(ShellError::NumericOverflow {
            ring: index / grid.points_per_ring.max(1),
            point: index % grid.points_per_ring.max(1),
        }),
        None => Ok(()),
    }
}
