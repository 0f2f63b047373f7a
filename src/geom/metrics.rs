//! Opt-in timing hooks for the shell pipeline.
//!
//! Timing is only collected when the `mesh_engine_metrics` feature is enabled
//! and the target is not WASM (`std::time::Instant` is unavailable there).
//! Otherwise every call compiles down to running the closure.
//!
//! # Usage
//!
//! ```ignore
//! use shell_engine::geom::{GeomMetrics, TimingBucket};
//!
//! let mut metrics = GeomMetrics::default();
//! metrics.begin();
//! let points = metrics.time(TimingBucket::Sampling, || sample_rings(&source, &cancel));
//! if let Some(report) = metrics.end() {
//!     println!("Sampling: {} ns", report.sampling_ns);
//! }
//! ```

/// Pipeline stages that can be timed.
///
/// Each bucket accumulates time across multiple calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Parameter and frame validation.
    Validation,
    /// Ring evaluation (backbone, frame, ornamentation).
    Sampling,
    /// Quad stitching.
    Stitching,
    /// Rescaling, recentering, and orientation flips.
    Placement,
    /// Topology and orientation analysis.
    Diagnostics,
}

/// Timing report with nanosecond precision per stage.
///
/// All fields are cumulative.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GeomTimingReport {
    pub validation_ns: u64,
    pub sampling_ns: u64,
    pub stitching_ns: u64,
    pub placement_ns: u64,
    pub diagnostics_ns: u64,
}

impl GeomTimingReport {
    /// Returns the total time across all buckets in nanoseconds.
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.validation_ns
            .saturating_add(self.sampling_ns)
            .saturating_add(self.stitching_ns)
            .saturating_add(self.placement_ns)
            .saturating_add(self.diagnostics_ns)
    }

    /// Returns the total time in milliseconds (for display purposes).
    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }
}

/// Accumulator for timing pipeline stages.
///
/// Call [`begin`](Self::begin) to reset, wrap stages with [`time`](Self::time),
/// and call [`end`](Self::end) to retrieve the report.
#[derive(Debug, Default)]
pub struct GeomMetrics {
    #[cfg(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32")))]
    report: GeomTimingReport,
}

impl GeomMetrics {
    /// Resets all timing counters to zero.
    pub fn begin(&mut self) {
        #[cfg(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32")))]
        {
            self.report = GeomTimingReport::default();
        }
    }

    /// Returns the accumulated timing report, or `None` if metrics are disabled.
    #[must_use]
    pub fn end(&self) -> Option<GeomTimingReport> {
        #[cfg(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Times the execution of `f` and accumulates the elapsed time in `bucket`.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let nanos = start.elapsed().as_nanos().min(u128::from(u64::MAX)) as u64;
            self.add_to_bucket(bucket, nanos);
            result
        }

        #[cfg(not(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }

    #[cfg(all(feature = "mesh_engine_metrics", not(target_arch = "wasm32")))]
    fn add_to_bucket(&mut self, bucket: TimingBucket, nanos: u64) {
        let slot = match bucket {
            TimingBucket::Validation => &mut self.report.validation_ns,
            TimingBucket::Sampling => &mut self.report.sampling_ns,
            TimingBucket::Stitching => &mut self.report.stitching_ns,
            TimingBucket::Placement => &mut self.report.placement_ns,
            TimingBucket::Diagnostics => &mut self.report.diagnostics_ns,
        };
        *slot = slot.saturating_add(nanos);
    }
}
