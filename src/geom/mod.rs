mod core;
mod diagnostics;
mod error;
mod helicospiral;
mod mesh;
mod metrics;
mod normalize;
mod profile;
mod sampler;
mod stitch;

pub use core::{Axis, BBox, Point3, Tolerance, Transform, Vec3};
pub use diagnostics::ShellMeshDiagnostics;
pub use error::{DegenerateReason, ShellError};
pub use helicospiral::{FrenetFrame, Helicospiral};
pub use mesh::QuadMesh;
pub use metrics::{GeomMetrics, GeomTimingReport, TimingBucket};
pub use normalize::{CenterStrategy, PlacementOptions, normalize, place};
pub use profile::{Nodulation, Ornamentation, ProfileEvaluator, RingBasis};
pub use sampler::{CancelToken, RingGrid, RingSource, check_finite, sample_rings, whole_steps};
pub use stitch::{flip_quads, quads_to_triangles, stitch_open_tube};

pub(crate) use error::{require_finite, require_positive};
pub(crate) use mesh::{analyze_topology, count_orientation};

#[cfg(test)]
mod tests;
