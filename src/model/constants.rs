//! Tunable constants baked into the matcher's reference semantics.

/// endpoint bucket size used to decide two segment endpoints coincide.
pub const ADJACENCY_RESOLUTION: f64 = 0.1;

/// kd-tree ball query radius used to find anchor candidates.
pub const ANCHOR_RADIUS: f64 = 300.0;

/// observation cutoff on perpendicular distance to the segment's line.
pub const VERT_CUTOFF: f64 = 25.0;

/// observation cutoff on along-track overshoot past the segment's endpoints.
pub const ALONG_CUTOFF: f64 = 15.0;

/// pruning / window-termination probability floor.
pub const MIN_PROB: f64 = 1e-3;
