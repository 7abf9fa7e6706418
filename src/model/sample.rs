use crate::model::geometry::Point2D;
use serde::{Deserialize, Serialize};

/// one noisy GPS fix on a trajectory. the matched road name is returned
/// separately, as the return value of [`crate::driver::match_trajectory`],
/// rather than stored here.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub point: Point2D,
    pub timestamp: i64,
}

impl TrajectorySample {
    pub fn new(point: Point2D, timestamp: i64) -> Self {
        TrajectorySample { point, timestamp }
    }
}

/// the label emitted for a sample that matched no segment.
pub const UNKNOWN: &str = "UNKNOWN";
