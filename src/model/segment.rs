use crate::model::geometry::Point2D;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt::Display};

/// a stable index into a [`crate::model::network::RoadNetwork`]'s segment table.
#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, PartialOrd, Eq, Hash, Debug, Default)]
pub struct SegmentId(pub usize);

impl Ord for SegmentId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a directed, two-point piece of a polyline, the unit of state in the HMM.
///
/// direction is significant: it encodes one-way traffic, so `(start, end)`
/// and `(end, start)` are distinct segments with distinct names.
#[derive(Clone, Debug)]
pub struct Segment {
    pub id: SegmentId,
    pub start: Point2D,
    pub end: Point2D,
    pub name: String,
}
