use crate::model::constants::{ALONG_CUTOFF, VERT_CUTOFF};
use crate::model::geometry::{project, Point2D, Projection};
use crate::model::network::RoadNetwork;
use crate::model::segment::SegmentId;

/// observation likelihood of `query` given the hypothesis that it was
/// recorded while on `segment`: a piecewise product of two linear
/// drop-offs, zero past either cutoff.
pub fn observation_probability(start: &Point2D, end: &Point2D, query: &Point2D) -> f64 {
    match project(start, end, query) {
        Projection::Degenerate => 0.0,
        Projection::Ok {
            vertical_distance,
            along_track_distance,
        } => {
            if vertical_distance >= VERT_CUTOFF || along_track_distance >= ALONG_CUTOFF {
                0.0
            } else {
                (1.0 - vertical_distance / VERT_CUTOFF) * (1.0 - along_track_distance / ALONG_CUTOFF)
            }
        }
    }
}

pub fn observation_probability_for(network: &RoadNetwork, segment_id: SegmentId, query: &Point2D) -> f64 {
    let segment = network.segment(segment_id);
    observation_probability(&segment.start, &segment.end, query)
}

/// uniform transition probability over locally reachable segments: every
/// segment in `adjacency[i]` (including `i` itself) gets `1/k`, where `k`
/// is the adjacency set's size. `adjacency` is guaranteed non-empty (it
/// always contains the source segment).
pub fn transition_probability(adjacency_size: usize) -> f64 {
    1.0 / adjacency_size as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_is_one_exactly_on_segment() {
        let start = Point2D::new(0.0, 0.0);
        let end = Point2D::new(100.0, 0.0);
        let q = Point2D::new(50.0, 0.0);
        assert_eq!(observation_probability(&start, &end, &q), 1.0);
    }

    #[test]
    fn vertical_cutoff_boundary_is_zero() {
        let start = Point2D::new(0.0, 0.0);
        let end = Point2D::new(100.0, 0.0);
        let q = Point2D::new(50.0, 25.0);
        assert_eq!(observation_probability(&start, &end, &q), 0.0);
    }

    #[test]
    fn along_track_cutoff_boundary_is_zero() {
        let start = Point2D::new(0.0, 0.0);
        let end = Point2D::new(100.0, 0.0);
        let q = Point2D::new(115.0, 0.0);
        assert_eq!(observation_probability(&start, &end, &q), 0.0);
    }

    #[test]
    fn degenerate_segment_has_zero_probability() {
        let start = Point2D::new(5.0, 5.0);
        let end = Point2D::new(5.0, 5.0);
        assert_eq!(observation_probability(&start, &end, &start), 0.0);
    }

    #[test]
    fn transition_probability_is_uniform_over_adjacency() {
        assert_eq!(transition_probability(4), 0.25);
        assert_eq!(transition_probability(1), 1.0);
    }
}
