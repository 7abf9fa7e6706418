use crate::map::index::SegmentIndex;
use crate::model::constants::ADJACENCY_RESOLUTION;
use crate::model::geometry::Point2D;
use crate::model::network_error::NetworkError;
use crate::model::segment::{Segment, SegmentId};
use std::collections::HashMap;

/// one named polyline as supplied by the collaborator that parsed the road
/// map; fragmented into consecutive 2-point segments on build.
pub struct NamedPolyline {
    pub name: String,
    pub polyline: Vec<Point2D>,
}

impl NamedPolyline {
    pub fn new(name: impl Into<String>, polyline: Vec<Point2D>) -> Self {
        NamedPolyline {
            name: name.into(),
            polyline,
        }
    }
}

type BucketKey = (i64, i64);

fn bucket_key(p: &Point2D) -> BucketKey {
    (
        (p.x() / ADJACENCY_RESOLUTION).floor() as i64,
        (p.y() / ADJACENCY_RESOLUTION).floor() as i64,
    )
}

/// an immutable, built road network: segments addressable by index and by
/// name, with derived adjacency and a spatial index over segment starts.
///
/// built once via [`RoadNetwork::build`]; never mutates afterward, so it is
/// trivially `Send + Sync` and may be shared across a thread pool decoding
/// many trajectories concurrently.
pub struct RoadNetwork {
    segments: Vec<Segment>,
    name_to_id: HashMap<String, SegmentId>,
    adjacency: Vec<Vec<SegmentId>>,
    index: SegmentIndex,
}

impl RoadNetwork {
    /// fragments each polyline into consecutive 2-point segments named
    /// `"<name>_<segment_index>"`, then builds the adjacency map and spatial
    /// index. fails if a polyline has fewer than 2 points or any resulting
    /// segment name collides with another.
    pub fn build(polylines: &[NamedPolyline]) -> Result<RoadNetwork, NetworkError> {
        let mut segments: Vec<Segment> = Vec::new();
        let mut name_to_id: HashMap<String, SegmentId> = HashMap::new();

        for poly in polylines {
            if poly.polyline.len() < 2 {
                return Err(NetworkError::PolylineTooShort(poly.name.clone()));
            }
            for (segment_index, window) in poly.polyline.windows(2).enumerate() {
                let name = format!("{}_{}", poly.name, segment_index);
                if name_to_id.contains_key(&name) {
                    return Err(NetworkError::DuplicateSegmentName(name));
                }
                let id = SegmentId(segments.len());
                name_to_id.insert(name.clone(), id);
                segments.push(Segment {
                    id,
                    start: window[0],
                    end: window[1],
                    name,
                });
            }
        }

        log::info!(
            "building road network: {} segments from {} polylines",
            segments.len(),
            polylines.len()
        );

        let adjacency = build_adjacency(&segments);

        let starts: Vec<(SegmentId, Point2D)> =
            segments.iter().map(|s| (s.id, s.start)).collect();
        let index = SegmentIndex::build(&starts);

        log::info!("road network built: {} adjacency buckets", adjacency.len());

        Ok(RoadNetwork {
            segments,
            name_to_id,
            adjacency,
            index,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0]
    }

    pub fn segment_name(&self, id: SegmentId) -> &str {
        &self.segments[id.0].name
    }

    pub fn id_for_name(&self, name: &str) -> Option<SegmentId> {
        self.name_to_id.get(name).copied()
    }

    pub fn adjacency(&self, id: SegmentId) -> &[SegmentId] {
        &self.adjacency[id.0]
    }

    pub fn anchor_candidates(&self, point: &Point2D, radius: f64) -> Vec<SegmentId> {
        self.index.within_radius(point, radius)
    }
}

/// buckets each segment's endpoints at [`ADJACENCY_RESOLUTION`] and unions
/// the bucket membership of a segment's own start and end bucket to form
/// its adjacency set. always includes the segment itself.
fn build_adjacency(segments: &[Segment]) -> Vec<Vec<SegmentId>> {
    let mut by_bucket: HashMap<BucketKey, Vec<SegmentId>> = HashMap::new();
    for segment in segments {
        by_bucket
            .entry(bucket_key(&segment.start))
            .or_default()
            .push(segment.id);
        by_bucket
            .entry(bucket_key(&segment.end))
            .or_default()
            .push(segment.id);
    }

    segments
        .iter()
        .map(|segment| {
            let mut neighbors: Vec<SegmentId> = Vec::new();
            for key in [bucket_key(&segment.start), bucket_key(&segment.end)] {
                if let Some(ids) = by_bucket.get(&key) {
                    for id in ids {
                        if !neighbors.contains(id) {
                            neighbors.push(*id);
                        }
                    }
                }
            }
            neighbors
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_segment_network() -> RoadNetwork {
        RoadNetwork::build(&[NamedPolyline::new(
            "A",
            vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(100.0, 0.0),
                Point2D::new(200.0, 0.0),
            ],
        )])
        .unwrap()
    }

    #[test]
    fn fragments_polyline_into_named_segments() {
        let net = two_segment_network();
        assert_eq!(net.segment_count(), 2);
        assert!(net.id_for_name("A_0").is_some());
        assert!(net.id_for_name("A_1").is_some());
    }

    #[test]
    fn adjacency_is_symmetric_and_includes_self() {
        let net = two_segment_network();
        let a0 = net.id_for_name("A_0").unwrap();
        let a1 = net.id_for_name("A_1").unwrap();
        assert!(net.adjacency(a0).contains(&a0));
        assert!(net.adjacency(a0).contains(&a1));
        assert!(net.adjacency(a1).contains(&a0));
        assert!(net.adjacency(a1).contains(&a1));
    }

    #[test]
    fn duplicate_segment_name_is_rejected() {
        let result = RoadNetwork::build(&[
            NamedPolyline::new("A", vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]),
            NamedPolyline::new("A", vec![Point2D::new(2.0, 0.0), Point2D::new(3.0, 0.0)]),
        ]);
        assert!(matches!(result, Err(NetworkError::DuplicateSegmentName(_))));
    }

    #[test]
    fn short_polyline_is_rejected() {
        let result = RoadNetwork::build(&[NamedPolyline::new("A", vec![Point2D::new(0.0, 0.0)])]);
        assert!(matches!(result, Err(NetworkError::PolylineTooShort(_))));
    }

    #[test]
    fn disjoint_segments_are_not_adjacent() {
        let net = RoadNetwork::build(&[
            NamedPolyline::new("A", vec![Point2D::new(0.0, 0.0), Point2D::new(100.0, 0.0)]),
            NamedPolyline::new(
                "B",
                vec![Point2D::new(10000.0, 0.0), Point2D::new(10100.0, 0.0)],
            ),
        ])
        .unwrap();
        let a0 = net.id_for_name("A_0").unwrap();
        let b0 = net.id_for_name("B_0").unwrap();
        assert!(!net.adjacency(a0).contains(&b0));
    }
}
