use crate::model::geometry::Point2D;
use crate::model::segment::SegmentId;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// a spatial handle into the rtree: a segment's start point plus the index
/// needed to recover which segment it belongs to.
#[derive(Copy, Clone, Debug)]
struct IndexedStart {
    segment_id: SegmentId,
    point: Point2D,
}

impl RTreeObject for IndexedStart {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.point.x(), self.point.y()])
    }
}

impl PointDistance for IndexedStart {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point.x() - point[0];
        let dy = self.point.y() - point[1];
        dx * dx + dy * dy
    }
}

/// kd-tree over segment start points, supporting radius ball queries used
/// to find anchor candidates near a trajectory sample.
pub struct SegmentIndex {
    tree: RTree<IndexedStart>,
}

impl SegmentIndex {
    pub fn build(starts: &[(SegmentId, Point2D)]) -> Self {
        let entries = starts
            .iter()
            .map(|(segment_id, point)| IndexedStart {
                segment_id: *segment_id,
                point: *point,
            })
            .collect();
        SegmentIndex {
            tree: RTree::bulk_load(entries),
        }
    }

    /// returns the ids of every segment whose start point lies within
    /// `radius` meters of `query`, in the tree's internal order.
    pub fn within_radius(&self, query: &Point2D, radius: f64) -> Vec<SegmentId> {
        let radius_sq = radius * radius;
        let query_arr = [query.x(), query.y()];
        self.tree
            .locate_within_distance(query_arr, radius_sq)
            .map(|entry| entry.segment_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_points_within_radius_and_excludes_far_ones() {
        let starts = vec![
            (SegmentId(0), Point2D::new(0.0, 0.0)),
            (SegmentId(1), Point2D::new(10.0, 0.0)),
            (SegmentId(2), Point2D::new(1000.0, 0.0)),
        ];
        let index = SegmentIndex::build(&starts);
        let mut found = index.within_radius(&Point2D::new(0.0, 0.0), 300.0);
        found.sort();
        assert_eq!(found, vec![SegmentId(0), SegmentId(1)]);
    }

    #[test]
    fn empty_index_returns_nothing() {
        let index = SegmentIndex::build(&[]);
        assert!(index.within_radius(&Point2D::new(0.0, 0.0), 300.0).is_empty());
    }
}
