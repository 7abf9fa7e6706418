use crate::algorithm::decoder;
use crate::model::network::{NamedPolyline, RoadNetwork};
use crate::model::network_error::NetworkError;
use crate::model::sample::TrajectorySample;

/// constructs a [`RoadNetwork`] from the collaborator-supplied polylines.
/// a thin alias over [`RoadNetwork::build`].
pub fn build_network(polylines: &[NamedPolyline]) -> Result<RoadNetwork, NetworkError> {
    RoadNetwork::build(polylines)
}

/// runs the segmented Viterbi decoder over `samples` against `network` and
/// returns one label per sample, in input order. every label is either a
/// segment name known to `network` or `"UNKNOWN"`; this never fails on
/// well-typed input.
pub fn match_trajectory(network: &RoadNetwork, samples: &[TrajectorySample]) -> Vec<String> {
    decoder::decode(network, samples)
}

/// convenience wrapper pairing each sample's original index with its label,
/// for callers that want a diagnostic view alongside the plain label list.
/// implemented over [`match_trajectory`] so the two views can never disagree.
pub fn match_trajectory_indexed(
    network: &RoadNetwork,
    samples: &[TrajectorySample],
) -> Vec<(usize, String)> {
    match_trajectory(network, samples)
        .into_iter()
        .enumerate()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::geometry::Point2D;

    #[test]
    fn indexed_view_matches_plain_view() {
        let net = RoadNetwork::build(&[NamedPolyline::new(
            "R",
            vec![Point2D::new(0.0, 0.0), Point2D::new(100.0, 0.0)],
        )])
        .unwrap();
        let samples = vec![
            TrajectorySample::new(Point2D::new(10.0, 0.0), 0),
            TrajectorySample::new(Point2D::new(50.0, 0.0), 1),
        ];
        let plain = match_trajectory(&net, &samples);
        let indexed = match_trajectory_indexed(&net, &samples);
        let reconstructed: Vec<String> = indexed.into_iter().map(|(_, label)| label).collect();
        assert_eq!(plain, reconstructed);
    }
}
