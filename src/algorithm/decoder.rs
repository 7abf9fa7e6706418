use crate::model::constants::{ANCHOR_RADIUS, MIN_PROB};
use crate::model::network::RoadNetwork;
use crate::model::probability::{observation_probability_for, transition_probability};
use crate::model::sample::{TrajectorySample, UNKNOWN};
use crate::model::segment::SegmentId;
use std::collections::BTreeMap;

/// one row of the decoder's probability table: segment id to best
/// probability that the corresponding sample was on that segment. a
/// `BTreeMap` keeps iteration in ascending-index order, so ties between
/// equally likely segments always resolve to the lower id deterministically.
type ProbRow = BTreeMap<SegmentId, f64>;
type BackptrRow = BTreeMap<SegmentId, SegmentId>;

/// runs the segmented Viterbi decoder over an entire trajectory, producing
/// one label per sample. never fails: samples that cannot be anchored, or
/// whose window's likelihood collapses, are labeled [`UNKNOWN`].
pub fn decode(network: &RoadNetwork, samples: &[TrajectorySample]) -> Vec<String> {
    let mut labels = vec![UNKNOWN.to_string(); samples.len()];
    let mut s = 0usize;
    let t_len = samples.len();

    while s < t_len {
        let anchor_row = anchor(network, &samples[s].point);

        let anchor_max = max_value(&anchor_row);
        if anchor_max < MIN_PROB {
            log::debug!("sample {} failed to anchor, labeling UNKNOWN", s);
            labels[s] = UNKNOWN.to_string();
            s += 1;
            continue;
        }

        log::debug!("window anchored at sample {} with {} candidates", s, anchor_row.len());

        // prob/backptr rows for the currently open window, keyed by sample index.
        let mut prob_rows: Vec<ProbRow> = vec![anchor_row];
        let mut backptr_rows: Vec<BackptrRow> = vec![BTreeMap::new()];
        let mut e = s;

        let mut t = s + 1;
        while t < t_len {
            let prev_row = &prob_rows[t - s - 1];
            let normalized = normalize(prev_row);

            let (new_row, new_backptr) = propagate(network, &normalized, &samples[t].point);

            let new_max = max_value(&new_row);
            if new_max < MIN_PROB {
                log::debug!("window [{}, {}] closes before sample {}", s, e, t);
                break;
            }

            prob_rows.push(new_row);
            backptr_rows.push(new_backptr);
            e = t;
            t += 1;
        }

        // a window that never extends past its anchor (e == s) still emits
        // the anchor's own argmax rather than UNKNOWN: the anchor already
        // cleared MIN_PROB, so there is a real winning segment to report
        // (see DESIGN.md for the worked examples that pin this down).
        backtrace(network, &prob_rows, &backptr_rows, s, e, &mut labels);

        s = e + 1;
    }

    labels
}

fn anchor(network: &RoadNetwork, point: &crate::model::geometry::Point2D) -> ProbRow {
    let mut row = ProbRow::new();
    for candidate in network.anchor_candidates(point, ANCHOR_RADIUS) {
        let p = observation_probability_for(network, candidate, point);
        if p > 0.0 {
            row.insert(candidate, p);
        }
    }
    row
}

fn max_value(row: &ProbRow) -> f64 {
    row.values().cloned().fold(0.0, f64::max)
}

/// copies `row` and scales it to sum to 1, dropping entries that fall below
/// [`MIN_PROB`] after normalization. never mutates the caller's row, so the
/// canonical `prob` table stays un-normalized for later backtrace
/// comparisons.
fn normalize(row: &ProbRow) -> ProbRow {
    let sum: f64 = row.values().sum();
    if sum <= 0.0 {
        return ProbRow::new();
    }
    row.iter()
        .filter_map(|(id, p)| {
            let scaled = p / sum;
            if scaled >= MIN_PROB {
                Some((*id, scaled))
            } else {
                None
            }
        })
        .collect()
}

/// one forward-pass step: transitions every active state in `normalized`
/// into its neighbors, then applies the observation probability at
/// `point`. returns the new (un-normalized) prob row and its backpointers.
fn propagate(
    network: &RoadNetwork,
    normalized: &ProbRow,
    point: &crate::model::geometry::Point2D,
) -> (ProbRow, BackptrRow) {
    let mut candidate_row: ProbRow = ProbRow::new();
    let mut candidate_backptr: BackptrRow = BackptrRow::new();

    for (&i, &p) in normalized.iter() {
        let adjacency = network.adjacency(i);
        let trans = transition_probability(adjacency.len());
        for &j in adjacency {
            let cand = p * trans;
            let better = match candidate_row.get(&j) {
                Some(&existing) => cand > existing,
                None => true,
            };
            if better {
                candidate_row.insert(j, cand);
                candidate_backptr.insert(j, i);
            }
        }
    }

    let mut new_row: ProbRow = ProbRow::new();
    for (&j, &cand) in candidate_row.iter() {
        if cand > MIN_PROB {
            let obs = observation_probability_for(network, j, point);
            new_row.insert(j, cand * obs);
        }
    }
    // backptr only needs entries for states that survived into new_row.
    let new_backptr: BackptrRow = candidate_backptr
        .into_iter()
        .filter(|(j, _)| new_row.contains_key(j))
        .collect();

    (new_row, new_backptr)
}

/// walks backwards from `argmax prob[e, ·]` to sample `s`, writing a label
/// for every sample in `[s, e]`.
fn backtrace(
    network: &RoadNetwork,
    prob_rows: &[ProbRow],
    backptr_rows: &[BackptrRow],
    s: usize,
    e: usize,
    labels: &mut [String],
) {
    let last_row = &prob_rows[e - s];
    let mut best: Option<(SegmentId, f64)> = None;
    for (&id, &p) in last_row.iter() {
        match best {
            Some((_, best_p)) if p <= best_p => {}
            _ => best = Some((id, p)),
        }
    }
    let mut current = match best {
        Some((id, _)) => id,
        None => return,
    };

    labels[e] = network.segment_name(current).to_string();

    for t in (s + 1..=e).rev() {
        let backptr = &backptr_rows[t - s];
        match backptr.get(&current) {
            Some(&prev) => {
                current = prev;
                labels[t - 1] = network.segment_name(current).to_string();
            }
            None => break,
        }
    }
}
