//! Hit extraction and (filter, sequence) grouping.
//!
//! Positive hits (`score > 0`) carry their score; the negative pool
//! (`score <= 0`) only carries positions, grouped once up front so the
//! sampler never rescans the full score array per group. Padding
//! positions are excluded from the pool here: their scores are exactly
//! zero by construction, indistinguishable by value from genuine
//! non-hits, so the bound `p <= L0 - k_f` has to be applied explicitly.

use crate::scan::ScoreArray;
use std::collections::BTreeMap;

/// Identity of a (filter, sequence) sampling group. `Ord` so group
/// iteration is lexicographic and deterministic.
pub type GroupKey = (usize, usize);

/// One scan position of one filter on one sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Filter index in the bank.
    pub filter: usize,
    /// Sequence index in the batch.
    pub seq: usize,
    /// Window start position.
    pub pos: usize,
    /// Correlation score; 0 for sampled negatives.
    pub score: f64,
}

impl HitRecord {
    /// The record's sampling group.
    pub fn group(&self) -> GroupKey {
        (self.filter, self.seq)
    }
}

/// Valid negative candidate positions, grouped by (filter, sequence).
#[derive(Debug, Clone, Default)]
pub struct GroupedPool {
    groups: BTreeMap<GroupKey, Vec<usize>>,
}

impl GroupedPool {
    /// Candidate positions for one group, in ascending position order.
    pub fn get(&self, key: GroupKey) -> &[usize] {
        self.groups.get(&key).map_or(&[], Vec::as_slice)
    }

    /// Iterate groups in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupKey, &[usize])> {
        self.groups.iter().map(|(&k, v)| (k, v.as_slice()))
    }

    /// Total candidate count over all groups.
    pub fn total_len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// All strictly-positive scores as hit records.
///
/// Padding positions are zero by construction, so they can never appear
/// here.
pub fn positive_hits(scores: &ScoreArray) -> Vec<HitRecord> {
    let mut hits = Vec::new();
    for ((filter, seq, pos), &score) in scores.scores().indexed_iter() {
        if score > 0.0 {
            hits.push(HitRecord {
                filter,
                seq,
                pos,
                score,
            });
        }
    }
    hits
}

/// All non-positive, non-padding positions, grouped by (filter,
/// sequence). Built in a single pass over the score array.
pub fn negative_pool(scores: &ScoreArray) -> GroupedPool {
    let mut groups: BTreeMap<GroupKey, Vec<usize>> = BTreeMap::new();
    for ((filter, seq, pos), &score) in scores.scores().indexed_iter() {
        if score <= 0.0 && !scores.is_padding(filter, pos) {
            groups.entry((filter, seq)).or_default().push(pos);
        }
    }
    GroupedPool { groups }
}

/// Positive hit count per group: the per-group negative sampling target.
pub fn group_counts(hits: &[HitRecord]) -> BTreeMap<GroupKey, usize> {
    let mut counts = BTreeMap::new();
    for hit in hits {
        *counts.entry(hit.group()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::Array3;

    /// One sequence of length 10, one filter of length 3: the worked
    /// example with valid positions 0..=7.
    fn example_scores() -> ScoreArray {
        let mut arr = Array3::zeros((1, 1, 10));
        for (pos, v) in [1.0, -1.0, 0.0, 2.0, 0.0, -3.0, 0.0, 0.0, 0.0, 0.0]
            .into_iter()
            .enumerate()
        {
            arr[[0, 0, pos]] = v;
        }
        ScoreArray::from_raw(arr, vec![3]).unwrap()
    }

    #[test]
    fn positive_hits_with_scores() {
        let hits = positive_hits(&example_scores());
        assert_eq!(
            hits,
            vec![
                HitRecord {
                    filter: 0,
                    seq: 0,
                    pos: 0,
                    score: 1.0
                },
                HitRecord {
                    filter: 0,
                    seq: 0,
                    pos: 3,
                    score: 2.0
                },
            ]
        );
    }

    #[test]
    fn negative_pool_excludes_padding() {
        let pool = negative_pool(&example_scores());
        assert_eq!(pool.get((0, 0)), &[1, 2, 4, 5, 6, 7]);
        assert_eq!(pool.total_len(), 6);
    }

    #[test]
    fn group_counts_by_filter_and_seq() {
        let hits = vec![
            HitRecord {
                filter: 0,
                seq: 1,
                pos: 4,
                score: 0.5
            },
            HitRecord {
                filter: 0,
                seq: 1,
                pos: 7,
                score: 1.5
            },
            HitRecord {
                filter: 2,
                seq: 0,
                pos: 0,
                score: 0.1
            },
        ];
        let counts = group_counts(&hits);
        assert_eq!(counts[&(0, 1)], 2);
        assert_eq!(counts[&(2, 0)], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn empty_scores_yield_empty_sets() {
        let scores = ScoreArray::from_raw(Array3::zeros((0, 0, 0)), vec![]).unwrap();
        assert!(positive_hits(&scores).is_empty());
        assert_eq!(negative_pool(&scores).total_len(), 0);
    }
}
