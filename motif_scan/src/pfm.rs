//! Position-frequency matrices accumulated from positive hits.
//!
//! For each filter, sum the one-hot windows under its hits into a
//! `k × 4` count matrix, optionally weighting each window by the hit
//! score. Useful for comparing what a filter actually matched against
//! its learned weights.

use crate::hits::HitRecord;
use ndarray::{s, Array2};
use one_hot::OneHotSeqs;
use std::collections::BTreeMap;

/// Per-filter PFM from the given hits. Filters with no hits are absent
/// from the result.
pub fn hit_pfms(
    hits: &[HitRecord],
    seqs: &OneHotSeqs,
    filter_lengths: &[usize],
    weight_by_score: bool,
) -> BTreeMap<usize, Array2<f64>> {
    let arr = seqs.array();
    let mut pfms: BTreeMap<usize, Array2<f64>> = BTreeMap::new();
    for hit in hits {
        let k = filter_lengths[hit.filter];
        debug_assert!(hit.pos + k <= seqs.seq_len());
        let window = arr.slice(s![hit.seq, hit.pos..hit.pos + k, ..]);
        let weight = if weight_by_score { hit.score } else { 1.0 };
        let pfm = pfms
            .entry(hit.filter)
            .or_insert_with(|| Array2::zeros((k, one_hot::ALPHABET.len())));
        pfm.scaled_add(weight, &window);
    }
    pfms
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::arr2;

    fn hit(seq: usize, pos: usize, score: f64) -> HitRecord {
        HitRecord {
            filter: 0,
            seq,
            pos,
            score,
        }
    }

    #[test]
    fn counts_windows_under_hits() {
        let seqs = OneHotSeqs::encode(&[b"ACGT", b"ACCT"]).unwrap();
        let hits = vec![hit(0, 1, 1.0), hit(1, 1, 1.0)];
        let pfms = hit_pfms(&hits, &seqs, &[2], false);
        // windows CG and CC
        assert_eq!(
            pfms[&0],
            arr2(&[[0.0, 2.0, 0.0, 0.0], [0.0, 1.0, 1.0, 0.0]])
        );
    }

    #[test]
    fn score_weighting_scales_windows() {
        let seqs = OneHotSeqs::encode(&[b"AAA"]).unwrap();
        let hits = vec![hit(0, 0, 2.0), hit(0, 1, 3.0)];
        let pfms = hit_pfms(&hits, &seqs, &[1], true);
        assert_eq!(pfms[&0], arr2(&[[5.0, 0.0, 0.0, 0.0]]));
    }

    #[test]
    fn no_hits_no_pfms() {
        let seqs = OneHotSeqs::encode(&[b"ACGT"]).unwrap();
        assert!(hit_pfms(&[], &seqs, &[2], false).is_empty());
    }
}
