//! Batch convolution of a filter bank over one-hot sequences.
//!
//! Every filter is scanned independently over every sequence by valid
//! cross-correlation (output length `L0 - k + 1`), then right-padded
//! with zeros to the common scan length `L0`. No bias, no activation:
//! a "hit" downstream is defined purely by the sign of the score.

use crate::errors::ScanError;
use motif_bank::{FilterBank, MotifFilter};
use ndarray::{s, Array2, Array3, ArrayView3, Axis};
use ndarray_stats::QuantileExt;
use one_hot::OneHotSeqs;
use rayon::prelude::*;

/// Per-filter, per-sequence, per-position scores, shape `(F, N, L0)`.
///
/// Positions `p > L0 - k_f` never held a full window for filter `f`;
/// they are fixed zero padding and must not be mistaken for genuine
/// zero scores.
#[derive(Debug, Clone)]
pub struct ScoreArray {
    scores: Array3<f64>,
    filter_lengths: Vec<usize>,
}

impl ScoreArray {
    /// Wrap an externally computed `(F, N, L0)` score array.
    ///
    /// The filter lengths must match the filter axis one-to-one, and
    /// every filter must fit inside the scan length.
    pub fn from_raw(
        scores: Array3<f64>,
        filter_lengths: Vec<usize>,
    ) -> Result<ScoreArray, ScanError> {
        let (planes, _, seq_len) = scores.dim();
        if planes != filter_lengths.len() {
            return Err(ScanError::MismatchedFilterLengths {
                planes,
                lengths: filter_lengths.len(),
            });
        }
        for (filter, &filter_len) in filter_lengths.iter().enumerate() {
            if filter_len > seq_len {
                return Err(ScanError::FilterLongerThanSequence {
                    filter,
                    filter_len,
                    seq_len,
                });
            }
        }
        Ok(ScoreArray {
            scores,
            filter_lengths,
        })
    }

    /// The raw `(F, N, L0)` score view.
    pub fn scores(&self) -> ArrayView3<'_, f64> {
        self.scores.view()
    }

    /// Number of filters.
    pub fn num_filters(&self) -> usize {
        self.scores.dim().0
    }

    /// Number of sequences.
    pub fn num_seqs(&self) -> usize {
        self.scores.dim().1
    }

    /// Common scan sequence length `L0`.
    pub fn seq_len(&self) -> usize {
        self.scores.dim().2
    }

    /// Filter lengths, in bank order.
    pub fn filter_lengths(&self) -> &[usize] {
        &self.filter_lengths
    }

    /// Last position where filter `filter`'s window still fits.
    pub fn last_valid_pos(&self, filter: usize) -> usize {
        self.seq_len() - self.filter_lengths[filter]
    }

    /// True if `pos` is right-padding for filter `filter` rather than a
    /// real window start.
    pub fn is_padding(&self, filter: usize, pos: usize) -> bool {
        pos > self.last_valid_pos(filter)
    }

    /// Per-(filter, sequence) maximum score, shape `(F, N)`.
    pub fn max_scores(&self) -> Array2<f64> {
        self.scores
            .map_axis(Axis(2), |lane| lane.max().map_or(f64::NEG_INFINITY, |&m| m))
    }
}

/// Scan every filter in the bank over every sequence.
///
/// Fails fast if any filter is longer than the sequences; no partial
/// output is produced in that case. Filters are scanned in parallel but
/// assembled in bank order, so the output is independent of scheduling.
pub fn scan_bank(bank: &FilterBank, seqs: &OneHotSeqs) -> Result<ScoreArray, ScanError> {
    let seq_len = seqs.seq_len();
    for (filter, f) in bank.iter().enumerate() {
        if f.len() > seq_len {
            return Err(ScanError::FilterLongerThanSequence {
                filter,
                filter_len: f.len(),
                seq_len,
            });
        }
    }

    let filters: Vec<_> = bank.iter().collect();
    let planes: Vec<Array2<f64>> = filters
        .par_iter()
        .map(|filter| scan_one(filter, seqs))
        .collect();

    let mut scores = Array3::zeros((bank.len(), seqs.num_seqs(), seq_len));
    for (f, plane) in planes.into_iter().enumerate() {
        scores.index_axis_mut(Axis(0), f).assign(&plane);
    }
    Ok(ScoreArray {
        scores,
        filter_lengths: bank.filter_lengths(),
    })
}

/// One filter over all sequences: an `(N, L0)` plane, right-padded with
/// zeros beyond the last valid window start.
fn scan_one(filter: &MotifFilter, seqs: &OneHotSeqs) -> Array2<f64> {
    let k = filter.len();
    let seq_len = seqs.seq_len();
    let arr = seqs.array();
    let mut plane = Array2::zeros((seqs.num_seqs(), seq_len));
    for seq in 0..seqs.num_seqs() {
        for pos in 0..=seq_len - k {
            plane[[seq, pos]] = filter.score_window(arr.slice(s![seq, pos..pos + k, ..]));
        }
    }
    plane
}
