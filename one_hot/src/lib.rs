//! One-hot encoded DNA sequence batches.
//!
//! A batch is an `(N, L, 4)` array over the alphabet ACGT, one row per
//! sequence position, at most one symbol active per row. All-zero rows
//! stand for unknown bases (N) or padding.
#![deny(missing_docs)]

use ndarray::{Array2, Array3, ArrayView3, Axis};
use thiserror::Error;

/// The fixed DNA alphabet, in column order.
pub const ALPHABET: [u8; 4] = *b"ACGT";

/// Invalid one-hot input.
#[derive(Debug, Error)]
pub enum OneHotError {
    /// The innermost axis is not the 4-letter alphabet.
    #[error("one-hot array has alphabet size {0}, expected 4")]
    BadAlphabetSize(usize),
    /// An entry is neither 0 nor 1.
    #[error("one-hot entry at (seq {seq}, pos {pos}, symbol {symbol}) is {value}, expected 0 or 1")]
    BadValue {
        /// Sequence index.
        seq: usize,
        /// Position within the sequence.
        pos: usize,
        /// Alphabet column.
        symbol: usize,
        /// Offending value.
        value: f64,
    },
    /// More than one symbol active at a position.
    #[error("one-hot row (seq {seq}, pos {pos}) has {active} active symbols, expected at most 1")]
    MultipleSymbols {
        /// Sequence index.
        seq: usize,
        /// Position within the sequence.
        pos: usize,
        /// Number of active symbols.
        active: usize,
    },
    /// Sequences of unequal length in one batch.
    #[error("sequence {seq} has length {len}, expected {expected}")]
    UnequalLengths {
        /// Sequence index.
        seq: usize,
        /// Observed length.
        len: usize,
        /// Length of the first sequence.
        expected: usize,
    },
}

/// A validated batch of one-hot encoded sequences of common length.
#[derive(Debug, Clone)]
pub struct OneHotSeqs {
    seqs: Array3<f64>,
}

impl OneHotSeqs {
    /// Wrap an `(N, L, 4)` array, checking the one-hot invariants.
    pub fn new(seqs: Array3<f64>) -> Result<OneHotSeqs, OneHotError> {
        let (_, _, alphabet) = seqs.dim();
        if alphabet != ALPHABET.len() {
            return Err(OneHotError::BadAlphabetSize(alphabet));
        }
        for ((seq, pos, symbol), &value) in seqs.indexed_iter() {
            if value != 0.0 && value != 1.0 {
                return Err(OneHotError::BadValue {
                    seq,
                    pos,
                    symbol,
                    value,
                });
            }
        }
        for (seq, mat) in seqs.axis_iter(Axis(0)).enumerate() {
            for (pos, row) in mat.axis_iter(Axis(0)).enumerate() {
                let active = row.iter().filter(|&&v| v != 0.0).count();
                if active > 1 {
                    return Err(OneHotError::MultipleSymbols { seq, pos, active });
                }
            }
        }
        Ok(OneHotSeqs { seqs })
    }

    /// Encode ASCII DNA sequences, all of the same length. Bases other
    /// than ACGT (any case) become all-zero rows.
    pub fn encode<S: AsRef<[u8]>>(seqs: &[S]) -> Result<OneHotSeqs, OneHotError> {
        let seq_len = seqs.first().map_or(0, |s| s.as_ref().len());
        let mut arr = Array3::zeros((seqs.len(), seq_len, ALPHABET.len()));
        for (i, seq) in seqs.iter().enumerate() {
            let seq = seq.as_ref();
            if seq.len() != seq_len {
                return Err(OneHotError::UnequalLengths {
                    seq: i,
                    len: seq.len(),
                    expected: seq_len,
                });
            }
            for (pos, &base) in seq.iter().enumerate() {
                if let Some(col) = base_column(base) {
                    arr[[i, pos, col]] = 1.0;
                }
            }
        }
        Ok(OneHotSeqs { seqs: arr })
    }

    /// Number of sequences in the batch.
    pub fn num_seqs(&self) -> usize {
        self.seqs.dim().0
    }

    /// Common sequence length.
    pub fn seq_len(&self) -> usize {
        self.seqs.dim().1
    }

    /// The underlying `(N, L, 4)` array.
    pub fn array(&self) -> ArrayView3<'_, f64> {
        self.seqs.view()
    }

    /// One sequence's `L × 4` matrix.
    pub fn seq(&self, idx: usize) -> Array2<f64> {
        self.seqs.index_axis(Axis(0), idx).to_owned()
    }
}

/// Alphabet column for an ASCII base, or None for unknown bases.
pub fn base_column(base: u8) -> Option<usize> {
    match base.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}
