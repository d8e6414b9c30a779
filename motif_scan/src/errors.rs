//! Error taxonomy for the scan-and-sample engine.

use thiserror::Error;

/// Fatal conditions raised by scanning, formatting, or strict sampling.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A filter cannot fit inside the scanned sequences even once.
    #[error("filter {filter} has length {filter_len}, longer than the sequence length {seq_len}")]
    FilterLongerThanSequence {
        /// Filter index in the bank.
        filter: usize,
        /// Filter length.
        filter_len: usize,
        /// Common scan sequence length.
        seq_len: usize,
    },
    /// A margin or offset argument with the wrong number of values.
    #[error("margin/offset takes one value or a (left, right) pair, got {len} values")]
    BadExtentArity {
        /// Number of values supplied.
        len: usize,
    },
    /// A raw score array whose filter axis disagrees with the supplied
    /// filter lengths.
    #[error("score array has {planes} filter planes but {lengths} filter lengths were supplied")]
    MismatchedFilterLengths {
        /// Size of the score array's filter axis.
        planes: usize,
        /// Number of filter lengths supplied.
        lengths: usize,
    },
    /// Under the strict fallback policy, a (filter, sequence) group
    /// without enough negative candidates to match its positive hits.
    #[error(
        "not enough negative candidates for filter {filter}, sequence {seq}: \
         needed={needed}, available={available}"
    )]
    InsufficientNegatives {
        /// Filter index of the group.
        filter: usize,
        /// Sequence index of the group.
        seq: usize,
        /// Positive hit count to match.
        needed: usize,
        /// Eligible negative candidates.
        available: usize,
    },
}
