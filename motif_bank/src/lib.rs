//! A fixed bank of pre-trained motif filters.
//!
//! Filters are `k × 4` weight matrices scanned over one-hot DNA by
//! correlation, with no bias and no activation. The bank is ordered and
//! immutable; a filter's index in the bank is its identity everywhere
//! downstream (score arrays, hit records, BED names).
#![deny(missing_docs)]

use itertools::zip_eq;
use ndarray::{Array2, ArrayView2};
use thiserror::Error;

/// Number of symbols in the DNA alphabet.
pub const ALPHABET_SIZE: usize = 4;

/// Invalid filter bank construction.
#[derive(Debug, Error)]
pub enum BankError {
    /// A weight matrix does not have 4 alphabet columns.
    #[error("filter {filter} has {cols} weight columns, expected {ALPHABET_SIZE}")]
    BadAlphabetSize {
        /// Filter index in the bank.
        filter: usize,
        /// Observed column count.
        cols: usize,
    },
    /// A weight matrix has no rows.
    #[error("filter {filter} is empty")]
    EmptyFilter {
        /// Filter index in the bank.
        filter: usize,
    },
    /// Declared hyperparameter length disagrees with the weight matrix.
    #[error("filter {filter} declares length {declared} but its weights have {actual} rows")]
    LengthMismatch {
        /// Filter index in the bank.
        filter: usize,
        /// Length from the hyperparameters.
        declared: usize,
        /// Row count of the weight matrix.
        actual: usize,
    },
    /// Hyperparameter and weight lists are of different sizes.
    #[error("{specs} filter hyperparameters but {weights} weight matrices")]
    CountMismatch {
        /// Number of hyperparameter entries.
        specs: usize,
        /// Number of weight matrices.
        weights: usize,
    },
}

/// How a filter turns a one-hot window into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Sum of per-position weight dot products (plain correlation).
    Conv,
    /// Maximum per-position weight dot product over the window.
    Max,
}

/// One fixed-length motif filter: a kind plus a `k × 4` weight matrix.
#[derive(Debug, Clone)]
pub struct MotifFilter {
    kind: FilterKind,
    weights: Array2<f64>,
}

impl MotifFilter {
    fn validate(filter: usize, kind: FilterKind, weights: Array2<f64>) -> Result<Self, BankError> {
        let (rows, cols) = weights.dim();
        if cols != ALPHABET_SIZE {
            return Err(BankError::BadAlphabetSize { filter, cols });
        }
        if rows == 0 {
            return Err(BankError::EmptyFilter { filter });
        }
        Ok(MotifFilter { kind, weights })
    }

    /// A correlation filter.
    pub fn conv(weights: Array2<f64>) -> Result<Self, BankError> {
        Self::validate(0, FilterKind::Conv, weights)
    }

    /// A max-pooling filter.
    pub fn max(weights: Array2<f64>) -> Result<Self, BankError> {
        Self::validate(0, FilterKind::Max, weights)
    }

    /// Filter length `k`.
    pub fn len(&self) -> usize {
        self.weights.nrows()
    }

    /// True for a zero-length filter; never true for a validated one.
    pub fn is_empty(&self) -> bool {
        self.weights.nrows() == 0
    }

    /// The filter kind.
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// The `k × 4` weight matrix.
    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    /// Score one `k × 4` one-hot window.
    pub fn score_window(&self, window: ArrayView2<'_, f64>) -> f64 {
        debug_assert_eq!(window.dim(), self.weights.dim());
        match self.kind {
            FilterKind::Conv => (&self.weights * &window).sum(),
            FilterKind::Max => (&self.weights * &window)
                .rows()
                .into_iter()
                .map(|row| row.sum())
                .fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Declared hyperparameters for one filter, in bank order.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    /// Filter length `k`.
    pub len: usize,
    /// Filter kind.
    pub kind: FilterKind,
}

/// Ordered, immutable collection of motif filters.
#[derive(Debug, Clone)]
pub struct FilterBank {
    filters: Vec<MotifFilter>,
}

impl FilterBank {
    /// Build a bank from already-constructed filters.
    pub fn new(filters: Vec<MotifFilter>) -> FilterBank {
        FilterBank { filters }
    }

    /// Build a bank from hyperparameters and learned weights, in
    /// matching order, cross-checking declared lengths against the
    /// weight matrix shapes.
    pub fn from_parts(
        specs: &[FilterSpec],
        weights: Vec<Array2<f64>>,
    ) -> Result<FilterBank, BankError> {
        if specs.len() != weights.len() {
            return Err(BankError::CountMismatch {
                specs: specs.len(),
                weights: weights.len(),
            });
        }
        let filters = zip_eq(specs, weights)
            .enumerate()
            .map(|(filter, (spec, w))| {
                if spec.len != w.nrows() {
                    return Err(BankError::LengthMismatch {
                        filter,
                        declared: spec.len,
                        actual: w.nrows(),
                    });
                }
                MotifFilter::validate(filter, spec.kind, w)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FilterBank { filters })
    }

    /// Number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True if the bank has no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// The filter at `idx`.
    pub fn get(&self, idx: usize) -> Option<&MotifFilter> {
        self.filters.get(idx)
    }

    /// Iterate filters in bank order.
    pub fn iter(&self) -> impl Iterator<Item = &MotifFilter> {
        self.filters.iter()
    }

    /// Filter lengths, in bank order.
    pub fn filter_lengths(&self) -> Vec<usize> {
        self.filters.iter().map(MotifFilter::len).collect()
    }
}
