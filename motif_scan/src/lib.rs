//! Scan-and-sample engine for pre-trained motif filter banks.
//!
//! Scans one-hot DNA with a fixed bank of 1-D filters, extracts
//! positive-score hits, draws a matched set of negative positions per
//! (filter, sequence) group, and formats both sets as BED interval
//! tables for comparison against HOMER/FIMO-style motif calls.
//!
//! ```
//! use motif_bank::{FilterBank, MotifFilter};
//! use motif_scan::{generate_bed_tables, scan_bank, ScanConfig};
//! use ndarray::arr2;
//! use one_hot::OneHotSeqs;
//!
//! let seqs = OneHotSeqs::encode(&[b"ACGTACGTAC"]).unwrap();
//! let bank = FilterBank::new(vec![MotifFilter::conv(arr2(&[
//!     [1.0, -1.0, -1.0, -1.0],
//!     [-1.0, 1.0, -1.0, -1.0],
//! ]))
//! .unwrap()]);
//! let scores = scan_bank(&bank, &seqs).unwrap();
//! let (positives, negatives) =
//!     generate_bed_tables(&scores, &ScanConfig::default(), None, None).unwrap();
//! assert_eq!(positives.len(), negatives.len());
//! ```
#![deny(missing_docs)]

pub mod bed;
pub mod errors;
pub mod hits;
pub mod intervals;
pub mod pfm;
pub mod sample;
pub mod scan;

pub use bed::{write_bed, write_bed_file, BedRecord};
pub use errors::ScanError;
pub use hits::{group_counts, negative_pool, positive_hits, GroupKey, GroupedPool, HitRecord};
pub use intervals::{bed_records, Extent};
pub use sample::{all_negatives, draw_negatives, FallbackPolicy, DEFAULT_SEED};
pub use scan::{scan_bank, ScoreArray};

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Options for one scan-and-sample run.
#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    /// Widening applied to both interval tables.
    pub margin: Extent,
    /// Coordinate shift into the surrounding region.
    pub offset: Extent,
    /// Emit every valid negative position instead of a stratified draw.
    pub all_negative_hits: bool,
    /// How to handle groups with too few negative candidates.
    pub fallback: FallbackPolicy,
    /// Seed for the sampling RNG; a fixed seed reproduces the draw.
    pub seed: u64,
}

impl Default for ScanConfig {
    fn default() -> ScanConfig {
        ScanConfig {
            margin: Extent::default(),
            offset: Extent::default(),
            all_negative_hits: false,
            fallback: FallbackPolicy::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Build the positive and negative BED tables for a score array.
///
/// The positive table carries real hit scores; the negative table is
/// either a stratified draw matched per (filter, sequence) group to the
/// positive counts, or, under `all_negative_hits`, the full eligible
/// pool. Negative rows always score 0. Empty score arrays produce two
/// empty tables, not an error.
pub fn generate_bed_tables(
    scores: &ScoreArray,
    config: &ScanConfig,
    seq_names: Option<&[String]>,
    filter_names: Option<&[String]>,
) -> Result<(Vec<BedRecord>, Vec<BedRecord>), ScanError> {
    let positives = positive_hits(scores);
    let pool = negative_pool(scores);
    let negatives = if config.all_negative_hits {
        all_negatives(&pool)
    } else {
        let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed);
        draw_negatives(&group_counts(&positives), &pool, config.fallback, &mut rng)?
    };
    let pos_bed = bed_records(
        &positives,
        scores.filter_lengths(),
        scores.seq_len(),
        config.margin,
        config.offset,
        filter_names,
        seq_names,
    );
    let neg_bed = bed_records(
        &negatives,
        scores.filter_lengths(),
        scores.seq_len(),
        config.margin,
        config.offset,
        filter_names,
        seq_names,
    );
    Ok((pos_bed, neg_bed))
}
