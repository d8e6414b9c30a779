//! Hit records to clamped genomic intervals.
//!
//! A hit at `pos` for a length-`k` filter covers `[pos, pos + k)`;
//! margins widen the interval, offsets shift it to the coordinates of
//! the surrounding region, and the result is clipped to
//! `[0, seq_len + right_offset]`.

use crate::bed::BedRecord;
use crate::errors::ScanError;
use crate::hits::HitRecord;

/// A left/right amount, either symmetric or an explicit (left, right)
/// pair. Margins and offsets both use this shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extent {
    left: i64,
    right: i64,
}

impl Extent {
    /// An explicit (left, right) pair.
    pub fn new(left: i64, right: i64) -> Extent {
        Extent { left, right }
    }

    /// The same amount on both sides.
    pub fn symmetric(value: i64) -> Extent {
        Extent {
            left: value,
            right: value,
        }
    }

    /// From a one-element (symmetric) or two-element (left, right)
    /// slice; any other arity is a configuration error.
    pub fn from_slice(values: &[i64]) -> Result<Extent, ScanError> {
        match *values {
            [value] => Ok(Extent::symmetric(value)),
            [left, right] => Ok(Extent::new(left, right)),
            _ => Err(ScanError::BadExtentArity { len: values.len() }),
        }
    }

    /// Left amount.
    pub fn left(&self) -> i64 {
        self.left
    }

    /// Right amount.
    pub fn right(&self) -> i64 {
        self.right
    }
}

impl From<i64> for Extent {
    fn from(value: i64) -> Extent {
        Extent::symmetric(value)
    }
}

impl From<(i64, i64)> for Extent {
    fn from((left, right): (i64, i64)) -> Extent {
        Extent::new(left, right)
    }
}

/// Format hit records as BED rows.
///
/// `start = pos - left_margin + left_offset` clamped to >= 0;
/// `end = pos + k + right_margin + left_offset` clamped to
/// `<= seq_len + right_offset`. Missing name arrays default to the
/// integer indices as strings. An empty `hits` slice yields an empty
/// vector; the writer still emits a schema-stable zero-row table.
pub fn bed_records(
    hits: &[HitRecord],
    filter_lengths: &[usize],
    seq_len: usize,
    margin: Extent,
    offset: Extent,
    filter_names: Option<&[String]>,
    seq_names: Option<&[String]>,
) -> Vec<BedRecord> {
    let min_start = 0;
    let max_end = seq_len as i64 + offset.right();
    hits.iter()
        .map(|hit| {
            let k = filter_lengths[hit.filter] as i64;
            let pos = hit.pos as i64;
            let start = (pos - margin.left() + offset.left()).max(min_start);
            let end = (pos + k + margin.right() + offset.left()).min(max_end);
            BedRecord {
                chrom: name_or_index(seq_names, hit.seq),
                chrom_start: start,
                chrom_end: end,
                name: name_or_index(filter_names, hit.filter),
                score: hit.score,
                strand: "+".to_string(),
            }
        })
        .collect()
}

fn name_or_index(names: Option<&[String]>, idx: usize) -> String {
    match names {
        Some(names) => names[idx].clone(),
        None => idx.to_string(),
    }
}
