//! BED-format output rows and writers.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// One BED row: `chrom, chromStart, chromEnd, name, score, strand`.
/// Strand is always `+`; this engine does not model strand-specific
/// filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedRecord {
    /// Sequence (chromosome) name.
    pub chrom: String,
    /// Half-open interval start.
    pub chrom_start: i64,
    /// Half-open interval end.
    pub chrom_end: i64,
    /// Filter name.
    pub name: String,
    /// Hit score; 0 for negative rows.
    pub score: f64,
    /// Always "+".
    pub strand: String,
}

/// Write records as tab-separated BED with no header row. An empty
/// slice produces an empty (zero-row) table, not an error.
pub fn write_bed<W: Write>(writer: W, records: &[BedRecord]) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    for rec in records {
        wtr.serialize(rec)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a BED file at `path`.
pub fn write_bed_file<P: AsRef<Path>>(path: P, records: &[BedRecord]) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)?;
    for rec in records {
        wtr.serialize(rec)?;
    }
    wtr.flush()?;
    Ok(())
}
