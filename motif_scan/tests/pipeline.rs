//! End-to-end scan, sample, and BED formatting over real one-hot input.

use anyhow::Result;
use motif_bank::{FilterBank, MotifFilter};
use motif_scan::{
    generate_bed_tables, scan_bank, write_bed, Extent, FallbackPolicy, ScanConfig, ScanError,
};
use ndarray::arr2;
use one_hot::OneHotSeqs;

/// A filter rewarding AC and punishing everything else.
fn ac_filter() -> MotifFilter {
    MotifFilter::conv(arr2(&[
        [1.0, -1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0, -1.0],
    ]))
    .unwrap()
}

#[test]
fn scan_sample_format_round_trip() -> Result<()> {
    let seqs = OneHotSeqs::encode(&[b"ACGTACGTACGT", b"GGGGGGGGGGGG"])?;
    let bank = FilterBank::new(vec![ac_filter()]);
    let scores = scan_bank(&bank, &seqs)?;

    let seq_names = vec!["chr1".to_string(), "chr2".to_string()];
    let filter_names = vec!["ac_motif".to_string()];
    let (pos, neg) = generate_bed_tables(
        &scores,
        &ScanConfig::default(),
        Some(&seq_names),
        Some(&filter_names),
    )?;

    // AC occurs at 0, 4, 8 of chr1 and never on chr2.
    assert_eq!(pos.len(), 3);
    assert!(pos.iter().all(|r| r.chrom == "chr1"));
    assert!(pos.iter().all(|r| r.name == "ac_motif"));
    assert!(pos.iter().all(|r| r.chrom_end - r.chrom_start == 2));
    assert!(pos.iter().all(|r| r.score == 2.0));

    // chr2 has no positive hits, so its group is never sampled.
    assert_eq!(neg.len(), 3);
    assert!(neg.iter().all(|r| r.chrom == "chr1"));
    assert!(neg.iter().all(|r| r.score == 0.0));

    let mut buf = Vec::new();
    write_bed(&mut buf, &pos)?;
    let table = String::from_utf8(buf)?;
    assert_eq!(table.lines().count(), 3);
    for line in table.lines() {
        assert_eq!(line.split('\t').count(), 6);
        assert!(line.ends_with("\t+"));
    }
    Ok(())
}

#[test]
fn margins_and_offsets_shift_the_tables() -> Result<()> {
    let seqs = OneHotSeqs::encode(&[b"TTTTTACGTTTTTTTTTTTT"])?;
    let bank = FilterBank::new(vec![ac_filter()]);
    let scores = scan_bank(&bank, &seqs)?;
    let config = ScanConfig {
        margin: Extent::symmetric(2),
        ..Default::default()
    };
    let (pos, _) = generate_bed_tables(&scores, &config, None, None)?;
    // lone AC at position 5 of a length-20 sequence, widened by 2
    assert_eq!(pos.len(), 1);
    assert_eq!(pos[0].chrom_start, 3);
    assert_eq!(pos[0].chrom_end, 9);
    Ok(())
}

#[test]
fn strict_policy_aborts_with_group_identity() -> Result<()> {
    // Three AC hits but nearly everything else scores positive too:
    // weights >= 0 everywhere, A alone scores 1 > 0.
    let seqs = OneHotSeqs::encode(&[b"AAAAAACG"])?;
    let bank = FilterBank::new(vec![MotifFilter::conv(arr2(&[
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
    ]))
    .unwrap()]);
    let scores = scan_bank(&bank, &seqs)?;
    let config = ScanConfig {
        fallback: FallbackPolicy::Strict,
        ..Default::default()
    };
    let err = generate_bed_tables(&scores, &config, None, None).unwrap_err();
    match err {
        ScanError::InsufficientNegatives {
            filter,
            seq,
            needed,
            available,
        } => {
            assert_eq!((filter, seq), (0, 0));
            assert!(needed > available);
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn exhaustive_mode_covers_every_valid_non_hit() -> Result<()> {
    let seqs = OneHotSeqs::encode(&[b"ACGTACGT"])?;
    let bank = FilterBank::new(vec![ac_filter()]);
    let scores = scan_bank(&bank, &seqs)?;
    let config = ScanConfig {
        all_negative_hits: true,
        ..Default::default()
    };
    let (pos, neg) = generate_bed_tables(&scores, &config, None, None)?;
    // valid positions 0..=6; AC hits at 0 and 4
    assert_eq!(pos.len(), 2);
    assert_eq!(neg.len(), 5);
    Ok(())
}
