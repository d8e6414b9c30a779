//! Stratified negative sampling, matched to positive hit counts.
//!
//! For every (filter, sequence) group with positive hits, draw exactly
//! as many negative positions from that group's candidate pool, without
//! replacement. Groups are processed in ascending key order consuming a
//! single caller-supplied RNG stream, so a fixed seed reproduces the
//! draw bit for bit.

use crate::errors::ScanError;
use crate::hits::{GroupKey, GroupedPool, HitRecord};
use log::warn;
use rand::Rng;
use std::collections::BTreeMap;

/// Seed used by the default configuration.
pub const DEFAULT_SEED: u64 = 42;

/// What to do when a group cannot supply enough distinct negatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Warn and recover: skip empty-pool groups, fill shortfalls by
    /// sampling with replacement.
    #[default]
    Permissive,
    /// Abort the whole draw on the first unsatisfiable group.
    Strict,
}

/// Draw, per group in `targets`, exactly that many negative positions
/// from the group's pool. Groups absent from `targets` are never
/// sampled. Every returned record carries score 0.
pub fn draw_negatives(
    targets: &BTreeMap<GroupKey, usize>,
    pool: &GroupedPool,
    policy: FallbackPolicy,
    rng: &mut impl Rng,
) -> Result<Vec<HitRecord>, ScanError> {
    let mut drawn = Vec::new();
    for (&(filter, seq), &needed) in targets {
        let candidates = pool.get((filter, seq));
        let available = candidates.len();
        if available >= needed {
            for idx in rand::seq::index::sample(rng, available, needed) {
                drawn.push(negative(filter, seq, candidates[idx]));
            }
            continue;
        }
        if policy == FallbackPolicy::Strict {
            return Err(ScanError::InsufficientNegatives {
                filter,
                seq,
                needed,
                available,
            });
        }
        warn!(
            "not enough negative candidates for filter {filter}, sequence {seq}: \
             needed={needed}, available={available}"
        );
        if available == 0 {
            // Nothing to draw from; the group stays undersampled.
            continue;
        }
        // Take the whole pool once, then fill the shortfall with
        // replacement.
        for &pos in candidates {
            drawn.push(negative(filter, seq, pos));
        }
        for _ in 0..needed - available {
            let pos = candidates[rng.gen_range(0..available)];
            drawn.push(negative(filter, seq, pos));
        }
    }
    Ok(drawn)
}

/// Exhaustive mode: every valid candidate of every group, no sampling.
pub fn all_negatives(pool: &GroupedPool) -> Vec<HitRecord> {
    pool.iter()
        .flat_map(|((filter, seq), positions)| {
            positions.iter().map(move |&pos| negative(filter, seq, pos))
        })
        .collect()
}

fn negative(filter: usize, seq: usize, pos: usize) -> HitRecord {
    HitRecord {
        filter,
        seq,
        pos,
        score: 0.0,
    }
}
