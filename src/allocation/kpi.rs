//! Allocation quality metrics (KPIs).
//!
//! Computes read-only indicators from a finished run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill rate | Filled slots / total slots |
//! | Tier usage | Filled slots per eligibility tier |
//! | Strict rate | Strict-tier slots / filled slots |
//! | Max deviation | Largest \|assigned - expected\| over staff and categories |
//! | Avg regions | Mean distinct regions on duty per (week, bucket) |

use std::collections::{BTreeMap, BTreeSet};

use super::Allocation;
use crate::models::Roster;
use crate::selection::EligibilityTier;

/// Allocation performance indicators.
#[derive(Debug, Clone)]
pub struct AllocationKpi {
    /// Slots across the horizon.
    pub total_slots: usize,
    /// Slots with a staff member.
    pub filled_slots: usize,
    /// Slots left unstaffed.
    pub unfilled_slots: usize,
    /// Fraction of slots filled (0.0..1.0). 1.0 when there are no slots.
    pub fill_rate: f64,
    /// Filled slots per tier.
    pub tier_counts: BTreeMap<EligibilityTier, usize>,
    /// Fraction of filled slots drawn from the strict tier.
    pub strict_rate: f64,
    /// Largest absolute quota deviation of any staff member in any category.
    pub max_quota_deviation: u64,
    /// Mean number of distinct regions on duty per (week, bucket).
    pub avg_regions_per_bucket: f64,
}

impl AllocationKpi {
    /// Computes KPIs for a run.
    ///
    /// # Arguments
    /// * `allocation` - The finished run.
    /// * `roster` - The roster it was computed from (for regions).
    pub fn calculate(allocation: &Allocation, roster: &Roster) -> Self {
        let ledger = &allocation.ledger;
        let total_slots = ledger.slot_count();
        let filled_slots = ledger.filled_count();
        let tier_counts = allocation.tier_counts();

        let fill_rate = if total_slots == 0 {
            1.0
        } else {
            filled_slots as f64 / total_slots as f64
        };

        let strict = tier_counts
            .get(&EligibilityTier::Strict)
            .copied()
            .unwrap_or(0);
        let strict_rate = if filled_slots == 0 {
            1.0
        } else {
            strict as f64 / filled_slots as f64
        };

        let max_quota_deviation = allocation
            .state
            .iter()
            .flat_map(|s| {
                s.expected
                    .keys()
                    .chain(s.assigned.keys())
                    .map(move |c| s.deviation(c).unsigned_abs())
            })
            .max()
            .unwrap_or(0);

        let mut groups = 0usize;
        let mut region_total = 0usize;
        for week in &ledger.weeks {
            for bucket in &week.buckets {
                let regions: BTreeSet<&str> = bucket
                    .filled()
                    .filter_map(|id| roster.get(id))
                    .map(|s| s.region.as_str())
                    .collect();
                groups += 1;
                region_total += regions.len();
            }
        }
        let avg_regions_per_bucket = if groups == 0 {
            0.0
        } else {
            region_total as f64 / groups as f64
        };

        Self {
            total_slots,
            filled_slots,
            unfilled_slots: total_slots - filled_slots,
            fill_rate,
            tier_counts,
            strict_rate,
            max_quota_deviation,
            avg_regions_per_bucket,
        }
    }

    /// Whether the run meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, max_deviation: u64) -> bool {
        self.fill_rate >= min_fill_rate && self.max_quota_deviation <= max_deviation
    }
}
