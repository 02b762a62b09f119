//! Greedy fair-share allocation engine.
//!
//! # Algorithm
//!
//! 1. Validate the roster and calendar.
//! 2. Compute quotas (resets all per-run state).
//! 3. For week 1..=horizon, for each bucket in calendar order, for each role
//!    in bucket order, for each slot index ascending: ask the
//!    [`CandidateSelector`] for a candidate given the group's exclusions.
//! 4. On a hit, record the assignment, bump counters, and extend the
//!    exclusions. On a miss, leave the slot unstaffed.
//!
//! Earlier assignments change later eligibility, so the result depends on
//! processing order and is not globally optimal.
//!
//! # Complexity
//! O(w * s * p log p) where w=weeks, s=slots per week, p=largest role pool.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, trace};

use super::{compute_quotas, AllocationState, StaffAllocation};
use crate::config::{PlanConfig, RegionScope};
use crate::error::ConfigurationError;
use crate::models::{
    AssignmentRecord, BucketSlots, DemandCalendar, Ledger, RoleSlots, Roster, StaffId,
    StaffMember, WeekBlock,
};
use crate::selection::{CandidateSelector, EligibilityTier, GroupExclusions};
use crate::validation::validate_plan;

/// Result of one planning run.
///
/// Owns the ledger and the final per-staff state. Both are read-only once
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Number of weeks planned.
    pub horizon_weeks: u32,
    /// Slot-by-slot result.
    pub ledger: Ledger,
    /// Quotas, counters, and per-staff assignment records.
    pub state: AllocationState,
}

impl Allocation {
    /// Final allocation of one staff member.
    pub fn staff(&self, id: StaffId) -> Option<&StaffAllocation> {
        self.state.get(id)
    }

    /// Assignment records of one staff member, in allocation order.
    pub fn assignments_for(&self, id: StaffId) -> &[AssignmentRecord] {
        self.state
            .get(id)
            .map(|s| s.assignments.as_slice())
            .unwrap_or(&[])
    }

    /// All assignment records, grouped by staff id ascending.
    pub fn records(&self) -> impl Iterator<Item = &AssignmentRecord> {
        self.state.iter().flat_map(|s| s.assignments.iter())
    }

    /// Number of filled slots per eligibility tier.
    pub fn tier_counts(&self) -> BTreeMap<EligibilityTier, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records() {
            *counts.entry(record.tier).or_insert(0) += 1;
        }
        counts
    }
}

/// Fills every slot of the horizon using tiered fair-share selection.
///
/// # Example
///
/// ```
/// use u_rota::allocation::AllocationEngine;
/// use u_rota::config::PlanConfig;
/// use u_rota::models::{DemandCalendar, Roster, StaffMember};
///
/// let roster = Roster::new()
///     .with_regions(["North", "South"])
///     .with_role("R")
///     .with_staff(StaffMember::new(1, "A").with_role("R").with_region("North"))
///     .with_staff(StaffMember::new(2, "B").with_role("R").with_region("South"));
/// let calendar = DemandCalendar::weekly(&[("R", 2)]);
///
/// let engine = AllocationEngine::with_config(PlanConfig::new().with_horizon_weeks(1));
/// let allocation = engine.allocate(&roster, &calendar).unwrap();
/// assert_eq!(allocation.ledger.filled_count(), 14);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AllocationEngine {
    config: PlanConfig,
    selector: CandidateSelector,
}

impl AllocationEngine {
    /// Creates an engine with the default configuration (52 weeks,
    /// per-bucket region diversity).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(config: PlanConfig) -> Self {
        Self {
            config,
            selector: CandidateSelector::new(),
        }
    }

    /// The run configuration.
    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Runs a full planning pass.
    ///
    /// The roster and calendar are only borrowed; all mutable state is
    /// created here and returned inside the [`Allocation`].
    ///
    /// # Errors
    /// Any [`ConfigurationError`] from configuration, validation, or quota
    /// computation. Validation problems are returned together as
    /// [`ConfigurationError::Invalid`]. Unstaffed slots are not errors.
    pub fn allocate(
        &self,
        roster: &Roster,
        calendar: &DemandCalendar,
    ) -> Result<Allocation, ConfigurationError> {
        self.config.validate()?;
        validate_plan(roster, calendar).map_err(ConfigurationError::Invalid)?;

        let horizon_weeks = self.config.horizon_weeks;
        let mut state = AllocationState::new();
        compute_quotas(roster, calendar, horizon_weeks, &mut state)?;

        info!(
            horizon_weeks,
            staff = roster.len(),
            slots_per_week = calendar.slots_per_week(),
            region_scope = ?self.config.region_scope,
            "starting allocation"
        );

        let pools: BTreeMap<&str, Vec<&StaffMember>> = calendar
            .roles()
            .into_iter()
            .map(|role| (role, roster.pool(role)))
            .collect();

        let mut ledger = Ledger::new();
        for week in 1..=horizon_weeks {
            let mut block = WeekBlock {
                week,
                buckets: Vec::with_capacity(calendar.buckets.len()),
            };

            for bucket in &calendar.buckets {
                // Group exclusions: ids per (week, bucket); regions per the
                // configured scope.
                let mut used_staff: BTreeSet<StaffId> = BTreeSet::new();
                let mut bucket_regions: BTreeSet<String> = BTreeSet::new();
                let mut slots = BucketSlots {
                    bucket: bucket.label.clone(),
                    roles: Vec::with_capacity(bucket.demands.len()),
                };

                for demand in &bucket.demands {
                    let pool = pools
                        .get(demand.role.as_str())
                        .map_or(&[][..], Vec::as_slice);
                    let mut role_regions: BTreeSet<String> = BTreeSet::new();
                    let regions = match self.config.region_scope {
                        RegionScope::PerBucket => &mut bucket_regions,
                        RegionScope::PerBucketRole => &mut role_regions,
                    };

                    let mut row = RoleSlots::unstaffed(&demand.role, demand.headcount);
                    for (index, entry) in row.slots.iter_mut().enumerate() {
                        let context = SlotContext {
                            week,
                            bucket: &bucket.label,
                            category: &bucket.category,
                            role: &demand.role,
                            slot: index as u32 + 1,
                        };
                        *entry =
                            self.fill_slot(&context, pool, &mut state, &mut used_staff, regions);
                    }
                    slots.roles.push(row);
                }
                block.buckets.push(slots);
            }
            ledger.push_week(block);
        }

        let allocation = Allocation {
            horizon_weeks,
            ledger,
            state,
        };
        info!(
            slots = allocation.ledger.slot_count(),
            filled = allocation.ledger.filled_count(),
            unfilled = allocation.ledger.unfilled_count(),
            "allocation complete"
        );
        Ok(allocation)
    }

    /// Selects and records a candidate for one slot.
    fn fill_slot(
        &self,
        context: &SlotContext<'_>,
        pool: &[&StaffMember],
        state: &mut AllocationState,
        used_staff: &mut BTreeSet<StaffId>,
        used_regions: &mut BTreeSet<String>,
    ) -> Option<StaffId> {
        let exclusions = GroupExclusions::new(used_staff, used_regions);
        let Some(selection) = self
            .selector
            .select(pool, context.category, state, &exclusions)
        else {
            debug!(
                week = context.week,
                bucket = context.bucket,
                role = context.role,
                slot = context.slot,
                "slot left unstaffed"
            );
            return None;
        };

        let member = pool.iter().find(|m| m.id == selection.staff_id)?;
        if selection.tier != EligibilityTier::Strict {
            debug!(
                week = context.week,
                bucket = context.bucket,
                role = context.role,
                slot = context.slot,
                tier = %selection.tier,
                "constraint relaxed"
            );
        }
        trace!(
            week = context.week,
            bucket = context.bucket,
            role = context.role,
            slot = context.slot,
            staff = %member.id,
            "slot filled"
        );

        state.get_mut(member.id)?.record(AssignmentRecord {
            staff_id: member.id,
            week: context.week,
            bucket: context.bucket.to_string(),
            role: context.role.to_string(),
            category: context.category.to_string(),
            slot: context.slot,
            tier: selection.tier,
        });
        used_staff.insert(member.id);
        used_regions.insert(member.region.clone());
        Some(member.id)
    }
}

/// Position of the slot being filled.
struct SlotContext<'a> {
    week: u32,
    bucket: &'a str,
    category: &'a str,
    role: &'a str,
    slot: u32,
}

/// Runs a planning pass with default settings and the given horizon.
///
/// Shorthand for [`AllocationEngine::allocate`] with
/// `PlanConfig::new().with_horizon_weeks(horizon_weeks)`.
pub fn allocate(
    roster: &Roster,
    calendar: &DemandCalendar,
    horizon_weeks: u32,
) -> Result<Allocation, ConfigurationError> {
    AllocationEngine::with_config(PlanConfig::new().with_horizon_weeks(horizon_weeks))
        .allocate(roster, calendar)
}
