//! Tiered candidate selection.
//!
//! Picks one staff member for one slot. Eligibility is tested in three
//! progressively relaxed tiers; the first tier with any candidate wins and
//! its candidates are ranked by [`RankKey`].
//!
//! | Tier | Under quota | Id unused in group | Region unused in group |
//! |------|-------------|--------------------|------------------------|
//! | `Strict` | required | required | required |
//! | `RelaxedRegion` | required | required | - |
//! | `RelaxedQuota` | - | required | - |
//!
//! The id exclusion is never relaxed, so a staff member fills at most one
//! slot per group. When even `RelaxedQuota` is empty the slot stays
//! unstaffed.
//!
//! # Usage
//!
//! ```
//! use std::collections::BTreeSet;
//! use u_rota::allocation::AllocationState;
//! use u_rota::models::{Roster, StaffMember};
//! use u_rota::selection::{CandidateSelector, EligibilityTier, GroupExclusions};
//!
//! let roster = Roster::new()
//!     .with_staff(StaffMember::new(1, "A").with_role("DM").with_region("North"));
//! let state = AllocationState::for_roster(&roster);
//! let pool = roster.pool("DM");
//! let used_staff = BTreeSet::new();
//! let used_regions = BTreeSet::new();
//! let exclusions = GroupExclusions::new(&used_staff, &used_regions);
//!
//! // No quota computed yet, so only the quota-relaxed tier admits anyone.
//! let pick = CandidateSelector::new().select(&pool, "weekday", &state, &exclusions);
//! assert_eq!(pick.map(|s| s.tier), Some(EligibilityTier::RelaxedQuota));
//! ```

mod rank;

pub use rank::{LoadRatio, RankKey};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::allocation::{AllocationState, StaffAllocation};
use crate::models::{StaffId, StaffMember};

/// Eligibility stage used to fill a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EligibilityTier {
    /// Under quota, new id, new region.
    Strict,
    /// Under quota, new id.
    RelaxedRegion,
    /// New id.
    RelaxedQuota,
}

impl EligibilityTier {
    /// All tiers, strictest first.
    pub const ALL: [EligibilityTier; 3] = [
        EligibilityTier::Strict,
        EligibilityTier::RelaxedRegion,
        EligibilityTier::RelaxedQuota,
    ];

    /// Short name.
    pub fn name(&self) -> &'static str {
        match self {
            EligibilityTier::Strict => "strict",
            EligibilityTier::RelaxedRegion => "relaxed-region",
            EligibilityTier::RelaxedQuota => "relaxed-quota",
        }
    }

    /// Whether a staff member passes this tier's filters.
    pub fn admits(
        &self,
        member: &StaffMember,
        allocation: &StaffAllocation,
        category: &str,
        exclusions: &GroupExclusions<'_>,
    ) -> bool {
        if exclusions.staff.contains(&member.id) {
            return false;
        }
        match self {
            EligibilityTier::Strict => {
                allocation.is_under_quota(category) && !exclusions.regions.contains(&member.region)
            }
            EligibilityTier::RelaxedRegion => allocation.is_under_quota(category),
            EligibilityTier::RelaxedQuota => true,
        }
    }
}

impl fmt::Display for EligibilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Staff ids and regions already used in the current group.
#[derive(Debug, Clone, Copy)]
pub struct GroupExclusions<'a> {
    /// Staff already placed in the group.
    pub staff: &'a BTreeSet<StaffId>,
    /// Regions already on duty in the group.
    pub regions: &'a BTreeSet<String>,
}

impl<'a> GroupExclusions<'a> {
    /// Bundles the two exclusion sets.
    pub fn new(staff: &'a BTreeSet<StaffId>, regions: &'a BTreeSet<String>) -> Self {
        Self { staff, regions }
    }
}

/// Outcome of a successful selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Chosen staff member.
    pub staff_id: StaffId,
    /// Tier the candidate came from.
    pub tier: EligibilityTier,
}

/// Chooses the best candidate for a slot.
///
/// Stateless: all inputs are passed per call, so one selector serves any
/// number of runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateSelector;

impl CandidateSelector {
    /// Creates a selector.
    pub fn new() -> Self {
        Self
    }

    /// Selects a candidate from `pool` for a slot in `category`.
    ///
    /// `pool` should be in ascending id order (see
    /// [`Roster::pool`](crate::models::Roster::pool)). Staff absent from
    /// `state` are never eligible. Returns `None` when no tier admits anyone.
    pub fn select(
        &self,
        pool: &[&StaffMember],
        category: &str,
        state: &AllocationState,
        exclusions: &GroupExclusions<'_>,
    ) -> Option<Selection> {
        EligibilityTier::ALL.into_iter().find_map(|tier| {
            self.rank(tier, pool, category, state, exclusions)
                .first()
                .map(|(_, member)| Selection {
                    staff_id: member.id,
                    tier,
                })
        })
    }

    /// Candidates admitted by one tier, best first.
    pub fn eligible<'p>(
        &self,
        tier: EligibilityTier,
        pool: &[&'p StaffMember],
        category: &str,
        state: &AllocationState,
        exclusions: &GroupExclusions<'_>,
    ) -> Vec<&'p StaffMember> {
        self.rank(tier, pool, category, state, exclusions)
            .into_iter()
            .map(|(_, member)| member)
            .collect()
    }

    fn rank<'p>(
        &self,
        tier: EligibilityTier,
        pool: &[&'p StaffMember],
        category: &str,
        state: &AllocationState,
        exclusions: &GroupExclusions<'_>,
    ) -> Vec<(RankKey, &'p StaffMember)> {
        let mut ranked: Vec<(RankKey, &StaffMember)> = pool
            .iter()
            .filter_map(|&member| {
                let allocation = state.get(member.id)?;
                tier.admits(member, allocation, category, exclusions)
                    .then(|| (RankKey::of(member, allocation, category), member))
            })
            .collect();
        ranked.sort_by_key(|(key, _)| *key);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentRecord, Fte, Roster};

    fn member(id: u32, region: &str) -> StaffMember {
        StaffMember::new(id, format!("S{id}"))
            .with_role("DM")
            .with_region(region)
    }

    fn roster() -> Roster {
        Roster::new()
            .with_staff(member(1, "North"))
            .with_staff(member(2, "North"))
            .with_staff(member(3, "South"))
    }

    fn state_with_quota(roster: &Roster, quota: u32) -> AllocationState {
        let mut state = AllocationState::for_roster(roster);
        for s in &roster.staff {
            state.get_mut(s.id).unwrap().set_expected("weekday", quota);
        }
        state
    }

    fn assign(state: &mut AllocationState, id: u32, times: u32) {
        for _ in 0..times {
            state.get_mut(StaffId(id)).unwrap().record(AssignmentRecord {
                staff_id: StaffId(id),
                week: 1,
                bucket: "Monday".into(),
                role: "DM".into(),
                category: "weekday".into(),
                slot: 1,
                tier: EligibilityTier::Strict,
            });
        }
    }

    #[test]
    fn test_strict_prefers_lowest_deviation() {
        let r = roster();
        let mut state = state_with_quota(&r, 5);
        assign(&mut state, 1, 2);
        assign(&mut state, 3, 1);
        let pool = r.pool("DM");
        let (ids, regions) = (BTreeSet::new(), BTreeSet::new());

        let pick = CandidateSelector::new()
            .select(&pool, "weekday", &state, &GroupExclusions::new(&ids, &regions))
            .unwrap();
        assert_eq!(pick.staff_id, StaffId(2));
        assert_eq!(pick.tier, EligibilityTier::Strict);
    }

    #[test]
    fn test_region_exclusion_then_relaxed() {
        let r = roster();
        let state = state_with_quota(&r, 5);
        let pool = r.pool("DM");
        let ids = BTreeSet::from([StaffId(3)]);
        let regions = BTreeSet::from(["South".to_string(), "North".to_string()]);

        // Every remaining candidate is from a used region.
        let pick = CandidateSelector::new()
            .select(&pool, "weekday", &state, &GroupExclusions::new(&ids, &regions))
            .unwrap();
        assert_eq!(pick.tier, EligibilityTier::RelaxedRegion);
        assert_eq!(pick.staff_id, StaffId(1));

        let regions = BTreeSet::from(["North".to_string()]);
        let ids = BTreeSet::new();
        let pick = CandidateSelector::new()
            .select(&pool, "weekday", &state, &GroupExclusions::new(&ids, &regions))
            .unwrap();
        assert_eq!(pick.tier, EligibilityTier::Strict);
        assert_eq!(pick.staff_id, StaffId(3));
    }

    #[test]
    fn test_quota_relaxed_when_all_at_quota() {
        let r = roster();
        let mut state = state_with_quota(&r, 1);
        assign(&mut state, 1, 1);
        assign(&mut state, 2, 2);
        assign(&mut state, 3, 1);
        let pool = r.pool("DM");
        let (ids, regions) = (BTreeSet::new(), BTreeSet::new());

        let pick = CandidateSelector::new()
            .select(&pool, "weekday", &state, &GroupExclusions::new(&ids, &regions))
            .unwrap();
        assert_eq!(pick.tier, EligibilityTier::RelaxedQuota);
        // Staff 1 and 3 tie on deviation and load; lower id wins.
        assert_eq!(pick.staff_id, StaffId(1));
    }

    #[test]
    fn test_load_normalized_by_fte() {
        let r = Roster::new()
            .with_staff(member(1, "North"))
            .with_staff(member(2, "South").with_fte(Fte::new(0.5).unwrap()));
        let mut state = state_with_quota(&r, 0);
        assign(&mut state, 1, 3);
        assign(&mut state, 2, 2);
        // Deviations: 3 vs 2 → staff 2 first regardless of load.
        let pool = r.pool("DM");
        let (ids, regions) = (BTreeSet::new(), BTreeSet::new());
        let ex = GroupExclusions::new(&ids, &regions);
        let ranked = CandidateSelector::new().eligible(
            EligibilityTier::RelaxedQuota,
            &pool,
            "weekday",
            &state,
            &ex,
        );
        assert_eq!(ranked[0].id, StaffId(2));

        // Equal deviation: load 3/1.0 vs 3/0.5 → staff 1 first.
        assign(&mut state, 2, 1);
        let ranked = CandidateSelector::new().eligible(
            EligibilityTier::RelaxedQuota,
            &pool,
            "weekday",
            &state,
            &ex,
        );
        assert_eq!(ranked[0].id, StaffId(1));
    }

    #[test]
    fn test_none_when_all_used() {
        let r = roster();
        let state = state_with_quota(&r, 5);
        let pool = r.pool("DM");
        let ids = BTreeSet::from([StaffId(1), StaffId(2), StaffId(3)]);
        let regions = BTreeSet::new();

        let pick = CandidateSelector::new().select(
            &pool,
            "weekday",
            &state,
            &GroupExclusions::new(&ids, &regions),
        );
        assert!(pick.is_none());
    }

    #[test]
    fn test_empty_pool() {
        let state = AllocationState::new();
        let (ids, regions) = (BTreeSet::new(), BTreeSet::new());
        let pick = CandidateSelector::new().select(
            &[],
            "weekday",
            &state,
            &GroupExclusions::new(&ids, &regions),
        );
        assert!(pick.is_none());
    }

    #[test]
    fn test_tier_names() {
        assert_eq!(EligibilityTier::Strict.to_string(), "strict");
        assert_eq!(EligibilityTier::RelaxedRegion.name(), "relaxed-region");
        assert!(EligibilityTier::Strict < EligibilityTier::RelaxedQuota);
    }
}
