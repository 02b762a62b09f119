//! Fair-share quota computation.
//!
//! # Algorithm
//!
//! For each role, the role's workforce is the sum of its members' fte. For
//! each demand category, the role's demand over the horizon is the weekly
//! headcount of that category's buckets times the number of weeks. A staff
//! member's expected shifts in a category are
//!
//! ```text
//! round(fte / role_fte * category_demand)
//! ```
//!
//! rounded half away from zero. With fte in basis points this is exact
//! integer arithmetic.

use std::collections::BTreeMap;

use tracing::debug;

use super::AllocationState;
use crate::error::ConfigurationError;
use crate::models::{DemandCalendar, Roster, StaffId};

/// Computes every staff member's expected shifts per category and resets
/// all per-run counters in `state`.
///
/// This is the single reset point: any prior quotas, counters and records
/// in `state` are discarded. Nothing is written when an error is returned.
///
/// # Errors
/// - [`ConfigurationError::InvalidHorizon`] for a zero-week horizon.
/// - [`ConfigurationError::UndefinedRole`] if the calendar names a role the
///   roster does not declare.
/// - [`ConfigurationError::EmptyRolePool`] if a role with demand has no staff.
/// - [`ConfigurationError::ZeroRoleFte`] if a role's staff sum to zero fte.
pub fn compute_quotas(
    roster: &Roster,
    calendar: &DemandCalendar,
    horizon_weeks: u32,
    state: &mut AllocationState,
) -> Result<(), ConfigurationError> {
    if horizon_weeks == 0 {
        return Err(ConfigurationError::InvalidHorizon(horizon_weeks));
    }

    for bucket in &calendar.buckets {
        for demand in &bucket.demands {
            if !roster.has_role(&demand.role) {
                return Err(ConfigurationError::UndefinedRole {
                    bucket: bucket.label.clone(),
                    role: demand.role.clone(),
                });
            }
        }
    }

    let categories = calendar.categories();
    let mut role_fte: BTreeMap<&str, u64> = BTreeMap::new();

    for role in calendar.roles() {
        let demand: u64 = categories
            .iter()
            .map(|c| calendar.total_demand(c, role, horizon_weeks))
            .sum();
        let fte = roster.role_fte_basis_points(role);
        if demand > 0 && roster.pool(role).is_empty() {
            return Err(ConfigurationError::EmptyRolePool {
                role: role.to_string(),
                demand,
            });
        }
        debug!(role, fte_bp = fte, demand, "role workload");
        role_fte.insert(role, fte);
    }

    let mut quotas: Vec<(StaffId, &str, u32)> = Vec::new();
    for member in &roster.staff {
        let role_total = match role_fte.get(member.role.as_str()) {
            Some(&total) => total,
            None => roster.role_fte_basis_points(&member.role),
        };
        if role_total == 0 {
            return Err(ConfigurationError::ZeroRoleFte {
                role: member.role.clone(),
            });
        }
        for &category in &categories {
            let demand = calendar.total_demand(category, &member.role, horizon_weeks);
            let expected = fair_share(u64::from(member.fte.basis_points()), role_total, demand);
            quotas.push((member.id, category, expected));
        }
    }

    state.reset(roster);
    for (id, category, expected) in quotas {
        if let Some(entry) = state.get_mut(id) {
            entry.set_expected(category, expected);
        }
    }

    Ok(())
}

/// `round(share / total * demand)`, half away from zero, without floats.
///
/// `total` must be nonzero.
pub(crate) fn fair_share(share: u64, total: u64, demand: u64) -> u32 {
    let numerator = 2 * u128::from(share) * u128::from(demand) + u128::from(total);
    let rounded = numerator / (2 * u128::from(total));
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bucket, Fte, StaffMember, WEEKDAY, WEEKEND};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn two_person_roster() -> Roster {
        Roster::new()
            .with_regions(["North", "South"])
            .with_role("R")
            .with_staff(StaffMember::new(1, "A").with_role("R").with_region("North"))
            .with_staff(StaffMember::new(2, "B").with_role("R").with_region("South"))
    }

    #[test]
    fn test_fair_share_rounding() {
        // 1/3 of 10 = 3.33 → 3
        assert_eq!(fair_share(1, 3, 10), 3);
        // 1/2 of 5 = 2.5 → 3 (half away from zero)
        assert_eq!(fair_share(1, 2, 5), 3);
        // 3/4 of 2 = 1.5 → 2
        assert_eq!(fair_share(3, 4, 2), 2);
        assert_eq!(fair_share(5, 5, 0), 0);
        assert_eq!(fair_share(10_000, 10_000, 364), 364);
    }

    #[test]
    fn test_equal_split_one_week() {
        let roster = two_person_roster();
        let cal = DemandCalendar::weekly(&[("R", 2)]);
        let mut state = AllocationState::new();
        compute_quotas(&roster, &cal, 1, &mut state).unwrap();

        for s in state.iter() {
            assert_eq!(s.expected_for(WEEKDAY), 5);
            assert_eq!(s.expected_for(WEEKEND), 2);
            assert_eq!(s.expected_total, 7);
            assert_eq!(s.assigned_total, 0);
        }
    }

    #[test]
    fn test_fte_weighting() {
        let roster = Roster::new()
            .with_region("North")
            .with_role("R")
            .with_staff(StaffMember::new(1, "A").with_role("R").with_region("North"))
            .with_staff(
                StaffMember::new(2, "B")
                    .with_role("R")
                    .with_region("North")
                    .with_fte(Fte::new(0.5).unwrap()),
            );
        let cal = DemandCalendar::weekly(&[("R", 1)]);
        let mut state = AllocationState::new();
        compute_quotas(&roster, &cal, 52, &mut state).unwrap();

        // weekday demand 260: 2/3 → 173.33 → 173, 1/3 → 86.67 → 87
        assert_eq!(state.get(StaffId(1)).unwrap().expected_for(WEEKDAY), 173);
        assert_eq!(state.get(StaffId(2)).unwrap().expected_for(WEEKDAY), 87);
        // weekend demand 104: 69.33 → 69, 34.67 → 35
        assert_eq!(state.get(StaffId(1)).unwrap().expected_for(WEEKEND), 69);
        assert_eq!(state.get(StaffId(2)).unwrap().expected_for(WEEKEND), 35);
    }

    #[test]
    fn test_roles_are_independent() {
        let roster = two_person_roster()
            .with_role("T")
            .with_staff(StaffMember::new(3, "C").with_role("T").with_region("North"));
        let cal = DemandCalendar::weekly(&[("R", 1), ("T", 2)]);
        let mut state = AllocationState::new();
        compute_quotas(&roster, &cal, 2, &mut state).unwrap();

        assert_eq!(state.get(StaffId(3)).unwrap().expected_for(WEEKDAY), 20);
        assert_eq!(state.get(StaffId(1)).unwrap().expected_for(WEEKDAY), 5);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let roster = two_person_roster();
        let cal = DemandCalendar::weekly(&[("R", 2)]);
        let mut state = AllocationState::new();
        compute_quotas(&roster, &cal, 52, &mut state).unwrap();
        let first = state.clone();
        compute_quotas(&roster, &cal, 52, &mut state).unwrap();
        assert_eq!(first, state);
    }

    #[test]
    fn test_undefined_role() {
        let roster = two_person_roster();
        let cal = DemandCalendar::weekly(&[("Ghost", 1)]);
        let err = compute_quotas(&roster, &cal, 1, &mut AllocationState::new()).unwrap_err();
        assert!(matches!(err, ConfigurationError::UndefinedRole { ref role, .. } if role == "Ghost"));
    }

    #[test]
    fn test_empty_role_pool() {
        let roster = two_person_roster().with_role("T");
        let cal = DemandCalendar::weekly(&[("T", 1)]);
        let err = compute_quotas(&roster, &cal, 1, &mut AllocationState::new()).unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyRolePool { demand: 7, .. }));
    }

    #[test]
    fn test_zero_demand_role_without_staff_is_fine() {
        let roster = two_person_roster().with_role("T");
        let cal = DemandCalendar::new()
            .with_bucket(Bucket::new("Mon", WEEKDAY).with_demand("R", 1).with_demand("T", 0));
        assert!(compute_quotas(&roster, &cal, 1, &mut AllocationState::new()).is_ok());
    }

    #[test]
    fn test_zero_horizon() {
        let roster = two_person_roster();
        let cal = DemandCalendar::weekly(&[("R", 1)]);
        let err = compute_quotas(&roster, &cal, 0, &mut AllocationState::new()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidHorizon(0)));
    }

    #[test]
    fn test_error_leaves_state_untouched() {
        let roster = two_person_roster();
        let mut state = AllocationState::new();
        compute_quotas(&roster, &DemandCalendar::weekly(&[("R", 1)]), 1, &mut state).unwrap();
        let before = state.clone();

        let bad = DemandCalendar::weekly(&[("Ghost", 1)]);
        assert!(compute_quotas(&roster, &bad, 1, &mut state).is_err());
        assert_eq!(before, state);
    }

    #[test]
    fn test_quota_sum_within_rounding() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let n: u32 = rng.random_range(1..12);
            let mut roster = Roster::new().with_region("X").with_role("R");
            for id in 0..n {
                let fte = Fte::from_basis_points(rng.random_range(1_000..=10_000)).unwrap();
                roster.add_staff(
                    StaffMember::new(id, format!("S{id}"))
                        .with_role("R")
                        .with_region("X")
                        .with_fte(fte),
                );
            }
            let per_day: u32 = rng.random_range(0..4);
            let cal = DemandCalendar::weekly(&[("R", per_day)]);
            let weeks: u32 = rng.random_range(1..=52);
            let mut state = AllocationState::new();
            compute_quotas(&roster, &cal, weeks, &mut state).unwrap();

            for category in [WEEKDAY, WEEKEND] {
                let demand = cal.total_demand(category, "R", weeks) as f64;
                let sum: u32 = state.iter().map(|s| s.expected_for(category)).sum();
                let tolerance = f64::from(n) * 0.5;
                assert!(
                    (f64::from(sum) - demand).abs() <= tolerance,
                    "sum {sum} vs demand {demand} with {n} staff"
                );
            }
        }
    }
}
