//! Input validation for rota planning.
//!
//! Checks structural integrity of the roster and calendar before any
//! allocation. Detects:
//! - Duplicate staff ids, bucket labels, and per-bucket roles
//! - Staff with undeclared regions or roles
//! - Calendar roles the roster does not declare
//! - Roles with demand but no staff

use std::collections::HashSet;

use crate::error::ConfigurationError;
use crate::models::{DemandCalendar, Roster};

/// Validation result: every detected problem, or `Ok`.
pub type ValidationResult = Result<(), Vec<ConfigurationError>>;

/// Validates a roster and calendar.
///
/// Checks:
/// 1. No duplicate staff ids
/// 2. Every staff region is declared by the roster
/// 3. Every staff role is declared by the roster
/// 4. No duplicate bucket labels
/// 5. No bucket lists a role twice
/// 6. Every calendar role is declared by the roster
/// 7. Every role with nonzero demand has at least one staff member
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_plan(roster: &Roster, calendar: &DemandCalendar) -> ValidationResult {
    let mut errors = Vec::new();

    let mut staff_ids = HashSet::new();
    for member in &roster.staff {
        if !staff_ids.insert(member.id) {
            errors.push(ConfigurationError::DuplicateStaffId(member.id));
        }
        if !roster.has_region(&member.region) {
            errors.push(ConfigurationError::UnknownRegion {
                staff_id: member.id,
                region: member.region.clone(),
            });
        }
        if !roster.has_role(&member.role) {
            errors.push(ConfigurationError::UnknownRole {
                staff_id: member.id,
                role: member.role.clone(),
            });
        }
    }

    let mut labels = HashSet::new();
    for bucket in &calendar.buckets {
        if !labels.insert(bucket.label.as_str()) {
            errors.push(ConfigurationError::DuplicateBucket(bucket.label.clone()));
        }

        let mut roles = HashSet::new();
        for demand in &bucket.demands {
            if !roles.insert(demand.role.as_str()) {
                errors.push(ConfigurationError::DuplicateRoleDemand {
                    bucket: bucket.label.clone(),
                    role: demand.role.clone(),
                });
            }
            if !roster.has_role(&demand.role) {
                errors.push(ConfigurationError::UndefinedRole {
                    bucket: bucket.label.clone(),
                    role: demand.role.clone(),
                });
            }
        }
    }

    for role in calendar.roles() {
        let demand = calendar.slots_for_role(role);
        if demand > 0 && roster.pool(role).is_empty() {
            errors.push(ConfigurationError::EmptyRolePool {
                role: role.to_string(),
                demand,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
