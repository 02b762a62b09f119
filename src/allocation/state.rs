//! Per-run allocation state.
//!
//! Counters and assignment history are kept apart from [`StaffMember`] so
//! the roster stays immutable and can be shared by concurrent runs. Each
//! run owns exactly one `AllocationState`.
//!
//! Writers: [`compute_quotas`](super::compute_quotas) resets it, the
//! [`AllocationEngine`](super::AllocationEngine) increments it. Everything
//! else reads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AssignmentRecord, Roster, StaffId};

/// Quota and progress of one staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffAllocation {
    /// Staff member this entry tracks.
    pub staff_id: StaffId,
    /// Expected shifts per demand category.
    pub expected: BTreeMap<String, u32>,
    /// Assigned shifts per demand category.
    pub assigned: BTreeMap<String, u32>,
    /// Expected shifts across categories.
    pub expected_total: u32,
    /// Assigned shifts across categories.
    pub assigned_total: u32,
    /// Filled slots, in allocation order.
    pub assignments: Vec<AssignmentRecord>,
}

impl StaffAllocation {
    /// Creates a zeroed entry.
    pub fn new(staff_id: StaffId) -> Self {
        Self {
            staff_id,
            ..Default::default()
        }
    }

    /// Expected shifts in a category (0 if none).
    pub fn expected_for(&self, category: &str) -> u32 {
        self.expected.get(category).copied().unwrap_or(0)
    }

    /// Assigned shifts in a category (0 if none).
    pub fn assigned_for(&self, category: &str) -> u32 {
        self.assigned.get(category).copied().unwrap_or(0)
    }

    /// Assigned minus expected in a category. Negative = under quota.
    pub fn deviation(&self, category: &str) -> i64 {
        i64::from(self.assigned_for(category)) - i64::from(self.expected_for(category))
    }

    /// Whether the staff member is strictly below quota in a category.
    pub fn is_under_quota(&self, category: &str) -> bool {
        self.assigned_for(category) < self.expected_for(category)
    }

    /// Sets the expected quota for a category and refreshes the total.
    pub(crate) fn set_expected(&mut self, category: &str, shifts: u32) {
        self.expected.insert(category.to_string(), shifts);
        self.expected_total = self.expected.values().sum();
    }

    /// Records a filled slot and bumps the counters.
    pub(crate) fn record(&mut self, record: AssignmentRecord) {
        *self.assigned.entry(record.category.clone()).or_insert(0) += 1;
        self.assigned_total += 1;
        self.assignments.push(record);
    }
}

/// Allocation state of every staff member in a roster, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationState {
    staff: BTreeMap<StaffId, StaffAllocation>,
}

impl AllocationState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zeroed state for every member of a roster.
    pub fn for_roster(roster: &Roster) -> Self {
        let mut state = Self::new();
        state.reset(roster);
        state
    }

    /// Discards all quotas, counters and records, then creates a zeroed
    /// entry for each roster member.
    pub(crate) fn reset(&mut self, roster: &Roster) {
        self.staff = roster
            .staff
            .iter()
            .map(|s| (s.id, StaffAllocation::new(s.id)))
            .collect();
    }

    /// Entry for a staff member.
    pub fn get(&self, id: StaffId) -> Option<&StaffAllocation> {
        self.staff.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: StaffId) -> Option<&mut StaffAllocation> {
        self.staff.get_mut(&id)
    }

    /// Entries in ascending staff-id order.
    pub fn iter(&self) -> impl Iterator<Item = &StaffAllocation> {
        self.staff.values()
    }

    /// Number of tracked staff members.
    pub fn len(&self) -> usize {
        self.staff.len()
    }

    /// Whether no staff members are tracked.
    pub fn is_empty(&self) -> bool {
        self.staff.is_empty()
    }
}
