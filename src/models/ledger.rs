//! Assignment ledger (solution) model.
//!
//! The ledger is the product of one allocation run: for every week of the
//! horizon, every bucket, and every role, a fixed-length row of optional
//! staff references. `None` marks an unstaffed slot, which is a valid
//! outcome rather than a failure.

use serde::{Deserialize, Serialize};

use super::StaffId;
use crate::selection::EligibilityTier;

/// One filled slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Assigned staff member.
    pub staff_id: StaffId,
    /// Week number, 1-based.
    pub week: u32,
    /// Bucket label.
    pub bucket: String,
    /// Role label.
    pub role: String,
    /// Demand category of the bucket.
    pub category: String,
    /// Slot index within the (week, bucket, role) group, 1-based.
    pub slot: u32,
    /// Eligibility tier the staff member was drawn from.
    pub tier: EligibilityTier,
}

/// Slots of one role within one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSlots {
    /// Role label.
    pub role: String,
    /// One entry per required slot; `None` = unstaffed.
    pub slots: Vec<Option<StaffId>>,
}

impl RoleSlots {
    /// Creates an all-unstaffed row of the given length.
    pub fn unstaffed(role: impl Into<String>, headcount: u32) -> Self {
        Self {
            role: role.into(),
            slots: vec![None; headcount as usize],
        }
    }

    /// Staff ids in filled slots, in slot order.
    pub fn filled(&self) -> impl Iterator<Item = StaffId> + '_ {
        self.slots.iter().flatten().copied()
    }
}

/// Slots of one bucket within one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSlots {
    /// Bucket label.
    pub bucket: String,
    /// Role rows, in calendar order.
    pub roles: Vec<RoleSlots>,
}

impl BucketSlots {
    /// Finds a role row.
    pub fn role(&self, role: &str) -> Option<&RoleSlots> {
        self.roles.iter().find(|r| r.role == role)
    }

    /// Staff ids in filled slots across roles.
    pub fn filled(&self) -> impl Iterator<Item = StaffId> + '_ {
        self.roles.iter().flat_map(RoleSlots::filled)
    }
}

/// All slots of one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBlock {
    /// Week number, 1-based.
    pub week: u32,
    /// Bucket blocks, in calendar order.
    pub buckets: Vec<BucketSlots>,
}

impl WeekBlock {
    /// Finds a bucket block.
    pub fn bucket(&self, label: &str) -> Option<&BucketSlots> {
        self.buckets.iter().find(|b| b.bucket == label)
    }
}

/// The full horizon of slots, ordered by week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Week blocks in ascending week order.
    pub weeks: Vec<WeekBlock>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a week block.
    pub fn push_week(&mut self, block: WeekBlock) {
        self.weeks.push(block);
    }

    /// Finds a week block (1-based).
    pub fn week(&self, week: u32) -> Option<&WeekBlock> {
        self.weeks.iter().find(|w| w.week == week)
    }

    /// Row of slots for a (week, bucket, role) group.
    pub fn slots(&self, week: u32, bucket: &str, role: &str) -> Option<&[Option<StaffId>]> {
        self.week(week)?
            .bucket(bucket)?
            .role(role)
            .map(|r| r.slots.as_slice())
    }

    /// Staff in one slot (`slot` is 1-based). `None` if unstaffed or absent.
    pub fn slot(&self, week: u32, bucket: &str, role: &str, slot: u32) -> Option<StaffId> {
        let index = usize::try_from(slot).ok()?.checked_sub(1)?;
        self.slots(week, bucket, role)?.get(index).copied().flatten()
    }

    /// Iterates every role row with its week and bucket.
    pub fn rows(&self) -> impl Iterator<Item = (u32, &str, &RoleSlots)> + '_ {
        self.weeks.iter().flat_map(|w| {
            w.buckets
                .iter()
                .flat_map(move |b| b.roles.iter().map(move |r| (w.week, b.bucket.as_str(), r)))
        })
    }

    /// Total number of slots.
    pub fn slot_count(&self) -> usize {
        self.rows().map(|(_, _, r)| r.slots.len()).sum()
    }

    /// Number of filled slots.
    pub fn filled_count(&self) -> usize {
        self.rows().map(|(_, _, r)| r.filled().count()).sum()
    }

    /// Number of unstaffed slots.
    pub fn unfilled_count(&self) -> usize {
        self.slot_count() - self.filled_count()
    }

    /// Number of slots a staff member fills.
    pub fn count_for_staff(&self, id: StaffId) -> usize {
        self.rows()
            .map(|(_, _, r)| r.filled().filter(|s| *s == id).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.push_week(WeekBlock {
            week: 1,
            buckets: vec![BucketSlots {
                bucket: "Monday".into(),
                roles: vec![
                    RoleSlots {
                        role: "DM".into(),
                        slots: vec![Some(StaffId(1)), None],
                    },
                    RoleSlots {
                        role: "TL".into(),
                        slots: vec![Some(StaffId(4)), Some(StaffId(1))],
                    },
                ],
            }],
        });
        ledger
    }

    #[test]
    fn test_counts() {
        let l = sample_ledger();
        assert_eq!(l.slot_count(), 4);
        assert_eq!(l.filled_count(), 3);
        assert_eq!(l.unfilled_count(), 1);
        assert_eq!(l.count_for_staff(StaffId(1)), 2);
        assert_eq!(l.count_for_staff(StaffId(9)), 0);
    }

    #[test]
    fn test_slot_lookup() {
        let l = sample_ledger();
        assert_eq!(l.slot(1, "Monday", "DM", 1), Some(StaffId(1)));
        assert_eq!(l.slot(1, "Monday", "DM", 2), None);
        assert_eq!(l.slot(1, "Monday", "DM", 0), None);
        assert_eq!(l.slot(1, "Monday", "DM", 3), None);
        assert_eq!(l.slot(2, "Monday", "DM", 1), None);
        assert_eq!(l.slots(1, "Monday", "TL").map(<[_]>::len), Some(2));
        assert!(l.slots(1, "Tuesday", "TL").is_none());
    }

    #[test]
    fn test_unstaffed_row() {
        let r = RoleSlots::unstaffed("DM", 3);
        assert_eq!(r.slots, vec![None, None, None]);
        assert_eq!(r.filled().count(), 0);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample_ledger()).unwrap();
        let row = &json["weeks"][0]["buckets"][0]["roles"][0];
        assert_eq!(row["role"], "DM");
        assert_eq!(row["slots"][0], 1);
        assert!(row["slots"][1].is_null());
    }
}
