//! Candidate ranking keys.
//!
//! Lower key = higher priority. Keys compare in three layers:
//! quota deviation, normalized load, then staff id.

use std::cmp::Ordering;

use crate::allocation::StaffAllocation;
use crate::models::{StaffId, StaffMember};

/// Total assigned shifts divided by fte, compared as an exact rational.
///
/// Cross-multiplication in `u64` avoids floating-point ties that could
/// order differently across platforms.
#[derive(Debug, Clone, Copy)]
pub struct LoadRatio {
    assigned: u32,
    fte_bp: u32,
}

impl LoadRatio {
    /// Creates a ratio. `fte_bp` is the fte in basis points and is never 0.
    pub fn new(assigned: u32, fte_bp: u32) -> Self {
        Self { assigned, fte_bp }
    }

    /// Approximate decimal value, for logging.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.assigned) * 10_000.0 / f64::from(self.fte_bp)
    }
}

impl Ord for LoadRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u64::from(self.assigned) * u64::from(other.fte_bp);
        let rhs = u64::from(other.assigned) * u64::from(self.fte_bp);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for LoadRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LoadRatio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LoadRatio {}

/// Sort key of one candidate for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    /// Assigned minus expected in the slot's category.
    pub deviation: i64,
    /// Overall load normalized by fte.
    pub load: LoadRatio,
    /// Final tie-break.
    pub staff_id: StaffId,
}

impl RankKey {
    /// Builds the key for a candidate in a category.
    pub fn of(member: &StaffMember, allocation: &StaffAllocation, category: &str) -> Self {
        Self {
            deviation: allocation.deviation(category),
            load: LoadRatio::new(allocation.assigned_total, member.fte.basis_points()),
            staff_id: member.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_ratio_exact() {
        // 1 / 0.5 == 2 / 1.0
        assert_eq!(LoadRatio::new(1, 5_000), LoadRatio::new(2, 10_000));
        // 1 / 0.3333 > 3 / 1.0 by a hair; floats could round this either way.
        assert!(LoadRatio::new(1, 3_333) > LoadRatio::new(3, 10_000));
        assert!(LoadRatio::new(0, 10_000) < LoadRatio::new(1, 10_000));
        assert!((LoadRatio::new(3, 5_000).as_f64() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_rank_key_layers() {
        let under = RankKey {
            deviation: -2,
            load: LoadRatio::new(9, 10_000),
            staff_id: StaffId(9),
        };
        let lighter = RankKey {
            deviation: -1,
            load: LoadRatio::new(0, 10_000),
            staff_id: StaffId(1),
        };
        assert!(under < lighter);

        let a = RankKey {
            deviation: 0,
            load: LoadRatio::new(2, 10_000),
            staff_id: StaffId(5),
        };
        let b = RankKey {
            deviation: 0,
            load: LoadRatio::new(1, 5_000),
            staff_id: StaffId(3),
        };
        // Equal load → lower id first.
        assert!(b < a);
    }
}
