//! Roster model.
//!
//! A roster is the staff list together with the fixed sets of regions and
//! roles staff are drawn from. It is built once by the caller and only read
//! by the allocation engine.

use serde::{Deserialize, Serialize};

use super::{StaffId, StaffMember};

/// The staff available for duty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Declared regions, in display order.
    pub regions: Vec<String>,
    /// Declared roles, in display order.
    pub roles: Vec<String>,
    /// Staff members.
    pub staff: Vec<StaffMember>,
}

impl Roster {
    /// Creates an empty roster with no declared regions or roles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.regions.push(region.into());
        self
    }

    /// Declares several regions.
    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions.extend(regions.into_iter().map(Into::into));
        self
    }

    /// Declares a role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Adds a staff member.
    pub fn with_staff(mut self, member: StaffMember) -> Self {
        self.staff.push(member);
        self
    }

    /// Adds a staff member in place.
    pub fn add_staff(&mut self, member: StaffMember) {
        self.staff.push(member);
    }

    /// Finds a staff member by id.
    pub fn get(&self, id: StaffId) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.id == id)
    }

    /// Whether the roster declares a role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Whether the roster declares a region.
    pub fn has_region(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r == region)
    }

    /// Staff holding a role, in ascending id order.
    ///
    /// This is the candidate pool order; selection results depend on it.
    pub fn pool(&self, role: &str) -> Vec<&StaffMember> {
        let mut pool: Vec<&StaffMember> = self.staff.iter().filter(|s| s.role == role).collect();
        pool.sort_by_key(|s| s.id);
        pool
    }

    /// Sum of fte over staff holding a role, in basis points.
    pub fn role_fte_basis_points(&self, role: &str) -> u64 {
        self.staff
            .iter()
            .filter(|s| s.role == role)
            .map(|s| u64::from(s.fte.basis_points()))
            .sum()
    }

    /// Number of staff members.
    pub fn len(&self) -> usize {
        self.staff.len()
    }

    /// Whether the roster has no staff.
    pub fn is_empty(&self) -> bool {
        self.staff.is_empty()
    }
}
