//! Staff model.
//!
//! Staff members are the people who fill duty slots. Each has a home region,
//! a role, and a fractional employment share (fte) that weights their fair
//! share of the workload. A `StaffMember` is immutable identity; per-run
//! counters live in [`AllocationState`](crate::allocation::AllocationState).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigurationError;

/// Unique staff identifier. Ordering defines the stable pool order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StaffId(pub u32);

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fractional employment share, held as fixed-point basis points.
///
/// `1.0` fte is [`Fte::SCALE`] basis points. Keeping fte as an integer makes
/// quota rounding and load comparisons exact and platform independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fte(u32);

impl Fte {
    /// Basis points per full-time equivalent.
    pub const SCALE: u32 = 10_000;

    /// One full-time equivalent.
    pub const FULL: Fte = Fte(Self::SCALE);

    /// Converts a decimal fte, rounding to the nearest basis point.
    ///
    /// Rejects values that are not finite, not positive, or too small to
    /// survive rounding.
    pub fn new(value: f64) -> Result<Self, ConfigurationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigurationError::InvalidFte(value));
        }
        let scaled = (value * f64::from(Self::SCALE)).round();
        if scaled < 1.0 || scaled > f64::from(u32::MAX) {
            return Err(ConfigurationError::InvalidFte(value));
        }
        Ok(Self(scaled as u32))
    }

    /// Creates an fte directly from basis points. Returns `None` for zero.
    pub const fn from_basis_points(bp: u32) -> Option<Self> {
        if bp == 0 {
            None
        } else {
            Some(Self(bp))
        }
    }

    /// The fte in basis points.
    #[inline]
    pub const fn basis_points(self) -> u32 {
        self.0
    }

    /// The fte as a decimal.
    #[inline]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(Self::SCALE)
    }
}

impl Default for Fte {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<f64> for Fte {
    type Error = ConfigurationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Fte> for f64 {
    fn from(fte: Fte) -> Self {
        fte.as_f64()
    }
}

impl fmt::Display for Fte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_f64())
    }
}

/// A member of the duty roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Unique staff identifier.
    pub id: StaffId,
    /// Display name.
    pub name: String,
    /// Home region (one of the roster's regions).
    pub region: String,
    /// Duty role (one of the roster's roles).
    pub role: String,
    /// Fractional employment share.
    pub fte: Fte,
}

impl StaffMember {
    /// Creates a full-time staff member with no region or role yet.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: StaffId(id),
            name: name.into(),
            region: String::new(),
            role: String::new(),
            fte: Fte::FULL,
        }
    }

    /// Sets the home region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the employment share.
    pub fn with_fte(mut self, fte: Fte) -> Self {
        self.fte = fte;
        self
    }
}
