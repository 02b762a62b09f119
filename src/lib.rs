//! Fair-share duty rota allocation for the U-Engine ecosystem.
//!
//! Assigns recurring duty roles to a roster of staff over a planning
//! horizon, balancing workload by fractional employment share (fte) while
//! keeping each staff member to one slot per day and spreading regions
//! across the staff on duty.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `StaffMember`, `Roster`, `DemandCalendar`,
//!   `Ledger`, `AssignmentRecord`
//! - **`allocation`**: Quota computation, the greedy `AllocationEngine`, and
//!   `AllocationKpi`
//! - **`selection`**: Tiered candidate filtering and exact ranking
//! - **`validation`**: Input integrity checks (duplicate ids, undeclared
//!   regions and roles, unstaffable demand)
//! - **`config`**: Horizon length and region-diversity scope
//! - **`error`**: `ConfigurationError`
//!
//! # Example
//!
//! ```
//! use u_rota::allocation::allocate;
//! use u_rota::models::{DemandCalendar, Fte, Roster, StaffMember};
//!
//! let roster = Roster::new()
//!     .with_regions(["Wales", "Scotland", "London"])
//!     .with_role("Duty Manager")
//!     .with_staff(StaffMember::new(1, "Ash").with_role("Duty Manager").with_region("Wales"))
//!     .with_staff(StaffMember::new(2, "Bo").with_role("Duty Manager").with_region("Scotland"))
//!     .with_staff(
//!         StaffMember::new(3, "Cy")
//!             .with_role("Duty Manager")
//!             .with_region("London")
//!             .with_fte(Fte::new(0.5).unwrap()),
//!     );
//! let calendar = DemandCalendar::weekly(&[("Duty Manager", 2)]);
//!
//! let allocation = allocate(&roster, &calendar, 52).unwrap();
//! assert_eq!(allocation.ledger.weeks.len(), 52);
//! assert_eq!(allocation.ledger.unfilled_count(), 0);
//! ```
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 13

pub mod allocation;
pub mod config;
pub mod error;
pub mod models;
pub mod selection;
pub mod validation;

pub use error::ConfigurationError;
