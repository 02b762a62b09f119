//! Rota domain models.
//!
//! Provides the data types for a duty rota problem (who is available, what
//! the week demands) and its solution (the assignment ledger).
//!
//! # Domain Mappings
//!
//! | u-rota | On-call rota | Hospital | Retail |
//! |--------|--------------|----------|--------|
//! | StaffMember | Duty manager | Nurse | Shift lead |
//! | Bucket | Day of week | Night / day shift | Opening / closing |
//! | Category | Weekday / weekend | Night / day | Peak / off-peak |
//! | Ledger | Annual rota | Ward roster | Store schedule |

mod calendar;
mod ledger;
mod roster;
mod staff;

pub use calendar::{Bucket, DemandCalendar, RoleDemand, DAY_NAMES, WEEKDAY, WEEKEND};
pub use ledger::{AssignmentRecord, BucketSlots, Ledger, RoleSlots, WeekBlock};
pub use roster::Roster;
pub use staff::{Fte, StaffId, StaffMember};
