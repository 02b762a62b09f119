//! Fair-share allocation: quotas, the greedy engine, and run metrics.
//!
//! # Algorithm
//!
//! [`compute_quotas`] sets each staff member's expected share of every
//! demand category in proportion to their fte. [`AllocationEngine`] then
//! walks every slot of the horizon in week → bucket → role → index order
//! and fills it through the tiered [`CandidateSelector`](crate::selection::CandidateSelector).
//! The heuristic is greedy: it never revisits a decision.
//!
//! # KPI
//!
//! [`AllocationKpi`] summarizes a finished run: fill rate, tier usage,
//! quota deviation, and regional diversity.
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

mod engine;
mod kpi;
mod quota;
mod state;

pub use engine::{allocate, Allocation, AllocationEngine};
pub use kpi::AllocationKpi;
pub use quota::compute_quotas;
pub use state::{AllocationState, StaffAllocation};
