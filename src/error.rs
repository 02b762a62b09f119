//! Error types for rota planning.
//!
//! Every variant is fatal and raised before any slot is filled. An unfilled
//! slot is a normal outcome and is never reported through this type.

use thiserror::Error;

use crate::models::StaffId;

/// A roster, calendar, or plan configuration that cannot be allocated.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Staff of a role sum to zero fte, so quotas would divide by zero.
    #[error("role '{role}' has zero aggregate fte")]
    ZeroRoleFte { role: String },

    /// The calendar requires a role the roster does not declare.
    #[error("bucket '{bucket}' requires undefined role '{role}'")]
    UndefinedRole { bucket: String, role: String },

    /// The calendar demands a role that has no staff.
    #[error("role '{role}' has demand of {demand} shifts but no staff")]
    EmptyRolePool { role: String, demand: u64 },

    /// Two staff members share an id.
    #[error("duplicate staff id: {0}")]
    DuplicateStaffId(StaffId),

    /// A staff member's region is not one of the roster's regions.
    #[error("staff {staff_id} has unknown region '{region}'")]
    UnknownRegion { staff_id: StaffId, region: String },

    /// A staff member's role is not one of the roster's roles.
    #[error("staff {staff_id} has unknown role '{role}'")]
    UnknownRole { staff_id: StaffId, role: String },

    /// Two buckets share a label.
    #[error("duplicate bucket label: {0}")]
    DuplicateBucket(String),

    /// A bucket lists the same role twice.
    #[error("bucket '{bucket}' lists role '{role}' more than once")]
    DuplicateRoleDemand { bucket: String, role: String },

    /// The planning horizon is empty.
    #[error("horizon must be at least one week, got {0}")]
    InvalidHorizon(u32),

    /// An fte value is not a finite positive number.
    #[error("invalid fte value: {0}")]
    InvalidFte(f64),

    /// Configuration JSON could not be parsed.
    #[error("failed to parse plan configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Several problems detected by validation.
    #[error("invalid plan: {}", summarize(.0))]
    Invalid(Vec<ConfigurationError>),
}

impl ConfigurationError {
    /// Flattens a batch into its individual problems.
    pub fn problems(&self) -> Vec<&ConfigurationError> {
        match self {
            ConfigurationError::Invalid(errors) => {
                errors.iter().flat_map(|e| e.problems()).collect()
            }
            other => vec![other],
        }
    }

    /// Whether any problem in this error matches the predicate.
    pub fn any(&self, predicate: impl Fn(&ConfigurationError) -> bool) -> bool {
        self.problems().into_iter().any(predicate)
    }
}

fn summarize(errors: &[ConfigurationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
