//! Demand calendar model.
//!
//! The calendar describes one repeating week: an ordered list of buckets
//! (a weekday, or a coarser split such as weeknight/weekend), each tagged
//! with a demand category and listing how many staff of each role it needs.
//! The same week repeats across the whole planning horizon.
//!
//! # Ordering
//! Bucket order and role order within a bucket are the processing order of
//! the allocation engine, and therefore affect results.

use serde::{Deserialize, Serialize};

/// Category label for Monday to Friday in [`DemandCalendar::weekly`].
pub const WEEKDAY: &str = "weekday";
/// Category label for Saturday and Sunday in [`DemandCalendar::weekly`].
pub const WEEKEND: &str = "weekend";

/// Day names used by [`DemandCalendar::weekly`], Monday first.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Required headcount of one role within a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDemand {
    /// Role label.
    pub role: String,
    /// Staff required per occurrence.
    pub headcount: u32,
}

/// One subdivision of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Unique label (e.g. "Monday").
    pub label: String,
    /// Demand category used for quota accounting (e.g. "weekday").
    pub category: String,
    /// Role requirements, in processing order.
    pub demands: Vec<RoleDemand>,
}

impl Bucket {
    /// Creates a bucket with no requirements.
    pub fn new(label: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            category: category.into(),
            demands: Vec::new(),
        }
    }

    /// Adds a role requirement.
    pub fn with_demand(mut self, role: impl Into<String>, headcount: u32) -> Self {
        self.demands.push(RoleDemand {
            role: role.into(),
            headcount,
        });
        self
    }

    /// Headcount required for a role (0 if the bucket does not list it).
    pub fn headcount(&self, role: &str) -> u32 {
        self.demands
            .iter()
            .filter(|d| d.role == role)
            .map(|d| d.headcount)
            .sum()
    }

    /// Total headcount across roles.
    pub fn total_headcount(&self) -> u32 {
        self.demands.iter().map(|d| d.headcount).sum()
    }
}

/// Weekly demand, repeated over the planning horizon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandCalendar {
    /// Buckets in processing order.
    pub buckets: Vec<Bucket>,
}

impl DemandCalendar {
    /// Creates an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Monday..Sunday calendar with the same role requirements
    /// every day. Weekdays are categorized [`WEEKDAY`], Saturday and Sunday
    /// [`WEEKEND`].
    ///
    /// # Example
    /// ```
    /// use u_rota::models::DemandCalendar;
    ///
    /// let cal = DemandCalendar::weekly(&[("Duty Manager", 2), ("Tactical Lead", 2)]);
    /// assert_eq!(cal.buckets.len(), 7);
    /// assert_eq!(cal.weekly_demand("weekend", "Duty Manager"), 4);
    /// ```
    pub fn weekly(per_day: &[(&str, u32)]) -> Self {
        let buckets = DAY_NAMES
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let category = if i < 5 { WEEKDAY } else { WEEKEND };
                per_day
                    .iter()
                    .fold(Bucket::new(*day, category), |b, (role, n)| {
                        b.with_demand(*role, *n)
                    })
            })
            .collect();
        Self { buckets }
    }

    /// Adds a bucket.
    pub fn with_bucket(mut self, bucket: Bucket) -> Self {
        self.buckets.push(bucket);
        self
    }

    /// Finds a bucket by label.
    pub fn bucket(&self, label: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.label == label)
    }

    /// Distinct categories, in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for b in &self.buckets {
            if !out.contains(&b.category.as_str()) {
                out.push(&b.category);
            }
        }
        out
    }

    /// Distinct roles referenced by any bucket, in order of first appearance.
    pub fn roles(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for d in self.buckets.iter().flat_map(|b| &b.demands) {
            if !out.contains(&d.role.as_str()) {
                out.push(&d.role);
            }
        }
        out
    }

    /// Shifts of a role required per week in a category.
    pub fn weekly_demand(&self, category: &str, role: &str) -> u64 {
        self.buckets
            .iter()
            .filter(|b| b.category == category)
            .map(|b| u64::from(b.headcount(role)))
            .sum()
    }

    /// Shifts of a role required over the horizon in a category.
    pub fn total_demand(&self, category: &str, role: &str, horizon_weeks: u32) -> u64 {
        self.weekly_demand(category, role) * u64::from(horizon_weeks)
    }

    /// Shifts of a role required per week across all categories.
    pub fn slots_for_role(&self, role: &str) -> u64 {
        self.buckets
            .iter()
            .map(|b| u64::from(b.headcount(role)))
            .sum()
    }

    /// Slots per week across all buckets and roles.
    pub fn slots_per_week(&self) -> u64 {
        self.buckets
            .iter()
            .map(|b| u64::from(b.total_headcount()))
            .sum()
    }
}
