//! Activity views for App Vault.
//!
//! - [`ActivityAggregator`] buckets every record by the calendar day it was
//!   created on and feeds the calendar, its month charts and rollups
//! - [`StreakTracker`] keeps the "days in a row with a completed task"
//!   counter in the key-value store
//! - `stats` holds the plain counts shown on the dashboard, profile and
//!   task pages

mod aggregate;
mod calendar;
mod error;
mod stats;
mod streak;

pub use aggregate::{ActivityAggregator, ActivityReport, DayActivity, DayTally, MonthSummary};
pub use calendar::{calendar_grid, month_bounds, month_days, ActivityLevel};
pub use error::{ActivityError, ActivityResult};
pub use stats::{DashboardStats, ProfileStats, TaskStats};
pub use streak::{StreakPolicy, StreakTracker};
