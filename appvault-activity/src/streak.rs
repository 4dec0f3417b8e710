//! Consecutive-days-with-a-completed-task counter.

use crate::error::ActivityResult;
use appvault_storage::{keys, KeyValueStore, TaskObserver};
use appvault_types::{calendar_day, Task};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// What happens when a day with a completion follows a day without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreakPolicy {
    /// The counter only grows. A day after a gap is credited only while
    /// the counter is still zero.
    #[default]
    Preserve,
    /// A day after a gap restarts the counter at 1.
    ResetOnGap,
}

/// Streak counter persisted under `task-streak`, with the last credited
/// day under `task-streak-day`.
#[derive(Clone)]
pub struct StreakTracker {
    kv: Arc<dyn KeyValueStore>,
    offset: FixedOffset,
    policy: StreakPolicy,
}

impl StreakTracker {
    pub fn new(kv: Arc<dyn KeyValueStore>, offset: FixedOffset, policy: StreakPolicy) -> Self {
        Self { kv, offset, policy }
    }

    pub fn policy(&self) -> StreakPolicy {
        self.policy
    }

    /// The stored counter. Missing or malformed values read as 0.
    pub fn current(&self) -> u32 {
        match self.kv.get(keys::STREAK) {
            Ok(Some(text)) => text.trim().parse().unwrap_or_else(|_| {
                warn!(value = %text, "malformed streak counter treated as 0");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!("failed to read streak counter: {e}");
                0
            }
        }
    }

    /// Day the counter was last credited, if any.
    pub fn last_credited(&self) -> Option<NaiveDate> {
        let text = self.kv.get(keys::STREAK_DAY).ok().flatten()?;
        NaiveDate::parse_from_str(text.trim(), DAY_FORMAT)
            .inspect_err(|_| warn!(value = %text, "malformed streak day ignored"))
            .ok()
    }

    /// Re-evaluates the counter after the task set changed.
    ///
    /// Credits `today` at most once, and only when some task was completed
    /// on it. Returns the counter after the update.
    pub fn update(&self, tasks: &[Task], today: NaiveDate) -> ActivityResult<u32> {
        let current = self.current();
        if !self.completed_on(tasks, today) {
            return Ok(current);
        }
        let last = self.last_credited();
        if last == Some(today) {
            return Ok(current);
        }

        let yesterday = today.pred_opt();
        let continues = yesterday.is_some_and(|y| self.completed_on(tasks, y));
        let next = match self.policy {
            StreakPolicy::Preserve if continues || current == 0 => current + 1,
            StreakPolicy::Preserve => return Ok(current),
            StreakPolicy::ResetOnGap if continues || (last.is_some() && last == yesterday) => {
                current + 1
            }
            StreakPolicy::ResetOnGap => 1,
        };

        // The credited day is written first so a counter that was bumped is
        // never paired with a stale day.
        let previous_day = self.kv.get(keys::STREAK_DAY)?;
        self.kv
            .set(keys::STREAK_DAY, &today.format(DAY_FORMAT).to_string())?;
        if let Err(e) = self.kv.set(keys::STREAK, &next.to_string()) {
            let restored = match previous_day {
                Some(day) => self.kv.set(keys::STREAK_DAY, &day),
                None => self.kv.remove(keys::STREAK_DAY),
            };
            if let Err(restore_err) = restored {
                warn!(day = %today, "failed to restore streak day: {restore_err}");
            }
            return Err(e.into());
        }
        info!(streak = next, day = %today, "Streak credited");
        Ok(next)
    }

    fn completed_on(&self, tasks: &[Task], day: NaiveDate) -> bool {
        tasks
            .iter()
            .filter_map(|t| t.completed_at)
            .any(|at| calendar_day(at, self.offset) == day)
    }
}

// Runs after the task change is saved; a failed streak write is picked up
// again on the next change.
impl TaskObserver for StreakTracker {
    fn tasks_changed(&self, tasks: &[Task], now: DateTime<Utc>) {
        if let Err(e) = self.update(tasks, calendar_day(now, self.offset)) {
            warn!("failed to update streak: {e}");
        }
    }
}
