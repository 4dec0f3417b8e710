//! Per-day activity tallies across every entity collection.

use crate::calendar::{month_days, ActivityLevel};
use crate::error::ActivityResult;
use appvault_types::{calendar_day, Link, PasswordEntry, Pdf, Record, RecordKind, Task};
use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Records created on one day, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayTally {
    pub links: u32,
    pub pdfs: u32,
    pub passwords: u32,
    pub tasks: u32,
    /// Tasks created that day which are now completed.
    pub completed: u32,
}

impl DayTally {
    /// Records of every kind; `completed` is not part of the total.
    pub fn total(&self) -> u32 {
        self.links + self.pdfs + self.passwords + self.tasks
    }

    fn bump(&mut self, kind: RecordKind) {
        match kind {
            RecordKind::Link => self.links += 1,
            RecordKind::Pdf => self.pdfs += 1,
            RecordKind::Password => self.passwords += 1,
            RecordKind::Task => self.tasks += 1,
        }
    }
}

/// One day of a month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub tally: DayTally,
    pub total: u32,
    pub level: ActivityLevel,
}

/// Rollup shown above the month charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthSummary {
    pub total_activity: u32,
    pub total_completed: u32,
    pub average_daily: f64,
}

impl MonthSummary {
    pub fn from_days(days: &[DayActivity]) -> Self {
        let total_activity = days.iter().map(|d| d.total).sum();
        let total_completed = days.iter().map(|d| d.tally.completed).sum();
        let average_daily = if days.is_empty() {
            0.0
        } else {
            f64::from(total_activity) / days.len() as f64
        };
        Self {
            total_activity,
            total_completed,
            average_daily,
        }
    }
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityReport {
    pub days: BTreeMap<NaiveDate, DayTally>,
    /// Records without a creation time; they are counted under "today".
    pub untimestamped: usize,
}

impl ActivityReport {
    pub fn day(&self, date: NaiveDate) -> DayTally {
        self.days.get(&date).copied().unwrap_or_default()
    }

    /// Every day of the month, zero-filled.
    pub fn month_view(&self, year: i32, month: u32) -> ActivityResult<Vec<DayActivity>> {
        Ok(month_days(year, month)?
            .into_iter()
            .map(|date| {
                let tally = self.day(date);
                let total = tally.total();
                DayActivity {
                    date,
                    tally,
                    total,
                    level: ActivityLevel::from_total(total),
                }
            })
            .collect())
    }

    pub fn month_summary(&self, year: i32, month: u32) -> ActivityResult<MonthSummary> {
        Ok(MonthSummary::from_days(&self.month_view(year, month)?))
    }
}

/// Buckets records by the calendar day they were created on.
#[derive(Debug, Clone, Copy)]
pub struct ActivityAggregator {
    today: NaiveDate,
    offset: FixedOffset,
}

impl ActivityAggregator {
    /// `today` receives records without a creation time; `offset` decides
    /// which calendar day an instant falls on.
    pub fn new(today: NaiveDate, offset: FixedOffset) -> Self {
        Self { today, offset }
    }

    pub fn aggregate(
        &self,
        links: &[Link],
        pdfs: &[Pdf],
        passwords: &[PasswordEntry],
        tasks: &[Task],
    ) -> ActivityReport {
        let mut report = ActivityReport::default();
        self.tally(&mut report, links, |_, _| {});
        self.tally(&mut report, pdfs, |_, _| {});
        self.tally(&mut report, passwords, |_, _| {});
        self.tally(&mut report, tasks, |day, task| {
            if task.is_completed() {
                day.completed += 1;
            }
        });
        if report.untimestamped > 0 {
            warn!(
                count = report.untimestamped,
                today = %self.today,
                "records without creation time counted under today"
            );
        }
        report
    }

    fn tally<R, F>(&self, report: &mut ActivityReport, records: &[R], extra: F)
    where
        R: Record,
        F: Fn(&mut DayTally, &R),
    {
        for record in records {
            let date = match record.created_at() {
                Some(at) => calendar_day(at, self.offset),
                None => {
                    report.untimestamped += 1;
                    self.today
                }
            };
            let day = report.days.entry(date).or_default();
            day.bump(R::KIND);
            extra(day, record);
        }
    }
}
