//! Month arithmetic and calendar coloring.

use crate::error::{ActivityError, ActivityResult};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

/// Coloring bucket of a calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    None,
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    /// 0 → None, 1–2 → Low, 3–5 → Medium, more → High.
    pub fn from_total(total: u32) -> Self {
        match total {
            0 => ActivityLevel::None,
            1..=2 => ActivityLevel::Low,
            3..=5 => ActivityLevel::Medium,
            _ => ActivityLevel::High,
        }
    }
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> ActivityResult<(NaiveDate, NaiveDate)> {
    let invalid = || ActivityError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;
    Ok((first, last))
}

/// Every day of the month, in order.
pub fn month_days(year: i32, month: u32) -> ActivityResult<Vec<NaiveDate>> {
    let (first, last) = month_bounds(year, month)?;
    Ok(first.iter_days().take_while(|d| *d <= last).collect())
}

/// Cells of a Sunday-first month grid: from the Sunday on or before the
/// first of the month through the Saturday on or after its last day.
pub fn calendar_grid(year: i32, month: u32) -> ActivityResult<Vec<NaiveDate>> {
    let invalid = || ActivityError::InvalidMonth { year, month };
    let (first, last) = month_bounds(year, month)?;
    let start = first
        .checked_sub_days(Days::new(first.weekday().num_days_from_sunday().into()))
        .ok_or_else(invalid)?;
    let end = last
        .checked_add_days(Days::new((6 - last.weekday().num_days_from_sunday()).into()))
        .ok_or_else(invalid)?;
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn levels() {
        assert_eq!(ActivityLevel::from_total(0), ActivityLevel::None);
        assert_eq!(ActivityLevel::from_total(2), ActivityLevel::Low);
        assert_eq!(ActivityLevel::from_total(3), ActivityLevel::Medium);
        assert_eq!(ActivityLevel::from_total(5), ActivityLevel::Medium);
        assert_eq!(ActivityLevel::from_total(6), ActivityLevel::High);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(month_days(2024, 2).unwrap().len(), 29);
        assert_eq!(month_days(2023, 2).unwrap().len(), 28);
        assert_eq!(month_days(2024, 12).unwrap().len(), 31);
        assert!(month_days(2024, 13).is_err());
    }

    #[test]
    fn grid_spans_whole_weeks() {
        // June 2024 starts on a Saturday and ends on a Sunday.
        let grid = calendar_grid(2024, 6).unwrap();
        assert_eq!(grid.first(), Some(&date(2024, 5, 26)));
        assert_eq!(grid.last(), Some(&date(2024, 7, 6)));
        assert_eq!(grid.len(), 42);
        assert_eq!(grid[0].weekday(), Weekday::Sun);
    }

    #[test]
    fn grid_without_padding() {
        // February 2015 runs Sunday 1st to Saturday 28th.
        let grid = calendar_grid(2015, 2).unwrap();
        assert_eq!(grid.len(), 28);
        assert_eq!(grid.first(), Some(&date(2015, 2, 1)));
    }
}
