/// Month grid for the calendar view
///
/// The calendar only reads completion dates; it never computes streaks.
/// A grid knows where the month starts in a Sunday-first week, how many
/// days it has, and which of those days are completed.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{date, DomainError};

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    /// 1-based month
    pub month: u32,
    /// Weekday of the 1st, Sunday = 0
    pub first_weekday: u32,
    pub days_in_month: u32,
    /// Completed day numbers within this month, ascending
    pub completed_days: Vec<u32>,
}

impl MonthGrid {
    /// Lay out `year`-`month` and mark the days found in `completed_dates`
    ///
    /// Entries outside the month, or that do not parse as dates, are ignored.
    pub fn build<S: AsRef<str>>(
        year: i32,
        month: u32,
        completed_dates: &[S],
    ) -> Result<Self, DomainError> {
        let first = date::to_naive(&format!("{}-{}-1", year, month))?;
        let days_in_month = days_in_month(first)?;

        let completed_days: BTreeSet<u32> = completed_dates
            .iter()
            .filter_map(|d| date::to_naive(d.as_ref()).ok())
            .filter(|d| d.year() == year && d.month() == month)
            .map(|d| d.day())
            .collect();

        Ok(Self {
            year,
            month,
            first_weekday: first.weekday().num_days_from_sunday(),
            days_in_month,
            completed_days: completed_days.into_iter().collect(),
        })
    }

    pub fn is_completed(&self, day: u32) -> bool {
        self.completed_days.binary_search(&day).is_ok()
    }

    /// Canonical date string for a day of this month
    pub fn date_of(&self, day: u32) -> Option<String> {
        NaiveDate::from_ymd_opt(self.year, self.month, day).map(date::format)
    }

    /// Header label such as "March 2024"
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}

fn days_in_month(first: NaiveDate) -> Result<u32, DomainError> {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };

    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(next) => Ok((next - first).num_days() as u32),
        None => Err(DomainError::InvalidFormat {
            value: date::format(first),
        }),
    }
}

impl fmt::Display for MonthGrid {
    /// Sunday-first grid; completed days are marked with `*`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", WEEKDAYS.join("  "))?;

        let mut column = 0;
        let mut line = String::new();

        for _ in 0..self.first_weekday {
            line.push_str("    ");
            column += 1;
        }

        for day in 1..=self.days_in_month {
            let mark = if self.is_completed(day) { '*' } else { ' ' };
            line.push_str(&format!("{:>2}{} ", day, mark));
            column += 1;

            if column == 7 {
                writeln!(f, "{}", line.trim_end())?;
                line.clear();
                column = 0;
            }
        }

        if !line.is_empty() {
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}
