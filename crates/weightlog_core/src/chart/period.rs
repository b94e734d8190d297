//! Display period model: kind, anchor date, derived bounds, navigation.
//!
//! # Responsibility
//! - Map `{kind, anchor}` to inclusive start/end dates and a display label.
//! - Shift the anchor by one unit of the current kind for prev/next
//!   navigation.
//!
//! # Invariants
//! - Weeks start on Monday and end on Sunday.
//! - Bounds derivation is pure and total for any valid calendar date.
//! - Month/year navigation clamps the day-of-month (Jan 31 -> Feb 28/29,
//!   Feb 29 -> Feb 28 on non-leap years).

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Filter mode for the chart screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Week,
    Month,
    Year,
}

/// Direction for prev/next period navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Previous,
    Next,
}

/// The period currently displayed: a kind plus an anchor date somewhere
/// inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub kind: PeriodKind,
    pub anchor: NaiveDate,
}

/// Inclusive date bounds of a period plus its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl Period {
    /// Creates the period of the given kind containing `today`.
    ///
    /// Used on screen entry and whenever the kind changes: switching modes
    /// always snaps back to the current date.
    pub fn starting(kind: PeriodKind, today: NaiveDate) -> Self {
        Self {
            kind,
            anchor: today,
        }
    }

    /// Derives inclusive start/end dates and the display label.
    pub fn bounds(&self) -> PeriodBounds {
        match self.kind {
            PeriodKind::Week => {
                let week = self.anchor.week(Weekday::Mon);
                let start = week.first_day();
                let end = week.last_day();
                let label = format!(
                    "{} - {}",
                    start.format("%b %d"),
                    end.format("%b %d, %Y")
                );
                PeriodBounds { start, end, label }
            }
            PeriodKind::Month => {
                let start = first_of_month(self.anchor.year(), self.anchor.month());
                let end = last_of_month(self.anchor.year(), self.anchor.month());
                let label = self.anchor.format("%B %Y").to_string();
                PeriodBounds { start, end, label }
            }
            PeriodKind::Year => {
                let start = first_of_month(self.anchor.year(), 1);
                let end = last_of_month(self.anchor.year(), 12);
                let label = self.anchor.format("%Y").to_string();
                PeriodBounds { start, end, label }
            }
        }
    }

    /// Returns the adjacent period in the given direction, same kind.
    pub fn shifted(&self, direction: NavDirection) -> Self {
        let anchor = match (self.kind, direction) {
            (PeriodKind::Week, NavDirection::Previous) => self.anchor - Duration::days(7),
            (PeriodKind::Week, NavDirection::Next) => self.anchor + Duration::days(7),
            (PeriodKind::Month, NavDirection::Previous) => sub_months(self.anchor, 1),
            (PeriodKind::Month, NavDirection::Next) => add_months(self.anchor, 1),
            (PeriodKind::Year, NavDirection::Previous) => sub_months(self.anchor, 12),
            (PeriodKind::Year, NavDirection::Next) => add_months(self.anchor, 12),
        };
        Self {
            kind: self.kind,
            anchor,
        }
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("month 1..=12 always has a first day")
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let next = if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    };
    next.pred_opt()
        .expect("day before the first of a month always exists")
}

fn add_months(date: NaiveDate, count: u32) -> NaiveDate {
    date.checked_add_months(Months::new(count))
        .expect("anchor stays far from the calendar range limits")
}

fn sub_months(date: NaiveDate, count: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(count))
        .expect("anchor stays far from the calendar range limits")
}

#[cfg(test)]
mod tests {
    use super::{NavDirection, Period, PeriodKind};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_bounds_run_monday_to_sunday() {
        // 2024-01-03 is a Wednesday.
        let period = Period::starting(PeriodKind::Week, date(2024, 1, 3));
        let bounds = period.bounds();
        assert_eq!(bounds.start, date(2024, 1, 1));
        assert_eq!(bounds.end, date(2024, 1, 7));
        assert_eq!(bounds.label, "Jan 01 - Jan 07, 2024");
    }

    #[test]
    fn week_anchor_on_monday_is_its_own_start() {
        let period = Period::starting(PeriodKind::Week, date(2024, 1, 1));
        let bounds = period.bounds();
        assert_eq!(bounds.start, date(2024, 1, 1));
        assert_eq!(bounds.end, date(2024, 1, 7));
    }

    #[test]
    fn month_bounds_cover_whole_month_including_leap_february() {
        let period = Period::starting(PeriodKind::Month, date(2024, 2, 14));
        let bounds = period.bounds();
        assert_eq!(bounds.start, date(2024, 2, 1));
        assert_eq!(bounds.end, date(2024, 2, 29));
        assert_eq!(bounds.label, "February 2024");
    }

    #[test]
    fn year_bounds_cover_jan_first_to_dec_last() {
        let period = Period::starting(PeriodKind::Year, date(2024, 6, 15));
        let bounds = period.bounds();
        assert_eq!(bounds.start, date(2024, 1, 1));
        assert_eq!(bounds.end, date(2024, 12, 31));
        assert_eq!(bounds.label, "2024");
    }

    #[test]
    fn week_navigation_moves_seven_days() {
        let period = Period::starting(PeriodKind::Week, date(2024, 1, 3));
        assert_eq!(
            period.shifted(NavDirection::Next).anchor,
            date(2024, 1, 10)
        );
        assert_eq!(
            period.shifted(NavDirection::Previous).anchor,
            date(2023, 12, 27)
        );
    }

    #[test]
    fn month_navigation_clamps_end_of_month() {
        let period = Period::starting(PeriodKind::Month, date(2024, 1, 31));
        assert_eq!(period.shifted(NavDirection::Next).anchor, date(2024, 2, 29));
    }

    #[test]
    fn year_navigation_clamps_leap_day() {
        let period = Period::starting(PeriodKind::Year, date(2024, 2, 29));
        assert_eq!(period.shifted(NavDirection::Next).anchor, date(2025, 2, 28));
    }
}
