//! Period aggregation: entries in, chart-ready series out.
//!
//! # Responsibility
//! - Collapse a period's entries into one point per day (week), per week
//!   bucket (month), or per calendar month (year).
//! - Compute the padded Y-axis range over emitted point values.
//!
//! # Invariants
//! - Input entries are pre-filtered to the period; the function sorts them
//!   by date (stable, ties keep fetch order) before bucketing.
//! - Week mode keeps only the first entry per day; later same-day entries
//!   are dropped.
//! - Month buckets are days 1-7, 8-14, ... of the period, not calendar
//!   weeks; non-empty buckets are re-indexed sequentially from 0.
//! - The no-data result has neither points nor labels.

use crate::chart::period::PeriodKind;
use crate::model::entry::WeightEntry;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const Y_AXIS_PADDING: f64 = 5.0;
const Y_AXIS_MIN_SPAN: f64 = 10.0;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One chart point: slot index on the X axis plus the value to plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x_index: usize,
    pub value: f64,
}

/// Chart-ready series: points plus one label per X-axis slot.
///
/// Slots without data keep their label (week/year modes) so spacing stays
/// consistent; `x_index` values are always a subset of `0..labels.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
    pub labels: Vec<String>,
}

impl ChartSeries {
    /// The explicit "no data for this period" result.
    pub fn no_data() -> Self {
        Self {
            points: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// True when there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Padded Y-axis bounds for a non-empty point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Aggregates a period's entries into a chart series.
///
/// `entries` must already be filtered to `[start, end]` inclusive; order
/// does not matter. Returns the no-data series when nothing can be plotted.
pub fn aggregate(
    kind: PeriodKind,
    entries: &[WeightEntry],
    start: NaiveDate,
    end: NaiveDate,
) -> ChartSeries {
    if entries.is_empty() {
        return ChartSeries::no_data();
    }

    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.date);

    let series = match kind {
        PeriodKind::Week => aggregate_week(&sorted, start, end),
        PeriodKind::Month => aggregate_month(&sorted, start),
        PeriodKind::Year => aggregate_year(&sorted),
    };

    if series.is_empty() {
        return ChartSeries::no_data();
    }
    series
}

/// One slot per calendar day; at most one entry per day (first match wins).
fn aggregate_week(sorted: &[&WeightEntry], start: NaiveDate, end: NaiveDate) -> ChartSeries {
    let mut points = Vec::new();
    let mut labels = Vec::new();

    let mut day = start;
    let mut x_index = 0usize;
    while day <= end {
        if let Some(entry) = sorted.iter().find(|entry| entry.date == day) {
            points.push(ChartPoint {
                x_index,
                value: entry.weight_lbs,
            });
        }
        labels.push(day.format("%a\n%b %d").to_string());
        day = day + Duration::days(1);
        x_index += 1;
    }

    ChartSeries { points, labels }
}

/// Seven-day buckets counted from the period start, averaged per bucket.
///
/// Bucket slots with no entries vanish entirely; the surviving buckets are
/// re-labeled "Week 1", "Week 2", ... by position.
fn aggregate_month(sorted: &[&WeightEntry], start: NaiveDate) -> ChartSeries {
    let mut buckets: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for entry in sorted {
        let bucket = (entry.date - start).num_days() / 7;
        buckets.entry(bucket).or_default().push(entry.weight_lbs);
    }

    let mut points = Vec::new();
    let mut labels = Vec::new();
    for (x_index, weights) in buckets.values().enumerate() {
        points.push(ChartPoint {
            x_index,
            value: mean(weights),
        });
        labels.push(format!("Week {}", x_index + 1));
    }

    ChartSeries { points, labels }
}

/// Twelve fixed month slots, averaged per calendar month.
fn aggregate_year(sorted: &[&WeightEntry]) -> ChartSeries {
    let mut by_month: [Vec<f64>; 12] = Default::default();
    for entry in sorted {
        by_month[entry.date.month0() as usize].push(entry.weight_lbs);
    }

    let mut points = Vec::new();
    let mut labels = Vec::new();
    for (month0, weights) in by_month.iter().enumerate() {
        labels.push(MONTH_LABELS[month0].to_string());
        if !weights.is_empty() {
            points.push(ChartPoint {
                x_index: month0,
                value: mean(weights),
            });
        }
    }

    ChartSeries { points, labels }
}

/// Computes padded Y-axis bounds over emitted point values.
///
/// Returns `None` for an empty point set, meaning the display should fall
/// back to automatic scaling. Otherwise pads by 5 on both sides, floors the
/// lower bound at zero (weight cannot be negative), and widens any span
/// under 10 units around its midpoint.
pub fn axis_range(points: &[ChartPoint]) -> Option<AxisRange> {
    let first = points.first()?;
    let mut min_value = first.value;
    let mut max_value = first.value;
    for point in &points[1..] {
        min_value = min_value.min(point.value);
        max_value = max_value.max(point.value);
    }

    let mut min = min_value.floor() - Y_AXIS_PADDING;
    let mut max = max_value + Y_AXIS_PADDING;
    if min < 0.0 {
        min = 0.0;
    }
    if max - min < Y_AXIS_MIN_SPAN {
        let mid = (min + max) / 2.0;
        min = (mid - Y_AXIS_MIN_SPAN / 2.0).max(0.0);
        max = mid + Y_AXIS_MIN_SPAN / 2.0;
    }

    Some(AxisRange { min, max })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::{aggregate, axis_range, ChartPoint};
    use crate::chart::period::PeriodKind;
    use crate::model::entry::WeightEntry;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(y: i32, m: u32, d: u32, weight: f64) -> WeightEntry {
        WeightEntry::new(date(y, m, d), weight)
    }

    #[test]
    fn week_duplicate_day_keeps_first_sorted_entry() {
        let entries = vec![
            entry(2024, 1, 2, 181.0),
            entry(2024, 1, 2, 185.0),
            entry(2024, 1, 5, 179.5),
        ];
        let series = aggregate(
            PeriodKind::Week,
            &entries,
            date(2024, 1, 1),
            date(2024, 1, 7),
        );

        assert_eq!(series.labels.len(), 7);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].x_index, 1);
        assert_eq!(series.points[0].value, 181.0);
        assert_eq!(series.points[1].x_index, 4);
    }

    #[test]
    fn month_bucket_slots_follow_day_offsets_not_calendar_weeks() {
        // Days 1 and 7 share bucket 0; day 8 opens bucket 1; day 31 lands
        // in the short fifth bucket.
        let entries = vec![
            entry(2024, 1, 1, 180.0),
            entry(2024, 1, 7, 178.0),
            entry(2024, 1, 8, 176.0),
            entry(2024, 1, 31, 174.0),
        ];
        let series = aggregate(
            PeriodKind::Month,
            &entries,
            date(2024, 1, 1),
            date(2024, 1, 31),
        );

        assert_eq!(series.points.len(), 3);
        assert_eq!(series.labels, vec!["Week 1", "Week 2", "Week 3"]);
        assert_eq!(series.points[0].value, 179.0);
        assert_eq!(series.points[1].value, 176.0);
        assert_eq!(series.points[2].value, 174.0);
        // Sequential x indices, not raw bucket numbers (31st is bucket 4).
        assert_eq!(series.points[2].x_index, 2);
    }

    #[test]
    fn axis_range_pads_and_floors() {
        let points = [
            ChartPoint {
                x_index: 0,
                value: 180.0,
            },
            ChartPoint {
                x_index: 2,
                value: 178.0,
            },
        ];
        let range = axis_range(&points).unwrap();
        assert_eq!(range.min, 173.0);
        assert_eq!(range.max, 185.0);
    }

    #[test]
    fn axis_range_single_point_spans_ten_units() {
        let points = [ChartPoint {
            x_index: 0,
            value: 150.0,
        }];
        let range = axis_range(&points).unwrap();
        // floor(150)-5 = 145, 150+5 = 155: span 10 exactly, kept as-is.
        assert_eq!(range.min, 145.0);
        assert_eq!(range.max, 155.0);
    }

    #[test]
    fn axis_range_recenters_after_zero_clamp() {
        // floor(2)-5 clamps to 0, span 7 < 10: recentered around 3.5.
        let points = [ChartPoint {
            x_index: 0,
            value: 2.0,
        }];
        let range = axis_range(&points).unwrap();
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 8.5);
    }

    #[test]
    fn axis_range_is_none_without_points() {
        assert!(axis_range(&[]).is_none());
    }
}
