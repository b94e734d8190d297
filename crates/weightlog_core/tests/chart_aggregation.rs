use chrono::NaiveDate;
use weightlog_core::{aggregate, axis_range, PeriodKind, WeightEntry};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(y: i32, m: u32, d: u32, weight: f64) -> WeightEntry {
    WeightEntry::new(date(y, m, d), weight)
}

#[test]
fn week_worked_example_two_points_seven_labels() {
    let entries = vec![entry(2024, 1, 1, 180.0), entry(2024, 1, 3, 178.0)];
    let series = aggregate(
        PeriodKind::Week,
        &entries,
        date(2024, 1, 1),
        date(2024, 1, 7),
    );

    assert_eq!(series.labels.len(), 7);
    assert_eq!(series.labels[0], "Mon\nJan 01");
    assert_eq!(series.labels[6], "Sun\nJan 07");

    assert_eq!(series.points.len(), 2);
    assert_eq!(series.points[0].x_index, 0);
    assert_eq!(series.points[0].value, 180.0);
    assert_eq!(series.points[1].x_index, 2);
    assert_eq!(series.points[1].value, 178.0);

    let range = axis_range(&series.points).unwrap();
    assert_eq!(range.min, 173.0);
    assert_eq!(range.max, 185.0);
}

#[test]
fn week_always_emits_seven_labels_regardless_of_data_volume() {
    let one = vec![entry(2024, 1, 4, 181.0)];
    let series = aggregate(PeriodKind::Week, &one, date(2024, 1, 1), date(2024, 1, 7));
    assert_eq!(series.labels.len(), 7);
    assert_eq!(series.points.len(), 1);

    let full: Vec<_> = (1..=7).map(|d| entry(2024, 1, d, 180.0)).collect();
    let series = aggregate(PeriodKind::Week, &full, date(2024, 1, 1), date(2024, 1, 7));
    assert_eq!(series.labels.len(), 7);
    assert_eq!(series.points.len(), 7);
}

#[test]
fn week_handles_unsorted_input() {
    let entries = vec![
        entry(2024, 1, 5, 177.0),
        entry(2024, 1, 1, 180.0),
        entry(2024, 1, 3, 178.0),
    ];
    let series = aggregate(
        PeriodKind::Week,
        &entries,
        date(2024, 1, 1),
        date(2024, 1, 7),
    );

    let indices: Vec<_> = series.points.iter().map(|p| p.x_index).collect();
    assert_eq!(indices, vec![0, 2, 4]);
}

#[test]
fn month_points_match_non_empty_buckets_and_never_exceed_five() {
    // Entries every day of a 31-day month: 5 buckets (7+7+7+7+3 days).
    let entries: Vec<_> = (1..=31).map(|d| entry(2024, 1, d, 180.0)).collect();
    let series = aggregate(
        PeriodKind::Month,
        &entries,
        date(2024, 1, 1),
        date(2024, 1, 31),
    );

    assert_eq!(series.points.len(), 5);
    assert_eq!(series.labels.len(), 5);
    assert_eq!(series.labels[0], "Week 1");
    assert_eq!(series.labels[4], "Week 5");

    // Sparse month: only two buckets survive, re-indexed sequentially.
    let sparse = vec![entry(2024, 1, 2, 180.0), entry(2024, 1, 30, 176.0)];
    let series = aggregate(
        PeriodKind::Month,
        &sparse,
        date(2024, 1, 1),
        date(2024, 1, 31),
    );
    assert_eq!(series.points.len(), 2);
    assert_eq!(series.labels, vec!["Week 1", "Week 2"]);
    assert_eq!(series.points[0].x_index, 0);
    assert_eq!(series.points[1].x_index, 1);
}

#[test]
fn month_bucket_value_is_arithmetic_mean() {
    let entries = vec![
        entry(2024, 1, 1, 180.0),
        entry(2024, 1, 2, 178.0),
        entry(2024, 1, 3, 176.0),
    ];
    let series = aggregate(
        PeriodKind::Month,
        &entries,
        date(2024, 1, 1),
        date(2024, 1, 31),
    );

    assert_eq!(series.points.len(), 1);
    assert_eq!(series.points[0].value, 178.0);
}

#[test]
fn year_worked_example_march_and_july() {
    let entries = vec![
        entry(2024, 3, 5, 171.0),
        entry(2024, 3, 20, 169.0),
        entry(2024, 7, 10, 165.0),
    ];
    let series = aggregate(
        PeriodKind::Year,
        &entries,
        date(2024, 1, 1),
        date(2024, 12, 31),
    );

    assert_eq!(series.labels.len(), 12);
    assert_eq!(series.labels[0], "Jan");
    assert_eq!(series.labels[11], "Dec");

    assert_eq!(series.points.len(), 2);
    assert_eq!(series.points[0].x_index, 2);
    assert_eq!(series.points[0].value, 170.0);
    assert_eq!(series.points[1].x_index, 6);
    assert_eq!(series.points[1].value, 165.0);
}

#[test]
fn empty_input_yields_no_data_and_automatic_axis() {
    for kind in [PeriodKind::Week, PeriodKind::Month, PeriodKind::Year] {
        let series = aggregate(kind, &[], date(2024, 1, 1), date(2024, 1, 7));
        assert!(series.is_empty());
        assert!(series.labels.is_empty());
        assert!(axis_range(&series.points).is_none());
    }
}

#[test]
fn aggregation_is_idempotent() {
    let entries = vec![
        entry(2024, 1, 1, 180.0),
        entry(2024, 1, 1, 185.0),
        entry(2024, 1, 3, 178.0),
        entry(2024, 1, 6, 177.2),
    ];

    for kind in [PeriodKind::Week, PeriodKind::Month, PeriodKind::Year] {
        let first = aggregate(kind, &entries, date(2024, 1, 1), date(2024, 1, 7));
        let second = aggregate(kind, &entries, date(2024, 1, 1), date(2024, 1, 7));
        assert_eq!(first, second);
    }
}

#[test]
fn axis_range_properties_hold_for_realistic_weights() {
    let entries: Vec<_> = (1..=7)
        .map(|d| entry(2024, 1, d, 150.0 + d as f64))
        .collect();
    let series = aggregate(
        PeriodKind::Week,
        &entries,
        date(2024, 1, 1),
        date(2024, 1, 7),
    );
    let range = axis_range(&series.points).unwrap();

    assert!(range.min >= 0.0);
    assert!(range.max - range.min >= 10.0);
    assert!(range.min <= 151.0);
    assert!(range.max >= 157.0);
}
