//! Simulated entry generation for demos and empty databases.
//!
//! # Responsibility
//! - Produce a realistic-looking run of daily entries: gentle downward
//!   trend, daily fluctuation, occasionally missing metrics.
//!
//! # Invariants
//! - Generated weights never drop below the 100 lbs floor.
//! - Every generated entry passes `WeightEntry::validate()`.

use crate::model::entry::{Mood, WeightEntry};
use chrono::{Datelike, Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

const WEIGHT_FLOOR_LBS: f64 = 100.0;
const METRIC_PRESENT_PROBABILITY: f64 = 0.9;

/// Shape of a simulated data run.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoDataPlan {
    /// First generated day.
    pub start: NaiveDate,
    /// Number of consecutive days to generate.
    pub days: u32,
    /// Weight on day one, before fluctuation.
    pub initial_weight_lbs: f64,
    /// Maximum daily up/down swing.
    pub daily_fluctuation_lbs: f64,
    /// Trend applied over each month, spread across its days. Negative
    /// values simulate gradual loss.
    pub monthly_trend_lbs: f64,
}

impl DemoDataPlan {
    /// One full calendar year starting January 1st, with the defaults the
    /// demo button has always used: 180 lbs start, +/-2 lbs swing, half a
    /// pound lost per month.
    pub fn calendar_year(year: i32) -> Self {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).expect("January 1st always exists");
        let days = if start.leap_year() { 366 } else { 365 };
        Self {
            start,
            days,
            initial_weight_lbs: 180.0,
            daily_fluctuation_lbs: 2.0,
            monthly_trend_lbs: -0.5,
        }
    }
}

/// Generates one entry per day following the plan.
pub fn generate_demo_entries(plan: &DemoDataPlan, rng: &mut impl Rng) -> Vec<WeightEntry> {
    let mut entries = Vec::with_capacity(plan.days as usize);
    let mut current_weight = plan.initial_weight_lbs;

    for offset in 0..plan.days {
        let date = plan.start + Duration::days(i64::from(offset));

        // Spread the monthly trend across the actual days of each month so
        // short months drift at the same rate as long ones.
        current_weight += plan.monthly_trend_lbs / f64::from(days_in_month(date));

        let swing = plan.daily_fluctuation_lbs;
        let fluctuation = rng.gen_range(-swing..=swing);
        let daily_weight = (current_weight + fluctuation).max(WEIGHT_FLOOR_LBS);

        let mut entry = WeightEntry::new(date, daily_weight);
        entry.notes = Some(format!("Generated entry: {date}"));
        if rng.gen_bool(METRIC_PRESENT_PROBABILITY) {
            let hours = rng.gen_range(5.0..=9.0_f64);
            entry.sleep_hours = Some((hours * 10.0).round() / 10.0);
        }
        if rng.gen_bool(METRIC_PRESENT_PROBABILITY) {
            entry.steps = Some(rng.gen_range(3000..=15000));
        }
        if rng.gen_bool(METRIC_PRESENT_PROBABILITY) {
            entry.calories = Some(rng.gen_range(1500..=2500));
        }
        if rng.gen_bool(METRIC_PRESENT_PROBABILITY) {
            entry.mood = Mood::ALL.choose(rng).copied();
        }

        entries.push(entry);
    }

    entries
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first =
        NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("first of month exists");
    let next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
    .expect("first of following month exists");
    (next - first).num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::{generate_demo_entries, DemoDataPlan};
    use chrono::{Datelike, NaiveDate};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn calendar_year_plan_covers_every_day() {
        let mut rng = StdRng::seed_from_u64(7);
        let plan = DemoDataPlan::calendar_year(2024);
        let entries = generate_demo_entries(&plan, &mut rng);

        assert_eq!(entries.len(), 366);
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(
            entries.last().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        assert!(entries.iter().all(|entry| entry.date.year() == 2024));
    }

    #[test]
    fn generated_entries_pass_validation_and_respect_floor() {
        let mut rng = StdRng::seed_from_u64(42);
        let plan = DemoDataPlan {
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            days: 60,
            initial_weight_lbs: 101.0,
            daily_fluctuation_lbs: 2.0,
            monthly_trend_lbs: -40.0,
        };
        let entries = generate_demo_entries(&plan, &mut rng);

        assert_eq!(entries.len(), 60);
        for entry in &entries {
            entry.validate().unwrap();
            assert!(entry.weight_lbs >= 100.0);
            if let Some(sleep) = entry.sleep_hours {
                assert!((5.0..=9.0).contains(&sleep));
            }
        }
    }
}
