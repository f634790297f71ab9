//! Fixed-window aggregation over fetched workout records.
//!
//! Every function takes `today` explicitly; handlers pass the current UTC day
//! or a `?date=` override.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::models::exercise::HEADLINE_EXERCISES;
use crate::models::{DayTotal, MonthlyBucket, QuarterlyPoint, WorkoutWithExercise};

pub const WEEK_DAYS: i64 = 7;
pub const QUARTER_DAYS: i64 = 90;
pub const QUARTER_STEP_DAYS: usize = 10;
pub const QUARTER_HALF_WINDOW_DAYS: i64 = 5;
pub const STREAK_LOOKBACK_DAYS: i64 = 30;
pub const PROGRESS_CAP_PERCENT: i32 = 30;

/// How a set contributes to "total weight".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalWeightMode {
    /// Plain sum of the weight column.
    #[default]
    Sum,
    /// Sum of weight × reps (training volume).
    Volume,
}

impl TotalWeightMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TotalWeightMode::Sum => "sum",
            TotalWeightMode::Volume => "volume",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Some(TotalWeightMode::Sum),
            "volume" => Some(TotalWeightMode::Volume),
            _ => None,
        }
    }

    /// SQL expression summed by the daily stats query.
    pub fn sql_expr(&self) -> &'static str {
        match self {
            TotalWeightMode::Sum => "weight",
            TotalWeightMode::Volume => "weight * reps",
        }
    }

    pub fn contribution(&self, workout: &WorkoutWithExercise) -> f64 {
        match self {
            TotalWeightMode::Sum => workout.weight,
            TotalWeightMode::Volume => workout.weight * f64::from(workout.reps),
        }
    }
}

fn total_weight<'a, I>(workouts: I, mode: TotalWeightMode) -> f64
where
    I: IntoIterator<Item = &'a WorkoutWithExercise>,
{
    workouts.into_iter().map(|w| mode.contribution(w)).sum()
}

fn within(workout: &WorkoutWithExercise, start: NaiveDate, end: NaiveDate) -> bool {
    let day = workout.date.date_naive();
    day >= start && day <= end
}

/// The seven days ending at `today`, inclusive.
pub fn week_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(WEEK_DAYS - 1), today)
}

pub fn weekly_heatmap(
    workouts: &[WorkoutWithExercise],
    today: NaiveDate,
    mode: TotalWeightMode,
) -> Vec<DayTotal> {
    (0..WEEK_DAYS)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            let day_workouts: Vec<_> = workouts
                .iter()
                .filter(|w| w.date.date_naive() == day)
                .collect();

            DayTotal {
                day_name: day.format("%a").to_string(),
                date: day,
                total_weight: total_weight(day_workouts.iter().copied(), mode).max(0.0),
                total_sets: day_workouts.len(),
            }
        })
        .collect()
}

/// First and last day of the calendar month containing `today`.
pub fn month_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today - Duration::days(i64::from(today.day0()));
    let last = first + Months::new(1) - Duration::days(1);
    (first, last)
}

/// Splits the month into 7-day buckets starting on the 1st; the last bucket
/// is clipped to the end of the month.
pub fn monthly_buckets(
    workouts: &[WorkoutWithExercise],
    today: NaiveDate,
    mode: TotalWeightMode,
) -> Vec<MonthlyBucket> {
    let (first, last) = month_range(today);
    let weeks = i64::from(last.day().div_ceil(WEEK_DAYS as u32));

    (0..weeks)
        .map(|i| {
            let start = first + Duration::days(i * WEEK_DAYS);
            let end = (start + Duration::days(WEEK_DAYS - 1)).min(last);
            let value = total_weight(workouts.iter().filter(|w| within(w, start, end)), mode);

            MonthlyBucket {
                name: format!("Week {}", i + 1),
                start,
                end,
                value,
            }
        })
        .collect()
}

/// The 90 days ending at `today`, inclusive.
pub fn quarter_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(QUARTER_DAYS), today)
}

/// Samples every ten days across the quarter. Each sample covers the ±5 day
/// window around its date; only workouts inside `quarter_range` count.
pub fn quarterly_trend(workouts: &[WorkoutWithExercise], today: NaiveDate) -> Vec<QuarterlyPoint> {
    let (range_start, range_end) = quarter_range(today);
    let in_quarter: Vec<&WorkoutWithExercise> = workouts
        .iter()
        .filter(|w| within(w, range_start, range_end))
        .collect();

    (0..=QUARTER_DAYS)
        .rev()
        .step_by(QUARTER_STEP_DAYS)
        .map(|offset| {
            let date = today - Duration::days(offset);
            let window_start = date - Duration::days(QUARTER_HALF_WINDOW_DAYS);
            let window_end = date + Duration::days(QUARTER_HALF_WINDOW_DAYS);

            let period: Vec<&WorkoutWithExercise> = in_quarter
                .iter()
                .copied()
                .filter(|w| within(w, window_start, window_end))
                .collect();

            let mut max_weights: BTreeMap<String, f64> = BTreeMap::new();
            for w in &period {
                let entry = max_weights.entry(w.exercise_id.clone()).or_insert(w.weight);
                *entry = entry.max(w.weight);
            }
            for id in HEADLINE_EXERCISES {
                max_weights.entry((*id).to_string()).or_insert(0.0);
            }

            QuarterlyPoint {
                date,
                label: date.format("%b %-d").to_string(),
                max_weights,
                frequency: period.len(),
                progress: progress_percentage(&period),
            }
        })
        .collect()
}

/// Percentage change between the average weight of the later half of the
/// sets and the earlier half, rounded half-up and capped at ±30.
pub fn progress_percentage(workouts: &[&WorkoutWithExercise]) -> i32 {
    if workouts.len() < 2 {
        return 0;
    }

    let mut sorted = workouts.to_vec();
    sorted.sort_by_key(|w| w.date);

    let (first_half, second_half) = sorted.split_at(sorted.len() / 2);
    let average = |half: &[&WorkoutWithExercise]| {
        half.iter().map(|w| w.weight).sum::<f64>() / half.len() as f64
    };

    let first_avg = average(first_half);
    if first_avg == 0.0 {
        return 0;
    }

    let change = (average(second_half) - first_avg) / first_avg * 100.0;
    let rounded = (change + 0.5).floor() as i32;
    rounded.clamp(-PROGRESS_CAP_PERCENT, PROGRESS_CAP_PERCENT)
}

/// Days in a row with at least one set, counting back from `today` and
/// looking at most 30 days.
pub fn consecutive_days(workouts: &[WorkoutWithExercise], today: NaiveDate) -> u32 {
    let active: HashSet<NaiveDate> = workouts.iter().map(|w| w.date.date_naive()).collect();

    (0..STREAK_LOOKBACK_DAYS)
        .take_while(|offset| active.contains(&(today - Duration::days(*offset))))
        .count() as u32
}

/// Days of history `consecutive_days` can look at.
pub fn streak_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(STREAK_LOOKBACK_DAYS - 1), today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn set(exercise: &str, weight: f64, reps: i32, day: NaiveDate, hour: u32) -> WorkoutWithExercise {
        let at = Utc
            .with_ymd_and_hms(day.year(), day.month(), day.day(), hour, 0, 0)
            .unwrap();
        WorkoutWithExercise {
            id: format!("{exercise}-{day}-{hour}"),
            exercise_id: exercise.to_string(),
            exercise_name: exercise.to_string(),
            category: None,
            weight,
            reps,
            date: at,
            user_id: None,
            created_at: at,
        }
    }

    #[test]
    fn test_total_weight_mode_parse() {
        assert_eq!(TotalWeightMode::parse("sum"), Some(TotalWeightMode::Sum));
        assert_eq!(TotalWeightMode::parse(" Volume "), Some(TotalWeightMode::Volume));
        assert_eq!(TotalWeightMode::parse("tonnage"), None);
        assert_eq!(TotalWeightMode::default(), TotalWeightMode::Sum);
        assert_eq!(TotalWeightMode::Volume.as_str(), "volume");
    }

    #[test]
    fn test_weekly_heatmap_covers_seven_days_oldest_first() {
        let today = date(2024, 5, 15);
        let workouts = vec![
            set("bench-press", 100.0, 5, today, 9),
            set("squat", 80.0, 5, today, 10),
            set("deadlift", 140.0, 3, date(2024, 5, 10), 9),
            // Outside the window
            set("deadlift", 500.0, 1, date(2024, 5, 8), 9),
        ];

        let week = weekly_heatmap(&workouts, today, TotalWeightMode::Sum);

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, date(2024, 5, 9));
        assert_eq!(week[6].date, today);
        assert_eq!(week[6].day_name, "Wed");
        assert_eq!(week[6].total_weight, 180.0);
        assert_eq!(week[6].total_sets, 2);
        assert_eq!(week[1].total_weight, 140.0);
        assert_eq!(week.iter().map(|d| d.total_sets).sum::<usize>(), 3);
    }

    #[test]
    fn test_weekly_heatmap_volume_mode() {
        let today = date(2024, 5, 15);
        let workouts = vec![
            set("bench-press", 100.0, 5, today, 9),
            set("squat", 80.0, 5, today, 10),
        ];

        let week = weekly_heatmap(&workouts, today, TotalWeightMode::Volume);

        assert_eq!(week[6].total_weight, 900.0);
    }

    #[test]
    fn test_month_range() {
        assert_eq!(month_range(date(2024, 2, 14)), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(month_range(date(2023, 12, 31)), (date(2023, 12, 1), date(2023, 12, 31)));
    }

    #[test]
    fn test_monthly_buckets_split_and_clip() {
        let today = date(2024, 1, 20);
        let workouts = vec![
            set("squat", 100.0, 5, date(2024, 1, 1), 8),
            set("squat", 50.0, 5, date(2024, 1, 7), 23),
            set("squat", 60.0, 5, date(2024, 1, 8), 8),
            set("squat", 70.0, 5, date(2024, 1, 31), 20),
            // Previous month is ignored
            set("squat", 999.0, 5, date(2023, 12, 31), 20),
        ];

        let buckets = monthly_buckets(&workouts, today, TotalWeightMode::Sum);

        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[0].name, "Week 1");
        assert_eq!(buckets[0].value, 150.0);
        assert_eq!(buckets[1].value, 60.0);
        assert_eq!(buckets[4].start, date(2024, 1, 29));
        assert_eq!(buckets[4].end, date(2024, 1, 31));
        assert_eq!(buckets[4].value, 70.0);
    }

    #[test]
    fn test_monthly_buckets_february_has_four_weeks() {
        let buckets = monthly_buckets(&[], date(2023, 2, 10), TotalWeightMode::Sum);

        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[3].end, date(2023, 2, 28));
        assert!(buckets.iter().all(|b| b.value == 0.0));
    }

    #[test]
    fn test_quarterly_trend_shape() {
        let today = date(2024, 6, 30);

        let points = quarterly_trend(&[], today);

        assert_eq!(points.len(), 10);
        assert_eq!(points[0].date, date(2024, 4, 1));
        assert_eq!(points[9].date, today);
        assert_eq!(points[9].label, "Jun 30");
        for point in &points {
            assert_eq!(point.frequency, 0);
            assert_eq!(point.progress, 0);
            for id in HEADLINE_EXERCISES {
                assert_eq!(point.max_weights.get(*id), Some(&0.0));
            }
        }
    }

    #[test]
    fn test_quarterly_trend_windows() {
        let today = date(2024, 6, 30);
        let workouts = vec![
            set("squat", 100.0, 5, date(2024, 6, 26), 9),
            set("squat", 120.0, 5, date(2024, 6, 29), 9),
            set("leg-press", 200.0, 10, date(2024, 6, 30), 9),
            // Falls in the Jun 20 window (Jun 15..=Jun 25)
            set("bench-press", 80.0, 5, date(2024, 6, 24), 9),
        ];

        let points = quarterly_trend(&workouts, today);
        let last = &points[9];
        let previous = &points[8];

        assert_eq!(last.frequency, 3);
        assert_eq!(last.max_weights["squat"], 120.0);
        assert_eq!(last.max_weights["leg-press"], 200.0);
        assert_eq!(last.max_weights["bench-press"], 0.0);

        assert_eq!(previous.date, date(2024, 6, 20));
        assert_eq!(previous.frequency, 1);
        assert_eq!(previous.max_weights["bench-press"], 80.0);
    }

    #[test]
    fn test_quarterly_trend_ignores_workouts_outside_quarter() {
        let today = date(2024, 6, 30);
        // Within the first window (Mar 27..=Apr 6) but before the quarter starts on Apr 1
        let workouts = vec![set("squat", 100.0, 5, date(2024, 3, 29), 9)];

        let points = quarterly_trend(&workouts, today);

        assert_eq!(points[0].frequency, 0);
    }

    #[test]
    fn test_progress_percentage() {
        let day = date(2024, 6, 1);
        let a = set("squat", 100.0, 5, day, 8);
        let b = set("squat", 100.0, 5, day, 9);
        let c = set("squat", 110.0, 5, day, 10);
        let d = set("squat", 110.0, 5, day, 11);

        // Out of order on purpose: sorting by date happens inside
        assert_eq!(progress_percentage(&[&d, &a, &c, &b]), 10);
        assert_eq!(progress_percentage(&[&a]), 0);
        assert_eq!(progress_percentage(&[]), 0);
    }

    #[test]
    fn test_progress_percentage_is_capped_and_rounded() {
        let day = date(2024, 6, 1);
        let light = set("squat", 50.0, 5, day, 8);
        let heavy = set("squat", 100.0, 5, day, 9);
        assert_eq!(progress_percentage(&[&light, &heavy]), 30);

        let drop_first = set("squat", 100.0, 5, day, 8);
        let drop_second = set("squat", 40.0, 5, day, 9);
        assert_eq!(progress_percentage(&[&drop_first, &drop_second]), -30);

        // 200 -> 201 is +0.5%, rounds up
        let base = set("squat", 200.0, 5, day, 8);
        let bump = set("squat", 201.0, 5, day, 9);
        assert_eq!(progress_percentage(&[&base, &bump]), 1);

        let zero = set("pull-up", 0.0, 10, day, 8);
        let loaded = set("pull-up", 10.0, 10, day, 9);
        assert_eq!(progress_percentage(&[&zero, &loaded]), 0);
    }

    #[test]
    fn test_consecutive_days() {
        let today = date(2024, 6, 30);
        let workouts = vec![
            set("squat", 100.0, 5, today, 7),
            set("squat", 100.0, 5, today, 8),
            set("squat", 100.0, 5, date(2024, 6, 29), 8),
            set("squat", 100.0, 5, date(2024, 6, 28), 8),
            // Gap on the 27th
            set("squat", 100.0, 5, date(2024, 6, 26), 8),
        ];

        assert_eq!(consecutive_days(&workouts, today), 3);
        assert_eq!(consecutive_days(&workouts, date(2024, 7, 1)), 0);
    }

    #[test]
    fn test_consecutive_days_caps_at_lookback() {
        let today = date(2024, 6, 30);
        let workouts: Vec<_> = (0..45)
            .map(|i| set("squat", 100.0, 5, today - Duration::days(i), 8))
            .collect();

        assert_eq!(consecutive_days(&workouts, today), 30);
        assert_eq!(streak_range(today).0, date(2024, 6, 1));
    }
}
