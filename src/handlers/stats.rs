use askama::Template;
use axum::{
    extract::{Query, State},
    response::Response,
    Json,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

use super::{render, DateQuery};
use crate::content::streak_quote;
use crate::error::Result;
use crate::models::exercise::HEADLINE_EXERCISES;
use crate::models::{DayTotal, MonthlyBucket, QuarterlyPoint, WorkoutWithExercise};
use crate::repositories::WorkoutRepository;
use crate::stats::{
    consecutive_days, month_range, monthly_buckets, quarter_range, quarterly_trend, streak_range,
    week_range, weekly_heatmap, TotalWeightMode,
};

const HEATMAP_LEVELS: f64 = 4.0;

#[derive(Clone)]
pub struct StatsState {
    pub workout_repo: WorkoutRepository,
    pub total_weight_mode: TotalWeightMode,
}

struct HeatCell {
    day_name: String,
    date: String,
    total_weight: f64,
    total_sets: usize,
    level: u8,
}

struct BucketBar {
    name: String,
    range: String,
    value: f64,
    percent: u32,
}

struct TrendRow {
    label: String,
    weights: Vec<f64>,
    frequency: usize,
    progress: i32,
}

#[derive(Template)]
#[template(path = "stats/weekly.html")]
struct WeeklyTemplate {
    weight_mode: &'static str,
    days: Vec<HeatCell>,
    buckets: Vec<BucketBar>,
    month: String,
}

#[derive(Template)]
#[template(path = "stats/quarterly.html")]
struct QuarterlyTemplate {
    headline: &'static [&'static str],
    rows: Vec<TrendRow>,
}

impl StatsState {
    async fn fetch_days(&self, first: NaiveDate, last: NaiveDate) -> Result<Vec<WorkoutWithExercise>> {
        self.workout_repo.find_by_days(first, last).await
    }

    async fn week(&self, today: NaiveDate) -> Result<Vec<DayTotal>> {
        let (first, last) = week_range(today);
        let workouts = self.fetch_days(first, last).await?;
        Ok(weekly_heatmap(&workouts, today, self.total_weight_mode))
    }

    async fn month(&self, today: NaiveDate) -> Result<Vec<MonthlyBucket>> {
        let (first, last) = month_range(today);
        let workouts = self.fetch_days(first, last).await?;
        Ok(monthly_buckets(&workouts, today, self.total_weight_mode))
    }

    async fn quarter(&self, today: NaiveDate) -> Result<Vec<QuarterlyPoint>> {
        let (first, last) = quarter_range(today);
        let workouts = self.fetch_days(first, last).await?;
        Ok(quarterly_trend(&workouts, today))
    }

    async fn streak(&self, today: NaiveDate) -> Result<u32> {
        let (first, last) = streak_range(today);
        let workouts = self.fetch_days(first, last).await?;
        Ok(consecutive_days(&workouts, today))
    }
}

pub async fn weekly(
    State(state): State<StatsState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>> {
    let days = state.week(query.day()?).await?;

    Ok(Json(json!({ "days": days })))
}

pub async fn monthly(
    State(state): State<StatsState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>> {
    let weeks = state.month(query.day()?).await?;

    Ok(Json(json!({ "weeks": weeks })))
}

pub async fn quarterly(
    State(state): State<StatsState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>> {
    let points = state.quarter(query.day()?).await?;

    Ok(Json(json!({ "points": points })))
}

pub async fn streak(
    State(state): State<StatsState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>> {
    let days = state.streak(query.day()?).await?;

    Ok(Json(json!({
        "consecutiveDays": days,
        "quote": streak_quote(days),
    })))
}

fn heat_level(total_weight: f64, max: f64) -> u8 {
    if total_weight <= 0.0 || max <= 0.0 {
        return 0;
    }
    ((total_weight / max) * HEATMAP_LEVELS).ceil().clamp(1.0, HEATMAP_LEVELS) as u8
}

pub async fn weekly_page(
    State(state): State<StatsState>,
    Query(query): Query<DateQuery>,
) -> Result<Response> {
    let today = query.day()?;
    let week = state.week(today).await?;
    let month = state.month(today).await?;

    let week_max = week.iter().map(|d| d.total_weight).fold(0.0, f64::max);
    let days = week
        .into_iter()
        .map(|d| HeatCell {
            level: heat_level(d.total_weight, week_max),
            day_name: d.day_name,
            date: d.date.format("%b %-d").to_string(),
            total_weight: d.total_weight,
            total_sets: d.total_sets,
        })
        .collect();

    let month_max = month.iter().map(|b| b.value).fold(0.0, f64::max);
    let buckets = month
        .into_iter()
        .map(|b| BucketBar {
            percent: if month_max > 0.0 {
                (b.value / month_max * 100.0).round() as u32
            } else {
                0
            },
            range: format!("{} - {}", b.start.format("%b %-d"), b.end.format("%b %-d")),
            name: b.name,
            value: b.value,
        })
        .collect();

    let template = WeeklyTemplate {
        weight_mode: state.total_weight_mode.as_str(),
        days,
        buckets,
        month: today.format("%B %Y").to_string(),
    };

    render(&template)
}

pub async fn quarterly_page(
    State(state): State<StatsState>,
    Query(query): Query<DateQuery>,
) -> Result<Response> {
    let points = state.quarter(query.day()?).await?;

    let rows = points
        .into_iter()
        .map(|p| TrendRow {
            weights: HEADLINE_EXERCISES
                .iter()
                .map(|id| p.max_weights.get(*id).copied().unwrap_or(0.0))
                .collect(),
            label: p.label,
            frequency: p.frequency,
            progress: p.progress,
        })
        .collect();

    let template = QuarterlyTemplate {
        headline: HEADLINE_EXERCISES,
        rows,
    };

    render(&template)
}
