use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub total_weight: f64,
    pub total_sets: i64,
    pub max_weight: f64,
    pub exercise_count: i64,
}

/// One row of the weekly heatmap.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayTotal {
    pub day_name: String,
    pub date: NaiveDate,
    pub total_weight: f64,
    pub total_sets: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub value: f64,
}

/// A sample of the quarterly trend. `max_weights` is keyed by exercise id.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyPoint {
    pub date: NaiveDate,
    pub label: String,
    pub max_weights: BTreeMap<String, f64>,
    pub frequency: usize,
    pub progress: i32,
}
