use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::DateQuery;
use crate::dates::{parse_timestamp, Bound};
use crate::error::{AppError, Result};
use crate::models::CreateWorkout;
use crate::repositories::WorkoutRepository;
use crate::stats::TotalWeightMode;

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
    pub total_weight_mode: TotalWeightMode,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn parse_bound(raw: Option<&str>, bound: Bound, field: &str) -> Result<Option<DateTime<Utc>>> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(raw) => parse_timestamp(raw, bound)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid {field}"))),
        None => Ok(None),
    }
}

impl RangeQuery {
    fn bounds(&self) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        let start = parse_bound(self.start_date.as_deref(), Bound::Start, "startDate")?;
        let end = parse_bound(self.end_date.as_deref(), Bound::End, "endDate")?;

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(AppError::BadRequest(
                    "startDate must not be after endDate".to_string(),
                ));
            }
        }

        Ok((start, end))
    }
}

pub async fn list(
    State(state): State<WorkoutsState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Value>> {
    let (start, end) = query.bounds()?;
    let workouts = state.workout_repo.find_by_range(start, end).await?;

    Ok(Json(json!({ "workouts": workouts })))
}

pub async fn create(
    State(state): State<WorkoutsState>,
    payload: std::result::Result<Json<CreateWorkout>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let Json(body) = payload?;
    let new_workout = body.validate(Utc::now())?;

    let workout = state.workout_repo.create(new_workout).await?;

    Ok((StatusCode::CREATED, Json(json!({ "workout": workout }))))
}

pub async fn delete(
    State(state): State<WorkoutsState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !state.workout_repo.delete(&id).await? {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }

    Ok(Json(json!({ "success": true })))
}

pub async fn daily_stats(
    State(state): State<WorkoutsState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>> {
    let day = query.day()?;
    let stats = state
        .workout_repo
        .daily_stats(day, state.total_weight_mode)
        .await?;

    Ok(Json(json!({ "stats": stats })))
}
