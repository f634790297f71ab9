use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Deserializer, Serialize};

use super::FromSqliteRow;
use crate::dates::{parse_timestamp, Bound};
use crate::error::{AppError, Result};

/// Placeholder shown when a workout references an exercise that no longer exists.
pub const UNKNOWN_EXERCISE_NAME: &str = "Unknown exercise";

/// Deserialize an optional number from a form field.
/// Handles empty strings by returning None instead of failing.
fn deserialize_optional_number<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub exercise_id: String,
    pub weight: f64,
    pub reps: i32,
    pub date: DateTime<Utc>,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutWithExercise {
    pub id: String,
    pub exercise_id: String,
    pub exercise_name: String,
    pub category: Option<String>,
    pub weight: f64,
    pub reps: i32,
    pub date: DateTime<Utc>,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for WorkoutWithExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let exercise_name: Option<String> = row.get("exercise_name")?;
        Ok(Self {
            id: row.get("id")?,
            exercise_id: row.get("exercise_id")?,
            exercise_name: exercise_name.unwrap_or_else(|| UNKNOWN_EXERCISE_NAME.to_string()),
            category: row.get("category")?,
            weight: row.get("weight")?,
            reps: row.get("reps")?,
            date: row.get("date")?,
            user_id: row.get("user_id")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// JSON request body for logging a set.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkout {
    pub exercise: Option<String>,
    pub weight: Option<f64>,
    pub reps: Option<i64>,
    pub date: Option<String>,
    pub user_id: Option<String>,
}

/// Form submission from the dashboard's add-set form.
#[derive(Debug, Deserialize)]
pub struct WorkoutForm {
    #[serde(default)]
    pub exercise: String,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub reps: Option<i64>,
}

impl From<WorkoutForm> for CreateWorkout {
    fn from(form: WorkoutForm) -> Self {
        Self {
            exercise: Some(form.exercise),
            weight: form.weight,
            reps: form.reps,
            date: None,
            user_id: None,
        }
    }
}

/// A validated set, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub exercise_id: String,
    pub weight: f64,
    pub reps: i32,
    pub date: DateTime<Utc>,
    pub user_id: Option<String>,
}

impl CreateWorkout {
    /// Checks required fields and value ranges. `now` is used when no date is given.
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewWorkout> {
        let exercise_id = self
            .exercise
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let (Some(exercise_id), Some(weight), Some(reps)) = (exercise_id, self.weight, self.reps)
        else {
            return Err(AppError::BadRequest(
                "Missing required fields (exercise, weight, reps)".to_string(),
            ));
        };

        if !weight.is_finite() || weight < 0.0 {
            return Err(AppError::Validation(
                "Weight must be a non-negative number".to_string(),
            ));
        }

        let reps = i32::try_from(reps)
            .ok()
            .filter(|r| *r >= 1)
            .ok_or_else(|| AppError::Validation("Reps must be at least 1".to_string()))?;

        let date = match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => parse_timestamp(raw, Bound::Start)
                .ok_or_else(|| AppError::BadRequest("Invalid date format".to_string()))?,
            None => now,
        };

        Ok(NewWorkout {
            exercise_id,
            weight,
            reps,
            date,
            user_id: self.user_id.filter(|u| !u.trim().is_empty()),
        })
    }
}
