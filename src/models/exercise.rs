use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            category: row.get("category")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Request body for creating an exercise. Fields are optional so that a
/// missing one surfaces as a 400 with our error envelope rather than a
/// deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreateExercise {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateExercise {
    pub name: Option<String>,
    pub category: Option<String>,
}

/// A catalogue entry inserted into an empty database.
#[derive(Debug, Clone, Copy)]
pub struct DefaultExercise {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

pub const DEFAULT_EXERCISES: &[DefaultExercise] = &[
    DefaultExercise { id: "bench-press", name: "Bench Press", category: "Chest" },
    DefaultExercise { id: "squat", name: "Squat", category: "Legs" },
    DefaultExercise { id: "deadlift", name: "Deadlift", category: "Back" },
    DefaultExercise { id: "pull-up", name: "Pull-up", category: "Back" },
    DefaultExercise { id: "shoulder-press", name: "Shoulder Press", category: "Shoulders" },
    DefaultExercise { id: "barbell-row", name: "Barbell Row", category: "Back" },
    DefaultExercise { id: "leg-press", name: "Leg Press", category: "Legs" },
    DefaultExercise { id: "bicep-curl", name: "Bicep Curl", category: "Arms" },
];

/// The lifts the quarterly trend always reports, even with no data.
pub const HEADLINE_EXERCISES: &[&str] = &["bench-press", "squat", "deadlift", "pull-up"];
