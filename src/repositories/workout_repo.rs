use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::dates::{end_of_day, start_of_day};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{DailyStats, FromSqliteRow, NewWorkout, Workout, WorkoutWithExercise};
use crate::stats::TotalWeightMode;

const SELECT_WITH_EXERCISE: &str = "SELECT w.id, w.exercise_id, e.name AS exercise_name,
        e.category AS category, w.weight, w.reps, w.date, w.user_id, w.created_at
     FROM workouts w
     LEFT JOIN exercises e ON w.exercise_id = e.id";

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewWorkout) -> Result<Workout> {
        let workout = Workout {
            id: Uuid::new_v4().to_string(),
            exercise_id: new.exercise_id,
            weight: new.weight,
            reps: new.reps,
            date: new.date,
            user_id: new.user_id,
            created_at: Utc::now(),
        };
        let workout_clone = workout.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO workouts (id, exercise_id, weight, reps, date, user_id, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    workout_clone.id,
                    workout_clone.exercise_id,
                    workout_clone.weight,
                    workout_clone.reps,
                    workout_clone.date,
                    workout_clone.user_id,
                    workout_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        tracing::debug!(
            "Logged {} x{} @ {}kg for {}",
            workout.exercise_id,
            workout.reps,
            workout.weight,
            workout.date
        );

        Ok(workout)
    }

    /// Workouts with `start <= date <= end`, newest first. A missing bound
    /// leaves that side open.
    pub async fn find_by_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<WorkoutWithExercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(&format!(
                "{SELECT_WITH_EXERCISE}
                 WHERE (:start IS NULL OR w.date >= :start)
                   AND (:end IS NULL OR w.date <= :end)
                 ORDER BY w.date DESC, w.created_at DESC"
            ))?;
            let workouts = stmt
                .query_map(
                    rusqlite::named_params! { ":start": start, ":end": end },
                    WorkoutWithExercise::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(workouts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Workouts on the UTC days `first..=last`.
    pub async fn find_by_days(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<WorkoutWithExercise>> {
        self.find_by_range(Some(start_of_day(first)), Some(end_of_day(last)))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM workouts WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    // Statistics
    pub async fn daily_stats(&self, day: NaiveDate, mode: TotalWeightMode) -> Result<DailyStats> {
        let pool = self.pool.clone();
        let start = start_of_day(day);
        let end = end_of_day(day);
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let sql = format!(
                "SELECT COALESCE(SUM({}), 0.0), COUNT(*), COALESCE(MAX(weight), 0.0),
                        COUNT(DISTINCT exercise_id)
                 FROM workouts
                 WHERE date >= ? AND date <= ?",
                mode.sql_expr()
            );
            let stats = conn.query_row(&sql, rusqlite::params![start, end], |row| {
                Ok(DailyStats {
                    total_weight: row.get(0)?,
                    total_sets: row.get(1)?,
                    max_weight: row.get(2)?,
                    exercise_count: row.get(3)?,
                })
            })?;
            Ok(stats)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
