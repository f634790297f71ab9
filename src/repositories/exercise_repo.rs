use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{is_constraint_violation, AppError, Result};
use crate::models::exercise::DEFAULT_EXERCISES;
use crate::models::{Exercise, FromSqliteRow};

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM exercises WHERE id = ?")?;
            let result = stmt.query_row([&id], Exercise::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_all(&self) -> Result<Vec<Exercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM exercises ORDER BY name, id")?;
            let exercises = stmt
                .query_map([], Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Inserts a new exercise under a caller-chosen slug. A taken slug is a
    /// `Conflict`.
    pub async fn create(&self, id: &str, name: &str, category: Option<&str>) -> Result<Exercise> {
        let exercise = Exercise {
            id: id.to_string(),
            name: name.to_string(),
            category: category.map(|c| c.to_string()),
            created_at: Utc::now(),
        };
        let exercise_clone = exercise.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO exercises (id, name, category, created_at) VALUES (?, ?, ?, ?)",
                rusqlite::params![
                    exercise_clone.id,
                    exercise_clone.name,
                    exercise_clone.category,
                    exercise_clone.created_at
                ],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    AppError::Conflict(format!("Exercise '{}' already exists", exercise_clone.id))
                } else {
                    AppError::Database(e)
                }
            })?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(exercise)
    }

    /// Applies the fields that are `Some` and returns the updated row, or
    /// `None` when no exercise has this id. `category: Some(None)` clears it.
    pub async fn update(
        &self,
        id: &str,
        name: Option<&str>,
        category: Option<Option<&str>>,
    ) -> Result<Option<Exercise>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let name = name.map(|n| n.to_string());
        let set_category = category.is_some();
        let category = category.flatten().map(|c| c.to_string());
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE exercises
                 SET name = COALESCE(?, name),
                     category = CASE WHEN ? THEN ? ELSE category END
                 WHERE id = ?",
                rusqlite::params![name, set_category, category, id],
            )?;
            if rows == 0 {
                return Ok(None);
            }
            let mut stmt = conn.prepare("SELECT * FROM exercises WHERE id = ?")?;
            let result = stmt.query_row([&id], Exercise::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM exercises WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Inserts the default catalogue when the table is empty. Returns the
    /// number of rows inserted.
    pub async fn seed_defaults(&self) -> Result<usize> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let existing: i64 = tx.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
            if existing > 0 {
                tracing::debug!("Exercises already seeded ({} rows), skipping", existing);
                return Ok(0);
            }

            let now = Utc::now();
            for exercise in DEFAULT_EXERCISES {
                tx.execute(
                    "INSERT INTO exercises (id, name, category, created_at) VALUES (?, ?, ?, ?)",
                    rusqlite::params![exercise.id, exercise.name, exercise.category, now],
                )?;
            }
            tx.commit()?;

            tracing::info!("Seeded {} default exercises", DEFAULT_EXERCISES.len());
            Ok(DEFAULT_EXERCISES.len())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    #[tokio::test]
    async fn test_create_exercise() {
        let repo = ExerciseRepository::new(setup_test_db());

        let exercise = repo
            .create("bench-press", "Bench Press", Some("Chest"))
            .await
            .unwrap();

        assert_eq!(exercise.id, "bench-press");
        assert_eq!(exercise.name, "Bench Press");
        assert_eq!(exercise.category.as_deref(), Some("Chest"));
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let repo = ExerciseRepository::new(setup_test_db());

        repo.create("squat", "Squat", None).await.unwrap();
        let err = repo.create("squat", "Back Squat", None).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = ExerciseRepository::new(setup_test_db());

        let created = repo.create("squat", "Squat", Some("Legs")).await.unwrap();
        let found = repo.find_by_id("squat").await.unwrap().unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.name, "Squat");
        assert_eq!(found.category.as_deref(), Some("Legs"));
        assert!(repo.find_by_id("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_sorted_by_name() {
        let repo = ExerciseRepository::new(setup_test_db());

        repo.create("squat", "Squat", None).await.unwrap();
        repo.create("deadlift", "Deadlift", None).await.unwrap();
        repo.create("bench-press", "Bench Press", None).await.unwrap();

        let names: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();

        assert_eq!(names, vec!["Bench Press", "Deadlift", "Squat"]);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let repo = ExerciseRepository::new(setup_test_db());
        repo.create("squat", "Squat", Some("Legs")).await.unwrap();

        let renamed = repo
            .update("squat", Some("Back Squat"), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Back Squat");
        assert_eq!(renamed.category.as_deref(), Some("Legs"));

        let recategorised = repo
            .update("squat", None, Some(Some("Lower Body")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(recategorised.name, "Back Squat");
        assert_eq!(recategorised.category.as_deref(), Some("Lower Body"));
    }

    #[tokio::test]
    async fn test_update_can_clear_category() {
        let repo = ExerciseRepository::new(setup_test_db());
        repo.create("squat", "Squat", Some("Legs")).await.unwrap();

        let cleared = repo.update("squat", None, Some(None)).await.unwrap().unwrap();

        assert_eq!(cleared.name, "Squat");
        assert_eq!(cleared.category, None);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = ExerciseRepository::new(setup_test_db());

        let updated = repo.update("ghost", Some("Ghost"), None).await.unwrap();

        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = ExerciseRepository::new(setup_test_db());
        repo.create("squat", "Squat", None).await.unwrap();

        assert!(repo.delete("squat").await.unwrap());
        assert!(!repo.delete("squat").await.unwrap());
        assert!(repo.find_by_id("squat").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seed_defaults_only_on_empty_table() {
        let repo = ExerciseRepository::new(setup_test_db());

        let inserted = repo.seed_defaults().await.unwrap();
        assert_eq!(inserted, DEFAULT_EXERCISES.len());
        assert_eq!(repo.find_all().await.unwrap().len(), DEFAULT_EXERCISES.len());

        let again = repo.seed_defaults().await.unwrap();
        assert_eq!(again, 0);
        assert_eq!(repo.find_all().await.unwrap().len(), DEFAULT_EXERCISES.len());
    }

    #[tokio::test]
    async fn test_seed_skips_when_user_added_exercises() {
        let repo = ExerciseRepository::new(setup_test_db());
        repo.create("farmers-walk", "Farmer's Walk", None).await.unwrap();

        assert_eq!(repo.seed_defaults().await.unwrap(), 0);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}
