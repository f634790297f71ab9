#![allow(dead_code)]

use axum::{body::Body, Router};
use chrono::{DateTime, Utc};
use http::{header, Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use fitlog::db::{create_memory_pool, DbPool};
use fitlog::migrations::run_migrations_for_tests;
use fitlog::models::{Exercise, NewWorkout, Workout};
use fitlog::repositories::{ExerciseRepository, WorkoutRepository};
use fitlog::stats::TotalWeightMode;

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    create_test_app_with_mode(pool, TotalWeightMode::default())
}

pub fn create_test_app_with_mode(pool: DbPool, mode: TotalWeightMode) -> Router {
    use fitlog::handlers::{dashboard, exercises, stats, workouts};

    // Create repositories
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());

    // Create handler states
    let dashboard_state = dashboard::DashboardState {
        workout_repo: workout_repo.clone(),
        exercise_repo: exercise_repo.clone(),
        total_weight_mode: mode,
    };
    let exercises_state = exercises::ExercisesState {
        exercise_repo: exercise_repo.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo: workout_repo.clone(),
        total_weight_mode: mode,
    };
    let stats_state = stats::StatsState {
        workout_repo: workout_repo.clone(),
        total_weight_mode: mode,
    };

    fitlog::routes::create_router(dashboard_state, exercises_state, workouts_state, stats_state)
}

// Test data creation helpers
pub async fn create_test_exercise(pool: &DbPool, id: &str, name: &str) -> Exercise {
    let exercise_repo = ExerciseRepository::new(pool.clone());
    exercise_repo.create(id, name, None).await.unwrap()
}

pub async fn create_test_workout(
    pool: &DbPool,
    exercise_id: &str,
    weight: f64,
    reps: i32,
    date: DateTime<Utc>,
) -> Workout {
    let workout_repo = WorkoutRepository::new(pool.clone());
    workout_repo
        .create(NewWorkout {
            exercise_id: exercise_id.to_string(),
            weight,
            reps,
            date,
            user_id: None,
        })
        .await
        .unwrap()
}

// Request helpers
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn send_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
