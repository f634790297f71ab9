use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{dashboard, exercises, health, stats, tips, workouts};

pub fn create_router(
    dashboard_state: dashboard::DashboardState,
    exercises_state: exercises::ExercisesState,
    workouts_state: workouts::WorkoutsState,
    stats_state: stats::StatsState,
) -> Router {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        .route("/workouts/new", post(dashboard::create_submit))
        .route("/workouts/{id}/delete", post(dashboard::delete_submit))
        .with_state(dashboard_state)
        // Exercise API
        .route(
            "/api/exercises",
            get(exercises::list).post(exercises::create),
        )
        .route(
            "/api/exercises/{id}",
            get(exercises::show)
                .put(exercises::update)
                .delete(exercises::delete),
        )
        .with_state(exercises_state)
        // Workout API
        .route("/api/workouts", get(workouts::list).post(workouts::create))
        .route("/api/workouts/stats", get(workouts::daily_stats))
        .route("/api/workouts/{id}", axum::routing::delete(workouts::delete))
        .with_state(workouts_state)
        // Stats
        .route("/api/stats/weekly", get(stats::weekly))
        .route("/api/stats/monthly", get(stats::monthly))
        .route("/api/stats/quarterly", get(stats::quarterly))
        .route("/api/stats/streak", get(stats::streak))
        .route("/weekly", get(stats::weekly_page))
        .route("/quarterly", get(stats::quarterly_page))
        .with_state(stats_state)
        // Tips
        .route("/api/tips", get(tips::list))
        .route("/api/tips/random", get(tips::random))
        .route("/tips", get(tips::index))
        .route("/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
}
