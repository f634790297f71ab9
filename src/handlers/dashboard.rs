use askama::Template;
use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;

use super::render;
use crate::content::{random_quote, streak_quote};
use crate::dates::today;
use crate::error::{AppError, Result};
use crate::models::{CreateWorkout, DailyStats, Exercise, WorkoutForm, WorkoutWithExercise};
use crate::repositories::{ExerciseRepository, WorkoutRepository};
use crate::stats::{consecutive_days, streak_range, TotalWeightMode};

#[derive(Clone)]
pub struct DashboardState {
    pub workout_repo: WorkoutRepository,
    pub exercise_repo: ExerciseRepository,
    pub total_weight_mode: TotalWeightMode,
}

#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct DashboardTemplate {
    today: String,
    weight_mode: &'static str,
    stats: DailyStats,
    workouts: Vec<WorkoutWithExercise>,
    exercises: Vec<Exercise>,
    quote: &'static str,
    streak_days: u32,
    streak_quote: Option<&'static str>,
    error: Option<String>,
}

async fn render_dashboard(state: &DashboardState, error: Option<String>) -> Result<Response> {
    let day = today();
    let stats = state
        .workout_repo
        .daily_stats(day, state.total_weight_mode)
        .await?;
    let workouts = state.workout_repo.find_by_days(day, day).await?;
    let exercises = state.exercise_repo.find_all().await?;

    let (first, last) = streak_range(day);
    let recent = state.workout_repo.find_by_days(first, last).await?;
    let streak_days = consecutive_days(&recent, day);

    let template = DashboardTemplate {
        today: day.format("%A, %B %-d").to_string(),
        weight_mode: state.total_weight_mode.as_str(),
        stats,
        workouts,
        exercises,
        quote: random_quote(),
        streak_days,
        streak_quote: streak_quote(streak_days),
        error,
    };

    render(&template)
}

pub async fn index(State(state): State<DashboardState>) -> Result<Response> {
    render_dashboard(&state, None).await
}

pub async fn create_submit(
    State(state): State<DashboardState>,
    form: std::result::Result<Form<WorkoutForm>, FormRejection>,
) -> Result<Response> {
    let validated = form
        .map_err(|e| AppError::BadRequest(e.body_text()))
        .and_then(|Form(form)| CreateWorkout::from(form).validate(Utc::now()));

    let new_workout = match validated {
        Ok(new_workout) => new_workout,
        Err(AppError::BadRequest(msg)) | Err(AppError::Validation(msg)) => {
            let page = render_dashboard(&state, Some(msg)).await?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
        Err(e) => return Err(e),
    };

    state.workout_repo.create(new_workout).await?;

    Ok(Redirect::to("/").into_response())
}

pub async fn delete_submit(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> Result<Response> {
    if !state.workout_repo.delete(&id).await? {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }

    Ok(Redirect::to("/").into_response())
}
