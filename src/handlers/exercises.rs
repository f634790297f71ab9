use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::{AppError, Result};
use crate::models::{CreateExercise, UpdateExercise};
use crate::repositories::ExerciseRepository;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn list(State(state): State<ExercisesState>) -> Result<Json<Value>> {
    let exercises = state.exercise_repo.find_all().await?;

    Ok(Json(json!({ "exercises": exercises })))
}

pub async fn show(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let exercise = state
        .exercise_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;

    Ok(Json(json!({ "exercise": exercise })))
}

pub async fn create(
    State(state): State<ExercisesState>,
    payload: std::result::Result<Json<CreateExercise>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let Json(body) = payload?;

    let (Some(id), Some(name)) = (non_blank(body.id), non_blank(body.name)) else {
        return Err(AppError::BadRequest(
            "Missing required fields (id, name)".to_string(),
        ));
    };
    let category = non_blank(body.category);

    let exercise = state
        .exercise_repo
        .create(&id, &name, category.as_deref())
        .await?;

    tracing::info!("Created exercise {}", exercise.id);

    Ok((StatusCode::CREATED, Json(json!({ "exercise": exercise }))))
}

pub async fn update(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateExercise>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(body) = payload?;

    if matches!(&body.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::Validation(
            "Exercise name cannot be blank".to_string(),
        ));
    }
    let name = non_blank(body.name);
    // An explicit blank category clears it; an absent one leaves it alone
    let category = body.category.map(|c| non_blank(Some(c)));

    let exercise = state
        .exercise_repo
        .update(&id, name.as_deref(), category.as_ref().map(Option::as_deref))
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;

    Ok(Json(json!({ "exercise": exercise })))
}

pub async fn delete(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !state.exercise_repo.delete(&id).await? {
        return Err(AppError::NotFound("Exercise not found".to_string()));
    }

    tracing::info!("Deleted exercise {}", id);

    Ok(Json(json!({ "success": true })))
}
