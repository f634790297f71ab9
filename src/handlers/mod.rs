use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::dates::{parse_day, today};
use crate::error::{AppError, Result};

pub mod dashboard;
pub mod exercises;
pub mod health;
pub mod stats;
pub mod tips;
pub mod workouts;

/// `?date=` override for endpoints that aggregate around "today".
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    pub fn day(&self) -> Result<NaiveDate> {
        match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => {
                parse_day(raw).ok_or_else(|| AppError::BadRequest("Invalid date format".to_string()))
            }
            None => Ok(today()),
        }
    }
}

pub(crate) fn render<T: Template>(template: &T) -> Result<Response> {
    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}
