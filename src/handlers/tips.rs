use askama::Template;
use axum::{response::Response, Json};
use serde_json::{json, Value};

use super::render;
use crate::content::{random_tip, FitnessTip, FITNESS_TIPS};
use crate::error::Result;

#[derive(Template)]
#[template(path = "tips/index.html")]
struct TipsTemplate {
    featured: &'static FitnessTip,
    tips: &'static [FitnessTip],
}

pub async fn list() -> Json<Value> {
    Json(json!({ "tips": FITNESS_TIPS }))
}

pub async fn random() -> Json<Value> {
    Json(json!({ "tip": random_tip() }))
}

pub async fn index() -> Result<Response> {
    let template = TipsTemplate {
        featured: random_tip(),
        tips: FITNESS_TIPS,
    };

    render(&template)
}
