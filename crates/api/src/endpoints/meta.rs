//! Meta endpoints.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::middleware::AppState;

/// Service banner.
async fn banner() -> Json<Value> {
    Json(json!({ "message": "Would You Rather API is running" }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(banner))
}
