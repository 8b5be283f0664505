//! Public poll endpoints.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wyr_common::AppResult;
use wyr_db::entities::poll;

use crate::{
    extractors::{JsonBody, PollId},
    middleware::AppState,
    response::ApiResponse,
};

/// Poll as the public sees it.
#[derive(Debug, Serialize)]
pub struct PollResponse {
    pub id: i32,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub category: String,
    pub votes_a: i32,
    pub votes_b: i32,
    pub is_active: bool,
}

impl From<poll::Model> for PollResponse {
    fn from(p: poll::Model) -> Self {
        Self {
            id: p.id,
            question: p.question,
            option_a: p.option_a,
            option_b: p.option_b,
            category: p.category,
            votes_a: p.votes_a,
            votes_b: p.votes_b,
            is_active: p.is_active,
        }
    }
}

/// Vote request.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub choice: String,
}

/// Liveness check.
async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn list_polls(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<PollResponse>>> {
    let polls = state.query_service.list_public().await?;
    Ok(ApiResponse::ok(polls.into_iter().map(Into::into).collect()))
}

async fn random_poll(State(state): State<AppState>) -> AppResult<ApiResponse<PollResponse>> {
    let poll = state.query_service.random().await?;
    Ok(ApiResponse::ok(poll.into()))
}

async fn show_poll(
    State(state): State<AppState>,
    PollId(id): PollId,
) -> AppResult<ApiResponse<PollResponse>> {
    let poll = state.query_service.get_public(id).await?;
    Ok(ApiResponse::ok(poll.into()))
}

async fn vote(
    State(state): State<AppState>,
    PollId(id): PollId,
    JsonBody(req): JsonBody<VoteRequest>,
) -> AppResult<ApiResponse<PollResponse>> {
    let poll = state.voting_service.vote(id, &req.choice).await?;
    Ok(ApiResponse::ok(poll.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_polls))
        .route("/health", get(health))
        .route("/random", get(random_poll))
        .route("/{id}", get(show_poll))
        .route("/{id}/vote", post(vote))
}
