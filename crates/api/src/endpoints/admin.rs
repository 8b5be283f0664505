//! Admin poll endpoints.
//!
//! Every route here sits behind [`require_admin`].

use axum::{
    Router,
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use wyr_common::AppResult;
use wyr_core::CreatePollInput;
use wyr_db::entities::poll;

use crate::{
    extractors::{JsonBody, PollId},
    middleware::{AppState, require_admin},
    response::ApiResponse,
};

/// Poll as an admin sees it.
#[derive(Debug, Serialize)]
pub struct AdminPollResponse {
    pub id: i32,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub category: String,
    pub votes_a: i32,
    pub votes_b: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<poll::Model> for AdminPollResponse {
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
            created_at: p.created_at,
        }
    }
}

async fn list_all(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<AdminPollResponse>>> {
    let polls = state.query_service.list_all().await?;
    Ok(ApiResponse::ok(polls.into_iter().map(Into::into).collect()))
}

async fn create_poll(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreatePollInput>,
) -> AppResult<ApiResponse<AdminPollResponse>> {
    let poll = state.lifecycle_service.create(input).await?;
    Ok(ApiResponse::created(poll.into()))
}

async fn show_poll(
    State(state): State<AppState>,
    PollId(id): PollId,
) -> AppResult<ApiResponse<AdminPollResponse>> {
    let poll = state.query_service.get_any(id).await?;
    Ok(ApiResponse::ok(poll.into()))
}

async fn deactivate(
    State(state): State<AppState>,
    PollId(id): PollId,
) -> AppResult<ApiResponse<AdminPollResponse>> {
    let poll = state.lifecycle_service.deactivate(id).await?;
    Ok(ApiResponse::ok(poll.into()))
}

async fn reactivate(
    State(state): State<AppState>,
    PollId(id): PollId,
) -> AppResult<ApiResponse<AdminPollResponse>> {
    let poll = state.lifecycle_service.reactivate(id).await?;
    Ok(ApiResponse::ok(poll.into()))
}

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_all).post(create_poll))
        .route("/{id}", get(show_poll))
        .route("/{id}/deactivate", post(deactivate))
        .route("/{id}/reactivate", post(reactivate))
        .route_layer(from_fn_with_state(state.clone(), require_admin))
}
