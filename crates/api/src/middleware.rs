//! API middleware.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use wyr_core::{AdminGuard, PollLifecycleService, PollQueryService, VotingService};

/// Header carrying the admin token.
pub const ADMIN_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-admin-token");

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub lifecycle_service: PollLifecycleService,
    pub voting_service: VotingService,
    pub query_service: PollQueryService,
    pub admin_guard: AdminGuard,
}

/// Admin gate. Runs before any admin handler touches the store.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let supplied = req
        .headers()
        .get(&ADMIN_TOKEN_HEADER)
        .map(axum::http::HeaderValue::as_bytes);

    if let Err(e) = state.admin_guard.authorize(supplied) {
        return e.into_response();
    }

    next.run(req).await
}
