//! API endpoints.

mod admin;
mod meta;
mod polls;

use axum::Router;

use crate::middleware::AppState;

pub use admin::AdminPollResponse;
pub use polls::{PollResponse, VoteRequest};

/// Create the API router.
///
/// `state` is needed up front to mount the admin gate on the admin routes.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(meta::router())
        .nest("/polls", polls::router())
        .nest("/admin/polls", admin::router(state))
}
