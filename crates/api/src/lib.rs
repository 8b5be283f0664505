//! HTTP API layer for wyr.
//!
//! - **Endpoints**: public poll reads and voting, admin poll management
//! - **Extractors**: path ids and JSON bodies with uniform error mapping
//! - **Middleware**: application state and the admin token gate
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
