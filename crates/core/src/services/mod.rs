//! Business logic services.

#![allow(missing_docs)]

pub mod admin_guard;
pub mod poll;
pub mod query;
pub mod voting;

pub use admin_guard::AdminGuard;
pub use poll::{CreatePollInput, PollLifecycleService};
pub use query::{PollQueryService, pick_uniform};
pub use voting::VotingService;
