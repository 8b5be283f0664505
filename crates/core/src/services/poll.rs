//! Poll lifecycle service.
//!
//! A poll is created active and moves between active and inactive on admin
//! request. Both transitions are idempotent: asking for the state a poll is
//! already in returns it untouched and issues no write.

use serde::Deserialize;
use tracing::{debug, info};
use validator::Validate;
use wyr_common::AppResult;
use wyr_db::{
    entities::poll::{self, DEFAULT_CATEGORY},
    repositories::{NewPoll, PollRepository},
};

/// Input for creating a poll.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePollInput {
    #[validate(length(min = 1, max = 500))]
    pub question: String,
    #[validate(length(min = 1, max = 200))]
    pub option_a: String,
    #[validate(length(min = 1, max = 200))]
    pub option_b: String,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub category: Option<String>,
}

impl CreatePollInput {
    /// Trim all text; a blank category becomes absent.
    fn normalized(self) -> Self {
        Self {
            question: self.question.trim().to_string(),
            option_a: self.option_a.trim().to_string(),
            option_b: self.option_b.trim().to_string(),
            category: self
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }
}

/// Service for creating polls and switching them on and off.
#[derive(Clone)]
pub struct PollLifecycleService {
    poll_repo: PollRepository,
}

impl PollLifecycleService {
    /// Create a new poll lifecycle service.
    #[must_use]
    pub const fn new(poll_repo: PollRepository) -> Self {
        Self { poll_repo }
    }

    /// Create a poll with zero tallies in the active state.
    pub async fn create(&self, input: CreatePollInput) -> AppResult<poll::Model> {
        let input = input.normalized();
        input.validate()?;

        let poll = self
            .poll_repo
            .create(NewPoll {
                question: input.question,
                option_a: input.option_a,
                option_b: input.option_b,
                category: input
                    .category
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            })
            .await?;

        info!(poll_id = poll.id, category = %poll.category, "Poll created");
        Ok(poll)
    }

    /// Hide a poll from the public and stop accepting votes.
    pub async fn deactivate(&self, id: i32) -> AppResult<poll::Model> {
        self.transition(id, false).await
    }

    /// Make a deactivated poll visible and votable again.
    pub async fn reactivate(&self, id: i32) -> AppResult<poll::Model> {
        self.transition(id, true).await
    }

    async fn transition(&self, id: i32, active: bool) -> AppResult<poll::Model> {
        let current = self.poll_repo.get_by_id(id).await?;
        if current.is_active == active {
            debug!(poll_id = id, is_active = active, "Poll already in requested state");
            return Ok(current);
        }

        // Guarded write: a concurrent transition to the same state turns this
        // into a no-op instead of a second write.
        let outcome = self.poll_repo.set_active(id, active).await?;
        if outcome.is_applied() {
            info!(poll_id = id, is_active = active, "Poll state changed");
        }

        Ok(outcome.into_model())
    }
}
