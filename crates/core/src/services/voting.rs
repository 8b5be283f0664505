//! Voting service.

use tracing::debug;
use wyr_common::{AppError, AppResult};
use wyr_db::{
    entities::poll::{self, VoteSide},
    repositories::{PollRepository, PollUpdate},
};

/// Records votes on active polls.
#[derive(Clone)]
pub struct VotingService {
    poll_repo: PollRepository,
}

impl VotingService {
    /// Create a new voting service.
    #[must_use]
    pub const fn new(poll_repo: PollRepository) -> Self {
        Self { poll_repo }
    }

    /// Cast one vote for `choice` (`"a"` or `"b"`) and return the tallies as
    /// this vote left them.
    ///
    /// The active check and the increment are one statement, so a vote
    /// racing a deactivation is either counted before it or rejected after it.
    pub async fn vote(&self, id: i32, choice: &str) -> AppResult<poll::Model> {
        let side: VoteSide = choice.parse()?;

        match self.poll_repo.increment_vote(id, side).await? {
            PollUpdate::Applied(poll) => {
                debug!(poll_id = id, side = %side, votes = poll.votes_for(side), "Vote recorded");
                Ok(poll)
            }
            PollUpdate::Skipped(poll) if poll.is_active && poll.votes_for(side) == i32::MAX => {
                Err(AppError::Validation(format!(
                    "option {side} of poll {id} cannot take more votes"
                )))
            }
            PollUpdate::Skipped(_) => Err(AppError::PollInactive(id)),
        }
    }
}
