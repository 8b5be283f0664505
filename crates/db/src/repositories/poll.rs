//! Poll repository.
//!
//! Every mutation is a single conditional `UPDATE ... RETURNING`, so
//! concurrent writers to one poll are serialized by the database row, never
//! lose an update, and each sees the row exactly as its own write left it.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, sea_query::Expr,
};
use wyr_common::{AppError, AppResult};

use crate::entities::{Poll, poll, poll::VoteSide};

/// Fields for a new poll. Text is stored as given.
#[derive(Debug, Clone)]
pub struct NewPoll {
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub category: String,
}

/// Outcome of a guarded update on an existing poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollUpdate {
    /// The guard held and the row was written.
    Applied(poll::Model),
    /// The guard did not hold; nothing was written.
    Skipped(poll::Model),
}

impl PollUpdate {
    /// The poll as read after the update attempt.
    #[must_use]
    pub fn into_model(self) -> poll::Model {
        match self {
            Self::Applied(model) | Self::Skipped(model) => model,
        }
    }

    /// Whether the row was written.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Poll repository for database operations.
#[derive(Clone)]
pub struct PollRepository {
    db: Arc<DatabaseConnection>,
}

impl PollRepository {
    /// Create a new poll repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a poll with zero tallies in the active state.
    pub async fn create(&self, new: NewPoll) -> AppResult<poll::Model> {
        for (field, value) in [
            ("question", &new.question),
            ("option_a", &new.option_a),
            ("option_b", &new.option_b),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} must not be empty")));
            }
        }

        let model = poll::ActiveModel {
            id: NotSet,
            question: Set(new.question),
            option_a: Set(new.option_a),
            option_b: Set(new.option_b),
            category: Set(new.category),
            votes_a: Set(0),
            votes_b: Set(0),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a poll by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<poll::Model>> {
        Poll::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a poll by ID, returning error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<poll::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::poll_not_found(id))
    }

    /// List polls in creation order, optionally only the active ones.
    pub async fn list(&self, active_only: bool) -> AppResult<Vec<poll::Model>> {
        let mut query = Poll::find();
        if active_only {
            query = query.filter(poll::Column::IsActive.eq(true));
        }

        query
            .order_by_asc(poll::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Add one vote to `side`, only while the poll is active.
    ///
    /// On success the returned model is the row as this increment left it.
    /// Returns [`PollUpdate::Skipped`] when the poll exists but is inactive,
    /// or when the tally is already at `i32::MAX`.
    pub async fn increment_vote(&self, id: i32, side: VoteSide) -> AppResult<PollUpdate> {
        let updated = Poll::update_many()
            .col_expr(side.column(), Expr::col(side.column()).add(1))
            .filter(poll::Column::Id.eq(id))
            .filter(poll::Column::IsActive.eq(true))
            .filter(side.column().lt(i32::MAX))
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.classify(id, updated).await
    }

    /// Set `is_active`, writing only if the poll is not already in that state.
    ///
    /// Returns [`PollUpdate::Skipped`] when the poll already had the state.
    pub async fn set_active(&self, id: i32, active: bool) -> AppResult<PollUpdate> {
        let updated = Poll::update_many()
            .col_expr(poll::Column::IsActive, Expr::value(active))
            .filter(poll::Column::Id.eq(id))
            .filter(poll::Column::IsActive.eq(!active))
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.classify(id, updated).await
    }

    /// A returned row is the post-update state. With none, the guard missed
    /// or the poll is gone; a read tells the two apart.
    async fn classify(&self, id: i32, updated: Vec<poll::Model>) -> AppResult<PollUpdate> {
        match updated.into_iter().next() {
            Some(model) => Ok(PollUpdate::Applied(model)),
            None => self.get_by_id(id).await.map(PollUpdate::Skipped),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn mock_poll(id: i32, is_active: bool, votes_a: i32, votes_b: i32) -> poll::Model {
        poll::Model {
            id,
            question: "Fly or invisible?".to_string(),
            option_a: "Fly".to_string(),
            option_b: "Invisible".to_string(),
            category: poll::DEFAULT_CATEGORY.to_string(),
            votes_a,
            votes_b,
            is_active,
            created_at: Utc::now(),
        }
    }

    fn new_poll(question: &str, option_a: &str, option_b: &str) -> NewPoll {
        NewPoll {
            question: question.to_string(),
            option_a: option_a.to_string(),
            option_b: option_b.to_string(),
            category: poll::DEFAULT_CATEGORY.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_returns_inserted_poll() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_poll(1, true, 0, 0)]])
                .into_connection(),
        );
        let repo = PollRepository::new(db);

        let created = repo
            .create(new_poll("Fly or invisible?", "Fly", "Invisible"))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.votes_a, 0);
        assert_eq!(created.votes_b, 0);
        assert!(created.is_active);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_text_without_touching_db() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let repo = PollRepository::new(db);

        for input in [
            new_poll("  ", "Fly", "Invisible"),
            new_poll("Fly or invisible?", "", "Invisible"),
            new_poll("Fly or invisible?", "Fly", "\t\n"),
        ] {
            let result = repo.create(input).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<poll::Model>::new()])
                .into_connection(),
        );
        let repo = PollRepository::new(db);

        let result = repo.get_by_id(99).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_returns_rows_in_order() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_poll(1, true, 0, 0), mock_poll(2, false, 3, 1)]])
                .into_connection(),
        );
        let repo = PollRepository::new(db);

        let polls = repo.list(false).await.unwrap();

        assert_eq!(polls.len(), 2);
        assert_eq!(polls[0].id, 1);
        assert_eq!(polls[1].id, 2);
    }

    #[tokio::test]
    async fn test_increment_vote_applied() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_poll(1, true, 1, 0)]])
                .into_connection(),
        );
        let repo = PollRepository::new(Arc::clone(&db));

        let outcome = repo.increment_vote(1, VoteSide::A).await.unwrap();

        assert!(outcome.is_applied());
        assert_eq!(outcome.into_model().votes_a, 1);
        drop(repo);
        // The returned row comes from the UPDATE itself; no follow-up read.
        let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_increment_vote_skipped_on_inactive_poll() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![], vec![mock_poll(1, false, 4, 2)]])
                .into_connection(),
        );
        let repo = PollRepository::new(db);

        let outcome = repo.increment_vote(1, VoteSide::B).await.unwrap();

        assert!(!outcome.is_applied());
        let model = outcome.into_model();
        assert_eq!(model.votes_a, 4);
        assert_eq!(model.votes_b, 2);
    }

    #[tokio::test]
    async fn test_increment_vote_unknown_poll() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<poll::Model>::new(), Vec::new()])
                .into_connection(),
        );
        let repo = PollRepository::new(db);

        let result = repo.increment_vote(404, VoteSide::A).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_active_applied_and_skipped() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([
                    vec![mock_poll(1, false, 0, 0)],
                    vec![],
                    vec![mock_poll(1, false, 0, 0)],
                ])
                .into_connection(),
        );
        let repo = PollRepository::new(db);

        let first = repo.set_active(1, false).await.unwrap();
        let second = repo.set_active(1, false).await.unwrap();

        assert!(first.is_applied());
        assert!(!second.is_applied());
        assert!(!second.into_model().is_active);
    }
}
