//! Poll query service.
//!
//! Public reads see active polls only. Admin reads see everything.

use rand::Rng;
use wyr_common::{AppError, AppResult};
use wyr_db::{entities::poll, repositories::PollRepository};

/// Read-side access to polls.
#[derive(Clone)]
pub struct PollQueryService {
    poll_repo: PollRepository,
}

impl PollQueryService {
    /// Create a new poll query service.
    #[must_use]
    pub const fn new(poll_repo: PollRepository) -> Self {
        Self { poll_repo }
    }

    /// Active polls in creation order.
    pub async fn list_public(&self) -> AppResult<Vec<poll::Model>> {
        self.poll_repo.list(true).await
    }

    /// All polls in creation order, active or not.
    pub async fn list_all(&self) -> AppResult<Vec<poll::Model>> {
        self.poll_repo.list(false).await
    }

    /// A single poll as the public sees it; inactive polls are not found.
    pub async fn get_public(&self, id: i32) -> AppResult<poll::Model> {
        let poll = self.poll_repo.get_by_id(id).await?;
        if !poll.is_active {
            return Err(AppError::poll_not_found(id));
        }
        Ok(poll)
    }

    /// A single poll regardless of state.
    pub async fn get_any(&self, id: i32) -> AppResult<poll::Model> {
        self.poll_repo.get_by_id(id).await
    }

    /// One active poll chosen uniformly at random.
    pub async fn random(&self) -> AppResult<poll::Model> {
        let active = self.poll_repo.list(true).await?;
        pick_uniform(active, &mut rand::thread_rng())
            .ok_or_else(|| AppError::NotFound("No active polls".to_string()))
    }
}

/// Take one element with equal probability, or `None` if empty.
pub fn pick_uniform<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..items.len());
    Some(items.swap_remove(index))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::{SeedableRng, rngs::StdRng};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn mock_poll(id: i32, is_active: bool) -> poll::Model {
        poll::Model {
            id,
            question: format!("Question {id}?"),
            option_a: "A".to_string(),
            option_b: "B".to_string(),
            category: poll::DEFAULT_CATEGORY.to_string(),
            votes_a: 0,
            votes_b: 0,
            is_active,
            created_at: Utc::now(),
        }
    }

    fn service_with(results: Vec<Vec<poll::Model>>) -> PollQueryService {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(results)
                .into_connection(),
        );
        PollQueryService::new(PollRepository::new(db))
    }

    #[tokio::test]
    async fn test_get_public_hides_inactive_poll() {
        let service = service_with(vec![vec![mock_poll(4, false)]]);

        let result = service.get_public(4).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_any_returns_inactive_poll() {
        let service = service_with(vec![vec![mock_poll(4, false)]]);

        let poll = service.get_any(4).await.unwrap();

        assert!(!poll.is_active);
    }

    #[tokio::test]
    async fn test_random_without_active_polls_is_not_found() {
        let service = service_with(vec![vec![]]);

        let result = service.random().await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_random_picks_from_active_set() {
        let service = service_with(vec![vec![mock_poll(2, true)]]);

        let poll = service.random().await.unwrap();

        assert_eq!(poll.id, 2);
    }

    #[test]
    fn test_pick_uniform_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_uniform(Vec::<i32>::new(), &mut rng), None);
    }

    #[test]
    fn test_pick_uniform_is_roughly_uniform() {
        const K: usize = 5;
        const SAMPLES: usize = 50_000;

        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; K];
        for _ in 0..SAMPLES {
            let picked = pick_uniform((0..K).collect(), &mut rng).unwrap();
            counts[picked] += 1;
        }

        // Expected 10_000 each with a standard deviation near 90.
        let expected = SAMPLES / K;
        for (item, count) in counts.iter().enumerate() {
            let deviation = count.abs_diff(expected) as f64 / expected as f64;
            assert!(deviation < 0.05, "item {item} drawn {count} times");
        }
    }
}
