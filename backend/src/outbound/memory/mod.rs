//! In-process joke storage.
//!
//! Used when no database URL is configured, and by HTTP tests that need a
//! real store. Jokes live in a vector sorted by `(created_at, id)`, the same
//! ordering the Diesel adapter applies, so offset reads behave identically.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{JokeRepository, JokeRepositoryError};
use crate::domain::{Joke, JokeId, NewJoke};

/// Joke repository backed by process memory.
pub struct InMemoryJokeRepository {
    jokes: RwLock<Vec<Joke>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryJokeRepository {
    /// Create an empty repository stamping jokes with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            jokes: RwLock::new(Vec::new()),
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Joke>>, JokeRepositoryError> {
        self.jokes
            .read()
            .map_err(|_| JokeRepositoryError::query("joke store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Joke>>, JokeRepositoryError> {
        self.jokes
            .write()
            .map_err(|_| JokeRepositoryError::query("joke store lock poisoned"))
    }
}

fn saturating_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl JokeRepository for InMemoryJokeRepository {
    async fn count(&self) -> Result<u64, JokeRepositoryError> {
        let jokes = self.read()?;
        u64::try_from(jokes.len()).map_err(|err| JokeRepositoryError::query(err.to_string()))
    }

    async fn find_by_id(&self, id: &JokeId) -> Result<Option<Joke>, JokeRepositoryError> {
        Ok(self.read()?.iter().find(|joke| joke.id() == *id).cloned())
    }

    async fn find_at_offset(&self, skip: u64, take: u64) -> Result<Vec<Joke>, JokeRepositoryError> {
        Ok(self
            .read()?
            .iter()
            .skip(saturating_usize(skip))
            .take(saturating_usize(take))
            .cloned()
            .collect())
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<Joke>, JokeRepositoryError> {
        Ok(self
            .read()?
            .iter()
            .rev()
            .take(saturating_usize(limit))
            .cloned()
            .collect())
    }

    async fn insert(&self, joke: &NewJoke) -> Result<Joke, JokeRepositoryError> {
        let stored = Joke::from_parts(JokeId::random(), joke.clone(), self.clock.utc());
        let mut jokes = self.write()?;
        let key = (stored.created_at(), *stored.id().as_uuid());
        let position = jokes.partition_point(|existing| {
            (existing.created_at(), *existing.id().as_uuid()) < key
        });
        jokes.insert(position, stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: &JokeId) -> Result<bool, JokeRepositoryError> {
        let mut jokes = self.write()?;
        let before = jokes.len();
        jokes.retain(|joke| joke.id() != *id);
        Ok(jokes.len() != before)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Mutex;

    use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{JokeSubmission, UserId};

    struct SteppingClock(Mutex<DateTime<Utc>>);

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            let mut now = self.0.lock().expect("clock lock");
            *now += TimeDelta::seconds(1);
            *now
        }
    }

    #[fixture]
    fn repo() -> InMemoryJokeRepository {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("valid start");
        InMemoryJokeRepository::new(Arc::new(SteppingClock(Mutex::new(start))))
    }

    fn new_joke(name: &str) -> NewJoke {
        let valid = JokeSubmission::new(name, "Long enough to be a joke.")
            .validate()
            .expect("fixture is valid");
        NewJoke::new(valid, UserId::random())
    }

    async fn seed(repo: &InMemoryJokeRepository, names: &[&str]) -> Vec<Joke> {
        let mut stored = Vec::new();
        for name in names {
            stored.push(repo.insert(&new_joke(name)).await.expect("insert"));
        }
        stored
    }

    #[rstest]
    #[tokio::test]
    async fn offsets_follow_creation_order(repo: InMemoryJokeRepository) {
        let stored = seed(&repo, &["First", "Second", "Third"]).await;

        assert_eq!(repo.count().await.expect("count"), 3);
        for (offset, joke) in stored.iter().enumerate() {
            let page = repo
                .find_at_offset(offset as u64, 1)
                .await
                .expect("page");
            assert_eq!(page, vec![joke.clone()]);
        }
        assert!(repo.find_at_offset(3, 1).await.expect("past end").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn recent_lists_newest_first(repo: InMemoryJokeRepository) {
        seed(&repo, &["Old", "Middle", "New"]).await;
        let names: Vec<String> = repo
            .list_recent(2)
            .await
            .expect("recent")
            .iter()
            .map(|joke| joke.name().to_owned())
            .collect();
        assert_eq!(names, ["New", "Middle"]);
    }

    #[rstest]
    #[tokio::test]
    async fn second_delete_reports_nothing_removed(repo: InMemoryJokeRepository) {
        let stored = seed(&repo, &["Gone"]).await;
        let id = stored[0].id();

        assert!(repo.delete_by_id(&id).await.expect("first delete"));
        assert!(!repo.delete_by_id(&id).await.expect("second delete"));
        assert!(repo.find_by_id(&id).await.expect("lookup").is_none());
    }
}
