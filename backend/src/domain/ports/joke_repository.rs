//! Port for joke persistence.
//!
//! The random selector relies on [`JokeRepository::count`] and
//! [`JokeRepository::find_at_offset`] agreeing on one stable ordering
//! (`created_at`, then `id`), so adapters must apply the same ordering to
//! both offset and recency reads.

use async_trait::async_trait;

use crate::domain::{Joke, JokeId, NewJoke};

use super::define_port_error;

define_port_error! {
    /// Errors raised by joke repository adapters.
    pub enum JokeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "joke repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "joke repository query failed: {message}",
    }
}

/// Port for storing, reading and removing jokes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JokeRepository: Send + Sync {
    /// Total number of stored jokes.
    async fn count(&self) -> Result<u64, JokeRepositoryError>;

    /// Find a joke by id.
    async fn find_by_id(&self, id: &JokeId) -> Result<Option<Joke>, JokeRepositoryError>;

    /// Read `take` jokes after skipping `skip`, in persisted order.
    async fn find_at_offset(&self, skip: u64, take: u64) -> Result<Vec<Joke>, JokeRepositoryError>;

    /// Read up to `limit` jokes, newest first.
    async fn list_recent(&self, limit: u64) -> Result<Vec<Joke>, JokeRepositoryError>;

    /// Persist a new joke and return the stored record.
    async fn insert(&self, joke: &NewJoke) -> Result<Joke, JokeRepositoryError>;

    /// Remove a joke. Returns `false` when nothing was removed.
    async fn delete_by_id(&self, id: &JokeId) -> Result<bool, JokeRepositoryError>;
}

/// Fixture implementation for tests that never touch persistence.
///
/// Behaves like an empty store that refuses writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureJokeRepository;

#[async_trait]
impl JokeRepository for FixtureJokeRepository {
    async fn count(&self) -> Result<u64, JokeRepositoryError> {
        Ok(0)
    }

    async fn find_by_id(&self, _id: &JokeId) -> Result<Option<Joke>, JokeRepositoryError> {
        Ok(None)
    }

    async fn find_at_offset(
        &self,
        _skip: u64,
        _take: u64,
    ) -> Result<Vec<Joke>, JokeRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_recent(&self, _limit: u64) -> Result<Vec<Joke>, JokeRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _joke: &NewJoke) -> Result<Joke, JokeRepositoryError> {
        Err(JokeRepositoryError::query("fixture repository is read-only"))
    }

    async fn delete_by_id(&self, _id: &JokeId) -> Result<bool, JokeRepositoryError> {
        Ok(false)
    }
}
