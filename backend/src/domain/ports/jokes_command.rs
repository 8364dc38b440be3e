//! Driving port for joke mutations.
//!
//! Both operations take an already resolved [`UserId`]: callers pass the
//! request credential through the authorization gate before invoking them,
//! so an anonymous caller never reaches validation or persistence.

use async_trait::async_trait;

use crate::domain::{Error, Joke, JokeId, JokeSubmission, UserId};

/// Driving port for joke write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JokesCommand: Send + Sync {
    /// Validate and store a joke owned by `author`.
    ///
    /// Validation failures surface as `invalid_request` errors whose details
    /// carry the serialised [`crate::domain::SubmissionFailure`].
    async fn submit_joke(&self, author: &UserId, submission: JokeSubmission)
    -> Result<Joke, Error>;

    /// Delete a joke owned by `actor`.
    ///
    /// Fails with `not_found` when the joke is gone and `forbidden` when
    /// someone else owns it.
    async fn delete_joke(&self, actor: &UserId, id: &JokeId) -> Result<(), Error>;
}

/// Fixture command that rejects every mutation as if the store were empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureJokesCommand;

#[async_trait]
impl JokesCommand for FixtureJokesCommand {
    async fn submit_joke(
        &self,
        _author: &UserId,
        _submission: JokeSubmission,
    ) -> Result<Joke, Error> {
        Err(Error::service_unavailable("joke storage is not configured"))
    }

    async fn delete_joke(&self, _actor: &UserId, _id: &JokeId) -> Result<(), Error> {
        Err(Error::not_found("Can't delete what does not exist"))
    }
}
