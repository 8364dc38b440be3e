//! Joke domain service.
//!
//! Implements the [`JokesQuery`] and [`JokesCommand`] driving ports on top of
//! a [`JokeRepository`]. Every failure is returned as a tagged [`Error`];
//! the inbound adapter decides what status each tag becomes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    JokeRepository, JokeRepositoryError, JokeView, JokesCommand, JokesQuery, OffsetPicker,
    RandomJoke,
};
use crate::domain::{Error, UserId};

use super::joke::{Joke, JokeId, JokeMeta, JokeSummary, NewJoke};
use super::ownership::{DeleteDenial, authorize_delete};
use super::random::pick_random;
use super::validation::JokeSubmission;

const NOT_FOUND: &str = "What a joke! Not found.";

pub(super) fn map_repository_error(error: JokeRepositoryError) -> Error {
    match error {
        JokeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("joke repository unavailable: {message}"))
        }
        JokeRepositoryError::Query { message } => {
            Error::internal(format!("joke repository error: {message}"))
        }
    }
}

/// Joke service implementing both joke driving ports.
pub struct JokesService<R: ?Sized> {
    joke_repo: Arc<R>,
    offsets: Arc<dyn OffsetPicker>,
}

impl<R: ?Sized> Clone for JokesService<R> {
    fn clone(&self) -> Self {
        Self {
            joke_repo: Arc::clone(&self.joke_repo),
            offsets: Arc::clone(&self.offsets),
        }
    }
}

impl<R: ?Sized> JokesService<R> {
    /// Create a service over `joke_repo`, drawing random offsets from
    /// `offsets`.
    pub fn new(joke_repo: Arc<R>, offsets: Arc<dyn OffsetPicker>) -> Self {
        Self { joke_repo, offsets }
    }
}

impl<R> JokesService<R>
where
    R: JokeRepository + ?Sized,
{
    async fn find(&self, id: &JokeId) -> Result<Option<Joke>, Error> {
        self.joke_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> JokesQuery for JokesService<R>
where
    R: JokeRepository + ?Sized,
{
    async fn load_joke(&self, id: &JokeId, viewer: Option<UserId>) -> Result<JokeView, Error> {
        let joke = self
            .find(id)
            .await?
            .ok_or_else(|| Error::not_found(NOT_FOUND))?;
        Ok(JokeView {
            is_owner: joke.is_owned_by(viewer.as_ref()),
            meta: JokeMeta::for_joke(&joke),
            joke,
        })
    }

    async fn load_random(&self) -> Result<RandomJoke, Error> {
        let joke = pick_random(self.joke_repo.as_ref(), self.offsets.as_ref()).await?;
        Ok(RandomJoke {
            meta: JokeMeta::for_joke(&joke),
            joke,
        })
    }

    async fn list_jokes(&self, limit: u64) -> Result<Vec<JokeSummary>, Error> {
        let jokes = self
            .joke_repo
            .list_recent(limit)
            .await
            .map_err(map_repository_error)?;
        Ok(jokes.iter().map(JokeSummary::from).collect())
    }
}

#[async_trait]
impl<R> JokesCommand for JokesService<R>
where
    R: JokeRepository + ?Sized,
{
    async fn submit_joke(
        &self,
        author: &UserId,
        submission: JokeSubmission,
    ) -> Result<Joke, Error> {
        let valid = submission.validate()?;
        let joke = self
            .joke_repo
            .insert(&NewJoke::new(valid, author.clone()))
            .await
            .map_err(map_repository_error)?;
        info!(joke_id = %joke.id(), jokester_id = %author, "joke created");
        Ok(joke)
    }

    async fn delete_joke(&self, actor: &UserId, id: &JokeId) -> Result<(), Error> {
        let joke = self.find(id).await?;
        authorize_delete(joke.as_ref(), actor)?;
        let removed = self
            .joke_repo
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            // Lost a race with another delete of the same joke.
            return Err(DeleteDenial::NotFound.into());
        }
        info!(joke_id = %id, jokester_id = %actor, "joke deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
