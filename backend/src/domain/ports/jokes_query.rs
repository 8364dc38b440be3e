//! Driving port for joke reads.
//!
//! Reads never require an identity. The viewer, when present, only decides
//! whether the caller is shown as the owner of a joke.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Joke, JokeId, JokeMeta, JokeSummary, UserId};

/// Number of jokes shown in the collection listing.
pub const DEFAULT_LIST_LIMIT: u64 = 5;

/// A single joke as seen by one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JokeView {
    pub joke: Joke,
    pub is_owner: bool,
    pub meta: JokeMeta,
}

/// A randomly selected joke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomJoke {
    pub joke: Joke,
    pub meta: JokeMeta,
}

/// Driving port for joke read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JokesQuery: Send + Sync {
    /// Load one joke, flagging whether `viewer` owns it.
    ///
    /// Fails with `not_found` when the joke does not exist.
    async fn load_joke(&self, id: &JokeId, viewer: Option<UserId>) -> Result<JokeView, Error>;

    /// Pick a joke uniformly at random.
    ///
    /// Fails with `empty` when there are no jokes at all.
    async fn load_random(&self) -> Result<RandomJoke, Error>;

    /// Newest jokes first, at most `limit` of them.
    async fn list_jokes(&self, limit: u64) -> Result<Vec<JokeSummary>, Error>;
}

/// Fixture query behaving like an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureJokesQuery;

#[async_trait]
impl JokesQuery for FixtureJokesQuery {
    async fn load_joke(&self, _id: &JokeId, _viewer: Option<UserId>) -> Result<JokeView, Error> {
        Err(Error::not_found("joke not found"))
    }

    async fn load_random(&self) -> Result<RandomJoke, Error> {
        Err(Error::empty("There are no jokes to display"))
    }

    async fn list_jokes(&self, _limit: u64) -> Result<Vec<JokeSummary>, Error> {
        Ok(Vec::new())
    }
}
