//! Joke entity and its read-side projections.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

use super::validation::ValidJoke;

/// Path of the collection view; deletions redirect here.
pub const JOKES_PATH: &str = "/jokes";

/// Stable joke identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JokeId(Uuid);

impl JokeId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Path of this joke's page.
    ///
    /// # Examples
    /// ```
    /// use jokes::domain::JokeId;
    ///
    /// let id: JokeId = "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().unwrap();
    /// assert_eq!(id.path(), "/jokes/3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// ```
    pub fn path(&self) -> String {
        format!("{JOKES_PATH}/{}", self.0)
    }
}

impl fmt::Display for JokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for JokeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A stored joke.
///
/// ## Invariants
/// - `jokester_id` is assigned at creation and never changes.
/// - Jokes are never edited; they are created and, by their owner, deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Joke {
    id: JokeId,
    name: String,
    content: String,
    jokester_id: UserId,
    created_at: DateTime<Utc>,
}

impl Joke {
    /// Rehydrate a joke from storage.
    pub fn from_parts(
        id: JokeId,
        new_joke: NewJoke,
        created_at: DateTime<Utc>,
    ) -> Self {
        let NewJoke {
            name,
            content,
            jokester_id,
        } = new_joke;
        Self {
            id,
            name,
            content,
            jokester_id,
            created_at,
        }
    }

    /// Joke identifier.
    pub fn id(&self) -> JokeId {
        self.id
    }

    /// Short display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The joke itself.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Owner recorded at creation.
    pub fn jokester_id(&self) -> &UserId {
        &self.jokester_id
    }

    /// Creation timestamp; defines the persisted ordering.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `viewer` owns this joke. Anonymous viewers own nothing.
    pub fn is_owned_by(&self, viewer: Option<&UserId>) -> bool {
        viewer.is_some_and(|id| id == &self.jokester_id)
    }
}

/// Insert payload for a validated joke and its owner.
///
/// Only obtainable from a [`ValidJoke`], so nothing unvalidated reaches the
/// repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJoke {
    name: String,
    content: String,
    jokester_id: UserId,
}

impl NewJoke {
    /// Pair validated fields with their author.
    pub fn new(joke: ValidJoke, jokester_id: UserId) -> Self {
        let (name, content) = joke.into_parts();
        Self {
            name,
            content,
            jokester_id,
        }
    }

    /// Rebuild an insert payload from stored columns.
    pub(crate) fn from_storage(name: String, content: String, jokester_id: UserId) -> Self {
        Self {
            name,
            content,
            jokester_id,
        }
    }

    /// Joke name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Joke content.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Owner to record.
    pub fn jokester_id(&self) -> &UserId {
        &self.jokester_id
    }
}

/// `{id, name}` projection used by the collection listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JokeSummary {
    pub id: JokeId,
    pub name: String,
}

impl From<&Joke> for JokeSummary {
    fn from(value: &Joke) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
        }
    }
}

/// Page metadata for a joke page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JokeMeta {
    pub title: String,
    pub description: String,
}

impl JokeMeta {
    /// Metadata describing `joke`.
    pub fn for_joke(joke: &Joke) -> Self {
        Self {
            title: format!("{} joke", joke.name()),
            description: format!("Enjoy the {} joke and much more", joke.name()),
        }
    }

    /// Metadata for pages whose joke could not be loaded.
    pub fn missing() -> Self {
        Self {
            title: "No joke".to_owned(),
            description: "No joke found".to_owned(),
        }
    }
}
