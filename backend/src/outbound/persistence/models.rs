//! Diesel row structs. Never exposed outside the persistence module.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Joke, JokeId, NewJoke, UserId};

use super::schema::{jokes, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jokes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JokeRow {
    pub id: Uuid,
    pub name: String,
    pub content: String,
    pub jokester_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<JokeRow> for Joke {
    fn from(row: JokeRow) -> Self {
        Joke::from_parts(
            JokeId::from_uuid(row.id),
            NewJoke::from_storage(row.name, row.content, UserId::from_uuid(row.jokester_id)),
            row.created_at,
        )
    }
}

/// Insert payload; `created_at` comes from the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jokes)]
pub(crate) struct NewJokeRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub content: &'a str,
    pub jokester_id: Uuid,
}

impl<'a> NewJokeRow<'a> {
    pub(crate) fn new(id: JokeId, joke: &'a NewJoke) -> Self {
        Self {
            id: *id.as_uuid(),
            name: joke.name(),
            content: joke.content(),
            jokester_id: *joke.jokester_id().as_uuid(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
}
