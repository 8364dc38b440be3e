//! PostgreSQL-backed `JokeRepository`.
//!
//! Offset and recency reads both order by `(created_at, id)` so that a count
//! followed by an offset read addresses the same sequence.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JokeRepository, JokeRepositoryError};
use crate::domain::{Joke, JokeId, NewJoke};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{JokeRow, NewJokeRow};
use super::pool::{DbPool, PoolError};
use super::schema::jokes;

/// Diesel implementation of [`JokeRepository`].
#[derive(Clone)]
pub struct DieselJokeRepository {
    pool: DbPool,
}

impl DieselJokeRepository {
    /// Create a repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> JokeRepositoryError {
    map_pool_error(error, |message| JokeRepositoryError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> JokeRepositoryError {
    map_diesel_error(
        error,
        |message| JokeRepositoryError::query(message),
        |message| JokeRepositoryError::connection(message),
    )
}

/// Postgres takes signed offsets; anything past `i64::MAX` reads nothing anyway.
fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl JokeRepository for DieselJokeRepository {
    async fn count(&self) -> Result<u64, JokeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let total: i64 = jokes::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        u64::try_from(total).map_err(|_| JokeRepositoryError::query("negative joke count"))
    }

    async fn find_by_id(&self, id: &JokeId) -> Result<Option<Joke>, JokeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<JokeRow> = jokes::table
            .filter(jokes::id.eq(id.as_uuid()))
            .select(JokeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(Joke::from))
    }

    async fn find_at_offset(&self, skip: u64, take: u64) -> Result<Vec<Joke>, JokeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<JokeRow> = jokes::table
            .order((jokes::created_at.asc(), jokes::id.asc()))
            .offset(to_sql_count(skip))
            .limit(to_sql_count(take))
            .select(JokeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Joke::from).collect())
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<Joke>, JokeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<JokeRow> = jokes::table
            .order((jokes::created_at.desc(), jokes::id.desc()))
            .limit(to_sql_count(limit))
            .select(JokeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Joke::from).collect())
    }

    async fn insert(&self, joke: &NewJoke) -> Result<Joke, JokeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: JokeRow = diesel::insert_into(jokes::table)
            .values(NewJokeRow::new(JokeId::random(), joke))
            .returning(JokeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(Joke::from(row))
    }

    async fn delete_by_id(&self, id: &JokeId) -> Result<bool, JokeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(jokes::table.filter(jokes::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }
}
