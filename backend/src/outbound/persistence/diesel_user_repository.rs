//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::UserId;
use crate::domain::ports::{UserRepository, UserRepositoryError};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewUserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn ensure(&self, id: &UserId, username: &str) -> Result<bool, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, |message| UserRepositoryError::connection(message)))?;

        let inserted = diesel::insert_into(users::table)
            .values(NewUserRow {
                id: *id.as_uuid(),
                username,
            })
            .on_conflict(users::id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    |message| UserRepositoryError::query(message),
                    |message| UserRepositoryError::connection(message),
                )
            })?;
        Ok(inserted > 0)
    }
}
