//! Port for the minimal user records jokes reference.

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
    }
}

/// Port for ensuring user rows exist before jokes reference them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user unless a row with the same id already exists.
    ///
    /// Returns `true` when a row was created.
    async fn ensure(&self, id: &UserId, username: &str) -> Result<bool, UserRepositoryError>;
}
