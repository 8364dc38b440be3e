//! Roster login that also makes sure the account has a `users` row.
//!
//! Jokes reference their owner by foreign key, so a roster user must exist
//! in the database before their first submission.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{LoginService, UserRepository, UserRepositoryError, roster_user};
use crate::domain::{Error, LoginCredentials, UserId};

use super::diesel_user_repository::DieselUserRepository;

/// Diesel-backed [`LoginService`].
#[derive(Clone)]
pub struct DieselLoginService {
    users: Arc<dyn UserRepository>,
}

impl DieselLoginService {
    /// Roster login that records users through `users`.
    pub fn new(users: DieselUserRepository) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    #[cfg(test)]
    fn from_repository(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => Error::service_unavailable(message),
        UserRepositoryError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = roster_user(credentials)?;
        let user_id = account.id()?;
        let created = self
            .users
            .ensure(&user_id, account.username)
            .await
            .map_err(map_user_error)?;
        if created {
            info!(%user_id, username = account.username, "created user row on first login");
        }
        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use mockall::predicate::{always, eq};
    use rstest::rstest;

    fn creds(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("credentials shape")
    }

    #[rstest]
    #[tokio::test]
    async fn valid_login_ensures_the_user_row() {
        let mut users = MockUserRepository::new();
        users
            .expect_ensure()
            .with(always(), eq("kody"))
            .times(1)
            .returning(|_, _| Ok(true));
        let service = DieselLoginService::from_repository(Arc::new(users));

        let id = service
            .authenticate(&creds("kody", "twixrox"))
            .await
            .expect("login succeeds");
        assert_eq!(id.to_string(), "5c3f5e8a-2f4b-4b8e-9d3c-6a1f0e2b7c41");
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_credentials_never_touch_storage() {
        let mut users = MockUserRepository::new();
        users.expect_ensure().never();
        let service = DieselLoginService::from_repository(Arc::new(users));

        let err = service
            .authenticate(&creds("kody", "wrong"))
            .await
            .expect_err("login fails");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case(UserRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(UserRepositoryError::query("boom"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn storage_failures_keep_their_class(
        #[case] failure: UserRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut users = MockUserRepository::new();
        users
            .expect_ensure()
            .times(1)
            .returning(move |_, _| Err(failure.clone()));
        let service = DieselLoginService::from_repository(Arc::new(users));

        let err = service
            .authenticate(&creds("admin", "password"))
            .await
            .expect_err("storage failed");
        assert_eq!(err.code(), expected);
    }
}
