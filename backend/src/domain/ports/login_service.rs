//! Driving port for login.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing infrastructure. Registration is handled elsewhere, so until it
//! lands every adapter authenticates against the same fixed roster.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// One account in the development roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterUser {
    pub username: &'static str,
    pub password: &'static str,
    pub user_id: &'static str,
}

/// Accounts accepted by the login adapters.
pub const ROSTER: [RosterUser; 2] = [
    RosterUser {
        username: "admin",
        password: "password",
        user_id: "123e4567-e89b-12d3-a456-426614174000",
    },
    RosterUser {
        username: "kody",
        password: "twixrox",
        user_id: "5c3f5e8a-2f4b-4b8e-9d3c-6a1f0e2b7c41",
    },
];

impl RosterUser {
    /// Parsed identifier for this account.
    pub fn id(&self) -> Result<UserId, Error> {
        UserId::new(self.user_id)
            .map_err(|err| Error::internal(format!("invalid roster user id: {err}")))
    }
}

/// Find the roster account matching `credentials`.
pub fn roster_user(credentials: &LoginCredentials) -> Result<&'static RosterUser, Error> {
    ROSTER
        .iter()
        .find(|user| {
            user.username == credentials.username() && user.password == credentials.password()
        })
        .ok_or_else(|| Error::unauthorized("invalid credentials"))
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Roster authenticator that touches no storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        roster_user(credentials)?.id()
    }
}
