//! Authentication primitives: login credentials and per-request identity.
//!
//! Identity resolution never fails. A request with no credential, an
//! unreadable credential, or a credential that does not decode to a
//! [`UserId`] is simply anonymous. Only [`require_identity`] turns absence
//! into an error, and only mutating operations call it.

use std::fmt;

use tracing::warn;
use zeroize::Zeroizing;

use super::{Error, UserId};

/// Opaque per-request credential container.
///
/// Adapters expose whatever raw identity value the credential carries, or
/// `None` when it carries nothing they can read.
pub trait CredentialSource {
    /// Raw identity value carried by the credential.
    fn raw_identity(&self) -> Option<String>;
}

impl CredentialSource for Option<String> {
    fn raw_identity(&self) -> Option<String> {
        self.clone()
    }
}

/// Resolve the caller identity carried by `credential`, if any.
///
/// Missing and malformed credentials are treated identically.
///
/// # Examples
/// ```
/// use jokes::domain::resolve_identity;
///
/// assert!(resolve_identity(&None::<String>).is_none());
/// assert!(resolve_identity(&Some("tampered".to_owned())).is_none());
/// let raw = Some("123e4567-e89b-12d3-a456-426614174000".to_owned());
/// assert!(resolve_identity(&raw).is_some());
/// ```
pub fn resolve_identity<C>(credential: &C) -> Option<UserId>
where
    C: CredentialSource + ?Sized,
{
    let raw = credential.raw_identity()?;
    match UserId::new(&raw) {
        Ok(id) => Some(id),
        Err(error) => {
            warn!(%error, "ignoring malformed identity in credential");
            None
        }
    }
}

/// Resolve the caller identity or fail with [`super::ErrorCode::Unauthorized`].
pub fn require_identity<C>(credential: &C) -> Result<UserId, Error>
where
    C: CredentialSource + ?Sized,
{
    resolve_identity(credential).ok_or_else(|| Error::unauthorized("login required"))
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the login port.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username with surrounding whitespace removed.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const ADA: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("not-a-uuid"), None)]
    #[case(Some(ADA), Some(ADA))]
    fn resolution_never_fails(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        let credential = raw.map(str::to_owned);
        let resolved = resolve_identity(&credential).map(|id| id.to_string());
        assert_eq!(resolved.as_deref(), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("garbage"))]
    #[case(Some(ADA))]
    fn resolution_is_idempotent(#[case] raw: Option<&str>) {
        let credential = raw.map(str::to_owned);
        assert_eq!(resolve_identity(&credential), resolve_identity(&credential));
    }

    #[rstest]
    fn gate_rejects_anonymous_callers() {
        let error = require_identity(&None::<String>).expect_err("anonymous");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn gate_admits_identified_callers() {
        let id = require_identity(&Some(ADA.to_owned())).expect("identified");
        assert_eq!(id.to_string(), ADA);
    }

    #[rstest]
    #[case("  ", "pw", LoginValidationError::EmptyUsername)]
    #[case("kody", "", LoginValidationError::EmptyPassword)]
    fn credentials_reject_blank_parts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(expected)
        );
    }

    #[rstest]
    fn credentials_trim_username_only() {
        let creds = LoginCredentials::try_from_parts(" kody ", " twixrox ").expect("valid");
        assert_eq!(creds.username(), "kody");
        assert_eq!(creds.password(), " twixrox ");
    }
}
