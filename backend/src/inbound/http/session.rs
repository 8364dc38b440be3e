//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The signed cookie session is the per-request credential. [`SessionContext`]
//! exposes it to the domain identity helpers and adds the login hint that
//! unauthenticated callers receive.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use tracing::warn;

use crate::domain::{CredentialSource, Error, UserId, require_identity, resolve_identity};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Path of the login endpoint advertised to anonymous callers.
pub const LOGIN_PATH: &str = "/login";
/// Name of the signed cookie carrying the session.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        self.0.renew();
        Ok(())
    }

    /// Drop everything stored in the session.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Caller identity, or `None` for anonymous callers.
    pub fn identity(&self) -> Option<UserId> {
        resolve_identity(self)
    }

    /// Require an identity, telling anonymous callers where to log in so
    /// they can come back to `redirect_to`.
    pub fn require_identity(&self, redirect_to: &str) -> Result<UserId, Error> {
        require_identity(self).map_err(|error| with_login_hint(error, redirect_to))
    }
}

/// Attach the login URL for `redirect_to` to an unauthorized error.
pub fn with_login_hint(error: Error, redirect_to: &str) -> Error {
    error.with_details(json!({ "login": login_hint(redirect_to) }))
}

/// Login URL that returns the caller to `redirect_to` afterwards.
pub fn login_hint(redirect_to: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("redirectTo", redirect_to)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

impl CredentialSource for SessionContext {
    fn raw_identity(&self) -> Option<String> {
        match self.0.get::<String>(USER_ID_KEY) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(%error, "unreadable session cookie treated as anonymous");
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
