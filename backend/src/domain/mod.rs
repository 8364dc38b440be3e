//! Domain primitives, rules and ports.
//!
//! Purpose: hold everything about jokes that does not depend on HTTP or a
//! database. Inbound adapters call the driving ports in [`ports`]; outbound
//! adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure envelope.
//! - UserId and the identity helpers in [`auth`].
//! - Joke types, validators, the ownership check, the random selector and
//!   the submission reconciler from [`jokes`].

pub mod auth;
pub mod error;
pub mod jokes;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    CredentialSource, LoginCredentials, LoginValidationError, require_identity, resolve_identity,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::jokes::*;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserIdValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use jokes::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
