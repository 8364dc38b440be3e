//! Cookie session settings read from the environment.
//!
//! The session cookie carries the caller's identity, so release builds refuse
//! to start with anything short of an explicit, strong configuration. Debug
//! builds fall back to permissive defaults and log what they assumed.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

pub(crate) const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const KEY_FILE_DEFAULT: &str = "/var/run/secrets/session_key";
/// Shortest key material accepted from disk.
pub const SESSION_KEY_MIN_LEN: usize = 64;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// How strictly missing or malformed settings are treated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Defaults are filled in with a warning.
    Debug,
    /// Every toggle must be present and valid.
    Release,
}

impl BuildMode {
    /// Mode matching how this binary was compiled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jokes::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) {
    ///     BuildMode::Debug
    /// } else {
    ///     BuildMode::Release
    /// };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Resolved cookie session settings.
pub struct SessionSettings {
    /// Signing key for the session cookie.
    pub key: Key,
    /// Whether the cookie is marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for the cookie.
    pub same_site: SameSite,
}

/// Reasons the session configuration was rejected.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read session settings from `env`.
///
/// # Examples
///
/// ```rust
/// use jokes::inbound::http::session_config::{session_settings_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
///
/// // Debug builds fill in secure defaults and an ephemeral key.
/// let settings = session_settings_from_env(&env, BuildMode::Debug).unwrap();
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let toggles = Toggles { env, mode };
    let cookie_secure = toggles.flag(COOKIE_SECURE_ENV, true)?;
    let same_site = toggles.same_site(cookie_secure)?;
    let allow_ephemeral = toggles.flag(ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = toggles.key(allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

struct Toggles<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> Toggles<'_, E> {
    /// Boolean toggle; debug builds use `debug_default` for absent or bad values.
    fn flag(&self, name: &'static str, debug_default: bool) -> Result<bool, SessionConfigError> {
        let Some(value) = self.env.string(name) else {
            return self.fallback(name, debug_default);
        };
        match parse_bool(&value) {
            Some(flag) => Ok(flag),
            None if self.mode.is_debug() => {
                warn!(%value, default = debug_default, "invalid {name}; using default");
                Ok(debug_default)
            }
            None => Err(SessionConfigError::InvalidEnv {
                name,
                value,
                expected: BOOL_EXPECTED,
            }),
        }
    }

    fn fallback<T: std::fmt::Debug>(
        &self,
        name: &'static str,
        default: T,
    ) -> Result<T, SessionConfigError> {
        if self.mode.is_debug() {
            warn!(?default, "{name} not set; using default");
            Ok(default)
        } else {
            Err(SessionConfigError::MissingEnv { name })
        }
    }

    fn same_site(&self, cookie_secure: bool) -> Result<SameSite, SessionConfigError> {
        let debug_default = SameSite::Lax;
        let same_site = match self.env.string(SAMESITE_ENV) {
            None => self.fallback(SAMESITE_ENV, debug_default)?,
            Some(value) => match parse_same_site(&value) {
                Some(same_site) => same_site,
                None if self.mode.is_debug() => {
                    warn!(%value, "invalid SESSION_SAMESITE; using Lax");
                    debug_default
                }
                None => {
                    return Err(SessionConfigError::InvalidEnv {
                        name: SAMESITE_ENV,
                        value,
                        expected: SAMESITE_EXPECTED,
                    });
                }
            },
        };

        if same_site == SameSite::None && !cookie_secure {
            if !self.mode.is_debug() {
                return Err(SessionConfigError::InsecureSameSiteNone);
            }
            warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it");
        }
        Ok(same_site)
    }

    fn key(&self, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
        let path = PathBuf::from(
            self.env
                .string(KEY_FILE_ENV)
                .unwrap_or_else(|| KEY_FILE_DEFAULT.to_owned()),
        );
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => Zeroizing::new(bytes),
            Err(source) if allow_ephemeral || self.mode.is_debug() => {
                warn!(path = %path.display(), error = %source, "using ephemeral session key");
                return Ok(Key::generate());
            }
            Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
        };

        if bytes.len() < SESSION_KEY_MIN_LEN {
            if !self.mode.is_debug() {
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length: bytes.len(),
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            // Key::derive_from panics on short input.
            warn!(path = %path.display(), length = bytes.len(), "session key too short; using ephemeral key");
            return Ok(Key::generate());
        }
        Ok(Key::derive_from(&bytes))
    }
}

/// Parse the boolean spellings accepted by session toggles.
///
/// # Examples
///
/// ```rust
/// use jokes::inbound::http::session_config::parse_bool;
///
/// assert_eq!(parse_bool(" Yes "), Some(true));
/// assert_eq!(parse_bool("0"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
