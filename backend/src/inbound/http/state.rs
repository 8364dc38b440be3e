//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureJokesCommand, FixtureJokesQuery, FixtureLoginService, JokesCommand, JokesQuery,
    LoginService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub jokes: Arc<dyn JokesQuery>,
    pub jokes_command: Arc<dyn JokesCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use jokes::domain::ports::{FixtureJokesCommand, FixtureJokesQuery, FixtureLoginService};
    /// use jokes::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixtureJokesQuery),
    ///     Arc::new(FixtureJokesCommand),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        jokes: Arc<dyn JokesQuery>,
        jokes_command: Arc<dyn JokesCommand>,
    ) -> Self {
        Self {
            login,
            jokes,
            jokes_command,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureLoginService),
            Arc::new(FixtureJokesQuery),
            Arc::new(FixtureJokesCommand),
        )
    }
}
