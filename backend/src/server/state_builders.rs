//! Chooses the adapters behind each HTTP port.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use jokes::domain::JokesService;
use jokes::domain::ports::{FixtureLoginService, JokeRepository, LoginService, UniformOffsetPicker};
use jokes::inbound::http::state::HttpState;
use jokes::outbound::memory::InMemoryJokeRepository;
use jokes::outbound::persistence::{
    DieselJokeRepository, DieselLoginService, DieselUserRepository,
};

use super::ServerConfig;

/// PostgreSQL adapters when a pool is configured, otherwise in-memory jokes
/// and the storage-free roster login.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (login, repository): (Arc<dyn LoginService>, Arc<dyn JokeRepository>) =
        match &config.db_pool {
            Some(pool) => (
                Arc::new(DieselLoginService::new(DieselUserRepository::new(
                    pool.clone(),
                ))),
                Arc::new(DieselJokeRepository::new(pool.clone())),
            ),
            None => {
                info!("no database configured; jokes are kept in memory");
                (
                    Arc::new(FixtureLoginService),
                    Arc::new(InMemoryJokeRepository::new(Arc::new(DefaultClock))),
                )
            }
        };

    let jokes = Arc::new(JokesService::new(repository, Arc::new(UniformOffsetPicker)));
    web::Data::new(HttpState::new(login, jokes.clone(), jokes))
}
