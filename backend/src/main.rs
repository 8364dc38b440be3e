//! Jokes server entry-point.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use jokes::inbound::http::health::HealthState;
use jokes::inbound::http::session_config::{BuildMode, session_settings_from_env};
use jokes::outbound::persistence::DbPool;
use jokes::settings::ServerSettings;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;

    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(pool_config) = settings.pool_config() {
        let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "jokes server listening");
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
