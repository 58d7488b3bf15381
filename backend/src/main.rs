//! Backend entry-point: runs migrations, then serves the station REST API.

mod server;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use server::ServerConfig;
use skistation::inbound::http::health::HealthState;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()?;
    server::run_migrations(config.database_url())?;

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config).await?;
    server.await
}
