pub mod config;
pub mod domain;
pub mod infra;
pub mod observability;

use std::sync::Arc;

use anyhow::{Context, Result};
use infra::db::{mongo::mongo_connection, repositories::live_streams::LiveStreamMongo};
use tracing::info;

/// Loads the environment, starts logging and returns a ready live stream store.
pub async fn bootstrap(component: &str) -> Result<LiveStreamMongo> {
    // Loads .env first so LOG_LEVEL and SERVICE_NAME from it reach the subscriber.
    let dotenvy_env = config::config_loader::load()?;
    observability::init_observability(component)?;
    info!("ENV has been loaded");

    let database = mongo_connection::establish_connection(
        &dotenvy_env.database.uri,
        dotenvy_env.database.name.as_deref(),
    )
    .await?;
    info!(database = %database.name(), "MongoDB connection has been established");

    let live_streams = LiveStreamMongo::new(
        Arc::new(database),
        dotenvy_env.database.live_stream_collection,
    );
    live_streams
        .setup_collection()
        .await
        .context("live stream collection setup")?;
    info!(
        collection = %live_streams.collection_name(),
        "Live stream collection is ready"
    );

    Ok(live_streams)
}
