use anyhow::{Context, Result, bail};
use mongodb::{Client, Database, bson::doc};
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Connects to MongoDB and checks the server answers before handing out the database.
///
/// Falls back to the URI's default database when `database_name` is `None`.
pub async fn establish_connection(uri: &str, database_name: Option<&str>) -> Result<Database> {
    debug!("setting up mongo client");

    let client = tokio::time::timeout(CONNECT_TIMEOUT, Client::with_uri_str(uri))
        .await
        .context("mongodb timeout")?
        .context("mongodb")?;

    let database = match database_name {
        Some(name) => client.database(name),
        None => match client.default_database() {
            Some(database) => database,
            None => bail!("no database name given and MONGODB_URI has no default database"),
        },
    };

    tokio::time::timeout(CONNECT_TIMEOUT, ping(&database))
        .await
        .context("mongodb ping timeout")??;

    debug!(database = %database.name(), "mongo connection is ready");

    Ok(database)
}

pub async fn ping(database: &Database) -> Result<()> {
    database
        .run_command(doc! { "ping": 1 }, None)
        .await
        .context("mongodb ping failed")?;
    Ok(())
}
