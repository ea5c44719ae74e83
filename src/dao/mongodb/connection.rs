use std::time::Duration;

use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use tokio::time::sleep;
use tracing::{info, warn};

use super::error::{MongoDaoError, Result};

const MAX_CONNECT_ATTEMPTS: u32 = 10;
const BASE_RETRY_DELAY_MS: u64 = 250;

/// Owner of the MongoDB client for the lifetime of the process.
///
/// Cloning is cheap: the driver client is reference counted internally.
#[derive(Clone)]
pub struct MongoManager {
    client: Client,
    database: Database,
}

/// Connect to MongoDB, pinging with backoff until the server answers.
pub async fn connect(uri: &str, database_name: &str) -> Result<MongoManager> {
    let options = ClientOptions::parse(uri)
        .await
        .map_err(|source| MongoDaoError::InvalidUri { source })?;

    let (client, database) = establish_connection(options, database_name).await?;
    info!(database = database_name, "connected to MongoDB");

    Ok(MongoManager { client, database })
}

impl MongoManager {
    /// Clone the database handle.
    pub fn database(&self) -> Database {
        self.database.clone()
    }

    /// Close every pooled connection; outstanding operations complete first.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("MongoDB client shut down");
    }
}

pub(super) async fn ping(database: &Database) -> Result<()> {
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|source| MongoDaoError::HealthPing { source })?;
    Ok(())
}

async fn establish_connection(
    options: ClientOptions,
    database_name: &str,
) -> Result<(Client, Database)> {
    let client = Client::with_options(options)
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(database_name);

    let mut attempts = 0;
    let mut delay = Duration::from_millis(BASE_RETRY_DELAY_MS);

    loop {
        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => break,
            Err(err) => {
                attempts += 1;
                if attempts >= MAX_CONNECT_ATTEMPTS {
                    return Err(MongoDaoError::InitialPing {
                        attempts,
                        source: err,
                    });
                }
                warn!(
                    attempts,
                    wait_ms = delay.as_millis(),
                    error = %err,
                    "MongoDB ping failed during initial connection; retrying"
                );
                sleep(delay).await;
                delay = (delay * 2).min(Duration::from_secs(5));
            }
        }
    }

    Ok((client, database))
}
