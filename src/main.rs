//! MLB Data API binary entrypoint wiring configuration, storage and the REST router.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "mongo-store")]
use mlb_data_api::dao::mongodb::{MongoManager, connect};
use mlb_data_api::{
    config::{AppConfig, StorageBackend},
    dao::Stores,
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Err(err) = dotenv {
        if !err.not_found() {
            warn!(error = %err, "failed to load .env file");
        }
    }

    let config = AppConfig::load();
    let storage = Storage::open(&config).await?;

    let app = routes::app(AppState::new(storage.stores.clone(), &config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let served = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum");

    storage.close().await;
    served
}

/// Storage connection owned by the entry point for the lifetime of the server.
struct Storage {
    stores: Stores,
    #[cfg(feature = "mongo-store")]
    mongo: Option<MongoManager>,
}

impl Storage {
    async fn open(config: &AppConfig) -> anyhow::Result<Self> {
        match config.storage {
            StorageBackend::Memory => {
                warn!("using in-memory storage; data is lost on shutdown");
                Ok(Self::in_memory())
            }
            #[cfg(feature = "mongo-store")]
            StorageBackend::Mongo => {
                let manager = connect(&config.mongo_uri, &config.mongo_db)
                    .await
                    .context("connecting to MongoDB")?;
                Ok(Self {
                    stores: manager.stores(),
                    mongo: Some(manager),
                })
            }
            #[cfg(not(feature = "mongo-store"))]
            StorageBackend::Mongo => {
                anyhow::bail!("MongoDB storage requested but the `mongo-store` feature is disabled")
            }
        }
    }

    fn in_memory() -> Self {
        Self {
            stores: Stores::in_memory(),
            #[cfg(feature = "mongo-store")]
            mongo: None,
        }
    }

    async fn close(self) {
        #[cfg(feature = "mongo-store")]
        {
            if let Some(manager) = self.mongo {
                manager.shutdown().await;
            }
        }
    }
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutdown signal received");
}
