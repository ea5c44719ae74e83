use std::sync::Arc;

use tracing::warn;

use crate::{
    auth::{github::GitHubClient, session::SessionStore},
    config::AppConfig,
    dao::Stores,
};

/// Handle cloned into every request.
pub type SharedState = Arc<AppState>;

/// Central application state: storage handles, sessions and the OAuth client.
pub struct AppState {
    stores: Stores,
    sessions: SessionStore,
    github: Option<GitHubClient>,
    cookie_secure: bool,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// A GitHub client that cannot be built leaves login disabled.
    pub fn new(stores: Stores, config: &AppConfig) -> SharedState {
        let github = config
            .github
            .clone()
            .and_then(|github| match GitHubClient::new(github) {
                Ok(client) => Some(client),
                Err(err) => {
                    warn!(error = %err, "GitHub login disabled");
                    None
                }
            });

        Arc::new(Self {
            stores,
            sessions: SessionStore::new(config.session_ttl),
            github,
            cookie_secure: config.cookie_secure,
        })
    }

    /// Per-collection storage handles.
    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Live sessions and pending OAuth states.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// GitHub OAuth client, when login is configured.
    pub fn github(&self) -> Option<&GitHubClient> {
        self.github.as_ref()
    }

    /// Whether session cookies carry the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }
}
