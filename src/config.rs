//! Application-level configuration loading: JSON file first, then environment overrides.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "MLB_API_CONFIG_PATH";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGO_DB: &str = "mlb";
const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Which storage backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// MongoDB at `mongo_uri`.
    #[default]
    Mongo,
    /// Process-local collections, lost on restart.
    Memory,
}

impl StorageBackend {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Some(Self::Mongo),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Credentials for the GitHub OAuth application.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubOAuthConfig {
    /// OAuth application client id.
    #[validate(length(min = 1))]
    pub client_id: String,
    /// OAuth application client secret.
    #[validate(length(min = 1))]
    pub client_secret: String,
    /// Absolute URL of `/auth/github/callback` as registered with GitHub.
    #[validate(url)]
    pub callback_url: String,
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// TCP port the server binds on all interfaces.
    pub port: u16,
    /// Storage backend selection.
    pub storage: StorageBackend,
    /// MongoDB connection string.
    pub mongo_uri: String,
    /// Database holding both collections.
    pub mongo_db: String,
    /// `None` disables the login flow; the write gate still rejects anonymous requests.
    pub github: Option<GitHubOAuthConfig>,
    /// Lifetime of a login session.
    pub session_ttl: time::Duration,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            storage: StorageBackend::default(),
            mongo_uri: DEFAULT_MONGO_URI.into(),
            mongo_db: DEFAULT_MONGO_DB.into(),
            github: None,
            session_ttl: time::Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            cookie_secure: false,
        }
    }
}

impl AppConfig {
    /// Load the configuration file (if any) and apply environment overrides.
    pub fn load() -> Self {
        let raw = read_config_file(&resolve_config_path());
        Self::from_sources(raw, |key| env::var(key).ok())
    }

    /// Merge the file contents with values returned by `lookup`, environment winning.
    fn from_sources(raw: RawConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = var("PORT")
            .or_else(|| var("SERVER_PORT"))
            .and_then(|value| parse_logged::<u16>("PORT", &value))
            .or(raw.port)
            .unwrap_or(defaults.port);

        let storage = var("STORAGE_BACKEND")
            .and_then(|value| {
                let parsed = StorageBackend::parse(&value);
                if parsed.is_none() {
                    warn!(value = %value, "unknown STORAGE_BACKEND; ignoring");
                }
                parsed
            })
            .or(raw.storage)
            .unwrap_or(defaults.storage);

        let mongo_uri = var("MONGO_URI")
            .or(raw.mongo_uri)
            .unwrap_or(defaults.mongo_uri);
        let mongo_db = var("MONGO_DB").or(raw.mongo_db).unwrap_or(defaults.mongo_db);

        let session_ttl = var("SESSION_TTL_SECS")
            .and_then(|value| parse_logged::<i64>("SESSION_TTL_SECS", &value))
            .or(raw.session_ttl_secs)
            .filter(|secs| *secs > 0)
            .map(time::Duration::seconds)
            .unwrap_or(defaults.session_ttl);

        let cookie_secure = var("COOKIE_SECURE")
            .and_then(|value| parse_logged::<bool>("COOKIE_SECURE", &value.to_ascii_lowercase()))
            .or(raw.cookie_secure)
            .unwrap_or(defaults.cookie_secure);

        let file_github = raw.github.unwrap_or_default();
        let github = GitHubOAuthConfig {
            client_id: var("GITHUB_CLIENT_ID").unwrap_or(file_github.client_id),
            client_secret: var("GITHUB_CLIENT_SECRET").unwrap_or(file_github.client_secret),
            callback_url: var("GITHUB_CALLBACK_URL").unwrap_or(file_github.callback_url),
        };

        Self {
            port,
            storage,
            mongo_uri,
            mongo_db,
            github: checked_github(github),
            session_ttl,
            cookie_secure,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    port: Option<u16>,
    storage: Option<StorageBackend>,
    mongo_uri: Option<String>,
    mongo_db: Option<String>,
    github: Option<GitHubOAuthConfig>,
    session_ttl_secs: Option<i64>,
    cookie_secure: Option<bool>,
}

fn read_config_file(path: &Path) -> RawConfig {
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
            Ok(raw) => {
                info!(path = %path.display(), "loaded configuration file");
                raw
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse config; falling back to defaults"
                );
                RawConfig::default()
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                path = %path.display(),
                "config file not found; using environment and built-in defaults"
            );
            RawConfig::default()
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to read config; falling back to defaults"
            );
            RawConfig::default()
        }
    }
}

fn checked_github(github: GitHubOAuthConfig) -> Option<GitHubOAuthConfig> {
    if github == GitHubOAuthConfig::default() {
        warn!("GitHub OAuth is not configured; login is disabled");
        return None;
    }
    match github.validate() {
        Ok(()) => Some(github),
        Err(err) => {
            warn!(error = %err, "invalid GitHub OAuth settings; login is disabled");
            None
        }
    }
}

fn parse_logged<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    let parsed = value.trim().parse::<T>().ok();
    if parsed.is_none() {
        warn!(key, value, "ignoring unparsable environment value");
    }
    parsed
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_with(vars: &[(&str, &str)], raw: RawConfig) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_sources(raw, |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_any_source() {
        let config = config_with(&[], RawConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage, StorageBackend::Mongo);
        assert_eq!(config.mongo_db, "mlb");
        assert!(config.github.is_none());
        assert_eq!(config.session_ttl, time::Duration::hours(24));
    }

    #[test]
    fn environment_overrides_file() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"port": 4000, "storage": "memory", "mongoDb": "file"}"#)
                .unwrap();
        let config = config_with(&[("SERVER_PORT", "5000"), ("MONGO_DB", "env")], raw);

        assert_eq!(config.port, 5000);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.mongo_db, "env");
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = config_with(
            &[
                ("PORT", "eighty"),
                ("STORAGE_BACKEND", "couch"),
                ("SESSION_TTL_SECS", "-5"),
                ("COOKIE_SECURE", "TRUE"),
            ],
            RawConfig::default(),
        );

        assert_eq!(config.port, 3000);
        assert_eq!(config.storage, StorageBackend::Mongo);
        assert_eq!(config.session_ttl, time::Duration::hours(24));
        assert!(config.cookie_secure);
    }

    #[test]
    fn complete_github_settings_enable_login() {
        let config = config_with(
            &[
                ("GITHUB_CLIENT_ID", "id"),
                ("GITHUB_CLIENT_SECRET", "secret"),
                ("GITHUB_CALLBACK_URL", "http://localhost:3000/auth/github/callback"),
            ],
            RawConfig::default(),
        );

        let github = config.github.expect("github configured");
        assert_eq!(github.client_id, "id");
    }

    #[test]
    fn invalid_github_settings_disable_login() {
        let config = config_with(
            &[
                ("GITHUB_CLIENT_ID", "id"),
                ("GITHUB_CALLBACK_URL", "not a url"),
            ],
            RawConfig::default(),
        );

        assert!(config.github.is_none());
    }
}
