//! GitHub OAuth web flow: authorize redirect, code exchange and profile lookup.

use reqwest::{Client, Url, header::ACCEPT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::session::Principal;
use crate::config::GitHubOAuthConfig;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_URL: &str = "https://api.github.com/user";
const SCOPE: &str = "user:email";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Failures while talking to GitHub.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The HTTP client could not be constructed.
    #[error("failed to build GitHub HTTP client")]
    Client(#[source] reqwest::Error),
    /// Authorize endpoint or callback URL did not parse.
    #[error("invalid authorize URL: {0}")]
    AuthorizeUrl(String),
    /// Transport or decoding failure.
    #[error("GitHub request failed")]
    Request(#[from] reqwest::Error),
    /// GitHub answered but refused the code.
    #[error("GitHub rejected the authorization code: {0}")]
    Rejected(String),
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Deserialize)]
struct GitHubUser {
    id: u64,
    login: String,
    name: Option<String>,
    html_url: Option<String>,
}

impl From<GitHubUser> for Principal {
    fn from(user: GitHubUser) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.login,
            display_name: user.name,
            profile_url: user.html_url,
        }
    }
}

/// OAuth client for one registered GitHub application.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    config: GitHubOAuthConfig,
}

impl GitHubClient {
    /// Build a client for the given application credentials.
    pub fn new(config: GitHubOAuthConfig) -> Result<Self, GitHubError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(GitHubError::Client)?;
        Ok(Self { http, config })
    }

    /// URL the browser is sent to in order to grant access.
    pub fn authorize_url(&self, state: &str) -> Result<Url, GitHubError> {
        Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.callback_url.as_str()),
                ("scope", SCOPE),
                ("state", state),
            ],
        )
        .map_err(|err| GitHubError::AuthorizeUrl(err.to_string()))
    }

    /// Trade the callback `code` for the user's profile.
    pub async fn authenticate(&self, code: &str) -> Result<Principal, GitHubError> {
        let token = self.exchange_code(code).await?;
        self.fetch_profile(&token).await
    }

    async fn exchange_code(&self, code: &str) -> Result<String, GitHubError> {
        let response: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .header(ACCEPT, "application/json")
            .json(&TokenRequest {
                client_id: &self.config.client_id,
                client_secret: &self.config.client_secret,
                code,
                redirect_uri: &self.config.callback_url,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response {
            TokenResponse {
                access_token: Some(token),
                ..
            } => Ok(token),
            TokenResponse {
                error,
                error_description,
                ..
            } => Err(GitHubError::Rejected(
                error_description
                    .or(error)
                    .unwrap_or_else(|| "no access token returned".into()),
            )),
        }
    }

    async fn fetch_profile(&self, token: &str) -> Result<Principal, GitHubError> {
        let user: GitHubUser = self
            .http
            .get(USER_URL)
            .bearer_auth(token)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_carries_scope_and_state() {
        let client = GitHubClient::new(GitHubOAuthConfig {
            client_id: "abc123".into(),
            client_secret: "secret".into(),
            callback_url: "http://localhost:3000/auth/github/callback".into(),
        })
        .unwrap();

        let url = client.authorize_url("xyz").unwrap();
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        assert_eq!(url.host_str(), Some("github.com"));
        assert!(query.contains(&("client_id".into(), "abc123".into())));
        assert!(query.contains(&("scope".into(), "user:email".into())));
        assert!(query.contains(&("state".into(), "xyz".into())));
        assert!(!url.as_str().contains("secret"));
    }

    #[test]
    fn github_user_maps_to_principal() {
        let user: GitHubUser = serde_json::from_str(
            r#"{"id": 1, "login": "octocat", "name": null, "html_url": "https://github.com/octocat"}"#,
        )
        .unwrap();

        let principal = Principal::from(user);
        assert_eq!(principal.id, "1");
        assert_eq!(principal.username, "octocat");
        assert_eq!(principal.display_name, None);
    }
}
