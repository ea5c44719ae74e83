//! GitHub login flow and session bookkeeping behind the `/auth` routes.

use axum::http::HeaderMap;
use reqwest::Url;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::session::{Principal, session_id_from_headers},
    error::ServiceError,
    state::SharedState,
};

/// Query parameters GitHub appends to the callback URL.
#[derive(Debug, Default)]
pub struct CallbackParams {
    /// Authorization code to exchange.
    pub code: Option<String>,
    /// Echo of the `state` issued by [`begin_login`].
    pub state: Option<String>,
    /// Set when the user denied access.
    pub error: Option<String>,
}

/// Remember a fresh OAuth `state` and build the GitHub authorize URL around it.
pub fn begin_login(state: &SharedState) -> Result<Url, ServiceError> {
    let github = state
        .github()
        .ok_or_else(|| ServiceError::Unavailable("GitHub login is not configured".into()))?;

    let oauth_state = state.sessions().issue_state();
    github.authorize_url(&oauth_state).map_err(|err| {
        warn!(error = %err, "failed to build GitHub authorize URL");
        ServiceError::Unavailable("GitHub login is not configured".into())
    })
}

/// Validate the callback, resolve the GitHub user and open a session for them.
pub async fn complete_login(
    state: &SharedState,
    params: CallbackParams,
) -> Result<Uuid, ServiceError> {
    let failed = || ServiceError::Unauthorized("Authentication failed".into());

    if let Some(error) = params.error {
        warn!(error = %error, "GitHub denied the authorization request");
        return Err(failed());
    }

    let github = state.github().ok_or_else(failed)?;

    let state_ok = params
        .state
        .as_deref()
        .is_some_and(|value| state.sessions().consume_state(value));
    if !state_ok {
        warn!("OAuth callback carried an unknown or expired state");
        return Err(failed());
    }

    let code = params.code.filter(|code| !code.is_empty()).ok_or_else(failed)?;
    let principal = github.authenticate(&code).await.map_err(|err| {
        warn!(error = %err, "GitHub authentication failed");
        failed()
    })?;

    info!(user = %principal.username, "user logged in");
    Ok(state.sessions().create(principal))
}

/// End the session referenced by the request cookie, if any.
pub fn logout(state: &SharedState, headers: &HeaderMap) {
    if let Some(id) = session_id_from_headers(headers) {
        if state.sessions().destroy(id) {
            info!(session = %id, "user logged out");
        }
    }
}

/// Principal of the session referenced by the request cookie.
pub fn current_user(state: &SharedState, headers: &HeaderMap) -> Option<Principal> {
    state.sessions().principal_from_headers(headers)
}
