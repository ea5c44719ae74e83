use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::{
        LOGIN_FAILED_PATH,
        session::{clear_session_cookie, session_cookie},
    },
    dto::auth::{CurrentUserResponse, MessageResponse},
    error::{AppError, ErrorBody},
    services::auth_service::{self, CallbackParams},
    state::SharedState,
};

/// GitHub login, logout and session inspection.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/auth/github", get(github_login))
        .route("/auth/github/callback", get(github_callback))
        .route("/auth/logout", get(logout))
        .route("/auth/login-failed", get(login_failed))
        .route("/auth/user", get(current_user))
}

/// Parameters GitHub sends back to the callback.
#[derive(Debug, Deserialize, IntoParams)]
pub struct CallbackQuery {
    /// Authorization code to exchange for a token.
    code: Option<String>,
    /// Value issued when the login started.
    state: Option<String>,
    /// Set when the user denied access.
    error: Option<String>,
}

/// Redirect the browser to GitHub's authorization page.
#[utoipa::path(
    get,
    path = "/auth/github",
    tag = "authentication",
    responses(
        (status = 303, description = "Redirect to GitHub"),
        (status = 503, description = "GitHub login is not configured", body = ErrorBody)
    )
)]
pub async fn github_login(State(state): State<SharedState>) -> Result<Redirect, AppError> {
    let url = auth_service::begin_login(&state)?;
    Ok(Redirect::to(url.as_str()))
}

/// Finish the GitHub login and open a session.
#[utoipa::path(
    get,
    path = "/auth/github/callback",
    tag = "authentication",
    params(CallbackQuery),
    responses(
        (status = 303, description = "Redirect to `/` on success, `/auth/login-failed` otherwise")
    )
)]
pub async fn github_callback(
    State(state): State<SharedState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let params = CallbackParams {
        code: query.code,
        state: query.state,
        error: query.error,
    };

    match auth_service::complete_login(&state, params).await {
        Ok(session_id) => {
            let cookie = session_cookie(
                session_id,
                state.sessions().ttl(),
                state.cookie_secure(),
            );
            ([(SET_COOKIE, cookie)], Redirect::to("/")).into_response()
        }
        Err(_) => Redirect::to(LOGIN_FAILED_PATH).into_response(),
    }
}

/// Destroy the current session.
#[utoipa::path(
    get,
    path = "/auth/logout",
    tag = "authentication",
    responses((status = 200, description = "Logged out", body = MessageResponse))
)]
pub async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> impl IntoResponse {
    auth_service::logout(&state, &headers);
    (
        [(SET_COOKIE, clear_session_cookie(state.cookie_secure()))],
        Json(MessageResponse {
            message: "Successfully logged out".into(),
        }),
    )
}

/// Landing route after a failed login.
#[utoipa::path(
    get,
    path = "/auth/login-failed",
    tag = "authentication",
    responses((status = 401, description = "Authentication failed", body = ErrorBody))
)]
pub async fn login_failed() -> AppError {
    AppError::Unauthorized {
        message: "Authentication failed".into(),
        login_url: None,
    }
}

/// Describe the logged-in user.
#[utoipa::path(
    get,
    path = "/auth/user",
    tag = "authentication",
    responses(
        (status = 200, description = "Logged in", body = CurrentUserResponse),
        (status = 401, description = "Not logged in", body = CurrentUserResponse)
    )
)]
pub async fn current_user(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    match auth_service::current_user(&state, &headers) {
        Some(user) => Json(CurrentUserResponse::authenticated(user)).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(CurrentUserResponse::anonymous()),
        )
            .into_response(),
    }
}
