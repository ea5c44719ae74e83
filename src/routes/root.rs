use axum::{Json, Router, extract::State, http::HeaderMap, routing::get};

use crate::{
    dto::{now_rfc3339, status::StatusResponse},
    services::auth_service,
    state::SharedState,
};

/// Service banner with the caller's login state.
#[utoipa::path(
    get,
    path = "/",
    tag = "general",
    responses((status = 200, description = "API is running", body = StatusResponse))
)]
pub async fn status(State(state): State<SharedState>, headers: HeaderMap) -> Json<StatusResponse> {
    let user = auth_service::current_user(&state, &headers);
    Json(StatusResponse {
        message: "MLB Data API".into(),
        status: "Running".into(),
        timestamp: now_rfc3339(),
        docs: "/api-docs".into(),
        authenticated: user.is_some(),
        user: user.map(|principal| principal.username),
    })
}

/// Configure the landing route.
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(status))
}
