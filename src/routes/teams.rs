use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    routing::{post, put},
};
use serde_json::Value;

use crate::{
    auth::middleware::require_session,
    dao::models::{Record, Team},
    error::{AppError, ErrorBody},
    routes::json_body,
    services::record_service,
    state::SharedState,
};

/// Team collection routes; writes require a session.
pub fn router(state: SharedState) -> Router<SharedState> {
    let gate = middleware::from_fn_with_state(state, require_session);

    Router::new()
        .route(
            "/teams",
            post(create_team)
                .route_layer(gate.clone())
                .get(list_teams),
        )
        .route(
            "/teams/{id}",
            put(update_team)
                .delete(delete_team)
                .route_layer(gate)
                .get(get_team),
        )
}

/// List every team.
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    responses(
        (status = 200, description = "All teams", body = [Record<Team>]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_teams(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Record<Team>>>, AppError> {
    Ok(Json(record_service::list(state.stores().teams.as_ref()).await?))
}

/// Fetch one team by id.
#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = String, Path, description = "24 character hexadecimal team id")),
    responses(
        (status = 200, description = "Team", body = Record<Team>),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No such team", body = ErrorBody)
    )
)]
pub async fn get_team(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Record<Team>>, AppError> {
    Ok(Json(
        record_service::get(state.stores().teams.as_ref(), &id).await?,
    ))
}

/// Create a team from a loosely typed body.
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    request_body = Team,
    security(("session_cookie" = [])),
    responses(
        (status = 201, description = "Team created", body = Record<Team>),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Login required", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn create_team(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Record<Team>>), AppError> {
    let body = json_body(payload)?;
    let created = record_service::create(state.stores().teams.as_ref(), &body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a team wholesale.
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = String, Path, description = "24 character hexadecimal team id")),
    request_body = Team,
    security(("session_cookie" = [])),
    responses(
        (status = 204, description = "Team replaced"),
        (status = 400, description = "Malformed id or validation failed", body = ErrorBody),
        (status = 401, description = "Login required", body = ErrorBody),
        (status = 500, description = "Nothing was replaced", body = ErrorBody)
    )
)]
pub async fn update_team(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let body = json_body(payload)?;
    record_service::update(state.stores().teams.as_ref(), &id, &body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a team.
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = String, Path, description = "24 character hexadecimal team id")),
    security(("session_cookie" = [])),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Login required", body = ErrorBody),
        (status = 500, description = "Nothing was deleted", body = ErrorBody)
    )
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    record_service::delete(state.stores().teams.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
