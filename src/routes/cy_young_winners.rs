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
    dao::models::{CyYoungWinner, Record},
    error::{AppError, ErrorBody},
    routes::json_body,
    services::record_service,
    state::SharedState,
};

/// Cy Young winner collection routes; writes require a session.
pub fn router(state: SharedState) -> Router<SharedState> {
    let gate = middleware::from_fn_with_state(state, require_session);

    Router::new()
        .route(
            "/cy-young-winners",
            post(create_winner)
                .route_layer(gate.clone())
                .get(list_winners),
        )
        .route(
            "/cy-young-winners/{id}",
            put(update_winner)
                .delete(delete_winner)
                .route_layer(gate)
                .get(get_winner),
        )
}

/// List every Cy Young winner.
#[utoipa::path(
    get,
    path = "/cy-young-winners",
    tag = "cy-young-winners",
    responses(
        (status = 200, description = "All Cy Young winners", body = [Record<CyYoungWinner>]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_winners(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Record<CyYoungWinner>>>, AppError> {
    Ok(Json(record_service::list(state.stores().winners.as_ref()).await?))
}

/// Fetch one Cy Young winner by id.
#[utoipa::path(
    get,
    path = "/cy-young-winners/{id}",
    tag = "cy-young-winners",
    params(("id" = String, Path, description = "24 character hexadecimal winner id")),
    responses(
        (status = 200, description = "Cy Young winner", body = Record<CyYoungWinner>),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No such winner", body = ErrorBody)
    )
)]
pub async fn get_winner(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Record<CyYoungWinner>>, AppError> {
    Ok(Json(
        record_service::get(state.stores().winners.as_ref(), &id).await?,
    ))
}

/// Record a Cy Young winner from a loosely typed body.
#[utoipa::path(
    post,
    path = "/cy-young-winners",
    tag = "cy-young-winners",
    request_body = CyYoungWinner,
    security(("session_cookie" = [])),
    responses(
        (status = 201, description = "Winner created", body = Record<CyYoungWinner>),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Login required", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn create_winner(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Record<CyYoungWinner>>), AppError> {
    let body = json_body(payload)?;
    let created = record_service::create(state.stores().winners.as_ref(), &body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a Cy Young winner wholesale.
#[utoipa::path(
    put,
    path = "/cy-young-winners/{id}",
    tag = "cy-young-winners",
    params(("id" = String, Path, description = "24 character hexadecimal winner id")),
    request_body = CyYoungWinner,
    security(("session_cookie" = [])),
    responses(
        (status = 204, description = "Winner replaced"),
        (status = 400, description = "Malformed id or validation failed", body = ErrorBody),
        (status = 401, description = "Login required", body = ErrorBody),
        (status = 500, description = "Nothing was replaced", body = ErrorBody)
    )
)]
pub async fn update_winner(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let body = json_body(payload)?;
    record_service::update(state.stores().winners.as_ref(), &id, &body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a Cy Young winner.
#[utoipa::path(
    delete,
    path = "/cy-young-winners/{id}",
    tag = "cy-young-winners",
    params(("id" = String, Path, description = "24 character hexadecimal winner id")),
    security(("session_cookie" = [])),
    responses(
        (status = 204, description = "Winner deleted"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Login required", body = ErrorBody),
        (status = 500, description = "Nothing was deleted", body = ErrorBody)
    )
)]
pub async fn delete_winner(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    record_service::delete(state.stores().winners.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
