use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::{
        HeaderName, Method,
        header::{ACCEPT, CONTENT_TYPE, ORIGIN},
    },
};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, state::SharedState};

/// `/auth` login flow.
pub mod auth;
/// `/cy-young-winners` resource.
pub mod cy_young_winners;
/// Swagger UI and OpenAPI document.
pub mod docs;
/// `/healthcheck`.
pub mod health;
/// `/` status banner.
pub mod root;
/// `/teams` resource.
pub mod teams;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = root::router()
        .merge(health::router())
        .merge(auth::router())
        .merge(teams::router(state.clone()))
        .merge(cy_young_winners::router(state.clone()));

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}

/// Full application: routes plus CORS and request tracing.
pub fn app(state: SharedState) -> Router<()> {
    router(state).layer(cors()).layer(TraceLayer::new_for_http())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            ORIGIN,
            HeaderName::from_static("x-requested-with"),
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static("z-key"),
        ])
}

/// Accept any JSON payload; the normalizers decide what is usable.
fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
