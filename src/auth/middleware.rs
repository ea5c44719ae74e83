use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{error::AppError, state::SharedState};

/// Let the request through only when its session cookie names a live session.
///
/// The authenticated [`Principal`](super::session::Principal) is inserted into the request
/// extensions for downstream handlers. Rejected requests never reach the body extractor.
pub async fn require_session(
    State(state): State<SharedState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(principal) = state.sessions().principal_from_headers(req.headers()) else {
        debug!(method = %req.method(), uri = %req.uri(), "rejecting anonymous write");
        return Err(AppError::login_required());
    };

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
