use serde::Serialize;
use utoipa::ToSchema;

/// Landing document served at `/`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Service name.
    pub message: String,
    /// Always `Running` while the server accepts requests.
    pub status: String,
    /// RFC 3339 time at which the response was built.
    pub timestamp: String,
    /// Location of the Swagger UI.
    pub docs: String,
    /// Whether the request carried a live session.
    pub authenticated: bool,
    /// Username of the logged-in user, `null` otherwise.
    pub user: Option<String>,
}
