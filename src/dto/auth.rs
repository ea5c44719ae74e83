use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::session::Principal;

/// Confirmation returned after logout.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human readable outcome.
    pub message: String,
}

/// Answer of `/auth/user`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentUserResponse {
    /// Whether the request carried a live session.
    pub authenticated: bool,
    /// Logged-in user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Principal>,
    /// Explanation for anonymous callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CurrentUserResponse {
    /// Logged-in caller.
    pub fn authenticated(user: Principal) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
            message: None,
        }
    }

    /// Caller without a live session.
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
            message: Some("Not authenticated".into()),
        }
    }
}
