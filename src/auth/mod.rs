//! Session authentication: GitHub OAuth login and the write-access gate.

pub mod github;
/// Session gate for write routes.
pub mod middleware;
pub mod session;

/// Route that starts the GitHub login flow.
pub const LOGIN_PATH: &str = "/auth/github";
/// Route the callback redirects to when login fails.
pub const LOGIN_FAILED_PATH: &str = "/auth/login-failed";
