use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::auth::session::SESSION_COOKIE;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the MLB Data API.
#[openapi(
    info(title = "MLB Data API", description = "Teams and Cy Young award winners"),
    paths(
        crate::routes::root::status,
        crate::routes::health::healthcheck,
        crate::routes::auth::github_login,
        crate::routes::auth::github_callback,
        crate::routes::auth::logout,
        crate::routes::auth::login_failed,
        crate::routes::auth::current_user,
        crate::routes::teams::list_teams,
        crate::routes::teams::get_team,
        crate::routes::teams::create_team,
        crate::routes::teams::update_team,
        crate::routes::teams::delete_team,
        crate::routes::cy_young_winners::list_winners,
        crate::routes::cy_young_winners::get_winner,
        crate::routes::cy_young_winners::create_winner,
        crate::routes::cy_young_winners::update_winner,
        crate::routes::cy_young_winners::delete_winner,
    ),
    components(
        schemas(
            crate::dao::models::Team,
            crate::dao::models::CyYoungWinner,
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::status::StatusResponse,
            crate::dto::auth::MessageResponse,
            crate::dto::auth::CurrentUserResponse,
            crate::auth::session::Principal,
            crate::error::ErrorBody,
        )
    ),
    modifiers(&SessionCookie),
    tags(
        (name = "general", description = "Service status"),
        (name = "health", description = "Health check endpoints"),
        (name = "authentication", description = "GitHub OAuth login and sessions"),
        (name = "teams", description = "MLB franchises"),
        (name = "cy-young-winners", description = "Cy Young award winners"),
    )
)]
pub struct ApiDoc;

/// Declares the session cookie used by the write routes.
struct SessionCookie;

impl Modify for SessionCookie {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/",
            "/healthcheck",
            "/auth/user",
            "/teams",
            "/teams/{id}",
            "/cy-young-winners",
            "/cy-young-winners/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
