/// GitHub login flow and session bookkeeping.
pub mod auth_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Generic CRUD flow over a collection store.
pub mod record_service;
