//! Library crate for the MLB data API, exposing modules for binaries and integration tests.

/// GitHub login, sessions and the write gate.
pub mod auth;
/// Runtime configuration.
pub mod config;
/// Storage abstraction and backends.
pub mod dao;
mod dto;
mod error;
/// HTTP routing layer.
pub mod routes;
/// Business logic between routes and storage.
pub mod services;
/// Shared application state.
pub mod state;
/// Request body coercion and validation.
pub mod validation;
