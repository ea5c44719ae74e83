//! Request normalization: coercion, field-set checks and per-entity normalizers.
//!
//! A normalizer always produces a sanitized record *and* the complete list of
//! problems found, never stopping at the first one. The record is only fit for
//! storage when the list is empty.

pub mod coerce;
pub mod fields;
pub mod team;
pub mod winner;

use serde_json::{Map, Value};

use crate::dao::models::{CyYoungWinner, Team};

pub use team::validate_team;
pub use winner::validate_winner;

/// Sanitized record plus every validation message raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    /// Sanitized record, built even when errors were found.
    pub record: T,
    /// Every problem found, in field-list order.
    pub errors: Vec<String>,
}

impl<T> Normalized<T> {
    /// True when no field was rejected.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The record when valid, the aggregated messages otherwise.
    pub fn into_result(self) -> Result<T, Vec<String>> {
        if self.errors.is_empty() {
            Ok(self.record)
        } else {
            Err(self.errors)
        }
    }
}

/// Entity kinds that can be built from an untrusted request body.
pub trait Normalize: Sized {
    /// Coerce and validate `body` into a record of this kind.
    fn normalize(body: &Value) -> Normalized<Self>;
}

impl Normalize for Team {
    fn normalize(body: &Value) -> Normalized<Self> {
        validate_team(body)
    }
}

impl Normalize for CyYoungWinner {
    fn normalize(body: &Value) -> Normalized<Self> {
        validate_winner(body)
    }
}

/// Object view of a body; anything that is not a JSON object counts as empty.
fn body_fields(body: &Value) -> Map<String, Value> {
    body.as_object().cloned().unwrap_or_default()
}
