//! Opaque record identifiers using the 12-byte ObjectId layout.

use std::{fmt, str::FromStr};

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Identifier assigned by the storage layer, rendered as 24 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(ObjectId);

/// Raised when a client supplied identifier does not use the ObjectId encoding.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{0}` is not a 24 character hexadecimal id")]
pub struct InvalidRecordId(pub String);

impl RecordId {
    /// Generate a fresh id.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }
}

impl From<ObjectId> for RecordId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<RecordId> for ObjectId {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| InvalidRecordId(raw.to_owned()))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hex() {
        let id: RecordId = "64b7f0c2a1b2c3d4e5f60718".parse().unwrap();
        assert_eq!(id.to_string(), "64b7f0c2a1b2c3d4e5f60718");

        let upper: RecordId = "64B7F0C2A1B2C3D4E5F60718".parse().unwrap();
        assert_eq!(upper, id);
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in [
            "not-a-valid-id",
            "",
            "64b7f0c2a1b2c3d4e5f6071",
            "64b7f0c2a1b2c3d4e5f607189",
            "zzb7f0c2a1b2c3d4e5f60718",
            "+4b7f0c2a1b2c3d4e5f60718",
        ] {
            assert_eq!(
                raw.parse::<RecordId>(),
                Err(InvalidRecordId(raw.to_owned())),
                "{raw}"
            );
        }
    }

    #[test]
    fn generated_ids_are_unique_and_round_trip() {
        let first = RecordId::generate();
        let second = RecordId::generate();
        assert_ne!(first, second);
        assert_eq!(first.to_string().parse::<RecordId>().unwrap(), first);
    }
}
