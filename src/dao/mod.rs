use std::sync::Arc;

/// In-process storage backend.
pub mod memory;
/// Database model definitions.
pub mod models;
/// MongoDB storage backend.
#[cfg(feature = "mongo-store")]
pub mod mongodb;
/// Storage-assigned record identifiers.
pub mod record_id;
/// Storage abstraction layer for database operations.
pub mod storage;

use self::{
    memory::MemoryStore,
    models::{CyYoungWinner, Team},
    storage::EntityStore,
};

/// One store per collection, shared by every request.
#[derive(Clone)]
pub struct Stores {
    /// `teams` collection.
    pub teams: Arc<dyn EntityStore<Team>>,
    /// `cy_young_winners` collection.
    pub winners: Arc<dyn EntityStore<CyYoungWinner>>,
}

impl Stores {
    /// Fresh, empty in-memory collections.
    pub fn in_memory() -> Self {
        Self {
            teams: Arc::new(MemoryStore::<Team>::new()),
            winners: Arc::new(MemoryStore::<CyYoungWinner>::new()),
        }
    }
}
