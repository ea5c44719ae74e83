mod connection;
mod error;
mod store;

use std::sync::Arc;

pub use connection::{MongoManager, connect};
pub use error::MongoDaoError;
pub use store::MongoEntityStore;

use crate::dao::{
    Stores,
    models::{CyYoungWinner, Team},
    storage::StorageError,
};

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}

impl MongoManager {
    /// Collection-scoped stores sharing this connection.
    pub fn stores(&self) -> Stores {
        let database = self.database();
        Stores {
            teams: Arc::new(MongoEntityStore::<Team>::new(database.clone())),
            winners: Arc::new(MongoEntityStore::<CyYoungWinner>::new(database)),
        }
    }
}
