use std::error::Error;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::dao::{models::Record, record_id::RecordId};

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be reached or failed the operation.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Operator facing description; never sent to clients.
        message: String,
        /// Backend error that caused the failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}

/// Acknowledgement returned by an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Identifier of the new document; `None` when the write was not acknowledged.
    pub inserted_id: Option<RecordId>,
}

/// Counts returned by a full-document replace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Documents matching the id.
    pub matched_count: u64,
    /// Documents actually rewritten.
    pub modified_count: u64,
}

impl ReplaceOutcome {
    /// The replace reached at least one document.
    pub fn took_effect(&self) -> bool {
        self.matched_count > 0 || self.modified_count > 0
    }
}

/// Count returned by a single-document delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Documents removed.
    pub deleted_count: u64,
}

/// Collection-scoped document storage for one entity kind.
///
/// Every method issues exactly one backend call.
pub trait EntityStore<T>: Send + Sync {
    /// Every document in the collection, in natural order.
    fn find_all(&self) -> BoxFuture<'static, StorageResult<Vec<Record<T>>>>;
    /// Documents whose identifier equals `id` (zero or one).
    fn find_by_id(&self, id: RecordId) -> BoxFuture<'static, StorageResult<Vec<Record<T>>>>;
    /// Insert a new document and report the generated identifier.
    fn insert_one(&self, entity: T) -> BoxFuture<'static, StorageResult<InsertOutcome>>;
    /// Replace the document identified by `id` wholesale.
    fn replace_one(
        &self,
        id: RecordId,
        entity: T,
    ) -> BoxFuture<'static, StorageResult<ReplaceOutcome>>;
    /// Delete the document identified by `id`.
    fn delete_one(&self, id: RecordId) -> BoxFuture<'static, StorageResult<DeleteOutcome>>;
    /// Check the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
