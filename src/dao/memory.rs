//! In-process store used by tests and by `STORAGE_BACKEND=memory` deployments.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::dao::{
    models::{Entity, Record},
    record_id::RecordId,
    storage::{DeleteOutcome, EntityStore, InsertOutcome, ReplaceOutcome, StorageResult},
};

/// Vector-backed collection keeping insertion order.
#[derive(Clone)]
pub struct MemoryStore<T> {
    records: Arc<RwLock<Vec<Record<T>>>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: Entity + PartialEq> MemoryStore<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no documents are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<T: Entity + PartialEq> EntityStore<T> for MemoryStore<T> {
    fn find_all(&self) -> BoxFuture<'static, StorageResult<Vec<Record<T>>>> {
        let records = Arc::clone(&self.records);
        Box::pin(async move { Ok(records.read().await.clone()) })
    }

    fn find_by_id(&self, id: RecordId) -> BoxFuture<'static, StorageResult<Vec<Record<T>>>> {
        let records = Arc::clone(&self.records);
        Box::pin(async move {
            let guard = records.read().await;
            Ok(guard.iter().filter(|record| record.id == id).cloned().collect())
        })
    }

    fn insert_one(&self, entity: T) -> BoxFuture<'static, StorageResult<InsertOutcome>> {
        let records = Arc::clone(&self.records);
        Box::pin(async move {
            let id = RecordId::generate();
            records.write().await.push(Record { id, entity });
            Ok(InsertOutcome {
                inserted_id: Some(id),
            })
        })
    }

    fn replace_one(
        &self,
        id: RecordId,
        entity: T,
    ) -> BoxFuture<'static, StorageResult<ReplaceOutcome>> {
        let records = Arc::clone(&self.records);
        Box::pin(async move {
            let mut guard = records.write().await;
            let Some(record) = guard.iter_mut().find(|record| record.id == id) else {
                return Ok(ReplaceOutcome::default());
            };

            let modified = record.entity != entity;
            record.entity = entity;
            Ok(ReplaceOutcome {
                matched_count: 1,
                modified_count: u64::from(modified),
            })
        })
    }

    fn delete_one(&self, id: RecordId) -> BoxFuture<'static, StorageResult<DeleteOutcome>> {
        let records = Arc::clone(&self.records);
        Box::pin(async move {
            let mut guard = records.write().await;
            let before = guard.len();
            if let Some(position) = guard.iter().position(|record| record.id == id) {
                guard.remove(position);
            }
            Ok(DeleteOutcome {
                deleted_count: (before - guard.len()) as u64,
            })
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
