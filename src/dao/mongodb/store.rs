use std::marker::PhantomData;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};

use super::{
    connection::ping,
    error::{MongoDaoError, Result},
};
use crate::dao::{
    models::{Entity, Record},
    record_id::RecordId,
    storage::{DeleteOutcome, EntityStore, InsertOutcome, ReplaceOutcome, StorageResult},
};

/// Shape of a stored document: native ObjectId plus the flattened entity body.
#[derive(Debug, Serialize, Deserialize)]
struct MongoRecord<T> {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(flatten)]
    entity: T,
}

impl<T> From<MongoRecord<T>> for Record<T> {
    fn from(value: MongoRecord<T>) -> Self {
        Self {
            id: value.id.into(),
            entity: value.entity,
        }
    }
}

fn doc_id(id: RecordId) -> Document {
    doc! { "_id": ObjectId::from(id) }
}

/// One MongoDB collection exposed through [`EntityStore`].
pub struct MongoEntityStore<T> {
    database: Database,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for MongoEntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> MongoEntityStore<T> {
    /// Bind the store to `T::COLLECTION` in `database`.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _entity: PhantomData,
        }
    }

    fn collection(&self) -> Collection<T> {
        self.database.collection::<T>(T::COLLECTION)
    }

    fn record_collection(&self) -> Collection<MongoRecord<T>> {
        self.database.collection::<MongoRecord<T>>(T::COLLECTION)
    }

    async fn find_all(&self) -> Result<Vec<Record<T>>> {
        let list_error = |source| MongoDaoError::List {
            collection: T::COLLECTION,
            source,
        };

        let documents: Vec<MongoRecord<T>> = self
            .record_collection()
            .find(doc! {})
            .await
            .map_err(list_error)?
            .try_collect()
            .await
            .map_err(list_error)?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Vec<Record<T>>> {
        let load_error = |source| MongoDaoError::Load {
            collection: T::COLLECTION,
            id,
            source,
        };

        let documents: Vec<MongoRecord<T>> = self
            .record_collection()
            .find(doc_id(id))
            .await
            .map_err(load_error)?
            .try_collect()
            .await
            .map_err(load_error)?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn insert_one(&self, entity: T) -> Result<InsertOutcome> {
        let result = self
            .collection()
            .insert_one(&entity)
            .await
            .map_err(|source| MongoDaoError::Insert {
                collection: T::COLLECTION,
                source,
            })?;

        let inserted_id = match result.inserted_id {
            Bson::ObjectId(oid) => Some(oid.into()),
            _ => None,
        };
        Ok(InsertOutcome { inserted_id })
    }

    async fn replace_one(&self, id: RecordId, entity: T) -> Result<ReplaceOutcome> {
        let result = self
            .collection()
            .replace_one(doc_id(id), &entity)
            .await
            .map_err(|source| MongoDaoError::Replace {
                collection: T::COLLECTION,
                id,
                source,
            })?;

        Ok(ReplaceOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_one(&self, id: RecordId) -> Result<DeleteOutcome> {
        let result = self
            .collection()
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::Delete {
                collection: T::COLLECTION,
                id,
                source,
            })?;

        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }
}

impl<T: Entity> EntityStore<T> for MongoEntityStore<T> {
    fn find_all(&self) -> BoxFuture<'static, StorageResult<Vec<Record<T>>>> {
        let store = self.clone();
        Box::pin(async move { store.find_all().await.map_err(Into::into) })
    }

    fn find_by_id(&self, id: RecordId) -> BoxFuture<'static, StorageResult<Vec<Record<T>>>> {
        let store = self.clone();
        Box::pin(async move { store.find_by_id(id).await.map_err(Into::into) })
    }

    fn insert_one(&self, entity: T) -> BoxFuture<'static, StorageResult<InsertOutcome>> {
        let store = self.clone();
        Box::pin(async move { store.insert_one(entity).await.map_err(Into::into) })
    }

    fn replace_one(
        &self,
        id: RecordId,
        entity: T,
    ) -> BoxFuture<'static, StorageResult<ReplaceOutcome>> {
        let store = self.clone();
        Box::pin(async move { store.replace_one(id, entity).await.map_err(Into::into) })
    }

    fn delete_one(&self, id: RecordId) -> BoxFuture<'static, StorageResult<DeleteOutcome>> {
        let store = self.clone();
        Box::pin(async move { store.delete_one(id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let database = self.database.clone();
        Box::pin(async move { ping(&database).await.map_err(Into::into) })
    }
}
