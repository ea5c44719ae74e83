//! CRUD flow shared by every collection: parse the id, normalize the body,
//! issue exactly one storage call and translate its outcome.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    dao::{
        models::{Entity, Record},
        record_id::RecordId,
        storage::{EntityStore, StorageError},
    },
    error::ServiceError,
    validation::Normalize,
};

/// Every record of the collection.
pub async fn list<E: Entity>(store: &dyn EntityStore<E>) -> Result<Vec<Record<E>>, ServiceError> {
    let action = format!("retrieving {}", E::PLURAL);
    store
        .find_all()
        .await
        .map_err(|err| storage_failure::<E>(err, &action, None))
}

/// The record identified by `raw_id`.
pub async fn get<E: Entity>(
    store: &dyn EntityStore<E>,
    raw_id: &str,
) -> Result<Record<E>, ServiceError> {
    let id = parse_id::<E>(raw_id)?;
    let action = format!("retrieving the {}", E::LABEL);
    let found = store
        .find_by_id(id)
        .await
        .map_err(|err| storage_failure::<E>(err, &action, Some(id)))?;

    found
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::NotFound(format!("{} not found", capitalized(E::LABEL))))
}

/// Normalize `body` and insert it; the returned record is what was stored.
pub async fn create<E: Entity + Normalize>(
    store: &dyn EntityStore<E>,
    body: &Value,
) -> Result<Record<E>, ServiceError> {
    let entity = E::normalize(body)
        .into_result()
        .map_err(ServiceError::Validation)?;
    let action = format!("creating the {}", E::LABEL);

    let outcome = store
        .insert_one(entity.clone())
        .await
        .map_err(|err| storage_failure::<E>(err, &action, None))?;

    match outcome.inserted_id {
        Some(id) => {
            info!(collection = E::COLLECTION, id = %id, "record created");
            Ok(Record { id, entity })
        }
        None => Err(not_acknowledged::<E>(&action, None)),
    }
}

/// Replace the record identified by `raw_id` with the normalized `body`.
pub async fn update<E: Entity + Normalize>(
    store: &dyn EntityStore<E>,
    raw_id: &str,
    body: &Value,
) -> Result<(), ServiceError> {
    let id = parse_id::<E>(raw_id)?;
    let entity = E::normalize(body)
        .into_result()
        .map_err(ServiceError::Validation)?;
    let action = format!("updating the {}", E::LABEL);

    let outcome = store
        .replace_one(id, entity)
        .await
        .map_err(|err| storage_failure::<E>(err, &action, Some(id)))?;

    if outcome.took_effect() {
        info!(collection = E::COLLECTION, id = %id, "record replaced");
        Ok(())
    } else {
        Err(not_acknowledged::<E>(&action, Some(id)))
    }
}

/// Delete the record identified by `raw_id`. Deleting nothing is a failure.
pub async fn delete<E: Entity>(
    store: &dyn EntityStore<E>,
    raw_id: &str,
) -> Result<(), ServiceError> {
    let id = parse_id::<E>(raw_id)?;
    let action = format!("deleting the {}", E::LABEL);

    let outcome = store
        .delete_one(id)
        .await
        .map_err(|err| storage_failure::<E>(err, &action, Some(id)))?;

    if outcome.deleted_count > 0 {
        info!(collection = E::COLLECTION, id = %id, "record deleted");
        Ok(())
    } else {
        Err(not_acknowledged::<E>(&action, Some(id)))
    }
}

fn parse_id<E: Entity>(raw_id: &str) -> Result<RecordId, ServiceError> {
    raw_id
        .parse()
        .map_err(|_| ServiceError::InvalidInput(format!("Invalid {} id: {raw_id}", E::LABEL)))
}

fn storage_failure<E: Entity>(
    err: StorageError,
    action: &str,
    id: Option<RecordId>,
) -> ServiceError {
    match id {
        Some(id) => error!(
            collection = E::COLLECTION,
            id = %id,
            error = %err,
            "storage failure while {action}"
        ),
        None => error!(
            collection = E::COLLECTION,
            error = %err,
            "storage failure while {action}"
        ),
    }
    ServiceError::OperationFailed(format!("An error occurred while {action}"))
}

fn not_acknowledged<E: Entity>(action: &str, id: Option<RecordId>) -> ServiceError {
    match id {
        Some(id) => warn!(
            collection = E::COLLECTION,
            id = %id,
            "storage did not apply {action}"
        ),
        None => warn!(collection = E::COLLECTION, "storage did not acknowledge {action}"),
    }
    ServiceError::OperationFailed(format!("An error occurred while {action}"))
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::dao::{
        memory::MemoryStore,
        models::{CyYoungWinner, Team},
    };

    fn red_sox() -> Value {
        json!({"teamName": "  Red Sox  ", "city": "Boston", "league": "AL", "division": "East"})
    }

    #[tokio::test]
    async fn create_returns_sanitized_record() {
        let store = MemoryStore::<Team>::new();
        let created = create::<Team>(&store, &red_sox()).await.unwrap();

        assert_eq!(created.entity.team_name, "Red Sox");
        let fetched = get::<Team>(&store, &created.id.to_string()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn invalid_body_never_reaches_storage() {
        let store = MemoryStore::<Team>::new();
        let err = create::<Team>(&store, &json!({"city": "Boston"})).await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(errors) if errors.len() == 3));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn malformed_id_is_invalid_input() {
        let store = MemoryStore::<CyYoungWinner>::new();
        let err = get::<CyYoungWinner>(&store, "not-a-valid-id").await.unwrap_err();

        assert!(
            matches!(err, ServiceError::InvalidInput(message) if message == "Invalid Cy Young winner id: not-a-valid-id")
        );
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let store = MemoryStore::<Team>::new();
        let err = get::<Team>(&store, &RecordId::generate().to_string()).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(message) if message == "Team not found"));
    }

    #[tokio::test]
    async fn second_delete_fails() {
        let store = MemoryStore::<Team>::new();
        let created = create::<Team>(&store, &red_sox()).await.unwrap();
        let id = created.id.to_string();

        delete::<Team>(&store, &id).await.unwrap();
        let err = delete::<Team>(&store, &id).await.unwrap_err();
        assert!(
            matches!(err, ServiceError::OperationFailed(message) if message == "An error occurred while deleting the team")
        );
    }

    #[tokio::test]
    async fn update_of_unknown_record_fails() {
        let store = MemoryStore::<Team>::new();
        let err = update::<Team>(&store, &RecordId::generate().to_string(), &red_sox())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::OperationFailed(_)));
    }

    #[tokio::test]
    async fn update_with_identical_body_still_succeeds() {
        let store = MemoryStore::<Team>::new();
        let created = create::<Team>(&store, &red_sox()).await.unwrap();

        update::<Team>(&store, &created.id.to_string(), &red_sox()).await.unwrap();
    }
}
