#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use futures::future::BoxFuture;
use mlb_data_api::{
    auth::session::{Principal, SESSION_COOKIE},
    config::AppConfig,
    dao::{
        Stores,
        memory::MemoryStore,
        models::{CyYoungWinner, Entity, Record, Team},
        record_id::RecordId,
        storage::{
            DeleteOutcome, EntityStore, InsertOutcome, ReplaceOutcome, StorageError, StorageResult,
        },
    },
    routes,
    state::{AppState, SharedState},
};
use serde_json::Value;
use tower::ServiceExt;

/// Router over fresh in-memory collections.
pub fn memory_app() -> (Router, SharedState) {
    app_with(Stores::in_memory())
}

/// Router over the given stores with default configuration.
pub fn app_with(stores: Stores) -> (Router, SharedState) {
    let state = AppState::new(stores, &AppConfig::default());
    (routes::app(state.clone()), state)
}

/// Open a session directly in the store and return the matching `Cookie` header value.
pub fn login(state: &SharedState) -> String {
    let id = state.sessions().create(Principal {
        id: "583231".into(),
        username: "octocat".into(),
        display_name: Some("The Octocat".into()),
        profile_url: Some("https://github.com/octocat".into()),
    });
    format!("{SESSION_COOKIE}={id}")
}

/// Decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Issue one request against `app`; `body` is sent as JSON when present.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

/// In-memory store that counts every backend call.
pub struct RecordingStore<T> {
    inner: MemoryStore<T>,
    calls: Arc<AtomicUsize>,
}

impl<T: Entity + PartialEq> RecordingStore<T> {
    pub fn counting() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner: MemoryStore::new(),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T: Entity + PartialEq> EntityStore<T> for RecordingStore<T> {
    fn find_all(&self) -> BoxFuture<'static, StorageResult<Vec<Record<T>>>> {
        self.record();
        self.inner.find_all()
    }

    fn find_by_id(&self, id: RecordId) -> BoxFuture<'static, StorageResult<Vec<Record<T>>>> {
        self.record();
        self.inner.find_by_id(id)
    }

    fn insert_one(&self, entity: T) -> BoxFuture<'static, StorageResult<InsertOutcome>> {
        self.record();
        self.inner.insert_one(entity)
    }

    fn replace_one(
        &self,
        id: RecordId,
        entity: T,
    ) -> BoxFuture<'static, StorageResult<ReplaceOutcome>> {
        self.record();
        self.inner.replace_one(id, entity)
    }

    fn delete_one(&self, id: RecordId) -> BoxFuture<'static, StorageResult<DeleteOutcome>> {
        self.record();
        self.inner.delete_one(id)
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.health_check()
    }
}

/// Store whose every call fails as if the database connection dropped.
pub struct FailingStore;

fn connection_lost() -> StorageError {
    StorageError::unavailable(
        "connection to 10.0.0.7:27017 lost".into(),
        std::io::Error::other("connection reset by peer"),
    )
}

impl<T: Send + 'static> EntityStore<T> for FailingStore {
    fn find_all(&self) -> BoxFuture<'static, StorageResult<Vec<Record<T>>>> {
        Box::pin(async { Err(connection_lost()) })
    }

    fn find_by_id(&self, _id: RecordId) -> BoxFuture<'static, StorageResult<Vec<Record<T>>>> {
        Box::pin(async { Err(connection_lost()) })
    }

    fn insert_one(&self, _entity: T) -> BoxFuture<'static, StorageResult<InsertOutcome>> {
        Box::pin(async { Err(connection_lost()) })
    }

    fn replace_one(
        &self,
        _id: RecordId,
        _entity: T,
    ) -> BoxFuture<'static, StorageResult<ReplaceOutcome>> {
        Box::pin(async { Err(connection_lost()) })
    }

    fn delete_one(&self, _id: RecordId) -> BoxFuture<'static, StorageResult<DeleteOutcome>> {
        Box::pin(async { Err(connection_lost()) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Err(connection_lost()) })
    }
}

/// Stores that fail on every call.
pub fn failing_stores() -> Stores {
    Stores {
        teams: Arc::new(FailingStore),
        winners: Arc::new(FailingStore),
    }
}

/// Stores that count calls, with the counters for teams and winners.
pub fn recording_stores() -> (Stores, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let (teams, team_calls) = RecordingStore::<Team>::counting();
    let (winners, winner_calls) = RecordingStore::<CyYoungWinner>::counting();
    (
        Stores {
            teams: Arc::new(teams),
            winners: Arc::new(winners),
        },
        team_calls,
        winner_calls,
    )
}

/// Number of calls recorded so far.
pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
