//! Server-side session registry keyed by the `mlb.sid` cookie.

use axum::http::{HeaderMap, header::COOKIE};
use dashmap::DashMap;
use rand::{Rng, distr::Alphanumeric};
use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "mlb.sid";

/// How long an OAuth `state` value stays redeemable.
const OAUTH_STATE_TTL: Duration = Duration::minutes(10);
const OAUTH_STATE_LEN: usize = 32;
/// Outstanding states kept at once; the one closest to expiry is evicted first.
const MAX_PENDING_STATES: usize = 4096;

/// Authenticated GitHub user attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Numeric GitHub user id, as text.
    pub id: String,
    /// GitHub login.
    pub username: String,
    /// Profile display name.
    pub display_name: Option<String>,
    /// Public profile page.
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone)]
struct Session {
    principal: Principal,
    expires_at: OffsetDateTime,
}

/// Live sessions and outstanding OAuth states.
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
    pending_states: DashMap<String, OffsetDateTime>,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store whose sessions live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            pending_states: DashMap::new(),
            ttl,
        }
    }

    /// Lifetime granted to new sessions.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a session for `principal` and return its id.
    pub fn create(&self, principal: Principal) -> Uuid {
        let now = OffsetDateTime::now_utc();
        self.sessions.retain(|_, session| session.expires_at > now);

        let id = Uuid::new_v4();
        debug!(session = %id, user = %principal.username, "session created");
        self.sessions.insert(
            id,
            Session {
                principal,
                expires_at: now + self.ttl,
            },
        );
        id
    }

    /// Principal of a live session; expired sessions are dropped on lookup.
    pub fn principal(&self, id: Uuid) -> Option<Principal> {
        let now = OffsetDateTime::now_utc();
        let principal = self
            .sessions
            .get(&id)
            .filter(|session| session.expires_at > now)
            .map(|session| session.principal.clone());

        if principal.is_none() {
            self.sessions.remove(&id);
        }
        principal
    }

    /// Principal for the session cookie present in `headers`, if it is live.
    pub fn principal_from_headers(&self, headers: &HeaderMap) -> Option<Principal> {
        session_id_from_headers(headers).and_then(|id| self.principal(id))
    }

    /// End a session. Returns whether it existed.
    pub fn destroy(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// True when no session is stored.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Mint a random OAuth `state` value to be echoed back by the provider.
    pub fn issue_state(&self) -> String {
        let now = OffsetDateTime::now_utc();
        self.pending_states.retain(|_, expires_at| *expires_at > now);
        if self.pending_states.len() >= MAX_PENDING_STATES {
            self.evict_oldest_state();
        }

        let state: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(OAUTH_STATE_LEN)
            .map(char::from)
            .collect();
        self.pending_states
            .insert(state.clone(), now + OAUTH_STATE_TTL);
        state
    }

    fn evict_oldest_state(&self) {
        let oldest = self
            .pending_states
            .iter()
            .min_by_key(|entry| *entry.value())
            .map(|entry| entry.key().clone());
        if let Some(oldest) = oldest {
            self.pending_states.remove(&oldest);
            warn!("pending OAuth states at capacity, evicted the oldest");
        }
    }

    /// Redeem a `state` value. Each value is accepted at most once.
    pub fn consume_state(&self, state: &str) -> bool {
        self.pending_states
            .remove(state)
            .is_some_and(|(_, expires_at)| expires_at > OffsetDateTime::now_utc())
    }
}

/// Session id carried by the request cookies.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value binding the browser to session `id`.
pub fn session_cookie(id: Uuid, ttl: Duration, secure: bool) -> String {
    cookie(&id.to_string(), ttl.whole_seconds(), secure)
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    cookie("", 0, secure)
}

fn cookie(value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
