use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Ping every collection store and report `degraded` when any of them fails.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let stores = state.stores();
    let (teams, winners) = tokio::join!(stores.teams.health_check(), stores.winners.health_check());

    let mut healthy = true;
    for (collection, result) in [("teams", teams), ("cy_young_winners", winners)] {
        if let Err(err) = result {
            warn!(collection, error = %err, "storage health check failed");
            healthy = false;
        }
    }

    if healthy {
        HealthResponse::ok()
    } else {
        HealthResponse::degraded()
    }
}
