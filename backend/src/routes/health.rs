//! Liveness and readiness probes

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

pub const HEALTH_MESSAGE: &str = "Group Service is running";

/// Body of `/health/ready`
#[derive(Debug, Serialize)]
pub struct Readiness {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: Checks,
}

#[derive(Debug, Serialize)]
pub struct Checks {
    pub database: Check,
}

#[derive(Debug, Serialize)]
pub struct Check {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Readiness {
    fn from_checks(checks: Checks) -> (StatusCode, Self) {
        let (code, status) = if checks.database.healthy {
            (StatusCode::OK, "ready")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
        };

        (
            code,
            Readiness {
                status,
                version: env!("CARGO_PKG_VERSION"),
                checks,
            },
        )
    }
}

/// GET /health - answers without touching storage or auth
pub async fn health_check() -> &'static str {
    HEALTH_MESSAGE
}

/// GET /health/ready - 503 while the database is unreachable
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let database = match db::health_check(state.db()).await {
        Ok(()) => Check {
            healthy: true,
            error: None,
        },
        Err(e) => Check {
            healthy: false,
            error: Some(e.to_string()),
        },
    };

    let (code, body) = Readiness::from_checks(Checks { database });
    (code, Json(body))
}
