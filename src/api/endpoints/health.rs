use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::config;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub advisor_configured: bool,
}

/// Liveness probe. The only unauthenticated route.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        name: config::APP_NAME,
        version: config::APP_VERSION,
        advisor_configured: ctx.advisor.is_some(),
    })
}
