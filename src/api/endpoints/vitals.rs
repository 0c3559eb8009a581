use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::advisor::{simulate, trends};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::{profile as profile_repo, vital_sign as repo};
use crate::models::{ManualReading, VitalSignReading};
use crate::upstream::{select, Envelope};

/// POST /api/vitals
pub async fn record(
    State(ctx): State<ApiContext>,
    Json(input): Json<ManualReading>,
) -> Result<(StatusCode, Json<Envelope<VitalSignReading>>), ApiError> {
    if let Some(field) = input.validate() {
        return Err(ApiError::BadRequest(format!(
            "implausible value for {field}"
        )));
    }
    let reading = input.into_reading(Utc::now());
    {
        let db = ctx.db()?;
        repo::insert_reading(&db, &reading)?;
    }
    Ok((StatusCode::CREATED, Json(Envelope::ok(reading))))
}

/// GET /api/vitals
pub async fn history(
    State(ctx): State<ApiContext>,
) -> Result<Json<Envelope<Vec<VitalSignReading>>>, ApiError> {
    let readings = {
        let db = ctx.db()?;
        repo::get_history(&db)?
    };
    Ok(Json(Envelope::ok(readings)))
}

/// GET /api/vitals/latest
pub async fn latest(
    State(ctx): State<ApiContext>,
) -> Result<Json<Envelope<VitalSignReading>>, ApiError> {
    let reading = {
        let db = ctx.db()?;
        repo::get_latest_reading(&db)?
    };
    match reading {
        Some(r) => Ok(Json(Envelope::ok(r))),
        None => Err(ApiError::NotFound("no vital readings recorded".into())),
    }
}

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    /// Defaults to a full week of hourly samples.
    pub hours: Option<usize>,
    /// Fixed seed for reproducible output.
    pub seed: Option<u64>,
}

/// POST /api/vitals/simulate
///
/// Replaces the stored history with a profile-driven synthetic series.
pub async fn simulate_history(
    State(ctx): State<ApiContext>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<Envelope<Vec<VitalSignReading>>>, ApiError> {
    let hours = request.hours.unwrap_or(repo::HISTORY_CAP);
    if hours == 0 || hours > repo::HISTORY_CAP {
        return Err(ApiError::BadRequest(format!(
            "hours must be between 1 and {}",
            repo::HISTORY_CAP
        )));
    }

    let mut db = ctx.db()?;
    let profile = profile_repo::get_profile(&db)?
        .ok_or_else(|| ApiError::NotFound("health profile not set".into()))?;

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let readings = simulate::synthesize_history(&profile, hours, Utc::now(), &mut rng);
    repo::replace_history(&mut db, &readings)?;
    Ok(Json(Envelope::ok(readings)))
}

/// GET /api/vitals/analysis
pub async fn analysis(
    State(ctx): State<ApiContext>,
) -> Result<Json<Envelope<trends::TrendSummary>>, ApiError> {
    let readings = {
        let db = ctx.db()?;
        repo::get_history(&db)?
    };
    if readings.is_empty() {
        return Err(ApiError::NotFound("no vital readings recorded".into()));
    }

    let primary = ctx.advisor.clone().map(|client| {
        let readings = readings.clone();
        async move { client.analyze_vitals(&readings).await }
    });
    let outcome = select(primary, move || {
        trends::analyze_trends(&readings)
            .ok_or_else(|| ApiError::NotFound("no vital readings recorded".into()))
    })
    .await?;
    Ok(Json(outcome.into()))
}
