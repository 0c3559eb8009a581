use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::advisor::risk;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::profile as repo;
use crate::models::HealthProfile;
use crate::upstream::{select, Envelope};

/// GET /api/profile
pub async fn get_profile(
    State(ctx): State<ApiContext>,
) -> Result<Json<Envelope<HealthProfile>>, ApiError> {
    let profile = {
        let db = ctx.db()?;
        repo::get_profile(&db)?
    };
    match profile {
        Some(p) => Ok(Json(Envelope::ok(p))),
        None => Err(ApiError::NotFound("health profile not set".into())),
    }
}

/// PUT /api/profile
pub async fn put_profile(
    State(ctx): State<ApiContext>,
    Json(profile): Json<HealthProfile>,
) -> Result<Json<Envelope<HealthProfile>>, ApiError> {
    if profile.height <= 0.0 || profile.weight <= 0.0 {
        return Err(ApiError::BadRequest(
            "weight and height must be positive".into(),
        ));
    }
    {
        let db = ctx.db()?;
        repo::upsert_profile(&db, &profile, Utc::now())?;
    }
    Ok(Json(Envelope::ok(profile)))
}

/// GET /api/health/assessment
pub async fn assessment(
    State(ctx): State<ApiContext>,
) -> Result<Json<Envelope<risk::RiskAssessment>>, ApiError> {
    let profile = {
        let db = ctx.db()?;
        repo::get_profile(&db)?
    }
    .ok_or_else(|| ApiError::NotFound("health profile not set".into()))?;

    let primary = ctx.advisor.clone().map(|client| {
        let profile = profile.clone();
        async move { client.assess_risk(&profile).await }
    });
    let outcome = select(primary, move || {
        Ok::<_, ApiError>(risk::assess_risk(&profile, Utc::now()))
    })
    .await?;
    Ok(Json(outcome.into()))
}
