use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;
use uuid::Uuid;

use crate::advisor::{dosage, interactions, schedule, side_effects};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::medication as repo;
use crate::models::{MedicationRecord, MedicationStatus, NewMedication};
use crate::upstream::{select, Envelope};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

/// GET /api/medications?status=active
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(params): Query<ListParams>,
) -> Result<Json<Envelope<Vec<MedicationRecord>>>, ApiError> {
    let filter = params
        .status
        .as_deref()
        .map(MedicationStatus::from_str)
        .transpose()
        .map_err(ApiError::from)?;
    let mut meds = {
        let db = ctx.db()?;
        repo::get_all_medications(&db)?
    };
    if let Some(status) = filter {
        meds.retain(|m| m.status == status);
    }
    Ok(Json(Envelope::ok(meds)))
}

/// POST /api/medications
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<NewMedication>,
) -> Result<(StatusCode, Json<Envelope<MedicationRecord>>), ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("medication name is required".into()));
    }
    let record = input.into_record(Utc::now());
    {
        let db = ctx.db()?;
        repo::insert_medication(&db, &record)?;
    }
    Ok((StatusCode::CREATED, Json(Envelope::ok(record))))
}

/// GET /api/medications/:id
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<MedicationRecord>>, ApiError> {
    let med = {
        let db = ctx.db()?;
        repo::get_medication(&db, &id)?
    };
    Ok(Json(Envelope::ok(med)))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// PUT /api/medications/:id/status
pub async fn update_status(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Envelope<MedicationRecord>>, ApiError> {
    let next = MedicationStatus::from_str(&update.status).map_err(ApiError::from)?;
    let med = {
        let db = ctx.db()?;
        repo::update_medication_status(&db, &id, next)?
    };
    Ok(Json(Envelope::ok(med)))
}

#[derive(Debug, Deserialize)]
pub struct DoseInput {
    pub taken: bool,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

/// POST /api/medications/:id/doses
pub async fn record_dose(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    Json(input): Json<DoseInput>,
) -> Result<(StatusCode, Json<Envelope<i64>>), ApiError> {
    let now = Utc::now();
    let scheduled_at = input.scheduled_at.unwrap_or(now);
    let taken_at = input.taken.then_some(now);
    let event_id = {
        let db = ctx.db()?;
        repo::insert_dose_event(
            &db,
            &id,
            scheduled_at,
            input.taken,
            taken_at,
            input.note.as_deref(),
        )?
    };
    Ok((StatusCode::CREATED, Json(Envelope::ok(event_id))))
}

/// GET /api/medications/:id/adherence
pub async fn adherence(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<schedule::AdherenceReport>>, ApiError> {
    let events = {
        let db = ctx.db()?;
        repo::get_medication(&db, &id)?;
        repo::get_dose_events(&db, &id)?
    };
    Ok(Json(Envelope::ok(schedule::adherence_report(&events))))
}

/// GET /api/medications/interactions
pub async fn check_interactions(
    State(ctx): State<ApiContext>,
) -> Result<Json<Envelope<interactions::InteractionReport>>, ApiError> {
    let meds = {
        let db = ctx.db()?;
        repo::get_active_medications(&db)?
    };

    let primary = ctx.advisor.clone().map(|client| {
        let meds = meds.clone();
        async move { client.check_interactions(&meds).await }
    });
    let reference = ctx.reference.clone();
    let outcome = select(primary, move || {
        Ok::<_, ApiError>(interactions::check_interactions(&reference, &meds))
    })
    .await?;
    Ok(Json(outcome.into()))
}

#[derive(Debug, Deserialize)]
pub struct ReminderParams {
    pub days: Option<u32>,
}

/// GET /api/medications/reminders?days=7
pub async fn reminders(
    State(ctx): State<ApiContext>,
    Query(params): Query<ReminderParams>,
) -> Result<Json<Envelope<schedule::ReminderReport>>, ApiError> {
    let days = params.days.unwrap_or(schedule::REMINDER_WINDOW_DAYS);
    if days == 0 || days > 30 {
        return Err(ApiError::BadRequest("days must be between 1 and 30".into()));
    }
    let meds = {
        let db = ctx.db()?;
        repo::get_active_medications(&db)?
    };

    let primary = ctx.advisor.clone().map(|client| {
        let meds = meds.clone();
        async move { client.dose_reminders(&meds, days).await }
    });
    let outcome = select(primary, move || {
        Ok::<_, ApiError>(schedule::build_reminder_report(&meds, Utc::now(), days))
    })
    .await?;
    Ok(Json(outcome.into()))
}

/// GET /api/medications/refill-alerts
pub async fn refill_alerts(
    State(ctx): State<ApiContext>,
) -> Result<Json<Envelope<schedule::RefillReport>>, ApiError> {
    let meds = {
        let db = ctx.db()?;
        repo::get_active_medications(&db)?
    };

    let primary = ctx.advisor.clone().map(|client| {
        let meds = meds.clone();
        async move { client.refill_alerts(&meds).await }
    });
    let outcome = select(primary, move || {
        Ok::<_, ApiError>(schedule::build_refill_report(&meds, Utc::now()))
    })
    .await?;
    Ok(Json(outcome.into()))
}

#[derive(Debug, Deserialize)]
pub struct SymptomsInput {
    pub symptoms: Vec<String>,
}

/// POST /api/medications/side-effects
pub async fn analyze_side_effects(
    State(ctx): State<ApiContext>,
    Json(input): Json<SymptomsInput>,
) -> Result<Json<Envelope<side_effects::SideEffectReport>>, ApiError> {
    let meds = {
        let db = ctx.db()?;
        repo::get_active_medications(&db)?
    };
    let report = side_effects::analyze_side_effects(&ctx.reference, &meds, &input.symptoms);
    Ok(Json(Envelope::ok(report)))
}

#[derive(Debug, Deserialize)]
pub struct DosageInput {
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
}

/// POST /api/medications/validate-dosage
pub async fn validate_dosage(
    State(ctx): State<ApiContext>,
    Json(input): Json<DosageInput>,
) -> Result<Json<Envelope<dosage::DosageCheck>>, ApiError> {
    let check = dosage::validate_dosage(
        &ctx.reference,
        &input.medication,
        &input.dosage,
        &input.frequency,
    )?;
    Ok(Json(Envelope::ok(check)))
}
