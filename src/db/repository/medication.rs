use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{DoseEvent, MedicationRecord, MedicationStatus};

const DATE_FMT: &str = "%Y-%m-%d";

/// Insert a medication record.
pub fn insert_medication(conn: &Connection, m: &MedicationRecord) -> Result<(), DatabaseError> {
    let side_effects = serde_json::to_string(&m.side_effects)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
    conn.execute(
        "INSERT INTO medications (id, name, generic_name, dosage, frequency, start_date, end_date,
                                  prescribing_doctor, refills_remaining, quantity, status,
                                  condition_treated, side_effects, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            m.id.to_string(),
            m.name,
            m.generic_name,
            m.dosage,
            m.frequency,
            m.start_date.format(DATE_FMT).to_string(),
            m.end_date.map(|d| d.format(DATE_FMT).to_string()),
            m.prescribing_doctor,
            m.refills_remaining,
            m.quantity,
            m.status.as_str(),
            m.condition_treated,
            side_effects,
            m.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Get all medications, newest first.
pub fn get_all_medications(conn: &Connection) -> Result<Vec<MedicationRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, generic_name, dosage, frequency, start_date, end_date,
                prescribing_doctor, refills_remaining, quantity, status,
                condition_treated, side_effects, created_at
         FROM medications
         ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map([], row_to_medication)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Get all medications with status 'active', newest first.
pub fn get_active_medications(conn: &Connection) -> Result<Vec<MedicationRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, generic_name, dosage, frequency, start_date, end_date,
                prescribing_doctor, refills_remaining, quantity, status,
                condition_treated, side_effects, created_at
         FROM medications
         WHERE status = ?1
         ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map(params![MedicationStatus::Active.as_str()], row_to_medication)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Get a medication by ID.
pub fn get_medication(conn: &Connection, id: &Uuid) -> Result<MedicationRecord, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, generic_name, dosage, frequency, start_date, end_date,
                prescribing_doctor, refills_remaining, quantity, status,
                condition_treated, side_effects, created_at
         FROM medications
         WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map(params![id.to_string()], row_to_medication)?;
    match rows.next() {
        Some(row) => Ok(row?),
        None => Err(DatabaseError::NotFound {
            entity_type: "medication".into(),
            id: id.to_string(),
        }),
    }
}

/// Transition a medication's status, enforcing the status graph.
pub fn update_medication_status(
    conn: &Connection,
    id: &Uuid,
    next: MedicationStatus,
) -> Result<MedicationRecord, DatabaseError> {
    let current = get_medication(conn, id)?;
    if !current.status.can_transition_to(next) {
        return Err(DatabaseError::ConstraintViolation(format!(
            "cannot transition medication from {} to {}",
            current.status.as_str(),
            next.as_str()
        )));
    }
    conn.execute(
        "UPDATE medications SET status = ?1 WHERE id = ?2",
        params![next.as_str(), id.to_string()],
    )?;
    get_medication(conn, id)
}

/// Record a scheduled-dose outcome for a medication.
pub fn insert_dose_event(
    conn: &Connection,
    medication_id: &Uuid,
    scheduled_at: DateTime<Utc>,
    taken: bool,
    taken_at: Option<DateTime<Utc>>,
    note: Option<&str>,
) -> Result<i64, DatabaseError> {
    // Referenced medication must exist; the FK would also catch this but
    // we want a NotFound rather than a bare constraint error.
    get_medication(conn, medication_id)?;
    conn.execute(
        "INSERT INTO dose_events (medication_id, scheduled_at, taken, missed, taken_at, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            medication_id.to_string(),
            scheduled_at.to_rfc3339(),
            taken,
            !taken,
            taken_at.map(|t| t.to_rfc3339()),
            note,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Dose events for one medication, oldest first.
pub fn get_dose_events(
    conn: &Connection,
    medication_id: &Uuid,
) -> Result<Vec<DoseEvent>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, medication_id, scheduled_at, taken, missed, taken_at, note
         FROM dose_events
         WHERE medication_id = ?1
         ORDER BY scheduled_at ASC",
    )?;
    let rows = stmt.query_map(params![medication_id.to_string()], row_to_dose_event)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

fn row_to_medication(row: &rusqlite::Row) -> Result<MedicationRecord, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let start_str: String = row.get(5)?;
    let end_str: Option<String> = row.get(6)?;
    let status_str: String = row.get(10)?;
    let effects_str: String = row.get(12)?;
    let created_str: String = row.get(13)?;

    Ok(MedicationRecord {
        id: parse_uuid(&id_str, 0)?,
        name: row.get(1)?,
        generic_name: row.get(2)?,
        dosage: row.get(3)?,
        frequency: row.get(4)?,
        start_date: NaiveDate::parse_from_str(&start_str, DATE_FMT).unwrap_or_default(),
        end_date: end_str.and_then(|s| NaiveDate::parse_from_str(&s, DATE_FMT).ok()),
        prescribing_doctor: row.get(7)?,
        refills_remaining: row.get(8)?,
        quantity: row.get(9)?,
        status: MedicationStatus::from_str(&status_str).unwrap_or(MedicationStatus::Active),
        condition_treated: row.get(11)?,
        side_effects: serde_json::from_str(&effects_str).unwrap_or_default(),
        created_at: parse_utc(&created_str),
    })
}

fn row_to_dose_event(row: &rusqlite::Row) -> Result<DoseEvent, rusqlite::Error> {
    let med_str: String = row.get(1)?;
    let scheduled_str: String = row.get(2)?;
    let taken_at_str: Option<String> = row.get(5)?;

    Ok(DoseEvent {
        id: row.get(0)?,
        medication_id: parse_uuid(&med_str, 1)?,
        scheduled_at: parse_utc(&scheduled_str),
        taken: row.get(3)?,
        missed: row.get(4)?,
        taken_at: taken_at_str.map(|s| parse_utc(&s)),
        note: row.get(6)?,
    })
}

fn parse_uuid(s: &str, col: usize) -> Result<Uuid, rusqlite::Error> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}
