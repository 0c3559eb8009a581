use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::MedicationStatus;

/// A medication in the user's regimen. Never physically deleted;
/// discontinuation is a status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationRecord {
    pub id: Uuid,
    pub name: String,
    pub generic_name: String,
    pub dosage: String,
    /// Free-text frequency ("twice_daily", "three_times_daily", ...).
    /// Parsed leniently; anything unrecognized means one dose per day.
    pub frequency: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub prescribing_doctor: String,
    pub refills_remaining: u32,
    pub quantity: u32,
    pub status: MedicationStatus,
    pub condition_treated: String,
    pub side_effects: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// User-submitted medication data. Server assigns id, status, created_at.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub generic_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub prescribing_doctor: Option<String>,
    pub refills_remaining: Option<u32>,
    pub quantity: Option<u32>,
    pub condition_treated: Option<String>,
    pub side_effects: Option<Vec<String>>,
}

impl NewMedication {
    /// Build the stored record, filling server-assigned fields.
    pub fn into_record(self, now: DateTime<Utc>) -> MedicationRecord {
        let generic_name = self
            .generic_name
            .filter(|g| !g.trim().is_empty())
            .unwrap_or_else(|| self.name.to_lowercase());
        MedicationRecord {
            id: Uuid::new_v4(),
            name: self.name,
            generic_name,
            dosage: self.dosage,
            frequency: self.frequency,
            start_date: self.start_date.unwrap_or_else(|| now.date_naive()),
            end_date: self.end_date,
            prescribing_doctor: self.prescribing_doctor.unwrap_or_default(),
            refills_remaining: self.refills_remaining.unwrap_or(0),
            quantity: self.quantity.unwrap_or(30),
            status: MedicationStatus::Active,
            condition_treated: self.condition_treated.unwrap_or_default(),
            side_effects: self.side_effects.unwrap_or_default(),
            created_at: now,
        }
    }
}

/// One scheduled-dose outcome. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseEvent {
    pub id: i64,
    pub medication_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub taken: bool,
    pub missed: bool,
    pub taken_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}
