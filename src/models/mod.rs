//! Domain types shared across the database layer, the advisory engine
//! and the HTTP API.

pub mod enums;
pub mod medication;
pub mod profile;
pub mod vital_sign;

pub use enums::{
    AlertLevel, InteractionSeverity, MedicationStatus, OverallStatus, ReminderStatus, RiskLevel,
    TrendDirection,
};
pub use medication::{DoseEvent, MedicationRecord, NewMedication};
pub use profile::HealthProfile;
pub use vital_sign::{ManualReading, VitalSignReading};
