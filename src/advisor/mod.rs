//! Local advisory engine. Produces the conservative, rule-based answers
//! served when the remote advisory service is unreachable.

pub mod dosage;
pub mod interactions;
pub mod reference;
pub mod risk;
pub mod schedule;
pub mod side_effects;
pub mod simulate;
pub mod trends;

use thiserror::Error;

pub use reference::ReferenceData;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Failed to parse reference data {0}: {1}")]
    ReferenceDataParse(String, String),

    #[error("Invalid dosage string: {0}")]
    InvalidDosage(String),
}
