use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use super::reference::ReferenceData;
use super::schedule::doses_per_day;
use super::AdvisorError;

/// Parsed dosage plus a comparison against the catalog's daily maximum.
#[derive(Debug, Clone, Serialize)]
pub struct DosageCheck {
    pub medication: String,
    pub amount: f64,
    pub unit: String,
    pub doses_per_day: u32,
    /// Only present for mass units that convert to milligrams.
    pub daily_total_mg: Option<f64>,
    pub max_daily_dose_mg: Option<f64>,
    pub exceeds_max: bool,
}

fn dosage_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(mcg|mg|g|ml|units?)\b").unwrap()
    })
}

/// Parse a dosage string like "500mg" or "0.5 g" and, when the catalog
/// knows the medication, compare the implied daily total against its
/// maximum daily dose.
pub fn validate_dosage(
    reference: &ReferenceData,
    medication: &str,
    dosage: &str,
    frequency: &str,
) -> Result<DosageCheck, AdvisorError> {
    let caps = dosage_pattern()
        .captures(dosage)
        .ok_or_else(|| AdvisorError::InvalidDosage(dosage.to_string()))?;
    let amount: f64 = caps[1]
        .parse()
        .map_err(|_| AdvisorError::InvalidDosage(dosage.to_string()))?;
    let unit = caps[2].to_lowercase();

    let amount_mg = match unit.as_str() {
        "mg" => Some(amount),
        "mcg" => Some(amount / 1000.0),
        "g" => Some(amount * 1000.0),
        _ => None,
    };

    let doses = doses_per_day(frequency);
    let daily_total_mg = amount_mg.map(|mg| mg * doses as f64);
    let max_daily_dose_mg = reference
        .medication_info(medication)
        .and_then(|info| info.max_daily_dose_mg);
    let exceeds_max = match (daily_total_mg, max_daily_dose_mg) {
        (Some(total), Some(max)) => total > max,
        _ => false,
    };

    Ok(DosageCheck {
        medication: medication.to_string(),
        amount,
        unit,
        doses_per_day: doses,
        daily_total_mg,
        max_daily_dose_mg,
        exceeds_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_milligrams() {
        let reference = ReferenceData::load().unwrap();
        let check = validate_dosage(&reference, "metformin", "500mg", "twice_daily").unwrap();
        assert_eq!(check.amount, 500.0);
        assert_eq!(check.unit, "mg");
        assert_eq!(check.daily_total_mg, Some(1000.0));
        assert!(!check.exceeds_max);
    }

    #[test]
    fn converts_grams_and_flags_excess() {
        let reference = ReferenceData::load().unwrap();
        let check = validate_dosage(&reference, "metformin", "1.5 g", "twice_daily").unwrap();
        assert_eq!(check.daily_total_mg, Some(3000.0));
        assert!(check.exceeds_max);
    }

    #[test]
    fn insulin_units_skip_mass_comparison() {
        let reference = ReferenceData::load().unwrap();
        let check = validate_dosage(&reference, "insulin", "10 units", "once_daily").unwrap();
        assert_eq!(check.daily_total_mg, None);
        assert!(!check.exceeds_max);
    }

    #[test]
    fn unknown_medication_still_parses() {
        let reference = ReferenceData::load().unwrap();
        let check = validate_dosage(&reference, "obscuredrug", "25mg", "once_daily").unwrap();
        assert_eq!(check.max_daily_dose_mg, None);
        assert!(!check.exceeds_max);
    }

    #[test]
    fn garbage_dosage_is_invalid() {
        let reference = ReferenceData::load().unwrap();
        let result = validate_dosage(&reference, "metformin", "a spoonful", "once_daily");
        assert!(matches!(result, Err(AdvisorError::InvalidDosage(_))));
    }
}
