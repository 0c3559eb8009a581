use serde::{Deserialize, Serialize};

use super::AdvisorError;
use crate::models::InteractionSeverity;

const INTERACTION_RULES_JSON: &str = include_str!("../../resources/reference/interaction_rules.json");
const MEDICATION_CATALOG_JSON: &str =
    include_str!("../../resources/reference/medication_catalog.json");

/// One known drug-drug interaction (loaded from interaction_rules.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRule {
    pub medications: [String; 2],
    pub severity: InteractionSeverity,
    pub description: String,
    pub recommendation: String,
}

/// Catalog entry for a known medication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationInfo {
    pub name: String,
    pub category: String,
    pub max_daily_dose_mg: Option<f64>,
    pub common_side_effects: Vec<String>,
}

/// Bundled reference tables used by the advisory engine.
pub struct ReferenceData {
    pub interaction_rules: Vec<InteractionRule>,
    pub catalog: Vec<MedicationInfo>,
}

impl ReferenceData {
    /// Parse the embedded reference tables.
    pub fn load() -> Result<Self, AdvisorError> {
        let interaction_rules: Vec<InteractionRule> = serde_json::from_str(INTERACTION_RULES_JSON)
            .map_err(|e| {
                AdvisorError::ReferenceDataParse("interaction_rules.json".into(), e.to_string())
            })?;
        let catalog: Vec<MedicationInfo> =
            serde_json::from_str(MEDICATION_CATALOG_JSON).map_err(|e| {
                AdvisorError::ReferenceDataParse("medication_catalog.json".into(), e.to_string())
            })?;
        Ok(Self {
            interaction_rules,
            catalog,
        })
    }

    /// Find the rule covering a pair of medication names, checking both
    /// orderings. Matching is case-insensitive substring in either
    /// direction, so "Warfarin 5mg" still hits the "warfarin" rule.
    /// The first matching rule wins.
    pub fn find_interaction(&self, a: &str, b: &str) -> Option<&InteractionRule> {
        let a = a.to_lowercase();
        let b = b.to_lowercase();
        self.interaction_rules.iter().find(|rule| {
            let [x, y] = &rule.medications;
            (name_matches(&a, x) && name_matches(&b, y))
                || (name_matches(&a, y) && name_matches(&b, x))
        })
    }

    /// Catalog lookup by case-insensitive substring, first match wins.
    pub fn medication_info(&self, name: &str) -> Option<&MedicationInfo> {
        let lower = name.to_lowercase();
        self.catalog.iter().find(|m| name_matches(&lower, &m.name))
    }
}

fn name_matches(input_lower: &str, reference: &str) -> bool {
    let reference = reference.to_lowercase();
    input_lower.contains(&reference) || reference.contains(input_lower)
}
