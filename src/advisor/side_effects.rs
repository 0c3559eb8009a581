use serde::Serialize;

use super::reference::ReferenceData;
use crate::models::MedicationRecord;

/// Symptoms that line up with one medication's known side effects.
#[derive(Debug, Clone, Serialize)]
pub struct SideEffectMatch {
    pub medication_name: String,
    pub matched_symptoms: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SideEffectReport {
    pub matches: Vec<SideEffectMatch>,
    pub total_matches: usize,
    /// "high", "moderate" or "low".
    pub severity: String,
    pub recommendation: String,
}

/// Compare reported symptoms against each medication's known side
/// effects. Known effects are the catalog's common list plus whatever
/// the user recorded on the medication itself.
pub fn analyze_side_effects(
    reference: &ReferenceData,
    medications: &[MedicationRecord],
    symptoms: &[String],
) -> SideEffectReport {
    let mut matches = Vec::new();
    for m in medications {
        let mut known: Vec<String> = m.side_effects.clone();
        if let Some(info) = reference.medication_info(&m.generic_name) {
            known.extend(info.common_side_effects.iter().cloned());
        }

        let matched: Vec<String> = symptoms
            .iter()
            .filter(|symptom| {
                let lower = symptom.to_lowercase();
                known.iter().any(|effect| {
                    let effect = effect.to_lowercase();
                    lower.contains(&effect) || effect.contains(&lower)
                })
            })
            .cloned()
            .collect();

        if !matched.is_empty() {
            matches.push(SideEffectMatch {
                medication_name: m.name.clone(),
                matched_symptoms: matched,
            });
        }
    }

    let total_matches: usize = matches.iter().map(|m| m.matched_symptoms.len()).sum();
    // Severity tracks how many medications are implicated, not how
    // many symptoms matched.
    let severity = if matches.len() > 2 {
        "high"
    } else if !matches.is_empty() {
        "moderate"
    } else {
        "low"
    };
    let recommendation = match severity {
        "high" => "Symptoms match side effects of several medications. Contact your prescriber soon.",
        "moderate" => "Some symptoms may be medication side effects. Mention them at your next appointment.",
        _ => "No reported symptoms match known side effects of your medications.",
    };

    SideEffectReport {
        matches,
        total_matches,
        severity: severity.to_string(),
        recommendation: recommendation.to_string(),
    }
}
