use serde::{Deserialize, Serialize};

use super::reference::ReferenceData;
use crate::models::{InteractionSeverity, MedicationRecord};

/// One detected interaction between two of the submitted medications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionFinding {
    pub medications: [String; 2],
    pub severity: InteractionSeverity,
    pub description: String,
    pub recommendation: String,
}

/// Findings partitioned by severity, plus the overall risk grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionReport {
    pub total_interactions: usize,
    pub severe: Vec<InteractionFinding>,
    pub major: Vec<InteractionFinding>,
    pub moderate: Vec<InteractionFinding>,
    pub minor: Vec<InteractionFinding>,
    pub risk_level: String,
}

/// Check every unordered pair of medications against the known
/// interaction rules. Matching runs on generic names; findings carry
/// the user-facing names.
pub fn check_interactions(
    reference: &ReferenceData,
    medications: &[MedicationRecord],
) -> InteractionReport {
    let mut findings = Vec::new();
    for i in 0..medications.len() {
        for j in (i + 1)..medications.len() {
            if let Some(rule) = reference
                .find_interaction(&medications[i].generic_name, &medications[j].generic_name)
            {
                findings.push(InteractionFinding {
                    medications: [medications[i].name.clone(), medications[j].name.clone()],
                    severity: rule.severity,
                    description: rule.description.clone(),
                    recommendation: rule.recommendation.clone(),
                });
            }
        }
    }

    let total_interactions = findings.len();
    let mut severe = Vec::new();
    let mut major = Vec::new();
    let mut moderate = Vec::new();
    let mut minor = Vec::new();
    for finding in findings {
        match finding.severity {
            InteractionSeverity::Severe => severe.push(finding),
            InteractionSeverity::Major => major.push(finding),
            InteractionSeverity::Moderate => moderate.push(finding),
            InteractionSeverity::Minor => minor.push(finding),
        }
    }

    // Overall risk is the worst non-empty bucket. Any interaction at
    // all is at least "low"; only a clean result is "minimal".
    let risk_level = if !severe.is_empty() {
        "high"
    } else if !major.is_empty() {
        "moderate-high"
    } else if !moderate.is_empty() {
        "moderate"
    } else if total_interactions > 0 {
        "low"
    } else {
        "minimal"
    };

    InteractionReport {
        total_interactions,
        severe,
        major,
        moderate,
        minor,
        risk_level: risk_level.to_string(),
    }
}
