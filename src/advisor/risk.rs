use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{HealthProfile, RiskLevel};

const BASE_RISK_SCORE: f64 = 0.3;

/// Symptoms that warrant immediate attention regardless of the rest of
/// the profile.
const CRITICAL_SYMPTOMS: [&str; 3] = ["chest pain", "difficulty breathing", "severe headache"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Clamped to [0, 1], two decimal places.
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    /// 100 minus the score as a percentage, floored at 10.
    pub health_score: u32,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub screenings: Vec<String>,
    pub next_checkup: NaiveDate,
}

/// Additive risk scoring over the stored profile.
pub fn assess_risk(profile: &HealthProfile, now: DateTime<Utc>) -> RiskAssessment {
    let mut score = BASE_RISK_SCORE;
    let mut risk_factors = Vec::new();
    let mut recommendations = Vec::new();
    let mut screenings = vec![
        "Annual physical exam".to_string(),
        "Blood pressure screening".to_string(),
    ];

    if profile.age > 65 {
        score += 0.2;
        risk_factors.push("Age-related Health".to_string());
        recommendations.push("Schedule regular checkups and keep vaccinations current.".to_string());
    }
    if profile.smoking {
        score += 0.3;
        risk_factors.push("Smoking".to_string());
        recommendations.push("Consider a smoking cessation program.".to_string());
        screenings.push("Lung function test".to_string());
    }
    let bmi = profile.bmi();
    if !(18.5..=25.0).contains(&bmi) {
        score += 0.2;
        risk_factors.push(format!("BMI outside healthy range ({bmi:.1})"));
        recommendations.push("Review diet and activity levels with your doctor.".to_string());
    }
    if profile.age > 50 {
        screenings.push("Colonoscopy".to_string());
    }

    let critical = profile.symptoms.iter().any(|s| is_critical_symptom(s));
    if critical {
        score += 0.4;
    } else if profile.symptoms.len() > 3 {
        score += 0.2;
        risk_factors.push("Multiple concurrent symptoms".to_string());
        recommendations.push("Discuss your symptoms with a healthcare provider.".to_string());
    }

    score = score.clamp(0.0, 1.0);

    let mut risk_level = if score < 0.4 {
        RiskLevel::Low
    } else if score < 0.7 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };
    if critical {
        risk_level = RiskLevel::High;
        risk_factors.insert(0, "Critical symptoms reported".to_string());
        recommendations.insert(
            0,
            "Seek immediate medical attention for your reported symptoms.".to_string(),
        );
    }

    let health_score = (100 - (score * 100.0).round() as i64).max(10) as u32;

    let checkup_in = match risk_level {
        RiskLevel::High => Duration::days(14),
        RiskLevel::Medium => Duration::days(90),
        RiskLevel::Low => Duration::days(180),
    };

    RiskAssessment {
        risk_score: (score * 100.0).round() / 100.0,
        risk_level,
        health_score,
        risk_factors,
        recommendations,
        screenings,
        next_checkup: (now + checkup_in).date_naive(),
    }
}

fn is_critical_symptom(symptom: &str) -> bool {
    let lower = symptom.to_lowercase();
    CRITICAL_SYMPTOMS
        .iter()
        .any(|c| lower.contains(c) || c.contains(lower.as_str()))
}
