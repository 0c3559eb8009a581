use serde::{Deserialize, Serialize};

/// Singleton health profile used as input to simulation and risk
/// assessment. Stored as a single row keyed on id = 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub age: u32,
    /// Kilograms.
    pub weight: f64,
    /// Centimeters.
    pub height: f64,
    pub smoking: bool,
    pub symptoms: Vec<String>,
    pub conditions: Vec<String>,
}

impl HealthProfile {
    /// Body mass index rounded to one decimal place.
    pub fn bmi(&self) -> f64 {
        bmi_from(self.weight, self.height)
    }
}

/// weight in kg, height in cm.
pub fn bmi_from(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    (raw * 10.0).round() / 10.0
}
