use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One vital-sign sample, either recorded manually, imported from a
/// wearable, or synthesized by the simulation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSignReading {
    pub timestamp: DateTime<Utc>,
    pub heart_rate: i32,
    pub systolic: i32,
    pub diastolic: i32,
    pub temperature: Option<f64>,
    pub oxygen_saturation: Option<i32>,
    pub steps: i32,
    pub sleep_hours: f64,
    /// 1-10 scale.
    pub stress_level: Option<i32>,
}

/// Manually entered reading. Timestamp defaults to "now" server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualReading {
    pub heart_rate: i32,
    pub systolic: i32,
    pub diastolic: i32,
    pub temperature: Option<f64>,
    pub oxygen_saturation: Option<i32>,
    pub steps: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub stress_level: Option<i32>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl ManualReading {
    /// Plausibility check for manual input. Returns the first offending
    /// field name, or `None` when the reading is acceptable.
    pub fn validate(&self) -> Option<&'static str> {
        if !(20..=250).contains(&self.heart_rate) {
            return Some("heart_rate");
        }
        if !(60..=260).contains(&self.systolic) {
            return Some("systolic");
        }
        if !(30..=160).contains(&self.diastolic) {
            return Some("diastolic");
        }
        if let Some(t) = self.temperature {
            if !(30.0..=45.0).contains(&t) {
                return Some("temperature");
            }
        }
        if let Some(o2) = self.oxygen_saturation {
            if !(50..=100).contains(&o2) {
                return Some("oxygen_saturation");
            }
        }
        if let Some(stress) = self.stress_level {
            if !(1..=10).contains(&stress) {
                return Some("stress_level");
            }
        }
        None
    }

    pub fn into_reading(self, now: DateTime<Utc>) -> VitalSignReading {
        VitalSignReading {
            timestamp: self.timestamp.unwrap_or(now),
            heart_rate: self.heart_rate,
            systolic: self.systolic,
            diastolic: self.diastolic,
            temperature: self.temperature,
            oxygen_saturation: self.oxygen_saturation,
            steps: self.steps.unwrap_or(0),
            sleep_hours: self.sleep_hours.unwrap_or(0.0),
            stress_level: self.stress_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> ManualReading {
        ManualReading {
            heart_rate: 72,
            systolic: 118,
            diastolic: 76,
            temperature: Some(36.7),
            oxygen_saturation: Some(98),
            steps: None,
            sleep_hours: None,
            stress_level: Some(3),
            timestamp: None,
        }
    }

    #[test]
    fn valid_reading_passes() {
        assert_eq!(manual().validate(), None);
    }

    #[test]
    fn implausible_heart_rate_rejected() {
        let mut m = manual();
        m.heart_rate = 300;
        assert_eq!(m.validate(), Some("heart_rate"));
    }

    #[test]
    fn stress_level_out_of_scale_rejected() {
        let mut m = manual();
        m.stress_level = Some(11);
        assert_eq!(m.validate(), Some("stress_level"));
    }

    #[test]
    fn into_reading_defaults_timestamp_to_now() {
        let now = Utc::now();
        let reading = manual().into_reading(now);
        assert_eq!(reading.timestamp, now);
        assert_eq!(reading.steps, 0);
    }
}
