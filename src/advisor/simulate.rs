use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::models::{HealthProfile, VitalSignReading};

const BASE_HEART_RATE: i32 = 75;
const BASE_SYSTOLIC: i32 = 120;
const BASE_DIASTOLIC: i32 = 80;
const BASE_TEMPERATURE: f64 = 36.7;
const BASE_OXYGEN_SATURATION: i32 = 98;

/// Profile-adjusted baselines before per-sample jitter.
fn baselines(profile: &HealthProfile) -> (i32, i32, i32) {
    let mut heart_rate = BASE_HEART_RATE;
    let mut systolic = BASE_SYSTOLIC;
    let mut diastolic = BASE_DIASTOLIC;

    if profile.age > 65 {
        heart_rate += 5;
        systolic += 10;
        diastolic += 5;
    } else if profile.age < 25 {
        heart_rate -= 5;
    }
    if profile.smoking {
        heart_rate += 10;
        systolic += 15;
    }
    if profile.bmi() > 25.0 {
        heart_rate += 5;
        systolic += 10;
    }
    (heart_rate, systolic, diastolic)
}

/// Synthesize an hourly vital-sign history ending at `now`. The RNG is
/// injected so callers can seed it for reproducible output.
pub fn synthesize_history<R: Rng>(
    profile: &HealthProfile,
    hours: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<VitalSignReading> {
    let (hr_base, sys_base, dia_base) = baselines(profile);
    let mut readings = Vec::with_capacity(hours);
    for i in 0..hours {
        let timestamp = now - Duration::hours((hours - 1 - i) as i64);
        let temperature = BASE_TEMPERATURE + rng.gen_range(-1.0..=1.0);
        readings.push(VitalSignReading {
            timestamp,
            heart_rate: hr_base + rng.gen_range(-10..=10),
            systolic: sys_base + rng.gen_range(-10..=10),
            diastolic: dia_base + rng.gen_range(-5..=5),
            temperature: Some((temperature * 10.0).round() / 10.0),
            oxygen_saturation: Some((BASE_OXYGEN_SATURATION + rng.gen_range(-1..=1)).min(100)),
            steps: rng.gen_range(0..=800),
            sleep_hours: 0.0,
            stress_level: None,
        });
    }
    readings
}
