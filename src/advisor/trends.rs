use serde::{Deserialize, Serialize};

use crate::models::{OverallStatus, TrendDirection, VitalSignReading};

/// Slope magnitude (units per sample) below which a series is flat.
const TREND_SLOPE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTrend {
    /// Mean over the history, one decimal place.
    pub average: f64,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalAlert {
    pub metric: String,
    pub message: String,
    pub level: OverallStatus,
}

/// Aggregated view of the vital-sign history plus alerting on the most
/// recent reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSummary {
    pub sample_count: usize,
    pub heart_rate: MetricTrend,
    pub systolic: MetricTrend,
    pub diastolic: MetricTrend,
    pub alerts: Vec<VitalAlert>,
    pub recommendations: Vec<String>,
    pub overall_status: OverallStatus,
    pub health_score: u32,
}

/// Analyze the history. Averages and trends cover all samples; alerts
/// look only at the latest reading, so one recovered spike does not
/// keep the status elevated. Returns `None` for an empty history.
pub fn analyze_trends(history: &[VitalSignReading]) -> Option<TrendSummary> {
    let latest = history.last()?;

    let heart_rate = metric_trend(history, |r| r.heart_rate as f64);
    let systolic = metric_trend(history, |r| r.systolic as f64);
    let diastolic = metric_trend(history, |r| r.diastolic as f64);

    let mut alerts = Vec::new();
    let mut recommendations = Vec::new();

    if latest.heart_rate > 100 {
        alerts.push(VitalAlert {
            metric: "heart_rate".into(),
            message: format!("Elevated heart rate: {} bpm", latest.heart_rate),
            level: OverallStatus::AttentionNeeded,
        });
        recommendations
            .push("Rest and recheck your heart rate in 30 minutes. Avoid caffeine.".into());
    }
    if latest.systolic > 140 || latest.diastolic > 90 {
        alerts.push(VitalAlert {
            metric: "blood_pressure".into(),
            message: format!(
                "Elevated blood pressure: {}/{} mmHg",
                latest.systolic, latest.diastolic
            ),
            level: OverallStatus::AttentionNeeded,
        });
        recommendations
            .push("Reduce salt intake and recheck your blood pressure after resting.".into());
    }
    if let Some(spo2) = latest.oxygen_saturation {
        if spo2 < 95 {
            alerts.push(VitalAlert {
                metric: "oxygen_saturation".into(),
                message: format!("Low oxygen saturation: {spo2}%"),
                level: OverallStatus::Concerning,
            });
            recommendations.push(
                "Sit upright and take slow deep breaths. Seek care if readings stay below 92%."
                    .into(),
            );
        }
    }

    if alerts.is_empty() {
        recommendations
            .push("All vital signs are within normal ranges. Keep up your current routine.".into());
    }

    let overall_status = alerts
        .iter()
        .map(|a| a.level)
        .max()
        .unwrap_or(OverallStatus::Normal);
    let health_score = match overall_status {
        OverallStatus::Normal => 85,
        OverallStatus::AttentionNeeded => 70,
        OverallStatus::Concerning => 50,
    };

    Some(TrendSummary {
        sample_count: history.len(),
        heart_rate,
        systolic,
        diastolic,
        alerts,
        recommendations,
        overall_status,
        health_score,
    })
}

fn metric_trend(history: &[VitalSignReading], value: impl Fn(&VitalSignReading) -> f64) -> MetricTrend {
    let values: Vec<f64> = history.iter().map(value).collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    MetricTrend {
        average: (mean * 10.0).round() / 10.0,
        trend: direction(&values),
    }
}

/// Least-squares slope over the sample index, bucketed by threshold.
fn direction(values: &[f64]) -> TrendDirection {
    let n = values.len();
    if n < 2 {
        return TrendDirection::Stable;
    }
    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }
    let slope = if den == 0.0 { 0.0 } else { num / den };
    if slope > TREND_SLOPE_THRESHOLD {
        TrendDirection::Increasing
    } else if slope < -TREND_SLOPE_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn reading(hours_ago: i64, hr: i32, sys: i32, dia: i32, spo2: i32) -> VitalSignReading {
        VitalSignReading {
            timestamp: Utc::now() - Duration::hours(hours_ago),
            heart_rate: hr,
            systolic: sys,
            diastolic: dia,
            temperature: Some(36.7),
            oxygen_saturation: Some(spo2),
            steps: 0,
            sleep_hours: 0.0,
            stress_level: None,
        }
    }

    #[test]
    fn empty_history_yields_none() {
        assert!(analyze_trends(&[]).is_none());
    }

    #[test]
    fn calm_history_is_normal() {
        let history: Vec<_> = (0..24).map(|i| reading(24 - i, 72, 118, 76, 98)).collect();
        let summary = analyze_trends(&history).unwrap();
        assert_eq!(summary.overall_status, OverallStatus::Normal);
        assert_eq!(summary.health_score, 85);
        assert!(summary.alerts.is_empty());
        assert_eq!(summary.recommendations.len(), 1);
        assert_eq!(summary.heart_rate.average, 72.0);
        assert_eq!(summary.heart_rate.trend, TrendDirection::Stable);
    }

    #[test]
    fn latest_tachycardia_needs_attention() {
        let mut history: Vec<_> = (0..23).map(|i| reading(24 - i, 72, 118, 76, 98)).collect();
        history.push(reading(0, 110, 118, 76, 98));
        let summary = analyze_trends(&history).unwrap();
        assert_eq!(summary.overall_status, OverallStatus::AttentionNeeded);
        assert_eq!(summary.health_score, 70);
        assert_eq!(summary.alerts.len(), 1);
        assert_eq!(summary.alerts[0].metric, "heart_rate");
    }

    #[test]
    fn recovered_spike_does_not_alert() {
        // Spike mid-history, latest reading back to normal.
        let mut history: Vec<_> = (0..12).map(|i| reading(24 - i, 72, 118, 76, 98)).collect();
        history.push(reading(12, 130, 160, 100, 98));
        history.extend((13..24).map(|i| reading(24 - i, 72, 118, 76, 98)));
        let summary = analyze_trends(&history).unwrap();
        assert_eq!(summary.overall_status, OverallStatus::Normal);
        assert!(summary.alerts.is_empty());
    }

    #[test]
    fn low_oxygen_is_concerning_and_outranks_attention() {
        let history = vec![reading(0, 110, 150, 95, 92)];
        let summary = analyze_trends(&history).unwrap();
        assert_eq!(summary.overall_status, OverallStatus::Concerning);
        assert_eq!(summary.health_score, 50);
        assert_eq!(summary.alerts.len(), 3);
        // Detection order: heart rate, blood pressure, oxygen.
        assert_eq!(summary.alerts[0].metric, "heart_rate");
        assert_eq!(summary.alerts[2].metric, "oxygen_saturation");
        assert_eq!(summary.recommendations.len(), 3);
    }

    #[test]
    fn rising_series_is_increasing() {
        let history: Vec<_> = (0..10)
            .map(|i| reading(10 - i as i64, 70 + i * 2, 118, 76, 98))
            .collect();
        let summary = analyze_trends(&history).unwrap();
        assert_eq!(summary.heart_rate.trend, TrendDirection::Increasing);
    }

    #[test]
    fn single_reading_is_stable() {
        let summary = analyze_trends(&[reading(0, 72, 118, 76, 98)]).unwrap();
        assert_eq!(summary.heart_rate.trend, TrendDirection::Stable);
        assert_eq!(summary.sample_count, 1);
    }
}
