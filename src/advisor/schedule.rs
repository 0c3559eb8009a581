use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AlertLevel, DoseEvent, MedicationRecord, ReminderStatus};

/// Number of doses per day implied by a free-text frequency string.
/// Anything unrecognized means a single daily dose.
pub fn doses_per_day(frequency: &str) -> u32 {
    let f = frequency.to_lowercase();
    if f.contains("twice") || f.contains('2') {
        2
    } else if f.contains("three") || f.contains('3') {
        3
    } else if f.contains("four") || f.contains('4') {
        4
    } else {
        1
    }
}

/// Default reminder horizon, in days.
pub const REMINDER_WINDOW_DAYS: u32 = 7;

/// A single scheduled dose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseReminder {
    pub medication_id: Uuid,
    pub medication_name: String,
    pub dosage: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: ReminderStatus,
}

/// Expand each medication's frequency into scheduled doses over the
/// coming `days`, starting today. Times start at 08:00 and are spaced
/// evenly through the day, wrapping past midnight for three or more
/// doses. Output is sorted by schedule time across all medications.
pub fn build_reminders(
    medications: &[MedicationRecord],
    now: DateTime<Utc>,
    days: u32,
) -> Vec<DoseReminder> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let mut reminders = Vec::new();
    for m in medications {
        let doses = doses_per_day(&m.frequency);
        let spacing = 24 / doses;
        for day in 0..days {
            for k in 0..doses {
                let hour = (8 + k * spacing) % 24;
                reminders.push(DoseReminder {
                    medication_id: m.id,
                    medication_name: m.name.clone(),
                    dosage: m.dosage.clone(),
                    scheduled_at: midnight
                        + Duration::days(day as i64)
                        + Duration::hours(hour as i64),
                    status: ReminderStatus::Pending,
                });
            }
        }
    }
    reminders.sort_by_key(|r| r.scheduled_at);
    reminders
}

/// Reminders plus today/upcoming counts, for the API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderReport {
    pub reminders: Vec<DoseReminder>,
    pub today_count: usize,
    pub upcoming_count: usize,
}

pub fn build_reminder_report(
    medications: &[MedicationRecord],
    now: DateTime<Utc>,
    days: u32,
) -> ReminderReport {
    let reminders = build_reminders(medications, now, days);
    let today = now.date_naive();
    let today_count = reminders
        .iter()
        .filter(|r| r.scheduled_at.date_naive() == today)
        .count();
    let upcoming_count = reminders.len() - today_count;
    ReminderReport {
        reminders,
        today_count,
        upcoming_count,
    }
}

/// A low-supply warning for one medication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefillAlert {
    pub medication_id: Uuid,
    pub medication_name: String,
    pub estimated_remaining: u32,
    pub days_remaining: u32,
    pub refills_remaining: u32,
    pub level: AlertLevel,
}

/// Estimate remaining supply from the fill quantity and elapsed days,
/// and emit an alert when fewer than two weeks remain.
pub fn build_refill_alerts(
    medications: &[MedicationRecord],
    now: DateTime<Utc>,
) -> Vec<RefillAlert> {
    let today = now.date_naive();
    let mut alerts = Vec::new();
    for m in medications {
        let doses = doses_per_day(&m.frequency);
        let days_elapsed = (today - m.start_date).num_days().max(0) as u32;
        let consumed = days_elapsed.saturating_mul(doses);
        let estimated_remaining = m.quantity.saturating_sub(consumed);
        let days_remaining = estimated_remaining / doses;

        let level = if days_remaining <= 3 {
            AlertLevel::Critical
        } else if days_remaining <= 7 {
            AlertLevel::Warning
        } else if days_remaining <= 14 {
            AlertLevel::Info
        } else {
            continue;
        };

        alerts.push(RefillAlert {
            medication_id: m.id,
            medication_name: m.name.clone(),
            estimated_remaining,
            days_remaining,
            refills_remaining: m.refills_remaining,
            level,
        });
    }
    alerts
}

/// Refill alerts plus counts by level, for the API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefillReport {
    pub refill_alerts: Vec<RefillAlert>,
    pub critical_count: usize,
    pub warning_count: usize,
}

pub fn build_refill_report(medications: &[MedicationRecord], now: DateTime<Utc>) -> RefillReport {
    let refill_alerts = build_refill_alerts(medications, now);
    let critical_count = refill_alerts
        .iter()
        .filter(|a| a.level == AlertLevel::Critical)
        .count();
    let warning_count = refill_alerts
        .iter()
        .filter(|a| a.level == AlertLevel::Warning)
        .count();
    RefillReport {
        refill_alerts,
        critical_count,
        warning_count,
    }
}

/// Adherence summary over a set of dose events.
#[derive(Debug, Clone, Serialize)]
pub struct AdherenceReport {
    pub total_doses: usize,
    pub taken: usize,
    pub missed: usize,
    /// Percentage with one decimal place. 0.0 when no doses recorded.
    pub adherence_rate: f64,
}

pub fn adherence_report(events: &[DoseEvent]) -> AdherenceReport {
    let taken = events.iter().filter(|e| e.taken).count();
    let missed = events.iter().filter(|e| e.missed).count();
    let total = events.len();
    let adherence_rate = if total == 0 {
        0.0
    } else {
        (taken as f64 / total as f64 * 1000.0).round() / 10.0
    };
    AdherenceReport {
        total_doses: total,
        taken,
        missed,
        adherence_rate,
    }
}
