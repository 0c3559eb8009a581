use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate a fieldless enum with as_str + std::str::FromStr pattern.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(MedicationStatus {
    Active => "active",
    Paused => "paused",
    Discontinued => "discontinued",
    Completed => "completed",
});

impl MedicationStatus {
    /// Whether a transition from `self` to `next` is allowed.
    /// Only edges out of `active` exist; there are no reverse edges.
    pub fn can_transition_to(self, next: MedicationStatus) -> bool {
        matches!(
            (self, next),
            (
                MedicationStatus::Active,
                MedicationStatus::Paused
                    | MedicationStatus::Discontinued
                    | MedicationStatus::Completed
            )
        )
    }
}

// Variant order doubles as severity order: Minor < Moderate < Major < Severe.
str_enum!(InteractionSeverity {
    Minor => "minor",
    Moderate => "moderate",
    Major => "major",
    Severe => "severe",
});

str_enum!(AlertLevel {
    Info => "info",
    Warning => "warning",
    Critical => "critical",
});

/// Risk buckets are reported capitalized ("Low"/"Medium"/"High"), so this
/// one stays outside the snake_case macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

str_enum!(ReminderStatus {
    Pending => "pending",
    Taken => "taken",
    Missed => "missed",
});

// Worst-first would invert the score mapping; keep best-first so Ord
// matches "worse is greater".
str_enum!(OverallStatus {
    Normal => "normal",
    AttentionNeeded => "attention_needed",
    Concerning => "concerning",
});

str_enum!(TrendDirection {
    Decreasing => "decreasing",
    Stable => "stable",
    Increasing => "increasing",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn medication_status_round_trip() {
        for status in [
            MedicationStatus::Active,
            MedicationStatus::Paused,
            MedicationStatus::Discontinued,
            MedicationStatus::Completed,
        ] {
            assert_eq!(MedicationStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_invalid_enum() {
        assert!(MedicationStatus::from_str("archived").is_err());
    }

    #[test]
    fn transitions_only_out_of_active() {
        use MedicationStatus::*;
        assert!(Active.can_transition_to(Paused));
        assert!(Active.can_transition_to(Discontinued));
        assert!(Active.can_transition_to(Completed));
        assert!(!Discontinued.can_transition_to(Active));
        assert!(!Paused.can_transition_to(Active));
        assert!(!Completed.can_transition_to(Discontinued));
    }

    #[test]
    fn interaction_severity_ordering() {
        use InteractionSeverity::*;
        assert!(Severe > Major);
        assert!(Major > Moderate);
        assert!(Moderate > Minor);
    }

    #[test]
    fn overall_status_worst_is_greatest() {
        use OverallStatus::*;
        assert!(Concerning > AttentionNeeded);
        assert!(AttentionNeeded > Normal);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&OverallStatus::AttentionNeeded).unwrap();
        assert_eq!(json, "\"attention_needed\"");
    }
}
