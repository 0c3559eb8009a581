use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::HealthProfile;

/// Create or overwrite the singleton health profile.
pub fn upsert_profile(
    conn: &Connection,
    profile: &HealthProfile,
    now: DateTime<Utc>,
) -> Result<(), DatabaseError> {
    let symptoms = serde_json::to_string(&profile.symptoms)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
    let conditions = serde_json::to_string(&profile.conditions)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
    conn.execute(
        "INSERT INTO health_profile (id, age, weight, height, smoking, symptoms, conditions, updated_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET
             age = excluded.age,
             weight = excluded.weight,
             height = excluded.height,
             smoking = excluded.smoking,
             symptoms = excluded.symptoms,
             conditions = excluded.conditions,
             updated_at = excluded.updated_at",
        params![
            profile.age,
            profile.weight,
            profile.height,
            profile.smoking,
            symptoms,
            conditions,
            now.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Load the singleton profile, if one has been saved.
pub fn get_profile(conn: &Connection) -> Result<Option<HealthProfile>, DatabaseError> {
    conn.query_row(
        "SELECT age, weight, height, smoking, symptoms, conditions
         FROM health_profile
         WHERE id = 1",
        [],
        |row| {
            let symptoms: String = row.get(4)?;
            let conditions: String = row.get(5)?;
            Ok(HealthProfile {
                age: row.get(0)?,
                weight: row.get(1)?,
                height: row.get(2)?,
                smoking: row.get(3)?,
                symptoms: serde_json::from_str(&symptoms).unwrap_or_default(),
                conditions: serde_json::from_str(&conditions).unwrap_or_default(),
            })
        },
    )
    .optional()
    .map_err(DatabaseError::from)
}
