use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::VitalSignReading;

/// Rolling history window, 7 days of hourly samples.
pub const HISTORY_CAP: usize = 168;

/// Insert a reading and evict the oldest rows beyond the history cap.
pub fn insert_reading(conn: &Connection, r: &VitalSignReading) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO vital_readings (recorded_at, heart_rate, systolic, diastolic,
                                     temperature, oxygen_saturation, steps, sleep_hours, stress_level)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            r.timestamp.to_rfc3339(),
            r.heart_rate,
            r.systolic,
            r.diastolic,
            r.temperature,
            r.oxygen_saturation,
            r.steps,
            r.sleep_hours,
            r.stress_level,
        ],
    )?;
    conn.execute(
        "DELETE FROM vital_readings
         WHERE id NOT IN (SELECT id FROM vital_readings ORDER BY recorded_at DESC, id DESC LIMIT ?1)",
        params![HISTORY_CAP as i64],
    )?;
    Ok(())
}

/// Replace the whole history with a freshly synthesized batch.
pub fn replace_history(
    conn: &mut Connection,
    readings: &[VitalSignReading],
) -> Result<(), DatabaseError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM vital_readings", [])?;
    for r in readings {
        tx.execute(
            "INSERT INTO vital_readings (recorded_at, heart_rate, systolic, diastolic,
                                         temperature, oxygen_saturation, steps, sleep_hours, stress_level)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                r.timestamp.to_rfc3339(),
                r.heart_rate,
                r.systolic,
                r.diastolic,
                r.temperature,
                r.oxygen_saturation,
                r.steps,
                r.sleep_hours,
                r.stress_level,
            ],
        )?;
    }
    tx.commit()?;
    Ok(())
}

/// Full history, oldest first.
pub fn get_history(conn: &Connection) -> Result<Vec<VitalSignReading>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT recorded_at, heart_rate, systolic, diastolic, temperature,
                oxygen_saturation, steps, sleep_hours, stress_level
         FROM vital_readings
         ORDER BY recorded_at ASC, id ASC",
    )?;
    let rows = stmt.query_map([], row_to_reading)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Most recent reading, if any.
pub fn get_latest_reading(conn: &Connection) -> Result<Option<VitalSignReading>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT recorded_at, heart_rate, systolic, diastolic, temperature,
                oxygen_saturation, steps, sleep_hours, stress_level
         FROM vital_readings
         ORDER BY recorded_at DESC, id DESC
         LIMIT 1",
    )?;
    let mut rows = stmt.query_map([], row_to_reading)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

fn row_to_reading(row: &rusqlite::Row) -> Result<VitalSignReading, rusqlite::Error> {
    let recorded_str: String = row.get(0)?;
    Ok(VitalSignReading {
        timestamp: chrono::DateTime::parse_from_rfc3339(&recorded_str)
            .map(|t| t.with_timezone(&chrono::Utc))
            .unwrap_or_default(),
        heart_rate: row.get(1)?,
        systolic: row.get(2)?,
        diastolic: row.get(3)?,
        temperature: row.get(4)?,
        oxygen_saturation: row.get(5)?,
        steps: row.get(6)?,
        sleep_hours: row.get(7)?,
        stress_level: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use chrono::{Duration, Utc};

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn make_reading(hours_ago: i64, heart_rate: i32) -> VitalSignReading {
        VitalSignReading {
            timestamp: Utc::now() - Duration::hours(hours_ago),
            heart_rate,
            systolic: 120,
            diastolic: 80,
            temperature: Some(36.7),
            oxygen_saturation: Some(98),
            steps: 0,
            sleep_hours: 0.0,
            stress_level: None,
        }
    }

    #[test]
    fn insert_and_latest() {
        let conn = test_db();
        insert_reading(&conn, &make_reading(2, 70)).unwrap();
        insert_reading(&conn, &make_reading(1, 85)).unwrap();

        let latest = get_latest_reading(&conn).unwrap().unwrap();
        assert_eq!(latest.heart_rate, 85);
    }

    #[test]
    fn history_is_capped_and_keeps_newest() {
        let conn = test_db();
        for i in 0..(HISTORY_CAP as i64 + 10) {
            insert_reading(&conn, &make_reading(200 - i, 60 + (i % 40) as i32)).unwrap();
        }
        let history = get_history(&conn).unwrap();
        assert_eq!(history.len(), HISTORY_CAP);
        // Oldest rows evicted: the very first inserts are gone.
        let oldest = history.first().unwrap();
        assert!(oldest.timestamp > Utc::now() - Duration::hours(200));
    }

    #[test]
    fn replace_history_swaps_contents() {
        let mut conn = test_db();
        insert_reading(&conn, &make_reading(5, 70)).unwrap();

        let batch = vec![make_reading(2, 90), make_reading(1, 95)];
        replace_history(&mut conn, &batch).unwrap();

        let history = get_history(&conn).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].heart_rate, 90);
        assert_eq!(history[1].heart_rate, 95);
    }

    #[test]
    fn latest_none_on_empty() {
        let conn = test_db();
        assert!(get_latest_reading(&conn).unwrap().is_none());
    }
}
