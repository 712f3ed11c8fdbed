use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Row;

use wayfarer_core::domain::trip::{TravelerId, TripRecord};

use super::{RepositoryError, TripRepository};
use crate::DbPool;

pub struct SqlTripRepository {
    pool: DbPool,
}

impl SqlTripRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_trip(row: &sqlx::sqlite::SqliteRow) -> Result<TripRecord, RepositoryError> {
    let destination: String =
        row.try_get("destination").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let start_date_str: Option<String> =
        row.try_get("start_date").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let end_date_str: Option<String> =
        row.try_get("end_date").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let budget: Option<f64> =
        row.try_get("budget").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let travelers: i64 =
        row.try_get("travelers").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let mood: Option<String> =
        row.try_get("mood").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let created_at_str: String =
        row.try_get("created_at").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Decode(format!("created_at: {e}")))?;

    // Dates are stored as ISO-8601 text; unparseable values degrade to None
    // rather than failing the whole read.
    let start_date = start_date_str.and_then(|s| parse_naive_date(&s));
    let end_date = end_date_str.and_then(|s| parse_naive_date(&s));

    Ok(TripRecord {
        destination,
        start_date,
        end_date,
        budget,
        travelers: travelers.max(1) as u32,
        mood,
        created_at,
    })
}

fn parse_naive_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[async_trait::async_trait]
impl TripRepository for SqlTripRepository {
    async fn list_for_traveler(
        &self,
        traveler: &TravelerId,
    ) -> Result<Vec<TripRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT destination, start_date, end_date, budget, travelers, mood, created_at
             FROM trips
             WHERE traveler_id = ?
             ORDER BY created_at DESC",
        )
        .bind(traveler.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_trip).collect()
    }

    async fn save(
        &self,
        traveler: &TravelerId,
        trip: TripRecord,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO trips
                (id, traveler_id, destination, start_date, end_date, budget,
                 travelers, mood, created_at)
             VALUES (lower(hex(randomblob(16))), ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(traveler.as_str())
        .bind(&trip.destination)
        .bind(trip.start_date.map(|d| d.to_string()))
        .bind(trip.end_date.map(|d| d.to_string()))
        .bind(trip.budget)
        .bind(trip.travelers as i64)
        .bind(&trip.mood)
        .bind(trip.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
