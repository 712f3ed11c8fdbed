use std::collections::HashMap;

use tokio::sync::RwLock;

use wayfarer_core::domain::trip::{TravelerId, TripRecord};

use super::{RepositoryError, TripRepository};

/// In-memory trip store for tests and embedders running without a database.
#[derive(Default)]
pub struct InMemoryTripRepository {
    trips: RwLock<HashMap<String, Vec<TripRecord>>>,
}

impl InMemoryTripRepository {
    /// Seed a repository with pre-built trips for one traveler.
    pub fn seeded(traveler: &TravelerId, records: Vec<TripRecord>) -> Self {
        let mut trips = HashMap::new();
        trips.insert(traveler.as_str().to_string(), records);
        Self { trips: RwLock::new(trips) }
    }
}

#[async_trait::async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn list_for_traveler(
        &self,
        traveler: &TravelerId,
    ) -> Result<Vec<TripRecord>, RepositoryError> {
        let trips = self.trips.read().await;
        let mut records = trips.get(traveler.as_str()).cloned().unwrap_or_default();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn save(
        &self,
        traveler: &TravelerId,
        trip: TripRecord,
    ) -> Result<(), RepositoryError> {
        let mut trips = self.trips.write().await;
        trips.entry(traveler.as_str().to_string()).or_default().push(trip);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use wayfarer_core::domain::trip::{TravelerId, TripRecord};

    use crate::repositories::{InMemoryTripRepository, TripRepository};

    #[tokio::test]
    async fn in_memory_repo_round_trip_sorts_newest_first() {
        let repo = InMemoryTripRepository::default();
        let traveler = TravelerId::new("trav-1");

        let older = TripRecord::new("Rome", Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        let newer = TripRecord::new("Oslo", Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap());
        repo.save(&traveler, older.clone()).await.expect("save older");
        repo.save(&traveler, newer.clone()).await.expect("save newer");

        let listed = repo.list_for_traveler(&traveler).await.expect("list trips");

        assert_eq!(listed, vec![newer, older]);
    }

    #[tokio::test]
    async fn seeded_repo_serves_its_records() {
        let traveler = TravelerId::new("trav-1");
        let trip = TripRecord::new("Lisbon", Utc::now()).with_mood("culture");
        let repo = InMemoryTripRepository::seeded(&traveler, vec![trip.clone()]);

        let listed = repo.list_for_traveler(&traveler).await.expect("list trips");

        assert_eq!(listed, vec![trip]);
    }
}
