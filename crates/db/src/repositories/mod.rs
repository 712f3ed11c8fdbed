use async_trait::async_trait;
use thiserror::Error;

use wayfarer_core::domain::trip::{TravelerId, TripRecord};

pub mod memory;
pub mod trips;

pub use memory::InMemoryTripRepository;
pub use trips::SqlTripRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Read interface over the trip record store. The engine only ever reads;
/// `save` exists for seeding and tests.
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// All trips for one traveler, newest first by creation time.
    async fn list_for_traveler(
        &self,
        traveler: &TravelerId,
    ) -> Result<Vec<TripRecord>, RepositoryError>;

    async fn save(
        &self,
        traveler: &TravelerId,
        trip: TripRecord,
    ) -> Result<(), RepositoryError>;
}
