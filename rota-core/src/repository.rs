use async_trait::async_trait;
use uuid::Uuid;

use crate::boarding::BoardingSchedule;
use crate::passenger::Passenger;
use crate::supplier::Supplier;
use crate::trip::Trip;

pub type RepoResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Repository trait for trip data access
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn create(&self, trip: &Trip) -> RepoResult<Uuid>;

    async fn get(&self, id: Uuid) -> RepoResult<Option<Trip>>;

    /// List trips, optionally filtered by destination substring, newest
    /// departure first.
    async fn list(&self, destination: Option<&str>) -> RepoResult<Vec<Trip>>;

    async fn update(&self, trip: &Trip) -> RepoResult<()>;

    /// Deleting a trip does not cascade to its passengers.
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

/// Repository trait for passenger data access
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    async fn create(&self, passenger: &Passenger) -> RepoResult<Uuid>;

    async fn get(&self, id: Uuid) -> RepoResult<Option<Passenger>>;

    /// Passengers of one trip in registration order.
    async fn list_by_trip(&self, trip_id: Uuid) -> RepoResult<Vec<Passenger>>;

    /// Substring search over name and document.
    async fn search(&self, term: &str) -> RepoResult<Vec<Passenger>>;

    async fn update(&self, passenger: &Passenger) -> RepoResult<()>;

    /// Seat-only write used by the batch seat save; fails when the passenger
    /// no longer exists.
    async fn update_seat(&self, id: Uuid, seat: Option<i32>) -> RepoResult<()>;

    /// Input population for the referral index: referrer set and commission
    /// strictly positive, in registration order.
    async fn list_with_commission(&self) -> RepoResult<Vec<Passenger>>;

    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

/// Repository trait for the supplier catalog
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn create(&self, supplier: &Supplier) -> RepoResult<Uuid>;

    async fn get(&self, id: Uuid) -> RepoResult<Option<Supplier>>;

    async fn list(&self, active_only: bool) -> RepoResult<Vec<Supplier>>;

    async fn update(&self, supplier: &Supplier) -> RepoResult<()>;

    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

/// Repository trait for boarding schedules
#[async_trait]
pub trait BoardingScheduleRepository: Send + Sync {
    async fn list_by_trip(&self, trip_id: Uuid) -> RepoResult<Vec<BoardingSchedule>>;

    /// Merge keyed on (trip_id, location): update the existing record for
    /// that pair or insert a new one. Returns the record id.
    async fn upsert(&self, schedule: &BoardingSchedule) -> RepoResult<Uuid>;

    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}
