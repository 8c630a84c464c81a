//! In-memory repositories, used by tests and local demos. They follow the
//! same ordering and failure semantics as the Postgres implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use rota_core::boarding::BoardingSchedule;
use rota_core::passenger::Passenger;
use rota_core::repository::{
    BoardingScheduleRepository, PassengerRepository, RepoResult, SupplierRepository,
    TripRepository,
};
use rota_core::supplier::Supplier;
use rota_core::trip::Trip;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryTripRepository {
    trips: Mutex<Vec<Trip>>,
}

#[async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn create(&self, trip: &Trip) -> RepoResult<Uuid> {
        self.trips.lock().unwrap().push(trip.clone());
        Ok(trip.id)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Trip>> {
        Ok(self
            .trips
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list(&self, destination: Option<&str>) -> RepoResult<Vec<Trip>> {
        let needle = destination.map(str::to_lowercase);
        let mut trips: Vec<Trip> = self
            .trips
            .lock()
            .unwrap()
            .iter()
            .filter(|t| match &needle {
                Some(n) => t.destination.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect();
        trips.sort_by(|a, b| b.departure_date.cmp(&a.departure_date));
        Ok(trips)
    }

    async fn update(&self, trip: &Trip) -> RepoResult<()> {
        let mut trips = self.trips.lock().unwrap();
        let slot = trips
            .iter_mut()
            .find(|t| t.id == trip.id)
            .ok_or_else(|| format!("trip not found: {}", trip.id))?;
        *slot = trip.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.trips.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPassengerRepository {
    passengers: Mutex<Vec<Passenger>>,
}

#[async_trait]
impl PassengerRepository for InMemoryPassengerRepository {
    async fn create(&self, passenger: &Passenger) -> RepoResult<Uuid> {
        self.passengers.lock().unwrap().push(passenger.clone());
        Ok(passenger.id)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Passenger>> {
        Ok(self
            .passengers
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list_by_trip(&self, trip_id: Uuid) -> RepoResult<Vec<Passenger>> {
        Ok(self
            .passengers
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.trip_id == trip_id)
            .cloned()
            .collect())
    }

    async fn search(&self, term: &str) -> RepoResult<Vec<Passenger>> {
        let needle = term.to_lowercase();
        let mut found: Vec<Passenger> = self
            .passengers
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle) || p.document.contains(term))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn update(&self, passenger: &Passenger) -> RepoResult<()> {
        let mut passengers = self.passengers.lock().unwrap();
        let slot = passengers
            .iter_mut()
            .find(|p| p.id == passenger.id)
            .ok_or_else(|| format!("passenger not found: {}", passenger.id))?;
        *slot = passenger.clone();
        Ok(())
    }

    async fn update_seat(&self, id: Uuid, seat: Option<i32>) -> RepoResult<()> {
        let mut passengers = self.passengers.lock().unwrap();
        let passenger = passengers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| format!("passenger not found: {}", id))?;
        passenger.seat = seat;
        passenger.touch();
        Ok(())
    }

    async fn list_with_commission(&self) -> RepoResult<Vec<Passenger>> {
        Ok(self
            .passengers
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                p.referrer_document.is_some() && p.commission.map(|c| c > 0.0).unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.passengers.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySupplierRepository {
    suppliers: Mutex<Vec<Supplier>>,
}

#[async_trait]
impl SupplierRepository for InMemorySupplierRepository {
    async fn create(&self, supplier: &Supplier) -> RepoResult<Uuid> {
        self.suppliers.lock().unwrap().push(supplier.clone());
        Ok(supplier.id)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Supplier>> {
        Ok(self
            .suppliers
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn list(&self, active_only: bool) -> RepoResult<Vec<Supplier>> {
        let mut suppliers: Vec<Supplier> = self
            .suppliers
            .lock()
            .unwrap()
            .iter()
            .filter(|s| !active_only || s.active)
            .cloned()
            .collect();
        suppliers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(suppliers)
    }

    async fn update(&self, supplier: &Supplier) -> RepoResult<()> {
        let mut suppliers = self.suppliers.lock().unwrap();
        let slot = suppliers
            .iter_mut()
            .find(|s| s.id == supplier.id)
            .ok_or_else(|| format!("supplier not found: {}", supplier.id))?;
        *slot = supplier.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.suppliers.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBoardingScheduleRepository {
    schedules: Mutex<Vec<BoardingSchedule>>,
}

#[async_trait]
impl BoardingScheduleRepository for InMemoryBoardingScheduleRepository {
    async fn list_by_trip(&self, trip_id: Uuid) -> RepoResult<Vec<BoardingSchedule>> {
        let mut schedules: Vec<BoardingSchedule> = self
            .schedules
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.trip_id == trip_id)
            .cloned()
            .collect();
        schedules.sort_by(|a, b| a.location.cmp(&b.location));
        Ok(schedules)
    }

    async fn upsert(&self, schedule: &BoardingSchedule) -> RepoResult<Uuid> {
        let mut schedules = self.schedules.lock().unwrap();
        match schedules
            .iter_mut()
            .find(|s| s.trip_id == schedule.trip_id && s.location == schedule.location)
        {
            Some(existing) => {
                existing.departure_time = schedule.departure_time.clone();
                existing.return_time = schedule.return_time.clone();
                existing.address = schedule.address.clone();
                existing.image_url = schedule.image_url.clone();
                existing.guide = schedule.guide.clone();
                Ok(existing.id)
            }
            None => {
                schedules.push(schedule.clone());
                Ok(schedule.id)
            }
        }
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.schedules.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(destination: &str) -> Trip {
        Trip::new(
            destination.to_string(),
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 5).unwrap(),
            40,
            900.0,
        )
    }

    #[tokio::test]
    async fn test_trip_crud_and_filter() {
        let repo = InMemoryTripRepository::default();
        let gramado = trip("Gramado");
        let olimpia = trip("Olímpia");
        repo.create(&gramado).await.unwrap();
        repo.create(&olimpia).await.unwrap();

        assert_eq!(repo.list(None).await.unwrap().len(), 2);
        let filtered = repo.list(Some("gram")).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].destination, "Gramado");

        repo.delete(gramado.id).await.unwrap();
        assert!(repo.get(gramado.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_trip_deletion_leaves_passengers() {
        let trips = InMemoryTripRepository::default();
        let passengers = InMemoryPassengerRepository::default();
        let t = trip("Gramado");
        trips.create(&t).await.unwrap();
        let p = Passenger::new(t.id, "Ana".into(), "12345678901".into(), 900.0);
        passengers.create(&p).await.unwrap();

        trips.delete(t.id).await.unwrap();
        assert_eq!(passengers.list_by_trip(t.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_commission_filter() {
        let repo = InMemoryPassengerRepository::default();
        let trip_id = Uuid::new_v4();

        let mut with = Passenger::new(trip_id, "Ana".into(), "11111111111".into(), 100.0);
        with.referrer_document = Some("99999999999".into());
        with.commission = Some(10.0);
        let mut zero = Passenger::new(trip_id, "Bia".into(), "22222222222".into(), 100.0);
        zero.referrer_document = Some("99999999999".into());
        zero.commission = Some(0.0);
        let plain = Passenger::new(trip_id, "Caio".into(), "33333333333".into(), 100.0);

        for p in [&with, &zero, &plain] {
            repo.create(p).await.unwrap();
        }

        let found = repo.list_with_commission().await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, with.id);
    }

    #[tokio::test]
    async fn test_update_seat_missing_passenger_fails() {
        let repo = InMemoryPassengerRepository::default();
        let err = repo.update_seat(Uuid::new_v4(), Some(1)).await.unwrap_err();
        assert!(err.to_string().contains("passenger not found"));
    }

    #[tokio::test]
    async fn test_boarding_upsert_is_keyed_on_trip_and_location() {
        let repo = InMemoryBoardingScheduleRepository::default();
        let trip_id = Uuid::new_v4();

        let mut first = BoardingSchedule::new(trip_id, "Centro".into());
        first.departure_time = Some("06:00".into());
        let first_id = repo.upsert(&first).await.unwrap();

        let mut second = BoardingSchedule::new(trip_id, "Centro".into());
        second.departure_time = Some("06:30".into());
        let second_id = repo.upsert(&second).await.unwrap();

        // Same key: merged into the existing record.
        assert_eq!(first_id, second_id);
        let schedules = repo.list_by_trip(trip_id).await.unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].departure_time.as_deref(), Some("06:30"));

        let other = BoardingSchedule::new(trip_id, "Rodoviária".into());
        repo.upsert(&other).await.unwrap();
        assert_eq!(repo.list_by_trip(trip_id).await.unwrap().len(), 2);
    }
}
