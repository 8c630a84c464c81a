use std::collections::HashMap;
use std::sync::Arc;

use rota_core::repository::{PassengerRepository, TripRepository};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::{assignments_of, available_seats, SeatOption};

/// One requested seat change inside a batch save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatChange {
    pub passenger_id: Uuid,
    /// `None` clears the seat.
    pub seat: Option<i32>,
}

/// Outcome of a single change within a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub passenger_id: Uuid,
    pub seat: Option<i32>,
    /// `None` on success; the store's message otherwise.
    pub error: Option<String>,
}

/// Aggregate result of a best-effort batch save. Success is only declared
/// when every write succeeded; successful writes are never rolled back.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.error.is_none())
    }

    pub fn failures(&self) -> Vec<&BatchOutcome> {
        self.outcomes.iter().filter(|o| o.error.is_some()).collect()
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_none()).count()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeatingError {
    #[error("Trip not found: {0}")]
    TripNotFound(Uuid),
    #[error("Store error: {0}")]
    Store(String),
}

/// Drives seat edits for a trip against the passenger store.
///
/// The batch save enforces seat uniqueness against the assignments read at
/// save time, including claims made earlier in the same batch. Two operators
/// editing the same trip in parallel each validate against their own read and
/// can still assign the same seat before either write lands; that race is
/// tolerated, matching the single-session enforcement model this replaces.
pub struct SeatManager {
    trips: Arc<dyn TripRepository>,
    passengers: Arc<dyn PassengerRepository>,
}

impl SeatManager {
    pub fn new(trips: Arc<dyn TripRepository>, passengers: Arc<dyn PassengerRepository>) -> Self {
        Self { trips, passengers }
    }

    /// Seat options for one passenger of a trip, computed from the trip's
    /// capacity and its current assignments.
    pub async fn options_for(
        &self,
        trip_id: Uuid,
        passenger_id: Uuid,
    ) -> Result<Vec<SeatOption>, SeatingError> {
        let trip = self
            .trips
            .get(trip_id)
            .await
            .map_err(|e| SeatingError::Store(e.to_string()))?
            .ok_or(SeatingError::TripNotFound(trip_id))?;

        let passengers = self
            .passengers
            .list_by_trip(trip_id)
            .await
            .map_err(|e| SeatingError::Store(e.to_string()))?;

        let assignments: HashMap<Uuid, Option<i32>> = assignments_of(&passengers);
        Ok(available_seats(trip.seat_capacity, &assignments, passenger_id))
    }

    /// Apply seat changes sequentially, continuing past individual failures.
    /// Every failure is reported per passenger; earlier successes stand.
    ///
    /// A change whose seat is already held by a different passenger — in the
    /// assignments read here, or claimed earlier in this batch — fails
    /// without touching the store. Two passengers never end up on the same
    /// seat within one save.
    pub async fn save_assignments(
        &self,
        trip_id: Uuid,
        changes: &[SeatChange],
    ) -> Result<BatchReport, SeatingError> {
        let passengers = self
            .passengers
            .list_by_trip(trip_id)
            .await
            .map_err(|e| SeatingError::Store(e.to_string()))?;
        let mut assignments: HashMap<Uuid, Option<i32>> = assignments_of(&passengers);

        let mut outcomes = Vec::with_capacity(changes.len());
        for change in changes {
            if let Some(seat) = change.seat {
                let taken = assignments
                    .iter()
                    .any(|(id, s)| *id != change.passenger_id && *s == Some(seat));
                if taken {
                    tracing::warn!(
                        passenger_id = %change.passenger_id,
                        seat,
                        "seat already taken, change rejected"
                    );
                    outcomes.push(BatchOutcome {
                        passenger_id: change.passenger_id,
                        seat: change.seat,
                        error: Some(format!("seat {} is already taken", seat)),
                    });
                    continue;
                }
            }
            match self
                .passengers
                .update_seat(change.passenger_id, change.seat)
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        passenger_id = %change.passenger_id,
                        seat = ?change.seat,
                        "seat updated"
                    );
                    assignments.insert(change.passenger_id, change.seat);
                    outcomes.push(BatchOutcome {
                        passenger_id: change.passenger_id,
                        seat: change.seat,
                        error: None,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        passenger_id = %change.passenger_id,
                        seat = ?change.seat,
                        error = %e,
                        "seat update failed"
                    );
                    outcomes.push(BatchOutcome {
                        passenger_id: change.passenger_id,
                        seat: change.seat,
                        error: Some(e.to_string()),
                    });
                }
            }
        }
        Ok(BatchReport { outcomes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rota_core::passenger::Passenger;
    use rota_core::repository::RepoResult;
    use rota_core::trip::Trip;
    use std::sync::Mutex;

    struct FixedTripRepo(Trip);

    #[async_trait]
    impl TripRepository for FixedTripRepo {
        async fn create(&self, _trip: &Trip) -> RepoResult<Uuid> {
            unimplemented!()
        }
        async fn get(&self, id: Uuid) -> RepoResult<Option<Trip>> {
            Ok((id == self.0.id).then(|| self.0.clone()))
        }
        async fn list(&self, _destination: Option<&str>) -> RepoResult<Vec<Trip>> {
            Ok(vec![self.0.clone()])
        }
        async fn update(&self, _trip: &Trip) -> RepoResult<()> {
            Ok(())
        }
        async fn delete(&self, _id: Uuid) -> RepoResult<()> {
            Ok(())
        }
    }

    /// Passenger store that rejects a chosen "poisoned" id, mimicking a
    /// duplicate-seat write rejection.
    struct SeatStore {
        passengers: Mutex<Vec<Passenger>>,
        reject: Option<Uuid>,
    }

    #[async_trait]
    impl PassengerRepository for SeatStore {
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
        async fn search(&self, _term: &str) -> RepoResult<Vec<Passenger>> {
            Ok(Vec::new())
        }
        async fn update(&self, _passenger: &Passenger) -> RepoResult<()> {
            Ok(())
        }
        async fn update_seat(&self, id: Uuid, seat: Option<i32>) -> RepoResult<()> {
            if self.reject == Some(id) {
                return Err("duplicate seat".into());
            }
            let mut passengers = self.passengers.lock().unwrap();
            let passenger = passengers
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or("passenger not found")?;
            passenger.seat = seat;
            Ok(())
        }
        async fn list_with_commission(&self) -> RepoResult<Vec<Passenger>> {
            Ok(Vec::new())
        }
        async fn delete(&self, _id: Uuid) -> RepoResult<()> {
            Ok(())
        }
    }

    fn trip(capacity: i32) -> Trip {
        Trip::new(
            "Beto Carrero".to_string(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            capacity,
            350.0,
        )
    }

    fn passenger(trip_id: Uuid, name: &str, seat: Option<i32>) -> Passenger {
        let mut p = Passenger::new(trip_id, name.to_string(), "12345678901".to_string(), 350.0);
        p.seat = seat;
        p
    }

    #[tokio::test]
    async fn test_options_come_from_live_assignments() {
        let trip = trip(4);
        let ana = passenger(trip.id, "Ana", Some(2));
        let bia = passenger(trip.id, "Bia", None);
        let store = SeatStore {
            passengers: Mutex::new(vec![ana, bia.clone()]),
            reject: None,
        };
        let manager = SeatManager::new(Arc::new(FixedTripRepo(trip.clone())), Arc::new(store));

        let options = manager.options_for(trip.id, bia.id).await.unwrap();
        assert_eq!(
            options,
            vec![
                SeatOption::Unassigned,
                SeatOption::Seat(1),
                SeatOption::Seat(3),
                SeatOption::Seat(4)
            ]
        );
    }

    #[tokio::test]
    async fn test_options_for_missing_trip() {
        let store = SeatStore {
            passengers: Mutex::new(Vec::new()),
            reject: None,
        };
        let manager = SeatManager::new(Arc::new(FixedTripRepo(trip(4))), Arc::new(store));

        let err = manager
            .options_for(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, SeatingError::TripNotFound(_)));
    }

    #[tokio::test]
    async fn test_batch_continues_past_failures() {
        let trip = trip(40);
        let ana = passenger(trip.id, "Ana", Some(1));
        let bia = passenger(trip.id, "Bia", Some(2));
        let caio = passenger(trip.id, "Caio", Some(3));
        let store = SeatStore {
            passengers: Mutex::new(vec![ana.clone(), bia.clone(), caio.clone()]),
            reject: Some(bia.id),
        };
        let store = Arc::new(store);
        let manager = SeatManager::new(Arc::new(FixedTripRepo(trip.clone())), store.clone());

        let changes = vec![
            SeatChange {
                passenger_id: ana.id,
                seat: Some(10),
            },
            SeatChange {
                passenger_id: bia.id,
                seat: Some(11),
            },
            SeatChange {
                passenger_id: caio.id,
                seat: Some(12),
            },
        ];
        let report = manager.save_assignments(trip.id, &changes).await.unwrap();

        assert!(!report.all_succeeded());
        assert_eq!(report.succeeded_count(), 2);
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].passenger_id, bia.id);
        assert_eq!(failures[0].error.as_deref(), Some("duplicate seat"));

        // Successful writes stand, the failed passenger keeps its old seat.
        assert_eq!(store.get(ana.id).await.unwrap().unwrap().seat, Some(10));
        assert_eq!(store.get(bia.id).await.unwrap().unwrap().seat, Some(2));
        assert_eq!(store.get(caio.id).await.unwrap().unwrap().seat, Some(12));
    }

    #[tokio::test]
    async fn test_batch_rejects_seat_claimed_twice_in_one_save() {
        let trip = trip(40);
        let ana = passenger(trip.id, "Ana", Some(1));
        let bia = passenger(trip.id, "Bia", Some(2));
        let caio = passenger(trip.id, "Caio", None);
        let store = Arc::new(SeatStore {
            passengers: Mutex::new(vec![ana.clone(), bia.clone(), caio.clone()]),
            reject: None,
        });
        let manager = SeatManager::new(Arc::new(FixedTripRepo(trip.clone())), store.clone());

        let changes = vec![
            SeatChange {
                passenger_id: ana.id,
                seat: Some(5),
            },
            SeatChange {
                passenger_id: bia.id,
                seat: Some(5),
            },
            SeatChange {
                passenger_id: caio.id,
                seat: Some(6),
            },
        ];
        let report = manager.save_assignments(trip.id, &changes).await.unwrap();

        assert_eq!(report.succeeded_count(), 2);
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].passenger_id, bia.id);
        assert_eq!(failures[0].error.as_deref(), Some("seat 5 is already taken"));

        // The first claim won; the rejected change never reached the store.
        assert_eq!(store.get(ana.id).await.unwrap().unwrap().seat, Some(5));
        assert_eq!(store.get(bia.id).await.unwrap().unwrap().seat, Some(2));
        assert_eq!(store.get(caio.id).await.unwrap().unwrap().seat, Some(6));
    }

    #[tokio::test]
    async fn test_batch_rejects_seat_held_outside_the_batch() {
        let trip = trip(40);
        let ana = passenger(trip.id, "Ana", Some(7));
        let bia = passenger(trip.id, "Bia", None);
        let store = Arc::new(SeatStore {
            passengers: Mutex::new(vec![ana.clone(), bia.clone()]),
            reject: None,
        });
        let manager = SeatManager::new(Arc::new(FixedTripRepo(trip.clone())), store.clone());

        let changes = vec![SeatChange {
            passenger_id: bia.id,
            seat: Some(7),
        }];
        let report = manager.save_assignments(trip.id, &changes).await.unwrap();

        assert!(!report.all_succeeded());
        assert_eq!(
            report.failures()[0].error.as_deref(),
            Some("seat 7 is already taken")
        );
        assert_eq!(store.get(bia.id).await.unwrap().unwrap().seat, None);
    }

    #[tokio::test]
    async fn test_seat_vacated_earlier_in_the_batch_can_be_retaken() {
        let trip = trip(40);
        let ana = passenger(trip.id, "Ana", Some(3));
        let bia = passenger(trip.id, "Bia", None);
        let store = Arc::new(SeatStore {
            passengers: Mutex::new(vec![ana.clone(), bia.clone()]),
            reject: None,
        });
        let manager = SeatManager::new(Arc::new(FixedTripRepo(trip.clone())), store.clone());

        let changes = vec![
            SeatChange {
                passenger_id: ana.id,
                seat: Some(4),
            },
            SeatChange {
                passenger_id: bia.id,
                seat: Some(3),
            },
        ];
        let report = manager.save_assignments(trip.id, &changes).await.unwrap();

        assert!(report.all_succeeded());
        assert_eq!(store.get(ana.id).await.unwrap().unwrap().seat, Some(4));
        assert_eq!(store.get(bia.id).await.unwrap().unwrap().seat, Some(3));
    }
}
