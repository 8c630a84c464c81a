//! Referral attribution: who referred whom, and what commission each
//! referral generated, grouped referrer → trip → referred passenger.
//!
//! The index is derived on demand; referral edges are never stored. A
//! passenger contributes only when it has a referrer AND a strictly positive
//! commission. Passengers whose trip cannot be resolved are silently skipped
//! — a known lossy behavior carried over from the system this replaces.

use std::collections::HashMap;

use chrono::NaiveDate;
use rota_core::passenger::Passenger;
use rota_core::trip::Trip;
use rota_shared::money::{num_or_zero, round_cents};
use serde::Serialize;
use uuid::Uuid;

/// Shown when the referrer's identity number has no matching name in the
/// lookup population. A referrer need not be a passenger.
pub const REFERRER_NOT_FOUND: &str = "referrer not found";

#[derive(Debug, Clone, Serialize)]
pub struct ReferredPassenger {
    pub passenger_id: Uuid,
    pub document: String,
    pub name: String,
    pub commission: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferralTrip {
    pub trip_id: Uuid,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub subtotal: f64,
    /// Insertion/query order, stable.
    pub passengers: Vec<ReferredPassenger>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferrerEntry {
    pub document: String,
    pub name: String,
    pub total_commission: f64,
    /// Departure date descending.
    pub trips: Vec<ReferralTrip>,
}

/// Build the index from commission-bearing passengers plus two secondary
/// lookups: trip by id and referrer name by document.
///
/// Referrers come back sorted by total commission descending; trips within a
/// referrer by departure date descending; referred passengers in input order.
pub fn build_referral_index(
    passengers: &[Passenger],
    trips: &HashMap<Uuid, Trip>,
    referrer_names: &HashMap<String, String>,
) -> Vec<ReferrerEntry> {
    let mut entries: Vec<ReferrerEntry> = Vec::new();
    let mut entry_index: HashMap<String, usize> = HashMap::new();

    for passenger in passengers {
        let referrer = match passenger.referrer_document.as_deref() {
            Some(doc) if !doc.trim().is_empty() => doc.trim().to_string(),
            _ => continue,
        };
        let commission = num_or_zero(passenger.commission);
        if commission <= 0.0 {
            continue;
        }
        let trip = match trips.get(&passenger.trip_id) {
            Some(trip) => trip,
            // Unresolvable trip: skipped, not an error.
            None => continue,
        };

        let entry_pos = *entry_index.entry(referrer.clone()).or_insert_with(|| {
            entries.push(ReferrerEntry {
                name: referrer_names
                    .get(&referrer)
                    .cloned()
                    .unwrap_or_else(|| REFERRER_NOT_FOUND.to_string()),
                document: referrer,
                total_commission: 0.0,
                trips: Vec::new(),
            });
            entries.len() - 1
        });
        let entry = &mut entries[entry_pos];

        let trip_pos = match entry.trips.iter().position(|t| t.trip_id == trip.id) {
            Some(pos) => pos,
            None => {
                entry.trips.push(ReferralTrip {
                    trip_id: trip.id,
                    destination: trip.destination.clone(),
                    departure_date: trip.departure_date,
                    subtotal: 0.0,
                    passengers: Vec::new(),
                });
                entry.trips.len() - 1
            }
        };

        let referral_trip = &mut entry.trips[trip_pos];
        referral_trip.passengers.push(ReferredPassenger {
            passenger_id: passenger.id,
            document: passenger.document.clone(),
            name: passenger.name.clone(),
            commission,
        });
        referral_trip.subtotal = round_cents(referral_trip.subtotal + commission);
        entry.total_commission = round_cents(entry.total_commission + commission);
    }

    for entry in &mut entries {
        entry
            .trips
            .sort_by(|a, b| b.departure_date.cmp(&a.departure_date));
    }
    entries.sort_by(|a, b| {
        b.total_commission
            .partial_cmp(&a.total_commission)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(destination: &str, departure: (i32, u32, u32)) -> Trip {
        Trip::new(
            destination.to_string(),
            NaiveDate::from_ymd_opt(departure.0, departure.1, departure.2).unwrap(),
            NaiveDate::from_ymd_opt(departure.0, departure.1, departure.2).unwrap(),
            40,
            500.0,
        )
    }

    fn referred(
        trip_id: Uuid,
        name: &str,
        referrer: Option<&str>,
        commission: Option<f64>,
    ) -> Passenger {
        let mut p = Passenger::new(trip_id, name.to_string(), "11122233344".to_string(), 500.0);
        p.referrer_document = referrer.map(str::to_string);
        p.commission = commission;
        p
    }

    #[test]
    fn test_grouping_and_totals_agree() {
        let gramado = trip("Gramado", (2026, 7, 10));
        let olimpia = trip("Olímpia", (2026, 9, 5));
        let trips: HashMap<Uuid, Trip> = [(gramado.id, gramado.clone()), (olimpia.id, olimpia.clone())].into();
        let names: HashMap<String, String> =
            [("99988877766".to_string(), "Dona Marta".to_string())].into();

        let passengers = vec![
            referred(gramado.id, "Ana", Some("99988877766"), Some(30.0)),
            referred(olimpia.id, "Bia", Some("99988877766"), Some(20.0)),
            referred(olimpia.id, "Caio", Some("99988877766"), Some(25.0)),
        ];

        let index = build_referral_index(&passengers, &trips, &names);
        assert_eq!(index.len(), 1);
        let entry = &index[0];
        assert_eq!(entry.name, "Dona Marta");
        assert_eq!(entry.total_commission, 75.0);

        // Top-level total == sum of trip subtotals == sum of commissions.
        let subtotal_sum: f64 = entry.trips.iter().map(|t| t.subtotal).sum();
        let commission_sum: f64 = entry
            .trips
            .iter()
            .flat_map(|t| &t.passengers)
            .map(|p| p.commission)
            .sum();
        assert_eq!(entry.total_commission, subtotal_sum);
        assert_eq!(entry.total_commission, commission_sum);

        // Trips ordered by departure date descending.
        assert_eq!(entry.trips[0].destination, "Olímpia");
        assert_eq!(entry.trips[1].destination, "Gramado");
        // Referred passengers stay in input order.
        assert_eq!(entry.trips[0].passengers[0].name, "Bia");
        assert_eq!(entry.trips[0].passengers[1].name, "Caio");
    }

    #[test]
    fn test_referrers_sorted_by_total_descending() {
        let t = trip("Gramado", (2026, 7, 10));
        let trips: HashMap<Uuid, Trip> = [(t.id, t.clone())].into();
        let passengers = vec![
            referred(t.id, "Ana", Some("11111111111"), Some(10.0)),
            referred(t.id, "Bia", Some("22222222222"), Some(50.0)),
        ];

        let index = build_referral_index(&passengers, &trips, &HashMap::new());
        assert_eq!(index[0].document, "22222222222");
        assert_eq!(index[1].document, "11111111111");
    }

    #[test]
    fn test_zero_commission_and_missing_referrer_excluded() {
        let t = trip("Gramado", (2026, 7, 10));
        let trips: HashMap<Uuid, Trip> = [(t.id, t.clone())].into();
        let passengers = vec![
            referred(t.id, "Ana", Some("11111111111"), Some(0.0)),
            referred(t.id, "Bia", Some("11111111111"), None),
            referred(t.id, "Caio", None, Some(30.0)),
            referred(t.id, "Dani", Some("  "), Some(30.0)),
        ];

        assert!(build_referral_index(&passengers, &trips, &HashMap::new()).is_empty());
    }

    #[test]
    fn test_unresolvable_trip_is_silently_skipped() {
        let t = trip("Gramado", (2026, 7, 10));
        let trips: HashMap<Uuid, Trip> = [(t.id, t.clone())].into();
        let passengers = vec![
            referred(t.id, "Ana", Some("11111111111"), Some(30.0)),
            referred(Uuid::new_v4(), "Bia", Some("11111111111"), Some(99.0)),
        ];

        let index = build_referral_index(&passengers, &trips, &HashMap::new());
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].total_commission, 30.0);
    }

    #[test]
    fn test_unknown_referrer_gets_placeholder_name() {
        let t = trip("Gramado", (2026, 7, 10));
        let trips: HashMap<Uuid, Trip> = [(t.id, t.clone())].into();
        let passengers = vec![referred(t.id, "Ana", Some("11111111111"), Some(30.0))];

        let index = build_referral_index(&passengers, &trips, &HashMap::new());
        assert_eq!(index[0].name, REFERRER_NOT_FOUND);
    }
}
