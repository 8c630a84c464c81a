//! Per-passenger voucher assembly: one flat record combining trip, passenger,
//! boarding schedule and guide, ready for the document renderer.

use rota_core::boarding::BoardingSchedule;
use rota_core::passenger::Passenger;
use rota_core::trip::Trip;
use rota_shared::dates::to_display_date;
use rota_shared::document::format_document;
use rota_shared::money::format_currency;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct Voucher {
    pub passenger_id: Uuid,
    pub passenger_name: String,
    pub document: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub seat: Option<i32>,
    pub price: f64,
    pub boarding_location: Option<String>,
    pub boarding_time: Option<String>,
    pub return_time: Option<String>,
    pub boarding_address: Option<String>,
    pub guide: Option<String>,
    pub image_url: Option<String>,
}

/// Assemble the voucher for one passenger. The boarding schedule is optional;
/// a trip may not have one for the passenger's location yet.
pub fn build_voucher(
    trip: &Trip,
    passenger: &Passenger,
    schedule: Option<&BoardingSchedule>,
) -> Voucher {
    Voucher {
        passenger_id: passenger.id,
        passenger_name: passenger.name.clone(),
        document: passenger.document.clone(),
        destination: trip.destination.clone(),
        departure_date: trip.departure_date.format("%Y-%m-%d").to_string(),
        return_date: trip.return_date.format("%Y-%m-%d").to_string(),
        seat: passenger.seat,
        price: passenger.price,
        boarding_location: schedule.map(|s| s.location.clone()),
        boarding_time: schedule.and_then(|s| s.departure_time.clone()),
        return_time: schedule.and_then(|s| s.return_time.clone()),
        boarding_address: schedule.and_then(|s| s.address.clone()),
        guide: schedule.and_then(|s| s.guide.clone()),
        image_url: schedule.and_then(|s| s.image_url.clone()),
    }
}

impl Voucher {
    /// Display-formatted record handed to the render collaborator: dates as
    /// DD/MM/YYYY, currency punctuated, document punctuated.
    pub fn to_record(&self) -> Value {
        json!({
            "passenger": self.passenger_name,
            "document": format_document(&self.document),
            "destination": self.destination,
            "departure": to_display_date(&self.departure_date),
            "return": to_display_date(&self.return_date),
            "seat": self.seat.map(|s| s.to_string()).unwrap_or_default(),
            "price": format_currency(self.price),
            "boarding_location": self.boarding_location.clone().unwrap_or_default(),
            "boarding_time": self.boarding_time.clone().unwrap_or_default(),
            "return_time": self.return_time.clone().unwrap_or_default(),
            "boarding_address": self.boarding_address.clone().unwrap_or_default(),
            "guide": self.guide.clone().unwrap_or_default(),
            "image_url": self.image_url.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_voucher_record_is_display_formatted() {
        let trip = Trip::new(
            "Gramado".to_string(),
            NaiveDate::from_ymd_opt(2026, 7, 10).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 15).unwrap(),
            40,
            1500.0,
        );
        let mut passenger = Passenger::new(
            trip.id,
            "Ana Silva".to_string(),
            "12345678901".to_string(),
            1234.5,
        );
        passenger.seat = Some(12);

        let mut schedule = BoardingSchedule::new(trip.id, "Centro".to_string());
        schedule.departure_time = Some("06:30".to_string());
        schedule.guide = Some("Marcos".to_string());

        let record = build_voucher(&trip, &passenger, Some(&schedule)).to_record();
        assert_eq!(record["document"], "123.456.789-01");
        assert_eq!(record["departure"], "10/07/2026");
        assert_eq!(record["price"], "1.234,50");
        assert_eq!(record["seat"], "12");
        assert_eq!(record["boarding_location"], "Centro");
        assert_eq!(record["guide"], "Marcos");
    }

    #[test]
    fn test_voucher_without_schedule() {
        let trip = Trip::new(
            "Gramado".to_string(),
            NaiveDate::from_ymd_opt(2026, 7, 10).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 15).unwrap(),
            40,
            1500.0,
        );
        let passenger = Passenger::new(
            trip.id,
            "Ana".to_string(),
            "12345678901".to_string(),
            1500.0,
        );

        let voucher = build_voucher(&trip, &passenger, None);
        assert_eq!(voucher.boarding_location, None);
        let record = voucher.to_record();
        assert_eq!(record["boarding_location"], "");
        assert_eq!(record["seat"], "");
    }
}
