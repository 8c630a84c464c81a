use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Installments are numbered 2..=10; slot 1 is the signal/deposit.
pub const FIRST_INSTALLMENT: u8 = 2;
pub const LAST_INSTALLMENT: u8 = 10;

/// One scheduled partial payment toward the trip price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installment {
    pub number: u8,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

/// A person registered on a trip, with payment and seat state.
///
/// Monetary fields are stored raw; derived figures (total paid, balance) come
/// from the rollup engine, never from ad hoc arithmetic on these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub name: String,
    /// 11 bare digits; punctuated only for display.
    pub document: String,
    /// 1..=trip.seat_capacity, or None while unassigned.
    pub seat: Option<i32>,
    /// Identity number of whoever referred this passenger. Not necessarily a
    /// passenger itself.
    pub referrer_document: Option<String>,
    pub price: f64,
    pub signal_amount: Option<f64>,
    pub signal_date: Option<NaiveDate>,
    pub installments: Vec<Installment>,
    pub promo_discount: Option<f64>,
    /// Discount granted to this passenger for having referred others.
    /// Applied only while `referral_discount_eligible` is set.
    pub referral_discount: Option<f64>,
    pub referral_discount_eligible: bool,
    /// Commission owed to this passenger's referrer.
    pub commission: Option<f64>,
    /// Last persisted balance. Positive = still owed by the passenger.
    pub balance: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Passenger {
    pub fn new(trip_id: Uuid, name: String, document: String, price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            trip_id,
            name,
            document,
            seat: None,
            referrer_document: None,
            price,
            signal_amount: None,
            signal_date: None,
            installments: Vec::new(),
            promo_discount: None,
            referral_discount: None,
            referral_discount_eligible: false,
            commission: None,
            balance: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn installment(&self, number: u8) -> Option<&Installment> {
        self.installments.iter().find(|i| i.number == number)
    }

    /// Upsert an installment by its slot number. Numbers outside 2..=10 are
    /// ignored.
    pub fn set_installment(&mut self, installment: Installment) {
        if !(FIRST_INSTALLMENT..=LAST_INSTALLMENT).contains(&installment.number) {
            return;
        }
        match self
            .installments
            .iter_mut()
            .find(|i| i.number == installment.number)
        {
            Some(slot) => *slot = installment,
            None => {
                self.installments.push(installment);
                self.installments.sort_by_key(|i| i.number);
            }
        }
        self.updated_at = Utc::now();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installment(number: u8, amount: f64) -> Installment {
        Installment {
            number,
            amount: Some(amount),
            date: None,
            note: None,
        }
    }

    #[test]
    fn test_set_installment_upserts_by_number() {
        let mut p = Passenger::new(Uuid::new_v4(), "Ana".into(), "12345678901".into(), 1000.0);
        p.set_installment(installment(3, 100.0));
        p.set_installment(installment(2, 50.0));
        p.set_installment(installment(3, 120.0));

        assert_eq!(p.installments.len(), 2);
        assert_eq!(p.installments[0].number, 2);
        assert_eq!(p.installment(3).unwrap().amount, Some(120.0));
    }

    #[test]
    fn test_installment_slots_outside_range_ignored() {
        let mut p = Passenger::new(Uuid::new_v4(), "Ana".into(), "12345678901".into(), 1000.0);
        p.set_installment(installment(1, 100.0));
        p.set_installment(installment(11, 100.0));
        assert!(p.installments.is_empty());
    }
}
