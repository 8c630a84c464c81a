//! Financial rollups over raw stored fields.
//!
//! Every input coerces through [`num_or_zero`] before arithmetic — a missing
//! or non-numeric stored field counts as 0, it never propagates. These
//! functions cannot fail.

use rota_core::passenger::Passenger;
use rota_shared::money::{format_balance, num_or_zero, round_cents};
use serde::Serialize;

/// Derived per-passenger figures.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PassengerRollup {
    /// Signal plus every installment amount.
    pub total_paid: f64,
    pub promo_discount: f64,
    /// The granted referral discount when the passenger is eligible, else 0.
    pub referral_discount: f64,
    /// price − total_paid − promo − applied referral discount.
    /// Positive = still owed by the passenger.
    pub balance: f64,
}

impl PassengerRollup {
    /// Report rendering of the balance, with the inverted display sign
    /// ("-450,00" for 450 still owed, "+30,00" for 30 overpaid).
    pub fn balance_display(&self) -> String {
        format_balance(self.balance)
    }
}

pub fn passenger_rollup(passenger: &Passenger) -> PassengerRollup {
    let signal = num_or_zero(passenger.signal_amount);
    let installments: f64 = passenger
        .installments
        .iter()
        .map(|i| num_or_zero(i.amount))
        .sum();
    let total_paid = round_cents(signal + installments);

    let promo_discount = num_or_zero(passenger.promo_discount);
    let referral_discount = if passenger.referral_discount_eligible {
        num_or_zero(passenger.referral_discount)
    } else {
        0.0
    };

    let price = num_or_zero(Some(passenger.price));
    let balance = round_cents(price - total_paid - promo_discount - referral_discount);

    PassengerRollup {
        total_paid,
        promo_discount,
        referral_discount,
        balance,
    }
}

/// Sums of the per-passenger figures across one trip.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TripRollup {
    pub passenger_count: usize,
    pub total_paid: f64,
    pub promo_discount: f64,
    pub referral_discount: f64,
    pub balance: f64,
}

pub fn trip_rollup(passengers: &[Passenger]) -> TripRollup {
    let mut rollup = TripRollup {
        passenger_count: passengers.len(),
        ..TripRollup::default()
    };
    for passenger in passengers {
        let p = passenger_rollup(passenger);
        rollup.total_paid += p.total_paid;
        rollup.promo_discount += p.promo_discount;
        rollup.referral_discount += p.referral_discount;
        rollup.balance += p.balance;
    }
    rollup.total_paid = round_cents(rollup.total_paid);
    rollup.promo_discount = round_cents(rollup.promo_discount);
    rollup.referral_discount = round_cents(rollup.referral_discount);
    rollup.balance = round_cents(rollup.balance);
    rollup
}
