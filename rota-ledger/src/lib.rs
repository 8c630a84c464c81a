pub mod expenses;
pub mod referral;
pub mod rollup;
pub mod voucher;

pub use expenses::{trip_expense_summary, CategoryBreakdown, ExpenseSummary};
pub use referral::{build_referral_index, ReferralTrip, ReferredPassenger, ReferrerEntry};
pub use rollup::{passenger_rollup, trip_rollup, PassengerRollup, TripRollup};
pub use voucher::{build_voucher, Voucher};
