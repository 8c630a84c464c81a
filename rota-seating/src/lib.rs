pub mod availability;
pub mod manager;

pub use availability::{available_seats, seat_map, SeatMapEntry, SeatOption};
pub use manager::{BatchOutcome, BatchReport, SeatChange, SeatManager, SeatingError};
