use std::collections::{HashMap, HashSet};

use rota_core::passenger::Passenger;
use uuid::Uuid;

/// One entry in the seat picker offered to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatOption {
    /// Leave the passenger without a seat. Always offered first.
    Unassigned,
    Seat(i32),
}

impl SeatOption {
    pub fn number(&self) -> Option<i32> {
        match self {
            SeatOption::Unassigned => None,
            SeatOption::Seat(n) => Some(*n),
        }
    }
}

/// Seats `for_passenger` may take: every seat 1..=capacity not held by
/// someone else, plus the passenger's own current seat, ascending, with
/// [`SeatOption::Unassigned`] always first.
///
/// Never fails; capacity ≤ 0 yields only the unassigned option. The
/// passenger's current seat is re-added even when it falls outside the
/// candidates (capacity shrank, or a conflicting record slipped in) so the
/// picker never silently drops it. This only prevents conflicts within the
/// view it was computed from; write-time enforcement is the caller's job and
/// two concurrent sessions can still race.
pub fn available_seats(
    capacity: i32,
    assignments: &HashMap<Uuid, Option<i32>>,
    for_passenger: Uuid,
) -> Vec<SeatOption> {
    let mut options = vec![SeatOption::Unassigned];
    if capacity <= 0 {
        return options;
    }

    let held_by_others: HashSet<i32> = assignments
        .iter()
        .filter(|(id, _)| **id != for_passenger)
        .filter_map(|(_, seat)| *seat)
        .collect();

    let mut seats: Vec<i32> = (1..=capacity)
        .filter(|seat| !held_by_others.contains(seat))
        .collect();

    let current = assignments.get(&for_passenger).copied().flatten();
    if let Some(seat) = current {
        if !seats.contains(&seat) {
            seats.push(seat);
        }
    }

    seats.sort_unstable();
    options.extend(seats.into_iter().map(SeatOption::Seat));
    options
}

/// Convenience: build the assignment map the resolver consumes from a trip's
/// passenger list.
pub fn assignments_of(passengers: &[Passenger]) -> HashMap<Uuid, Option<i32>> {
    passengers.iter().map(|p| (p.id, p.seat)).collect()
}

/// One seat on the occupancy map shown by the seat report.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SeatMapEntry {
    pub seat: i32,
    pub passenger_id: Option<Uuid>,
    pub passenger_name: Option<String>,
}

/// Full occupancy map for a trip, seats 1..=capacity in order. When two
/// records conflict on a seat (the tolerated race), the first passenger in
/// registration order wins the cell.
pub fn seat_map(capacity: i32, passengers: &[Passenger]) -> Vec<SeatMapEntry> {
    let mut occupants: HashMap<i32, &Passenger> = HashMap::new();
    for passenger in passengers {
        if let Some(seat) = passenger.seat {
            occupants.entry(seat).or_insert(passenger);
        }
    }

    (1..=capacity.max(0))
        .map(|seat| match occupants.get(&seat) {
            Some(p) => SeatMapEntry {
                seat,
                passenger_id: Some(p.id),
                passenger_name: Some(p.name.clone()),
            },
            None => SeatMapEntry {
                seat,
                passenger_id: None,
                passenger_name: None,
            },
        })
        .collect()
}
