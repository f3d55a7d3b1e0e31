//! Post-run summary of an engine: outcomes, reservations and per-room usage.

use serde::{Deserialize, Serialize};

use crate::engine::{Reservation, ReservationEngine};
use crate::model::{Interval, Length, Outcome, RoomNo};

/// Usage of one room after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomUsage {
    pub room_no: RoomNo,
    pub capacity: i64,
    /// Free intervals left, in the room's collection order.
    pub free_intervals: Vec<Interval>,
    pub free_time: Length,
    /// Sum of the durations of reservations committed to this room.
    pub reserved_time: Length,
    pub reservations: usize,
}

/// Everything a caller may want to render after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
    pub reserved: usize,
    pub rejected: usize,
    pub reservations: Vec<Reservation>,
    /// One entry per room, in load order.
    pub rooms: Vec<RoomUsage>,
}

impl RunReport {
    pub fn new(engine: &ReservationEngine) -> Self {
        let outcomes = engine.outcomes().to_vec();
        let reserved = outcomes.iter().filter(|o| o.is_reserved()).count();
        let reservations = engine.reservations().to_vec();

        let rooms = engine
            .store()
            .rooms()
            .map(|room| {
                let (count, reserved_time) = reservations
                    .iter()
                    .filter(|r| r.room_no == room.room_no())
                    .fold((0, 0), |(n, t), r| {
                        (n + 1, t + Interval::new(r.start, r.end).len())
                    });
                RoomUsage {
                    room_no: room.room_no(),
                    capacity: room.capacity(),
                    free_intervals: room.free_intervals().to_vec(),
                    free_time: room.free_time(),
                    reserved_time,
                    reservations: count,
                }
            })
            .collect();

        Self {
            rejected: outcomes.len() - reserved,
            reserved,
            outcomes,
            reservations,
            rooms,
        }
    }
}
