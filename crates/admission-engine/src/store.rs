//! Authoritative room and free-interval state.
//!
//! Rooms live in an arena (`Vec<Room>`) in load order, with a `room_no → slot`
//! index beside it. The store answers candidate queries without side effects
//! and applies committed splits. Intervals inside a room are never coalesced,
//! so two touching residuals stay two entries.

use std::collections::HashMap;

use crate::error::{AdmissionError, Result};
use crate::model::{Interval, Length, RoomConfig, RoomNo, Time};

/// A room and its current free time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    room_no: RoomNo,
    capacity: i64,
    free: Vec<Interval>,
}

impl Room {
    pub fn room_no(&self) -> RoomNo {
        self.room_no
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Free intervals in collection order.
    pub fn free_intervals(&self) -> &[Interval] {
        &self.free
    }

    /// Total unreserved time across all free intervals.
    ///
    /// The intervals are disjoint sub-ranges of the room's initial range, so
    /// the sum never exceeds that range's [`Length`].
    pub fn free_time(&self) -> Length {
        self.free.iter().map(Interval::len).sum()
    }

    /// The first free interval, in collection order, covering `[start, end]`.
    ///
    /// Free intervals never overlap, so for `start < end` at most one of them
    /// can cover the range.
    fn offer(&self, start: Time, end: Time) -> Option<Interval> {
        self.free.iter().find(|iv| iv.covers(start, end)).copied()
    }

    fn check(&self) -> Result<()> {
        if let Some(bad) = self.free.iter().find(|iv| iv.is_empty()) {
            return Err(AdmissionError::PreconditionViolation(format!(
                "room {} holds empty interval {}",
                self.room_no, bad
            )));
        }
        let mut sorted = self.free.clone();
        sorted.sort_by_key(|iv| (iv.start, iv.end));
        for pair in sorted.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                return Err(AdmissionError::PreconditionViolation(format!(
                    "room {} holds overlapping intervals {} and {}",
                    self.room_no, pair[0], pair[1]
                )));
            }
        }
        Ok(())
    }
}

/// An admissible (room, free interval) pair for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub room_no: RoomNo,
    /// The whole free block the request would be carved from.
    pub interval: Interval,
    /// `interval.end - interval.start`, before any split.
    pub interval_length: Length,
}

/// Owner of every room and every free interval in a session.
#[derive(Debug, Clone, Default)]
pub struct RoomStore {
    rooms: Vec<Room>,
    index: HashMap<RoomNo, usize>,
}

impl RoomStore {
    /// Build a store from initial room configurations.
    ///
    /// Each room starts with exactly one free interval `[start, end)`.
    /// Fails with [`AdmissionError::InvalidRoomConfiguration`] on an empty or
    /// inverted range, a negative capacity, a negative room number (which
    /// would collide with the rejection code) or a duplicated room number.
    pub fn load(configs: &[RoomConfig]) -> Result<Self> {
        let mut rooms = Vec::with_capacity(configs.len());
        let mut index = HashMap::with_capacity(configs.len());

        for config in configs {
            let invalid = |reason: String| AdmissionError::InvalidRoomConfiguration {
                room_no: config.room_no,
                reason,
            };
            if config.room_no < 0 {
                return Err(invalid("room number must not be negative".into()));
            }
            if config.capacity < 0 {
                return Err(invalid(format!(
                    "capacity {} must not be negative",
                    config.capacity
                )));
            }
            if config.start >= config.end {
                return Err(invalid(format!(
                    "start {} must be before end {}",
                    config.start, config.end
                )));
            }
            if index.insert(config.room_no, rooms.len()).is_some() {
                return Err(invalid("room number is already in use".into()));
            }
            rooms.push(Room {
                room_no: config.room_no,
                capacity: config.capacity,
                free: vec![Interval::new(config.start, config.end)],
            });
        }

        tracing::debug!(rooms = rooms.len(), "room store loaded");
        Ok(Self { rooms, index })
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms in load order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn room(&self, room_no: RoomNo) -> Option<&Room> {
        self.index.get(&room_no).map(|&slot| &self.rooms[slot])
    }

    /// Total unreserved time in a room, or `None` for an unknown room.
    pub fn free_time(&self, room_no: RoomNo) -> Option<Length> {
        self.room(room_no).map(Room::free_time)
    }

    /// Every room with `capacity >= students` contributes the first of its
    /// free intervals covering `[start, end]`.
    ///
    /// At most one candidate per room, in load order. No side effects.
    pub fn find_candidates(&self, students: i64, start: Time, end: Time) -> Vec<Candidate> {
        self.rooms
            .iter()
            .filter(|room| room.capacity >= students)
            .filter_map(|room| {
                room.offer(start, end).map(|interval| Candidate {
                    room_no: room.room_no,
                    interval,
                    interval_length: interval.len(),
                })
            })
            .collect()
    }

    /// Carve `[start, end)` out of `interval` in room `room_no`.
    ///
    /// The interval is removed (remaining intervals keep their order), then
    /// the leading residual `[interval.start, start)` and the trailing residual
    /// `[end, interval.end)` are appended when non-empty.
    ///
    /// Fails with [`AdmissionError::PreconditionViolation`] when the room is
    /// unknown, the interval is not one of its free intervals, or the interval
    /// does not cover `[start, end]`.
    pub fn commit(
        &mut self,
        room_no: RoomNo,
        interval: Interval,
        start: Time,
        end: Time,
    ) -> Result<()> {
        let slot = *self.index.get(&room_no).ok_or_else(|| {
            AdmissionError::PreconditionViolation(format!("room {room_no} does not exist"))
        })?;
        if start >= end || !interval.covers(start, end) {
            return Err(AdmissionError::PreconditionViolation(format!(
                "interval {interval} of room {room_no} does not cover [{start}, {end})"
            )));
        }

        let room = &mut self.rooms[slot];
        let pos = room.free.iter().position(|iv| *iv == interval).ok_or_else(|| {
            AdmissionError::PreconditionViolation(format!(
                "interval {interval} is not free in room {room_no}"
            ))
        })?;

        room.free.remove(pos);
        if interval.start < start {
            room.free.push(Interval::new(interval.start, start));
        }
        if end < interval.end {
            room.free.push(Interval::new(end, interval.end));
        }
        tracing::trace!(
            room_no,
            %interval,
            start,
            end,
            remaining = room.free.len(),
            "interval split"
        );
        Ok(())
    }

    /// Verify every room holds non-empty, pairwise non-overlapping intervals.
    pub fn check_invariants(&self) -> Result<()> {
        self.rooms.iter().try_for_each(Room::check)
    }
}
