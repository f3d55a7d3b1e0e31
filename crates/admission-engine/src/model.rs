//! Value types shared by the store, the engine and the batch format.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Room identity. Unique and stable for a session.
pub type RoomNo = i64;

/// A point in time. Units are whatever the batch uses; the engine only
/// compares and subtracts them.
pub type Time = i64;

/// Distance between two [`Time`]s. Unsigned and one bit wider in range than
/// `Time`, so even `[i64::MIN, i64::MAX)` has a representable length.
pub type Length = u64;

/// Numeric form of [`Outcome::Rejected`] in the line-oriented batch format.
pub const REJECTED_CODE: i64 = -1;

/// A free time range `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: Time,
    pub end: Time,
}

impl Interval {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Length of the range, `end - start`, or zero for an empty range.
    pub fn len(&self) -> Length {
        if self.is_empty() {
            0
        } else {
            self.end.abs_diff(self.start)
        }
    }

    /// True when the range holds no time at all.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `[start, end]` lies entirely inside this interval.
    ///
    /// Both bounds are inclusive, so a request exactly matching the interval
    /// is covered.
    pub fn covers(&self, start: Time, end: Time) -> bool {
        self.start <= start && self.end >= end
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// Touching intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Initial description of a room: identity, capacity and the single free
/// range it starts the session with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub room_no: RoomNo,
    pub capacity: i64,
    pub start: Time,
    pub end: Time,
}

impl RoomConfig {
    pub fn new(room_no: RoomNo, capacity: i64, start: Time, end: Time) -> Self {
        Self {
            room_no,
            capacity,
            start,
            end,
        }
    }
}

/// A reservation request: `students` people for `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub students: i64,
    pub start: Time,
    pub end: Time,
}

impl Request {
    pub fn new(students: i64, start: Time, end: Time) -> Self {
        Self {
            students,
            start,
            end,
        }
    }
}

/// The decision taken for one request.
///
/// Serializes as the batch format's integer: the room number, or `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Outcome {
    /// The request was committed to this room.
    Reserved(RoomNo),
    /// No room could take the request.
    Rejected,
}

impl Outcome {
    /// The room the request was committed to, if any.
    pub fn room_no(&self) -> Option<RoomNo> {
        match self {
            Outcome::Reserved(room_no) => Some(*room_no),
            Outcome::Rejected => None,
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, Outcome::Reserved(_))
    }

    /// The batch-format integer for this outcome.
    pub fn code(&self) -> i64 {
        self.room_no().unwrap_or(REJECTED_CODE)
    }
}

impl From<Outcome> for i64 {
    fn from(outcome: Outcome) -> Self {
        outcome.code()
    }
}

impl TryFrom<i64> for Outcome {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            REJECTED_CODE => Ok(Outcome::Rejected),
            n if n >= 0 => Ok(Outcome::Reserved(n)),
            n => Err(format!("invalid outcome code: {n}")),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
