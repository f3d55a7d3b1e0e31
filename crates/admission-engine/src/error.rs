//! Error types for admission-engine operations.
//!
//! A request that no room can satisfy is not an error: it is reported as
//! [`Outcome::Rejected`](crate::model::Outcome::Rejected).

use thiserror::Error;

use crate::model::RoomNo;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// A room's initial configuration is unusable (empty or inverted range,
    /// negative capacity, duplicated room number).
    #[error("Invalid configuration for room {room_no}: {reason}")]
    InvalidRoomConfiguration { room_no: RoomNo, reason: String },

    /// A request has inverted bounds or a non-positive student count.
    /// `index` is the 0-based position of the request in the batch.
    #[error("Invalid request #{index}: {reason}")]
    InvalidRequest { index: usize, reason: String },

    /// A commit targeted state that does not exist. Indicates an engine bug.
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    /// The textual batch could not be parsed.
    /// Includes the 1-based line number where the error was detected.
    #[error("Batch parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Convenience alias used throughout admission-engine.
pub type Result<T> = std::result::Result<T, AdmissionError>;
