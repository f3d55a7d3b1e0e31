//! # admission-engine
//!
//! Deterministic, greedy room admission with interval splitting.
//!
//! Given rooms (capacity + free time) and an ordered stream of reservation
//! requests, the engine decides each request in turn: every room with enough
//! capacity offers one free interval covering the request, the shortest such
//! interval wins (lowest room number on ties), and the winner's interval is
//! split around the reservation. Requests no room can take are rejected
//! (`-1` in the batch format). Decisions are never revisited.
//!
//! ## Quick start
//!
//! ```rust
//! use admission_engine::{load_rooms, process_requests, Outcome, Request, RoomConfig};
//!
//! let mut store = load_rooms(&[
//!     RoomConfig::new(101, 15, 1, 6),
//!     RoomConfig::new(102, 20, 4, 7),
//! ])
//! .unwrap();
//!
//! let outcomes = process_requests(
//!     &mut store,
//!     &[Request::new(10, 1, 3), Request::new(30, 5, 7), Request::new(15, 4, 6)],
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     outcomes,
//!     vec![Outcome::Reserved(101), Outcome::Rejected, Outcome::Reserved(101)]
//! );
//! ```
//!
//! ## Modules
//!
//! - [`model`] — `Interval`, `RoomConfig`, `Request`, `Outcome`
//! - [`store`] — `RoomStore`: rooms, candidate search, interval splitting
//! - [`engine`] — `ReservationEngine`: ranking, tie-break, outcome log
//! - [`report`] — Per-room usage summary after a run
//! - [`batch`] — Line-oriented text format (parse input, format outcomes)
//! - [`error`] — Error types

pub mod batch;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod store;

pub use batch::{format_batch, format_outcomes, parse_batch, Batch};
pub use engine::{
    load_rooms, process_requests, process_requests_with, EngineOptions, Reservation,
    ReservationEngine,
};
pub use error::AdmissionError;
pub use model::{Interval, Length, Outcome, Request, RoomConfig, RoomNo, Time};
pub use report::{RoomUsage, RunReport};
pub use store::{Candidate, Room, RoomStore};
