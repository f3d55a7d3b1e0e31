//! One deterministic, greedy pass over a request stream.
//!
//! For each request, in arrival order: validate it, ask the [`RoomStore`] for
//! candidates, rank them by `(interval_length, room_no)` ascending, and commit
//! the winner. A request no room can take yields [`Outcome::Rejected`]; earlier
//! decisions are never revisited.
//!
//! [`ReservationEngine::admit`] takes `&mut self`, so the find-then-commit
//! step of one request cannot interleave with another. Hosts serving
//! concurrent callers must funnel them through a single owner of the engine.

use serde::{Deserialize, Serialize};

use crate::error::{AdmissionError, Result};
use crate::model::{Interval, Outcome, Request, RoomConfig, RoomNo, Time};
use crate::store::{Candidate, RoomStore};

/// Tunable behaviour of a [`ReservationEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Re-check every room's free intervals after each commit and fail with
    /// [`AdmissionError::PreconditionViolation`] on the first broken one.
    #[serde(default)]
    pub verify_invariants: bool,
}

impl EngineOptions {
    pub fn verifying() -> Self {
        Self {
            verify_invariants: true,
        }
    }
}

/// A committed reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// 0-based position of the request in the run.
    pub request_index: usize,
    pub room_no: RoomNo,
    pub students: i64,
    pub start: Time,
    pub end: Time,
    /// The free interval the reservation was carved from, before the split.
    pub consumed: Interval,
}

/// Pick the best candidate: shortest free block first, then lowest room
/// number. Returns `None` for an empty slice.
pub fn select(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates
        .iter()
        .min_by_key(|c| (c.interval_length, c.room_no))
}

/// Check a request before it reaches the store.
pub fn validate_request(index: usize, request: &Request) -> Result<()> {
    if request.students < 1 {
        return Err(AdmissionError::InvalidRequest {
            index,
            reason: format!("student count {} must be at least 1", request.students),
        });
    }
    if request.start >= request.end {
        return Err(AdmissionError::InvalidRequest {
            index,
            reason: format!(
                "start {} must be before end {}",
                request.start, request.end
            ),
        });
    }
    Ok(())
}

/// Drives requests through a [`RoomStore`] and keeps the outcome log.
#[derive(Debug, Clone)]
pub struct ReservationEngine {
    store: RoomStore,
    options: EngineOptions,
    outcomes: Vec<Outcome>,
    reservations: Vec<Reservation>,
}

impl ReservationEngine {
    pub fn new(store: RoomStore) -> Self {
        Self::with_options(store, EngineOptions::default())
    }

    pub fn with_options(store: RoomStore, options: EngineOptions) -> Self {
        Self {
            store,
            options,
            outcomes: Vec::new(),
            reservations: Vec::new(),
        }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn store(&self) -> &RoomStore {
        &self.store
    }

    pub fn into_store(self) -> RoomStore {
        self.store
    }

    /// Outcomes so far, one per admitted request, in request order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Committed reservations so far, in request order.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Start a fresh run: reload the rooms and clear both logs.
    pub fn reset(&mut self, rooms: &[RoomConfig]) -> Result<()> {
        self.store = RoomStore::load(rooms)?;
        self.outcomes.clear();
        self.reservations.clear();
        Ok(())
    }

    /// Decide and commit a single request.
    ///
    /// Returns [`Outcome::Rejected`] when no room qualifies. Errors only on a
    /// malformed request or a broken store invariant.
    pub fn admit(&mut self, request: &Request) -> Result<Outcome> {
        let index = self.outcomes.len();
        validate_request(index, request)?;

        let candidates = self
            .store
            .find_candidates(request.students, request.start, request.end);

        let Some(chosen) = select(&candidates).copied() else {
            tracing::debug!(
                index,
                students = request.students,
                start = request.start,
                end = request.end,
                "no admissible room"
            );
            self.outcomes.push(Outcome::Rejected);
            return Ok(Outcome::Rejected);
        };

        self.store
            .commit(chosen.room_no, chosen.interval, request.start, request.end)?;
        if self.options.verify_invariants {
            self.store.check_invariants()?;
        }
        tracing::debug!(
            index,
            candidates = candidates.len(),
            room_no = chosen.room_no,
            interval = %chosen.interval,
            "request reserved"
        );

        self.reservations.push(Reservation {
            request_index: index,
            room_no: chosen.room_no,
            students: request.students,
            start: request.start,
            end: request.end,
            consumed: chosen.interval,
        });
        let outcome = Outcome::Reserved(chosen.room_no);
        self.outcomes.push(outcome);
        Ok(outcome)
    }

    /// Admit every request in order.
    ///
    /// The whole batch is validated before anything is committed, so a
    /// malformed request aborts the run with the store untouched.
    pub fn run(&mut self, requests: &[Request]) -> Result<&[Outcome]> {
        let offset = self.outcomes.len();
        for (i, request) in requests.iter().enumerate() {
            validate_request(offset + i, request)?;
        }
        for request in requests {
            self.admit(request)?;
        }

        let produced = &self.outcomes[offset..];
        tracing::info!(
            requests = produced.len(),
            reserved = produced.iter().filter(|o| o.is_reserved()).count(),
            "run complete"
        );
        Ok(produced)
    }
}

/// Build a [`RoomStore`] from initial room configurations.
pub fn load_rooms(rooms: &[RoomConfig]) -> Result<RoomStore> {
    RoomStore::load(rooms)
}

/// Run `requests` against `store` with default options and return one
/// outcome per request.
pub fn process_requests(store: &mut RoomStore, requests: &[Request]) -> Result<Vec<Outcome>> {
    process_requests_with(store, requests, EngineOptions::default())
}

/// Like [`process_requests`], with explicit [`EngineOptions`].
///
/// On error the store keeps whatever state it had reached.
pub fn process_requests_with(
    store: &mut RoomStore,
    requests: &[Request],
    options: EngineOptions,
) -> Result<Vec<Outcome>> {
    let mut engine = ReservationEngine::with_options(std::mem::take(store), options);
    let result = engine.run(requests).map(<[Outcome]>::to_vec);
    *store = engine.into_store();
    result
}
