//! Line-oriented batch format.
//!
//! ```text
//! n m
//! roomNo capacity start end      (n lines)
//! students reqStart reqEnd       (m lines)
//! ```
//!
//! Output is one integer per request: the room number, or `-1`.
//!
//! Tokens may be separated by any ASCII whitespace. Blank lines are skipped and
//! anything after the `n + m` records is ignored.

use crate::engine::{EngineOptions, ReservationEngine};
use crate::error::{AdmissionError, Result};
use crate::model::{Outcome, Request, RoomConfig};
use crate::store::RoomStore;

/// A parsed batch: rooms to load and requests to run, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Batch {
    pub rooms: Vec<RoomConfig>,
    pub requests: Vec<Request>,
}

impl Batch {
    /// Load the rooms into a fresh engine without running any request.
    pub fn engine(&self, options: EngineOptions) -> Result<ReservationEngine> {
        let store = RoomStore::load(&self.rooms)?;
        Ok(ReservationEngine::with_options(store, options))
    }

    /// Load the rooms and run every request, returning the finished engine.
    pub fn run(&self, options: EngineOptions) -> Result<ReservationEngine> {
        let mut engine = self.engine(options)?;
        engine.run(&self.requests)?;
        Ok(engine)
    }
}

/// Parse a batch from its textual form.
pub fn parse_batch(input: &str) -> Result<Batch> {
    let mut records = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((line, header)) = records.next() else {
        return Err(parse_error(1, "missing header line `n m`"));
    };
    let [n, m] = fields::<2>(line, header)?;
    let n = count(line, n, "room count")?;
    let m = count(line, m, "request count")?;

    // Header counts are untrusted; missing records surface as parse errors.
    let mut batch = Batch::default();

    for k in 0..n {
        let (line, text) = records.next().ok_or_else(|| {
            parse_error(line_after(input), format!("expected {n} room lines, found {k}"))
        })?;
        let [room_no, capacity, start, end] = fields::<4>(line, text)?;
        batch.rooms.push(RoomConfig::new(room_no, capacity, start, end));
    }

    for k in 0..m {
        let (line, text) = records.next().ok_or_else(|| {
            parse_error(
                line_after(input),
                format!("expected {m} request lines, found {k}"),
            )
        })?;
        let [students, start, end] = fields::<3>(line, text)?;
        batch.requests.push(Request::new(students, start, end));
    }

    Ok(batch)
}

/// Render outcomes one per line, each line newline-terminated.
pub fn format_outcomes(outcomes: &[Outcome]) -> String {
    outcomes.iter().map(|o| format!("{o}\n")).collect()
}

/// Render a batch back into its textual form.
pub fn format_batch(batch: &Batch) -> String {
    let mut out = format!("{} {}\n", batch.rooms.len(), batch.requests.len());
    for r in &batch.rooms {
        out.push_str(&format!("{} {} {} {}\n", r.room_no, r.capacity, r.start, r.end));
    }
    for q in &batch.requests {
        out.push_str(&format!("{} {} {}\n", q.students, q.start, q.end));
    }
    out
}

fn fields<const N: usize>(line: usize, text: &str) -> Result<[i64; N]> {
    let tokens: Vec<&str> = text.split_ascii_whitespace().collect();
    if tokens.len() != N {
        return Err(parse_error(
            line,
            format!("expected {N} fields, found {}", tokens.len()),
        ));
    }
    let mut values = [0i64; N];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        *slot = token
            .parse()
            .map_err(|_| parse_error(line, format!("expected an integer, found '{token}'")))?;
    }
    Ok(values)
}

fn count(line: usize, value: i64, what: &str) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| parse_error(line, format!("{what} must not be negative, found {value}")))
}

/// The 1-based line number just past the end of the input.
fn line_after(input: &str) -> usize {
    input.lines().count() + 1
}

fn parse_error(line: usize, message: impl Into<String>) -> AdmissionError {
    AdmissionError::Parse {
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_rejects_wrong_arity() {
        assert!(matches!(
            fields::<3>(4, "1 2"),
            Err(AdmissionError::Parse { line: 4, .. })
        ));
        assert_eq!(fields::<3>(4, " 1\t2  3 ").unwrap(), [1, 2, 3]);
    }

    #[test]
    fn count_rejects_negative() {
        assert!(count(1, -1, "room count").is_err());
        assert_eq!(count(1, 3, "room count").unwrap(), 3);
    }
}
