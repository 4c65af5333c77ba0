//! Static world inputs: terminals, trucks, transport requests, and driving
//! times. These are immutable once ingested; the core never mutates them.

use std::collections::HashMap;

use crate::ids::{CargoId, RequestId, TerminalId, TruckId};
use crate::time::{Duration, Instant};

/// A physical terminal with a daily opening window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub id: TerminalId,
    pub open: Instant,
    pub close: Instant,
}

impl Terminal {
    pub const fn new(id: TerminalId, open: Instant, close: Instant) -> Self {
        Self { id, open, close }
    }
}

/// A truck available to carry cargo, starting the horizon at a fixed terminal.
///
/// `capacity` and `adr` are carried for completeness; the core's own
/// feasibility precomputation treats them as already applied upstream (see
/// DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Truck {
    pub id: TruckId,
    pub starting_terminal: TerminalId,
    pub capacity: f64,
    pub adr: bool,
}

impl Truck {
    pub const fn new(id: TruckId, starting_terminal: TerminalId, capacity: f64, adr: bool) -> Self {
        Self {
            id,
            starting_terminal,
            capacity,
            adr,
        }
    }
}

/// A single requested haulage of one cargo between two terminals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportRequest {
    pub id: RequestId,
    pub cargo: CargoId,
    pub from_terminal: TerminalId,
    pub to_terminal: TerminalId,
    pub pickup_open: Instant,
    pub pickup_close: Instant,
    pub dropoff_open: Instant,
    pub dropoff_close: Instant,
    pub driving_time: Duration,
    pub weight: f64,
    pub adr_required: bool,
}

impl TransportRequest {
    /// True when the pickup or dropoff window is inverted (`open >= close`).
    ///
    /// Ingest is expected to drop such requests before they reach the core;
    /// this helper exists so an embedding can reproduce that filter.
    pub fn has_inverted_window(&self) -> bool {
        self.pickup_open >= self.pickup_close || self.dropoff_open >= self.dropoff_close
    }
}

/// Closed, symmetric lookup of driving time between any two terminals,
/// including zero self-distances.
#[derive(Debug, Clone, Default)]
pub struct DrivingTimeTable {
    times: HashMap<(TerminalId, TerminalId), Duration>,
}

impl DrivingTimeTable {
    pub fn new() -> Self {
        Self {
            times: HashMap::new(),
        }
    }

    /// Records `duration` for `(from, to)` and its symmetric counterpart.
    pub fn insert(&mut self, from: TerminalId, to: TerminalId, duration: Duration) {
        self.times.insert((from, to), duration);
        self.times.insert((to, from), duration);
    }

    /// Returns the driving time between `from` and `to`, `0` for `from == to`.
    ///
    /// # Panics
    ///
    /// Panics if no entry exists for a distinct pair; the table is expected
    /// to be complete over every terminal pair that appears in the inputs.
    pub fn get(&self, from: TerminalId, to: TerminalId) -> Duration {
        if from == to {
            return Duration::ZERO;
        }
        *self
            .times
            .get(&(from, to))
            .unwrap_or_else(|| panic!("missing driving time for ({from}, {to})"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_distance_is_zero() {
        let table = DrivingTimeTable::new();
        assert_eq!(
            table.get(TerminalId::new(1), TerminalId::new(1)),
            Duration::ZERO
        );
    }

    #[test]
    fn insert_is_symmetric() {
        let mut table = DrivingTimeTable::new();
        table.insert(TerminalId::new(1), TerminalId::new(2), Duration::new(3600));
        assert_eq!(
            table.get(TerminalId::new(2), TerminalId::new(1)),
            Duration::new(3600)
        );
    }

    #[test]
    fn inverted_pickup_window_is_detected() {
        let req = TransportRequest {
            id: RequestId::new(0),
            cargo: CargoId::new(0),
            from_terminal: TerminalId::new(0),
            to_terminal: TerminalId::new(1),
            pickup_open: Instant::new(100),
            pickup_close: Instant::new(50),
            dropoff_open: Instant::new(0),
            dropoff_close: Instant::new(200),
            driving_time: Duration::new(60),
            weight: 1.0,
            adr_required: false,
        };
        assert!(req.has_inverted_window());
    }
}
