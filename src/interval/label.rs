//! Label types carried by intervals in each part of the model.
//!
//! An [`Interval`](super::interval::Interval) is generic over a label type
//! implementing [`RowLabel`]; the label's [`RowLabel::Key`] determines which
//! intervals are required to be mutually disjoint within an
//! [`IntervalSet`](super::interval_set::IntervalSet).

use crate::ids::{CargoId, RequestId, TerminalId};
use crate::time::Duration;

/// A label attached to an interval, whose `Key` partitions an interval set
/// into the disjointness groups required by the canonical invariant.
pub trait RowLabel: Clone + std::fmt::Debug + PartialEq {
    type Key: Eq + Clone + std::fmt::Debug;

    fn key(&self) -> Self::Key;
}

/// Label for a terminal's opening window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalLabel {
    pub terminal: TerminalId,
}

impl RowLabel for TerminalLabel {
    type Key = TerminalId;
    fn key(&self) -> Self::Key {
        self.terminal
    }
}

/// Label for a pickup or dropoff window tied to one cargo at one terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CargoWindowLabel {
    pub terminal: TerminalId,
    pub cargo: CargoId,
    pub request: RequestId,
    pub driving_time: Duration,
}

impl RowLabel for CargoWindowLabel {
    type Key = (TerminalId, CargoId);
    fn key(&self) -> Self::Key {
        (self.terminal, self.cargo)
    }
}

/// Label for a direct-delivery start interval: the window during which a
/// truck may commence carrying `cargo` from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryStartLabel {
    pub cargo: CargoId,
    pub request: RequestId,
    pub from: TerminalId,
    pub to: TerminalId,
    pub driving_time: Duration,
}

impl RowLabel for DeliveryStartLabel {
    type Key = CargoId;
    fn key(&self) -> Self::Key {
        self.cargo
    }
}

/// Label for a planned transition on a truck's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionLabel {
    pub from: TerminalId,
    pub to: TerminalId,
    pub cargo: CargoId,
    pub request: RequestId,
}

impl RowLabel for TransitionLabel {
    type Key = (TerminalId, TerminalId, CargoId);
    fn key(&self) -> Self::Key {
        (self.from, self.to, self.cargo)
    }
}

/// Label for an unoccupied window on a truck's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnoccupiedLabel {
    pub from: TerminalId,
    pub to: TerminalId,
}

impl RowLabel for UnoccupiedLabel {
    type Key = (TerminalId, TerminalId);
    fn key(&self) -> Self::Key {
        (self.from, self.to)
    }
}
