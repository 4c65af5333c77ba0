//! Interval algebra: labelled time intervals, canonical-invariant sets of
//! them, and the pure operators used to derive feasibility and candidate
//! windows from raw inputs.

pub mod error;
pub mod interval;
pub mod interval_set;
pub mod label;
pub mod ops;

pub use error::IntervalSetError;
pub use interval::Interval;
pub use interval_set::IntervalSet;
pub use label::{
    CargoWindowLabel, DeliveryStartLabel, RowLabel, TerminalLabel, TransitionLabel,
    UnoccupiedLabel,
};
