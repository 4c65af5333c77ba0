//! Feasibility precomputation: derives the read-only interval tables the
//! neighbour generator consumes from the raw world inputs, per §4.2.

use crate::entities::{DrivingTimeTable, Terminal, TransportRequest};
use crate::ids::CargoId;
use crate::interval::label::{CargoWindowLabel, DeliveryStartLabel, TerminalLabel};
use crate::interval::ops::{intersect_on_column, shift_by};
use crate::interval::{Interval, IntervalSet};
use crate::time::Instant;

/// Shared, build-time-only context consumed by every `Schedule` produced
/// during one search. Nothing here is mutated after construction.
#[derive(Debug, Clone)]
pub struct FeasibilityContext {
    pub terminal_open: IntervalSet<TerminalLabel>,
    pub pickup_intervals: IntervalSet<CargoWindowLabel>,
    pub dropoff_intervals: IntervalSet<CargoWindowLabel>,
    pub direct_delivery_start_intervals: IntervalSet<DeliveryStartLabel>,
    pub driving_times: DrivingTimeTable,
    pub horizon_start: Instant,
    pub horizon_end: Instant,
}

impl FeasibilityContext {
    /// Builds the feasibility tables from raw inputs.
    ///
    /// `requests` with an inverted pickup/dropoff window are expected to
    /// have already been dropped upstream; see
    /// [`TransportRequest::has_inverted_window`](crate::entities::TransportRequest::has_inverted_window).
    pub fn build(
        terminals: &[Terminal],
        requests: &[TransportRequest],
        driving_times: DrivingTimeTable,
        planning_period: (Instant, Instant),
    ) -> Self {
        let terminal_open = IntervalSet::from(
            terminals
                .iter()
                .map(|t| {
                    Interval::new(
                        t.open,
                        t.close,
                        TerminalLabel { terminal: t.id },
                    )
                })
                .collect::<Vec<_>>(),
        );

        let raw_pickups: Vec<Interval<CargoWindowLabel>> = requests
            .iter()
            .map(|r| {
                Interval::new(
                    r.pickup_open,
                    r.pickup_close,
                    CargoWindowLabel {
                        terminal: r.from_terminal,
                        cargo: r.cargo,
                        request: r.id,
                        driving_time: r.driving_time,
                    },
                )
            })
            .collect();
        let raw_dropoffs: Vec<Interval<CargoWindowLabel>> = requests
            .iter()
            .map(|r| {
                Interval::new(
                    r.dropoff_open,
                    r.dropoff_close,
                    CargoWindowLabel {
                        terminal: r.to_terminal,
                        cargo: r.cargo,
                        request: r.id,
                        driving_time: r.driving_time,
                    },
                )
            })
            .collect();

        let pickup_intervals = intersect_on_column(
            &IntervalSet::<CargoWindowLabel>::from(raw_pickups),
            &terminal_open,
            |l: &CargoWindowLabel| l.terminal,
            |l: &TerminalLabel| l.terminal,
            |p, _t| *p,
        );
        let dropoff_intervals = intersect_on_column(
            &IntervalSet::<CargoWindowLabel>::from(raw_dropoffs),
            &terminal_open,
            |l: &CargoWindowLabel| l.terminal,
            |l: &TerminalLabel| l.terminal,
            |d, _t| *d,
        );

        // Shift dropoff windows back by driving time so that they read as
        // "legal delivery start instants", then intersect with pickup.
        let dropoff_shifted_back =
            shift_by(&dropoff_intervals, |l| l.driving_time, true, true);

        let direct_delivery_start_intervals = intersect_on_column(
            &pickup_intervals,
            &dropoff_shifted_back,
            |l: &CargoWindowLabel| l.cargo,
            |l: &CargoWindowLabel| l.cargo,
            |pickup, dropoff| DeliveryStartLabel {
                cargo: pickup.cargo,
                request: pickup.request,
                from: pickup.terminal,
                to: dropoff.terminal,
                driving_time: pickup.driving_time,
            },
        );

        let horizon_start = planning_period
            .0
            .max(terminal_open.iter().map(|i| i.start()).min().unwrap_or(planning_period.0))
            .max(
                pickup_intervals
                    .iter()
                    .map(|i| i.start())
                    .min()
                    .unwrap_or(planning_period.0),
            );
        let horizon_end = planning_period
            .1
            .min(terminal_open.iter().map(|i| i.end()).max().unwrap_or(planning_period.1))
            .min(
                dropoff_intervals
                    .iter()
                    .map(|i| i.end())
                    .max()
                    .unwrap_or(planning_period.1),
            );

        Self {
            terminal_open,
            pickup_intervals,
            dropoff_intervals,
            direct_delivery_start_intervals,
            driving_times,
            horizon_start,
            horizon_end,
        }
    }
}
