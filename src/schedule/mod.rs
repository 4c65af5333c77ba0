//! Schedule state: per-truck transitions, unoccupied windows, and legal
//! mutation candidates, plus the set of still-unplanned cargo, per §4.3.

pub mod error;
pub mod mutation;

use std::collections::{HashMap, HashSet};

use crate::feasibility::FeasibilityContext;
use crate::ids::{CargoId, TruckId};
use crate::interval::label::{TransitionLabel, UnoccupiedLabel};
use crate::interval::{Interval, IntervalSet};

pub use mutation::Mutation;

/// Per-truck mutable schedule state.
#[derive(Debug, Clone, PartialEq)]
pub struct TruckState {
    pub transitions: IntervalSet<TransitionLabel>,
    pub unoccupied: IntervalSet<UnoccupiedLabel>,
    pub candidates: Vec<Mutation>,
}

/// A full, consistent schedule across all trucks.
///
/// `Schedule` owns its per-truck mutable state; `copy()` (via `Clone`)
/// performs a full structural deep copy so two schedules never alias.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub trucks: HashMap<TruckId, TruckState>,
    pub unplanned: HashSet<CargoId>,
}

impl Schedule {
    /// Deep-copies this schedule. An alias for `.clone()`, named to match
    /// the vocabulary used elsewhere in this crate's design notes.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Total number of cargo ids delivered across all trucks.
    pub fn delivered_count(&self) -> usize {
        self.trucks.values().map(|t| t.transitions.len()).sum()
    }

    /// Number of trucks with no planned transitions.
    pub fn free_truck_count(&self) -> usize {
        self.trucks.values().filter(|t| t.transitions.is_empty()).count()
    }

    /// Sum of driving time spent on planned transitions and implied
    /// repositioning legs, across all trucks.
    pub fn total_driving_time(&self, ctx: &FeasibilityContext) -> crate::time::Duration {
        let transitions: crate::time::Duration = self
            .trucks
            .values()
            .flat_map(|t| t.transitions.iter())
            .map(|t| ctx.driving_times.get(t.label().from, t.label().to))
            .sum();
        let repositioning: crate::time::Duration = self
            .trucks
            .values()
            .flat_map(|t| t.unoccupied.iter())
            .filter(|w| w.label().from != w.label().to)
            .map(|w| ctx.driving_times.get(w.label().from, w.label().to))
            .sum();
        transitions + repositioning
    }

    /// Total number of legal candidate mutations across every truck.
    pub fn candidate_count(&self) -> usize {
        self.trucks.values().map(|t| t.candidates.len()).sum()
    }

    /// Returns the `index`-th candidate in a stable, truck-ordered
    /// enumeration of all candidates, for uniform sampling over the union.
    pub fn candidate_at(&self, mut index: usize) -> Option<Mutation> {
        let mut truck_ids: Vec<&TruckId> = self.trucks.keys().collect();
        truck_ids.sort();
        for id in truck_ids {
            let state = &self.trucks[id];
            if index < state.candidates.len() {
                return Some(state.candidates[index]);
            }
            index -= state.candidates.len();
        }
        None
    }
}

/// Builds the empty schedule: every truck idle at its starting terminal for
/// the full horizon, no cargo planned.
pub fn empty_schedule(
    trucks: &[crate::entities::Truck],
    cargo_ids: impl IntoIterator<Item = CargoId>,
    ctx: &FeasibilityContext,
) -> Schedule {
    let unplanned: HashSet<CargoId> = cargo_ids.into_iter().collect();

    let mut truck_states = HashMap::new();
    for truck in trucks {
        let window = Interval::new(
            ctx.horizon_start,
            ctx.horizon_end,
            UnoccupiedLabel {
                from: truck.starting_terminal,
                to: truck.starting_terminal,
            },
        );
        let candidates = mutation::candidates_for_window(truck.id, &window, &unplanned, ctx);
        truck_states.insert(
            truck.id,
            TruckState {
                transitions: IntervalSet::new(),
                unoccupied: IntervalSet::from(vec![window]),
                candidates,
            },
        );
    }

    Schedule {
        trucks: truck_states,
        unplanned,
    }
}
