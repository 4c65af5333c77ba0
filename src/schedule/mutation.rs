//! Structural mutations of a truck's schedule and their local-consistency
//! updates, per §4.4.

use crate::feasibility::FeasibilityContext;
use crate::ids::{CargoId, RequestId, TerminalId, TruckId};
use crate::interval::label::{TransitionLabel, UnoccupiedLabel};
use crate::interval::{Interval, IntervalSet};
use crate::time::Instant;

use super::error::MutationError;
use super::TruckState;

/// A candidate change to a truck's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    AddTransition {
        truck: TruckId,
        from: TerminalId,
        to: TerminalId,
        start: Instant,
        end: Instant,
        cargo: CargoId,
        request: RequestId,
    },
    RemoveTransitions {
        truck: TruckId,
        start: Instant,
        end: Instant,
    },
}

impl Mutation {
    pub fn truck(&self) -> TruckId {
        match self {
            Mutation::AddTransition { truck, .. } => *truck,
            Mutation::RemoveTransitions { truck, .. } => *truck,
        }
    }
}

/// Generates every legal `AddTransition` candidate for a single unoccupied
/// window, against cargo still in `unplanned`.
pub fn candidates_for_window(
    truck: TruckId,
    window: &Interval<UnoccupiedLabel>,
    unplanned: &std::collections::HashSet<CargoId>,
    ctx: &FeasibilityContext,
) -> Vec<Mutation> {
    let wf = window.label().from;
    let wt = window.label().to;
    let mut out = Vec::new();

    for row in ctx.direct_delivery_start_intervals.iter() {
        let label = row.label();
        if !unplanned.contains(&label.cargo) {
            continue;
        }
        if !row.overlaps(window) {
            continue;
        }

        let left_padding = ctx.driving_times.get(wf, label.from);
        let right_padding = ctx.driving_times.get(label.to, wt);
        let duration = label.driving_time;

        let lo = row.start().max(window.start() + left_padding);
        // inclusive upper bound on the legal start instant
        let hi = (row.end() - crate::time::Duration::new(1))
            .min(window.end() - right_padding - duration);

        if lo > hi {
            continue;
        }

        out.push(Mutation::AddTransition {
            truck,
            from: label.from,
            to: label.to,
            start: lo,
            end: lo + duration,
            cargo: label.cargo,
            request: label.request,
        });
        if hi != lo {
            out.push(Mutation::AddTransition {
                truck,
                from: label.from,
                to: label.to,
                start: hi,
                end: hi + duration,
                cargo: label.cargo,
                request: label.request,
            });
        }
    }
    out
}

/// Applies an `AddTransition` mutation to `state`, mutating it in place and
/// updating `unplanned` and `state.candidates`.
pub fn apply_add_transition(
    state: &mut TruckState,
    unplanned: &mut std::collections::HashSet<CargoId>,
    ctx: &FeasibilityContext,
    truck: TruckId,
    from: TerminalId,
    to: TerminalId,
    start: Instant,
    end: Instant,
    cargo: CargoId,
    request: RequestId,
) -> Result<(), MutationError> {
    let (remaining_unoccupied, window) =
        crate::interval::ops::extract_interval(&state.unoccupied, start, end)
            .map_err(MutationError::from)?;
    state.unoccupied = remaining_unoccupied;

    state.transitions.push(Interval::new(
        start,
        end,
        TransitionLabel {
            from,
            to,
            cargo,
            request,
        },
    ));

    let mut new_windows = Vec::new();
    if window.start() < start {
        new_windows.push(Interval::new(
            window.start(),
            start,
            UnoccupiedLabel {
                from: window.label().from,
                to: from,
            },
        ));
    }
    if end < window.end() {
        new_windows.push(Interval::new(
            end,
            window.end(),
            UnoccupiedLabel {
                from: to,
                to: window.label().to,
            },
        ));
    }
    for w in &new_windows {
        state.unoccupied.push(w.clone());
    }

    unplanned.remove(&cargo);

    state.candidates = update_candidates_on_add(
        std::mem::take(&mut state.candidates),
        &window,
        &new_windows,
        ctx,
        truck,
        cargo,
    );
    state.candidates.push(Mutation::RemoveTransitions {
        truck,
        start,
        end,
    });

    Ok(())
}

/// Recomputes or drops each existing `AddTransition` candidate that
/// intersected the window consumed by an add, per §4.4's local-update rule.
///
/// `delivered_cargo` is the cargo just committed by this add; its
/// candidates are dropped outright rather than rescheduled, since it must
/// never be offered for delivery a second time.
fn update_candidates_on_add(
    old_candidates: Vec<Mutation>,
    old_window: &Interval<UnoccupiedLabel>,
    new_windows: &[Interval<UnoccupiedLabel>],
    ctx: &FeasibilityContext,
    truck: TruckId,
    delivered_cargo: CargoId,
) -> Vec<Mutation> {
    let mut out = Vec::new();
    for candidate in old_candidates {
        match candidate {
            Mutation::RemoveTransitions { .. } => out.push(candidate),
            Mutation::AddTransition {
                truck: ct,
                from: cf,
                to: ctt,
                start: cs,
                end: ce,
                cargo: cc,
                request: cr,
            } => {
                if cc == delivered_cargo {
                    continue;
                }
                if ct != truck || ce <= old_window.start() || old_window.end() <= cs {
                    out.push(candidate);
                    continue;
                }
                // Candidate was inside old_window: reschedule against each
                // surviving split, or drop it.
                for w in new_windows {
                    let left_padding = ctx.driving_times.get(w.label().from, cf);
                    let right_padding = ctx.driving_times.get(ctt, w.label().to);
                    let duration = ctx.driving_times.get(cf, ctt);

                    let row = ctx
                        .direct_delivery_start_intervals
                        .iter()
                        .find(|r| r.label().request == cr);
                    let Some(row) = row else { continue };

                    let lo = row.start().max(w.start() + left_padding);
                    let hi = (row.end() - crate::time::Duration::new(1))
                        .min(w.end() - right_padding - duration);
                    if lo > hi {
                        continue;
                    }
                    out.push(Mutation::AddTransition {
                        truck,
                        from: cf,
                        to: ctt,
                        start: lo,
                        end: lo + duration,
                        cargo: cc,
                        request: cr,
                    });
                    if hi != lo {
                        out.push(Mutation::AddTransition {
                            truck,
                            from: cf,
                            to: ctt,
                            start: hi,
                            end: hi + duration,
                            cargo: cc,
                            request: cr,
                        });
                    }
                }
            }
        }
    }
    out
}

/// Applies a `RemoveTransitions` mutation: drops every transition
/// intersecting `[start, end)`, returns their cargo to `unplanned`, and
/// merges the vacated span into the surrounding unoccupied windows.
pub fn apply_remove_transitions(
    state: &mut TruckState,
    unplanned: &mut std::collections::HashSet<CargoId>,
    ctx: &FeasibilityContext,
    truck: TruckId,
    starting_terminal: TerminalId,
    start: Instant,
    end: Instant,
) {
    let mut kept = Vec::new();
    for t in state.transitions.iter() {
        if t.start() < end && start < t.end() {
            unplanned.insert(t.label().cargo);
        } else {
            kept.push(t.clone());
        }
    }
    state.transitions = IntervalSet::from_sorted_unchecked(kept);

    let prev = state.unoccupied.iter().find(|w| w.end() == start).cloned();
    let next = state.unoccupied.iter().find(|w| w.start() == end).cloned();

    let new_start = prev.as_ref().map(|w| w.start()).unwrap_or(start);
    let new_from = prev
        .as_ref()
        .map(|w| w.label().from)
        .unwrap_or(starting_terminal);
    let new_end = next.as_ref().map(|w| w.end()).unwrap_or(end);
    let new_to = next
        .as_ref()
        .map(|w| w.label().to)
        .unwrap_or(starting_terminal);

    state.unoccupied.retain(|w| {
        Some(w.start()) != prev.as_ref().map(|p| p.start())
            && Some(w.start()) != next.as_ref().map(|n| n.start())
    });
    let merged = Interval::new(
        new_start,
        new_end,
        UnoccupiedLabel {
            from: new_from,
            to: new_to,
        },
    );
    state.unoccupied.push(merged.clone());

    // Drop every candidate for this truck that touched the vacated span or
    // referenced a removed transition, then rebuild from the merged window.
    state.candidates.retain(|c| match c {
        Mutation::AddTransition {
            truck: ct,
            start: cs,
            end: ce,
            ..
        } => *ct != truck || *ce <= merged.start() || merged.end() <= *cs,
        Mutation::RemoveTransitions {
            truck: ct,
            start: rs,
            end: re,
        } => *ct != truck || *rs < start || end < *re,
    });
    state
        .candidates
        .extend(candidates_for_window(truck, &merged, unplanned, ctx));
}
