//! The neighbour generator: builds the feasibility context, the empty
//! schedule, and samples/applies legal mutations, per §4.4 and §6.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::{DrivingTimeTable, Terminal, TransportRequest, Truck};
use crate::feasibility::FeasibilityContext;
use crate::schedule::mutation::{apply_add_transition, apply_remove_transitions, Mutation};
use crate::schedule::Schedule;
use crate::score::Score;
use crate::time::Instant;

/// Owns the immutable feasibility context and world inputs, and the PRNG
/// used to sample neighbours.
pub struct Generator {
    ctx: FeasibilityContext,
    trucks: Vec<Truck>,
    rng: StdRng,
}

/// Builds a `Generator` from raw world inputs.
pub fn build_generator(
    terminals: &[Terminal],
    trucks: &[Truck],
    requests: &[TransportRequest],
    planning_period: (Instant, Instant),
    driving_times: DrivingTimeTable,
) -> Generator {
    let ctx = FeasibilityContext::build(terminals, requests, driving_times, planning_period);
    Generator {
        ctx,
        trucks: trucks.to_vec(),
        rng: StdRng::seed_from_u64(0),
    }
}

impl Generator {
    /// Reseeds the generator's PRNG for a deterministic run.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Builds the schedule with every truck idle and no cargo planned.
    pub fn empty_schedule(&self, requests: &[TransportRequest]) -> Schedule {
        crate::schedule::empty_schedule(
            &self.trucks,
            requests.iter().map(|r| r.cargo),
            &self.ctx,
        )
    }

    pub fn score(&self, schedule: &Schedule) -> Score {
        Score::of(schedule, &self.ctx)
    }

    pub fn context(&self) -> &FeasibilityContext {
        &self.ctx
    }

    /// Draws up to `num_tries` uniformly-sampled candidates and applies
    /// each to a fresh copy of `schedule`, returning the first whose score
    /// differs from `schedule`'s, or the last attempted if none do.
    ///
    /// Returns `schedule` unchanged if it has no candidates at all.
    pub fn neighbour(&mut self, schedule: &Schedule, num_tries: u32) -> Schedule {
        let total = schedule.candidate_count();
        if total == 0 {
            return schedule.clone();
        }

        let base_score = self.score(schedule);
        let mut last = schedule.clone();

        for _ in 0..num_tries.max(1) {
            let index = self.rng.gen_range(0..total);
            let Some(mutation) = schedule.candidate_at(index) else {
                continue;
            };
            let candidate = apply_mutation(schedule, &self.ctx, mutation);
            last = candidate.clone();
            if self.score(&candidate) != base_score {
                return candidate;
            }
        }
        last
    }
}

/// Applies `mutation` to a clone of `schedule`, returning the result.
fn apply_mutation(schedule: &Schedule, ctx: &FeasibilityContext, mutation: Mutation) -> Schedule {
    let mut next = schedule.clone();
    let truck_id = mutation.truck();
    match mutation {
        Mutation::AddTransition {
            truck,
            from,
            to,
            start,
            end,
            cargo,
            request,
        } => {
            if let Some(state) = next.trucks.get_mut(&truck) {
                if let Err(err) = apply_add_transition(
                    state,
                    &mut next.unplanned,
                    ctx,
                    truck,
                    from,
                    to,
                    start,
                    end,
                    cargo,
                    request,
                ) {
                    tracing::error!(
                        ?err,
                        ?truck,
                        ?cargo,
                        "precomputed AddTransition candidate failed to apply"
                    );
                    panic!("apply_add_transition failed on a precomputed candidate: {err}");
                }
            }
        }
        Mutation::RemoveTransitions { truck, start, end } => {
            let starting_terminal = next
                .trucks
                .get(&truck)
                .and_then(|s| s.unoccupied.first().map(|w| w.label().from))
                .unwrap_or(crate::ids::TerminalId::INVALID);
            if let Some(state) = next.trucks.get_mut(&truck) {
                apply_remove_transitions(
                    state,
                    &mut next.unplanned,
                    ctx,
                    truck,
                    starting_terminal,
                    start,
                    end,
                );
            }
        }
    }
    debug_assert!(next.trucks.contains_key(&truck_id));
    next
}
