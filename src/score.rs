//! Multi-component scoring and the "is better" comparator, per §4.5.

use crate::feasibility::FeasibilityContext;
use crate::schedule::Schedule;
use crate::time::Duration;

/// `(deliveries, free trucks, total driving time)` for one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub deliveries: usize,
    pub free_trucks: usize,
    pub driving_time: Duration,
}

impl Score {
    pub fn of(schedule: &Schedule, ctx: &FeasibilityContext) -> Self {
        Self {
            deliveries: schedule.delivered_count(),
            free_trucks: schedule.free_truck_count(),
            driving_time: schedule.total_driving_time(ctx),
        }
    }

    fn delta_deliveries(self, other: Score) -> i64 {
        self.deliveries as i64 - other.deliveries as i64
    }

    fn delta_free_trucks(self, other: Score) -> i64 {
        self.free_trucks as i64 - other.free_trucks as i64
    }

    /// Positive when `self` drives less than `other`.
    fn delta_driving_time_improvement(self, other: Score) -> i64 {
        other.driving_time.seconds() - self.driving_time.seconds()
    }

    /// Weighted tiebreak used both by `is_better` and by the annealing
    /// acceptance rule.
    fn weighted_delta(self, other: Score) -> f64 {
        3.0 * self.delta_deliveries(other) as f64
            + 0.5 * self.delta_free_trucks(other) as f64
            + self.delta_driving_time_improvement(other) as f64
    }

    /// True iff `self` is strictly better than `other` under the tiered
    /// comparator of §4.5.
    pub fn is_better(self, other: Score) -> bool {
        let dd = self.delta_deliveries(other);
        if dd != 0 {
            return dd > 0;
        }
        let dt = self.delta_driving_time_improvement(other);
        if dt != 0 {
            return dt > 0;
        }
        self.weighted_delta(other) > 0.0
    }

    /// The annealing acceptance score: `3*ΔD + 0.05*ΔF`, plus `ΔT` only
    /// when `ΔD <= 0`.
    pub fn acceptance_delta(self, other: Score) -> f64 {
        let dd = self.delta_deliveries(other);
        let mut combined = 3.0 * dd as f64 + 0.05 * self.delta_free_trucks(other) as f64;
        if dd <= 0 {
            combined += self.delta_driving_time_improvement(other) as f64;
        }
        combined
    }
}
