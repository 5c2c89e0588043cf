//! Progress aggregation - totals derived fresh from plan and state

use crate::clock::clock;
use crate::plan::{Exercise, Plan};
use crate::state::PlanState;

/// Derived totals for the plan header
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub total_sets: u64,
    pub total_rest_seconds: u64,
}

impl Progress {
    pub fn compute(plan: &Plan, state: &PlanState) -> Self {
        Self {
            completed: state.completed_count(),
            total: plan.len(),
            total_sets: total_sets(&plan.exercises),
            total_rest_seconds: total_rest_seconds(&plan.exercises),
        }
    }

    /// Completed share in 0.0..=1.0, for bar widths
    pub fn fraction(&self) -> f64 {
        progress_fraction(self.completed, self.total)
    }

    /// Completed share as a rounded whole percentage
    pub fn percent(&self) -> u32 {
        progress_percent(self.completed, self.total)
    }

    /// Estimated rest time as `M:SS`
    pub fn rest_display(&self) -> String {
        clock(self.total_rest_seconds)
    }
}

/// Sum of sets, missing counts as 0
pub fn total_sets(exercises: &[Exercise]) -> u64 {
    exercises.iter().map(|e| e.sets_or_zero() as u64).sum()
}

/// Estimated rest across the whole plan.
///
/// Counts one rest period after every set, including the last set of the
/// last exercise. This is an upper estimate, not a measured duration.
pub fn total_rest_seconds(exercises: &[Exercise]) -> u64 {
    exercises
        .iter()
        .map(|e| e.rest() as u64 * e.sets_or_zero() as u64)
        .sum()
}

pub fn progress_fraction(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64
}

/// 0 for an empty plan
pub fn progress_percent(completed: usize, total: usize) -> u32 {
    (progress_fraction(completed, total) * 100.0).round() as u32
}
