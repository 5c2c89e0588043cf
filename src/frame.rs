//! Frame - what a rendering adapter needs to paint one frame
//!
//! Built from scratch on every observation; nothing here is cached.

use chrono::NaiveDate;

use crate::clock::clock;
use crate::plan::{Exercise, ExerciseKey, Plan};
use crate::progress::Progress;
use crate::state::PlanState;
use crate::timer::{RestTimer, TimerPhase};

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Plan not delivered yet
    Waiting,
    /// Plan delivered with no exercises
    EmptyPlan { name: String },
    Plan(PlanFrame),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanFrame {
    pub header: HeaderFrame,
    pub cards: Vec<CardFrame>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFrame {
    pub name: String,
    pub date: NaiveDate,
    pub completed: usize,
    pub total: usize,
    pub total_sets: u64,
    /// Estimated rest, `M:SS`
    pub est_rest: String,
    pub percent: u32,
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardFrame {
    pub key: ExerciseKey,
    /// "n/total"
    pub index_label: String,
    pub completed: bool,
    pub expanded: bool,
    pub sets_reps: Option<String>,
    pub weight: Option<String>,
    pub rest: Option<String>,
    pub notes: Option<String>,
    pub timer: TimerFrame,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerFrame {
    pub display: String,
    pub phase: TimerPhase,
    pub fraction: f64,
    /// False for zero-length rests
    pub usable: bool,
}

impl TimerFrame {
    fn of(timer: &RestTimer) -> Self {
        Self {
            display: timer.display(),
            phase: timer.phase(),
            fraction: timer.elapsed_fraction(),
            usable: timer.initial() > 0,
        }
    }
}

pub(crate) fn build<'a>(
    plan: &Plan,
    state: &PlanState,
    timers: impl Iterator<Item = &'a RestTimer>,
    date: NaiveDate,
) -> Frame {
    if plan.is_empty() {
        return Frame::EmptyPlan {
            name: plan.name.clone(),
        };
    }

    let progress = Progress::compute(plan, state);
    let header = HeaderFrame {
        name: plan.name.clone(),
        date,
        completed: progress.completed,
        total: progress.total,
        total_sets: progress.total_sets,
        est_rest: progress.rest_display(),
        percent: progress.percent(),
        fraction: progress.fraction(),
    };

    let total = plan.len();
    let cards = plan
        .exercises
        .iter()
        .zip(timers)
        .enumerate()
        .map(|(position, (ex, timer))| CardFrame {
            key: ExerciseKey {
                name: ex.name.clone(),
                position,
            },
            index_label: format!("{}/{}", position + 1, total),
            completed: state.is_completed(position),
            expanded: state.is_expanded(position),
            sets_reps: sets_reps(ex),
            weight: ex.weight().map(str::to_owned),
            rest: ex.rest_seconds.map(|s| clock(s as u64)),
            notes: ex.notes().map(str::to_owned),
            timer: TimerFrame::of(timer),
        })
        .collect();

    Frame::Plan(PlanFrame { header, cards })
}

fn sets_reps(ex: &Exercise) -> Option<String> {
    match (ex.sets, ex.reps()) {
        (Some(sets), Some(reps)) => Some(format!("{} × {}", sets, reps)),
        (Some(sets), None) => Some(format!("{} sets", sets)),
        (None, Some(reps)) => Some(format!("{} reps", reps)),
        (None, None) => None,
    }
}
