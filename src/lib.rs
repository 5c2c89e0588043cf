//! liftplan - Interactive workout plan widget
//!
//! Core state machine (plan state, rest timers, progress) with thin
//! rendering skins on top.

pub mod clock;
pub mod error;
pub mod frame;
pub mod host;
pub mod plan;
pub mod progress;
pub mod state;
pub mod text;
pub mod ticker;
pub mod timer;
pub mod tui;
pub mod view;

pub use error::WidgetError;
pub use plan::{Exercise, Plan, Reps};
pub use view::{Action, PlanView, WidgetConfig};
