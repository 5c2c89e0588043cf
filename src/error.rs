//! Error types for the widget core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("exercise position {position} out of range (plan has {len} exercises)")]
    OutOfRange { position: usize, len: usize },

    #[error("duration must be non-negative, got {seconds}s")]
    InvalidArgument { seconds: i64 },
}

pub type Result<T> = std::result::Result<T, WidgetError>;
