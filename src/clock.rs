//! Clock formatting - seconds to "M:SS"

use crate::error::{Result, WidgetError};

/// Format seconds as `M:SS`. Minutes are unpadded and unbounded.
pub fn format_clock(seconds: i64) -> Result<String> {
    if seconds < 0 {
        return Err(WidgetError::InvalidArgument { seconds });
    }
    Ok(clock(seconds as u64))
}

/// Infallible variant for values that are non-negative by type
pub fn clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes_and_seconds() {
        assert_eq!(format_clock(125).unwrap(), "2:05");
    }

    #[test]
    fn test_format_under_a_minute() {
        assert_eq!(format_clock(59).unwrap(), "0:59");
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_clock(0).unwrap(), "0:00");
    }

    #[test]
    fn test_format_exact_minute() {
        assert_eq!(format_clock(180).unwrap(), "3:00");
    }

    #[test]
    fn test_format_long_duration_unpadded_minutes() {
        // 2h 5m 7s stays in minutes
        assert_eq!(format_clock(7507).unwrap(), "125:07");
    }

    #[test]
    fn test_format_negative_rejected() {
        assert_eq!(
            format_clock(-1),
            Err(WidgetError::InvalidArgument { seconds: -1 })
        );
    }
}
