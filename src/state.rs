//! Plan state - completed set and the single expanded card

use std::collections::BTreeSet;

use tracing::warn;

use crate::error::{Result, WidgetError};

/// What to do with a position outside the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Fail with `OutOfRange`
    Strict,
    /// Log and ignore
    Lenient,
}

impl Default for BoundsPolicy {
    /// Strict in debug builds, lenient in release builds
    fn default() -> Self {
        if cfg!(debug_assertions) {
            BoundsPolicy::Strict
        } else {
            BoundsPolicy::Lenient
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlanState {
    len: usize,
    policy: BoundsPolicy,
    completed: BTreeSet<usize>,
    expanded: Option<usize>,
}

impl PlanState {
    pub fn new(len: usize, policy: BoundsPolicy) -> Self {
        Self {
            len,
            policy,
            completed: BTreeSet::new(),
            expanded: None,
        }
    }

    /// Flip completion of `position`
    pub fn toggle_completed(&mut self, position: usize) -> Result<()> {
        if !self.in_bounds(position)? {
            return Ok(());
        }
        if !self.completed.remove(&position) {
            self.completed.insert(position);
        }
        Ok(())
    }

    /// Expand `position`, or collapse it if it is already expanded
    pub fn toggle_expanded(&mut self, position: usize) -> Result<()> {
        if !self.in_bounds(position)? {
            return Ok(());
        }
        self.expanded = if self.expanded == Some(position) {
            None
        } else {
            Some(position)
        };
        Ok(())
    }

    pub fn is_completed(&self, position: usize) -> bool {
        self.completed.contains(&position)
    }

    pub fn is_expanded(&self, position: usize) -> bool {
        self.expanded == Some(position)
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Ok(true) if in range, Ok(false) if out of range under the lenient policy
    pub(crate) fn in_bounds(&self, position: usize) -> Result<bool> {
        if position < self.len {
            return Ok(true);
        }
        match self.policy {
            BoundsPolicy::Strict => Err(WidgetError::OutOfRange {
                position,
                len: self.len,
            }),
            BoundsPolicy::Lenient => {
                warn!("Ignoring out-of-range exercise position {} (len {})", position, self.len);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(len: usize) -> PlanState {
        PlanState::new(len, BoundsPolicy::Strict)
    }

    #[test]
    fn test_initially_empty() {
        let s = state(3);
        assert_eq!(s.completed_count(), 0);
        assert_eq!(s.expanded(), None);
    }

    #[test]
    fn test_toggle_completed_twice_is_identity() {
        for p in 0..4 {
            let mut s = state(4);
            s.toggle_completed(1).unwrap();
            let before = s.completed().clone();
            s.toggle_completed(p).unwrap();
            s.toggle_completed(p).unwrap();
            assert_eq!(s.completed(), &before);
        }
    }

    #[test]
    fn test_toggle_completed_marks_and_unmarks() {
        let mut s = state(2);
        s.toggle_completed(0).unwrap();
        assert!(s.is_completed(0));
        assert!(!s.is_completed(1));
        s.toggle_completed(0).unwrap();
        assert!(!s.is_completed(0));
    }

    #[test]
    fn test_accordion_switches_card() {
        let mut s = state(3);
        s.toggle_expanded(0).unwrap();
        s.toggle_expanded(2).unwrap();
        assert_eq!(s.expanded(), Some(2));
        assert!(!s.is_expanded(0));
        assert!(!s.is_expanded(1));
    }

    #[test]
    fn test_accordion_same_card_collapses() {
        let mut s = state(3);
        s.toggle_expanded(1).unwrap();
        s.toggle_expanded(1).unwrap();
        assert_eq!(s.expanded(), None);
    }

    #[test]
    fn test_completion_and_expansion_independent() {
        let mut s = state(2);
        s.toggle_expanded(0).unwrap();
        s.toggle_completed(1).unwrap();
        assert!(s.is_expanded(0));
        assert!(s.is_completed(1));
    }

    #[test]
    fn test_strict_out_of_range() {
        let mut s = state(2);
        assert_eq!(
            s.toggle_completed(2),
            Err(WidgetError::OutOfRange { position: 2, len: 2 })
        );
        assert_eq!(
            s.toggle_expanded(5),
            Err(WidgetError::OutOfRange { position: 5, len: 2 })
        );
        assert_eq!(s.completed_count(), 0);
        assert_eq!(s.expanded(), None);
    }

    #[test]
    fn test_lenient_out_of_range_is_noop() {
        let mut s = PlanState::new(2, BoundsPolicy::Lenient);
        s.toggle_expanded(1).unwrap();
        assert!(s.toggle_completed(7).is_ok());
        assert!(s.toggle_expanded(7).is_ok());
        assert_eq!(s.completed_count(), 0);
        assert_eq!(s.expanded(), Some(1));
    }

    #[test]
    fn test_empty_plan_rejects_every_position() {
        let mut s = state(0);
        assert!(s.toggle_completed(0).is_err());
    }

    #[test]
    fn test_default_policy_matches_build() {
        let expected = if cfg!(debug_assertions) {
            BoundsPolicy::Strict
        } else {
            BoundsPolicy::Lenient
        };
        assert_eq!(BoundsPolicy::default(), expected);
    }
}
