//! Rest timer - per-exercise countdown state machine
//!
//! The timer itself is pure state. Driving it once per second is the job of
//! [`crate::ticker::TickSource`], owned by the card that owns the timer.

use crate::clock::clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Full rest remaining, not counting
    Idle,
    Running,
    /// Partially counted down, stopped
    Paused,
    /// Nothing left. A timer with zero rest starts here
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestTimer {
    initial: u32,
    time_left: u32,
    running: bool,
}

impl RestTimer {
    pub fn new(initial: u32) -> Self {
        Self {
            initial,
            time_left: initial,
            running: false,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else if self.time_left == 0 {
            TimerPhase::Expired
        } else if self.time_left == self.initial {
            TimerPhase::Idle
        } else {
            TimerPhase::Paused
        }
    }

    /// Begin counting. Returns false if nothing changed
    pub fn start(&mut self) -> bool {
        if self.running || self.time_left == 0 {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop counting, keeping the remaining time. Returns false if not running
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Pause when running, start otherwise
    pub fn toggle(&mut self) -> bool {
        if self.running { self.pause() } else { self.start() }
    }

    /// One elapsed second. Returns true when this tick expired the timer
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.running = false;
            return true;
        }
        false
    }

    /// Back to the full rest period, stopped
    pub fn reset(&mut self) {
        self.time_left = self.initial;
        self.running = false;
    }

    /// Adopt a new rest length. Any countdown in progress is discarded.
    /// Returns true if the value differed.
    ///
    /// `PlanView` never calls this: a changed rest value only arrives with a
    /// new plan, and a new plan gets new timers.
    pub fn reinitialize(&mut self, initial: u32) -> bool {
        if initial == self.initial {
            return false;
        }
        *self = Self::new(initial);
        true
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Share of the rest already counted down (0.0 for zero-length rests)
    pub fn elapsed_fraction(&self) -> f64 {
        if self.initial == 0 {
            return 0.0;
        }
        1.0 - self.time_left as f64 / self.initial as f64
    }

    /// Remaining time as `M:SS`
    pub fn display(&self) -> String {
        clock(self.time_left as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_idle() {
        let t = RestTimer::new(90);
        assert_eq!(t.phase(), TimerPhase::Idle);
        assert_eq!(t.time_left(), 90);
        assert!(!t.is_running());
    }

    #[test]
    fn test_zero_rest_is_expired_and_cannot_start() {
        let mut t = RestTimer::new(0);
        assert_eq!(t.phase(), TimerPhase::Expired);
        assert!(!t.start());
        assert!(!t.is_running());
    }

    #[test]
    fn test_full_cycle_expires() {
        let mut t = RestTimer::new(90);
        assert!(t.start());
        for _ in 0..89 {
            assert!(!t.tick());
            assert_eq!(t.phase(), TimerPhase::Running);
        }
        assert!(t.tick());
        assert_eq!(t.phase(), TimerPhase::Expired);
        assert_eq!(t.time_left(), 0);
        assert!(!t.is_running());
    }

    #[test]
    fn test_tick_after_expiry_is_noop() {
        let mut t = RestTimer::new(1);
        t.start();
        t.tick();
        assert!(!t.tick());
        assert_eq!(t.time_left(), 0);
    }

    #[test]
    fn test_tick_when_idle_is_noop() {
        let mut t = RestTimer::new(30);
        t.tick();
        assert_eq!(t.time_left(), 30);
    }

    #[test]
    fn test_reset_from_expired() {
        let mut t = RestTimer::new(3);
        t.start();
        for _ in 0..3 {
            t.tick();
        }
        t.reset();
        assert_eq!(t.phase(), TimerPhase::Idle);
        assert_eq!(t.time_left(), 3);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut t = RestTimer::new(60);
        t.start();
        t.tick();
        t.tick();
        assert!(t.pause());
        assert_eq!(t.phase(), TimerPhase::Paused);
        assert_eq!(t.time_left(), 58);
        t.tick();
        assert_eq!(t.time_left(), 58);
        assert!(t.start());
        assert_eq!(t.phase(), TimerPhase::Running);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut t = RestTimer::new(10);
        assert!(t.start());
        assert!(!t.start());
    }

    #[test]
    fn test_pause_when_not_running_is_noop() {
        let mut t = RestTimer::new(10);
        assert!(!t.pause());
        assert_eq!(t.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_start_from_expired_is_noop() {
        let mut t = RestTimer::new(1);
        t.start();
        t.tick();
        assert!(!t.start());
        assert_eq!(t.phase(), TimerPhase::Expired);
    }

    #[test]
    fn test_toggle() {
        let mut t = RestTimer::new(10);
        t.toggle();
        assert!(t.is_running());
        t.tick();
        t.toggle();
        assert_eq!(t.phase(), TimerPhase::Paused);
    }

    #[test]
    fn test_reinitialize_discards_countdown() {
        let mut t = RestTimer::new(60);
        t.start();
        t.tick();
        assert!(t.reinitialize(90));
        assert_eq!(t.phase(), TimerPhase::Idle);
        assert_eq!(t.time_left(), 90);
    }

    #[test]
    fn test_reinitialize_same_value_keeps_state() {
        let mut t = RestTimer::new(60);
        t.start();
        t.tick();
        assert!(!t.reinitialize(60));
        assert_eq!(t.time_left(), 59);
        assert!(t.is_running());
    }

    #[test]
    fn test_display_and_fraction() {
        let mut t = RestTimer::new(120);
        assert_eq!(t.display(), "2:00");
        t.start();
        for _ in 0..30 {
            t.tick();
        }
        assert_eq!(t.display(), "1:30");
        assert!((t.elapsed_fraction() - 0.25).abs() < 1e-9);
        assert_eq!(RestTimer::new(0).elapsed_fraction(), 0.0);
    }
}
