//! Tick sources - one periodic 1-second source per running timer
//!
//! A source lives exactly as long as the value returned by
//! [`TickDriver::acquire`]. Dropping it stops the ticks.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

/// Tick interval for rest timers
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identity of the source that produced a tick.
///
/// The controller applies a tick only when all three fields match the live
/// card, so ticks from a cancelled or replaced source are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tick {
    pub session: u64,
    pub position: usize,
    pub epoch: u64,
}

/// Produces tick sources. The returned guard releases the source on drop
pub trait TickDriver {
    type Source;

    fn acquire(&self, tick: Tick) -> Self::Source;
}

/// Runs each source as a tokio task feeding a shared channel
#[derive(Debug, Clone)]
pub struct TokioDriver {
    tx: UnboundedSender<Tick>,
}

impl TokioDriver {
    pub fn new() -> (Self, UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TickDriver for TokioDriver {
    type Source = TickSource;

    fn acquire(&self, tick: Tick) -> TickSource {
        TickSource::spawn(tick, self.tx.clone(), TICK_PERIOD)
    }
}

/// Handle to a running tick task. Aborts the task on drop
#[derive(Debug)]
pub struct TickSource {
    tick: Tick,
    handle: JoinHandle<()>,
}

impl TickSource {
    /// Must be called inside a tokio runtime
    pub fn spawn(tick: Tick, tx: UnboundedSender<Tick>, period: Duration) -> Self {
        debug!("Tick source acquired: {:?}", tick);
        let handle = tokio::spawn(async move {
            // First tick one full period after start, not immediately
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(tick).is_err() {
                    break; // receiver gone
                }
            }
        });
        Self { tick, handle }
    }
}

impl Drop for TickSource {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("Tick source released: {:?}", self.tick);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tick() -> Tick {
        Tick {
            session: 1,
            position: 0,
            epoch: 1,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_ticks_every_second() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _source = TickSource::spawn(tick(), tx, TICK_PERIOD);

        time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(rx.try_recv().unwrap(), tick());
        assert_eq!(rx.try_recv().unwrap(), tick());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_immediate_tick() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _source = TickSource::spawn(tick(), tx, TICK_PERIOD);

        time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let source = TickSource::spawn(tick(), tx, TICK_PERIOD);

        time::sleep(Duration::from_millis(1500)).await;
        drop(source);
        time::sleep(Duration::from_secs(5)).await;

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_sources_are_independent() {
        let (driver, mut rx) = TokioDriver::new();
        let a = driver.acquire(tick());
        let b = driver.acquire(Tick { position: 1, ..tick() });

        time::sleep(Duration::from_millis(1500)).await;
        drop(a);
        time::sleep(Duration::from_secs(1)).await;
        drop(b);

        let mut got = Vec::new();
        while let Ok(t) = rx.try_recv() {
            got.push(t.position);
        }
        got.sort();
        assert_eq!(got, vec![0, 1, 1]);
    }
}
