//! Host bridge - one-shot plan delivery
//!
//! The host hands over the plan exactly once. The sender is consumed on
//! delivery, so a second delivery through the same bridge cannot compile.

use std::sync::Arc;

use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{info, warn};

use crate::plan::Plan;

pub fn channel() -> (PlanSender, PlanReceiver) {
    let (tx, rx) = oneshot::channel();
    (PlanSender { tx }, PlanReceiver { rx: Some(rx) })
}

#[derive(Debug)]
pub struct PlanSender {
    tx: oneshot::Sender<Arc<Plan>>,
}

impl PlanSender {
    /// Returns false if the widget is already gone
    pub fn deliver(self, plan: Plan) -> bool {
        info!("Delivering plan '{}' ({} exercises)", plan.name, plan.len());
        self.tx.send(Arc::new(plan)).is_ok()
    }
}

#[derive(Debug)]
pub struct PlanReceiver {
    rx: Option<oneshot::Receiver<Arc<Plan>>>,
}

impl PlanReceiver {
    /// Non-blocking check for the plan. Yields it at most once
    pub fn try_take(&mut self) -> Option<Arc<Plan>> {
        let rx = self.rx.as_mut()?;
        match rx.try_recv() {
            Ok(plan) => {
                self.rx = None;
                Some(plan)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                warn!("Host dropped without delivering a plan");
                self.rx = None;
                None
            }
        }
    }

    /// Wait for the plan. None if the host went away
    pub async fn arrived(mut self) -> Option<Arc<Plan>> {
        let rx = self.rx.take()?;
        rx.await.ok()
    }

    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }
}
