//! Plan view controller - applies user actions and ticks, produces frames
//!
//! All mutation goes through `&mut self`, so actions and ticks are applied
//! one at a time on a single timeline.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::error::Result;
use crate::frame::{self, Frame};
use crate::plan::Plan;
use crate::state::{BoundsPolicy, PlanState};
use crate::ticker::{Tick, TickDriver};
use crate::timer::RestTimer;

/// Fixed at construction, never changed afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetConfig {
    pub bounds: BoundsPolicy,
    /// Release tick sources while the widget is hidden
    pub pause_when_hidden: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            bounds: BoundsPolicy::default(),
            pause_when_hidden: true,
        }
    }
}

/// A user action on one exercise card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleComplete(usize),
    ToggleExpand(usize),
    StartTimer(usize),
    PauseTimer(usize),
    ToggleTimer(usize),
    ResetTimer(usize),
}

impl Action {
    pub fn position(&self) -> usize {
        match *self {
            Action::ToggleComplete(p)
            | Action::ToggleExpand(p)
            | Action::StartTimer(p)
            | Action::PauseTimer(p)
            | Action::ToggleTimer(p)
            | Action::ResetTimer(p) => p,
        }
    }
}

/// Timer plus the tick source driving it
struct Card<S> {
    timer: RestTimer,
    epoch: u64,
    source: Option<S>,
}

impl<S> Card<S> {
    fn new(rest: u32) -> Self {
        Self {
            timer: RestTimer::new(rest),
            epoch: 0,
            source: None,
        }
    }
}

struct Session<S> {
    id: u64,
    plan: Arc<Plan>,
    date: NaiveDate,
    state: PlanState,
    cards: Vec<Card<S>>,
}

pub struct PlanView<D: TickDriver> {
    config: WidgetConfig,
    driver: D,
    visible: bool,
    next_session: u64,
    session: Option<Session<D::Source>>,
}

impl<D: TickDriver> PlanView<D> {
    pub fn new(config: WidgetConfig, driver: D) -> Self {
        Self {
            config,
            driver,
            visible: true,
            next_session: 1,
            session: None,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    pub fn plan(&self) -> Option<&Arc<Plan>> {
        self.session.as_ref().map(|s| &s.plan)
    }

    /// Host delivered a plan. The same plan again is a no-op; a different
    /// one replaces the session and cancels every tick source
    pub fn deliver(&mut self, plan: Arc<Plan>) {
        self.deliver_on(plan, Local::now().date_naive());
    }

    pub fn deliver_on(&mut self, plan: Arc<Plan>, date: NaiveDate) {
        if let Some(current) = &self.session {
            if Arc::ptr_eq(&current.plan, &plan) {
                debug!("Plan redelivered unchanged, keeping session {}", current.id);
                return;
            }
            info!("Plan replaced, discarding session {}", current.id);
        }

        let id = self.next_session;
        self.next_session += 1;
        info!("Plan '{}' loaded as session {} ({} exercises)", plan.name, id, plan.len());

        let cards = plan.exercises.iter().map(|ex| Card::new(ex.rest())).collect();
        // Old session (and its sources) dropped here
        self.session = Some(Session {
            id,
            state: PlanState::new(plan.len(), self.config.bounds),
            plan,
            date,
            cards,
        });
    }

    /// Apply a user action. Ignored while no plan is loaded
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        let ticking = self.ticking();
        let Some(session) = self.session.as_mut() else {
            debug!("Ignoring {:?}: no plan loaded", action);
            return Ok(());
        };

        match action {
            Action::ToggleComplete(p) => session.state.toggle_completed(p),
            Action::ToggleExpand(p) => session.state.toggle_expanded(p),
            Action::StartTimer(p)
            | Action::PauseTimer(p)
            | Action::ToggleTimer(p)
            | Action::ResetTimer(p) => {
                if !session.state.in_bounds(p)? {
                    return Ok(());
                }
                let card = &mut session.cards[p];
                match action {
                    Action::StartTimer(_) => {
                        card.timer.start();
                    }
                    Action::PauseTimer(_) => {
                        card.timer.pause();
                    }
                    Action::ToggleTimer(_) => {
                        card.timer.toggle();
                    }
                    _ => card.timer.reset(),
                }
                reconcile(&self.driver, ticking, session.id, p, card);
                Ok(())
            }
        }
    }

    /// Apply one tick. Ticks from stale or replaced sources are dropped
    pub fn apply_tick(&mut self, tick: Tick) {
        let ticking = self.ticking();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let live = session.id == tick.session
            && session
                .cards
                .get(tick.position)
                .is_some_and(|c| c.source.is_some() && c.epoch == tick.epoch);
        if !live {
            debug!("Dropping stale tick {:?}", tick);
            return;
        }

        let card = &mut session.cards[tick.position];
        if card.timer.tick() {
            info!(
                "Rest over for '{}'",
                session.plan.exercises[tick.position].name
            );
        }
        reconcile(&self.driver, ticking, session.id, tick.position, card);
    }

    /// Host visibility changed
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        debug!("Widget visible: {}", visible);

        let ticking = self.ticking();
        if let Some(session) = self.session.as_mut() {
            for (position, card) in session.cards.iter_mut().enumerate() {
                reconcile(&self.driver, ticking, session.id, position, card);
            }
        }
    }

    pub fn timer(&self, position: usize) -> Option<&RestTimer> {
        self.session
            .as_ref()
            .and_then(|s| s.cards.get(position))
            .map(|c| &c.timer)
    }

    pub fn state(&self) -> Option<&PlanState> {
        self.session.as_ref().map(|s| &s.state)
    }

    /// Number of tick sources currently held
    pub fn active_sources(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |s| s.cards.iter().filter(|c| c.source.is_some()).count())
    }

    /// Current frame, derived from live state
    pub fn frame(&self) -> Frame {
        match &self.session {
            None => Frame::Waiting,
            Some(s) => frame::build(&s.plan, &s.state, s.cards.iter().map(|c| &c.timer), s.date),
        }
    }

    fn ticking(&self) -> bool {
        self.visible || !self.config.pause_when_hidden
    }
}

/// Make the card hold a tick source iff its timer should be counting.
/// Each acquire or release bumps the epoch, invalidating queued ticks
fn reconcile<D: TickDriver>(
    driver: &D,
    ticking: bool,
    session: u64,
    position: usize,
    card: &mut Card<D::Source>,
) {
    let want = ticking && card.timer.is_running();
    match (want, card.source.is_some()) {
        (true, false) => {
            card.epoch += 1;
            card.source = Some(driver.acquire(Tick {
                session,
                position,
                epoch: card.epoch,
            }));
        }
        (false, true) => {
            card.epoch += 1;
            card.source = None;
        }
        _ => {}
    }
}
