//! Lifecycle controller: wires the classifier and accumulator to the bus.
//!
//! The tracker owns the accumulator (behind `Rc<RefCell<_>>` so the three
//! handler closures can share it; dispatch is single-threaded and
//! run-to-completion, so the borrows never overlap). `start` reloads
//! persisted stats and subscribes; `stop` unsubscribes exactly the tokens
//! `start` recorded. Starting twice without a stop is a guarded no-op so a
//! confused host cannot double-count.

use std::cell::RefCell;
use std::rc::Rc;

use crate::accumulator::StatsAccumulator;
use crate::bus::{Dispatcher, SubscriptionId};
use crate::classifier::classify_message;
use crate::host::{Directory, Settings};
use crate::store::DurableStore;
use crate::types::{EventKind, GatewayEvent};

/// Owns the accumulator and its event subscriptions.
pub struct StatsTracker {
    accumulator: Rc<RefCell<StatsAccumulator>>,
    directory: Rc<dyn Directory>,
    settings: Rc<dyn Settings>,
    subscriptions: Vec<SubscriptionId>,
}

impl StatsTracker {
    /// Build a tracker around a store and the host seams.
    ///
    /// The accumulator starts at the all-zero default; persisted stats are
    /// loaded by [`start`](Self::start).
    pub fn new(
        store: Box<dyn DurableStore>,
        directory: Rc<dyn Directory>,
        settings: Rc<dyn Settings>,
    ) -> Self {
        StatsTracker {
            accumulator: Rc::new(RefCell::new(StatsAccumulator::new(store))),
            directory,
            settings,
            subscriptions: Vec::new(),
        }
    }

    /// Shared handle to the accumulator, for the command surface.
    pub fn accumulator(&self) -> Rc<RefCell<StatsAccumulator>> {
        Rc::clone(&self.accumulator)
    }

    /// True while subscriptions are registered.
    pub fn is_running(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Reload persisted stats, then register the three event handlers.
    ///
    /// Re-entrant start without a stop is a no-op.
    pub fn start(&mut self, bus: &mut Dispatcher) {
        if self.is_running() {
            tracing::warn!("tracker already started, ignoring");
            return;
        }

        self.accumulator.borrow_mut().reload();

        let message_handler = {
            let acc = Rc::clone(&self.accumulator);
            let directory = Rc::clone(&self.directory);
            let settings = Rc::clone(&self.settings);
            Box::new(move |event: &GatewayEvent| {
                let GatewayEvent::MessageCreate(msg) = event else {
                    return;
                };
                if !settings.track_messages() {
                    return;
                }
                let Some(me) = directory.current_user_id() else {
                    return;
                };
                let deltas = classify_message(msg, &me, directory.as_ref());
                acc.borrow_mut().apply_message(deltas);
            })
        };

        let edit_handler = {
            let acc = Rc::clone(&self.accumulator);
            let directory = Rc::clone(&self.directory);
            let settings = Rc::clone(&self.settings);
            Box::new(move |event: &GatewayEvent| {
                let GatewayEvent::MessageUpdate(edit) = event else {
                    return;
                };
                if !settings.track_messages() {
                    return;
                }
                let Some(me) = directory.current_user_id() else {
                    return;
                };
                if edit.author_id == me {
                    acc.borrow_mut().apply_edit();
                }
            })
        };

        let reaction_handler = {
            let acc = Rc::clone(&self.accumulator);
            let directory = Rc::clone(&self.directory);
            let settings = Rc::clone(&self.settings);
            Box::new(move |event: &GatewayEvent| {
                let GatewayEvent::ReactionAdd(reaction) = event else {
                    return;
                };
                if !settings.track_reactions() {
                    return;
                }
                let Some(me) = directory.current_user_id() else {
                    return;
                };
                if reaction.user_id == me {
                    acc.borrow_mut().apply_reaction();
                }
            })
        };

        self.subscriptions = vec![
            bus.subscribe(EventKind::MessageCreate, message_handler),
            bus.subscribe(EventKind::MessageUpdate, edit_handler),
            bus.subscribe(EventKind::ReactionAdd, reaction_handler),
        ];
        tracing::info!("stats tracker started");
    }

    /// Remove the subscriptions registered by [`start`](Self::start).
    pub fn stop(&mut self, bus: &mut Dispatcher) {
        for id in self.subscriptions.drain(..) {
            bus.unsubscribe(id);
        }
        tracing::info!("stats tracker stopped");
    }
}
