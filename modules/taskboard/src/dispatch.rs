//! Table of event handlers keyed by event kind.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use handoff_common::Notice;
use tracing::trace;

/// Events that can be routed by kind.
pub trait Keyed {
    type Kind: Copy + Eq + Hash + Debug;

    fn kind(&self) -> Self::Kind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<S, E> = Box<dyn FnMut(&mut S, &E) -> Vec<Notice> + Send>;

pub struct Dispatcher<S, E: Keyed> {
    next_id: u64,
    table: HashMap<E::Kind, Vec<(HandlerId, Handler<S, E>)>>,
}

impl<S, E: Keyed> Default for Dispatcher<S, E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            table: HashMap::new(),
        }
    }
}

impl<S, E: Keyed> Dispatcher<S, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, kind: E::Kind, handler: F) -> HandlerId
    where
        F: FnMut(&mut S, &E) -> Vec<Notice> + Send + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.table.entry(kind).or_default().push((id, Box::new(handler)));
        id
    }

    /// Returns false when `id` was not registered.
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        for handlers in self.table.values_mut() {
            if let Some(pos) = handlers.iter().position(|(h, _)| *h == id) {
                handlers.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn handler_count(&self, kind: E::Kind) -> usize {
        self.table.get(&kind).map_or(0, Vec::len)
    }

    /// Run every handler for the event's kind in registration order.
    /// Events with no handlers are dropped.
    pub fn dispatch(&mut self, state: &mut S, event: &E) -> Vec<Notice> {
        let kind = event.kind();
        let Some(handlers) = self.table.get_mut(&kind) else {
            trace!(?kind, "No handlers");
            return Vec::new();
        };
        let mut notices = Vec::new();
        for (_, handler) in handlers.iter_mut() {
            notices.extend(handler(state, event));
        }
        notices
    }
}
