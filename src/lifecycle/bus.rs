use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use super::event::{Event, EventKind};
use crate::error::Result;

/// A listener registered on the [`EventBus`].
pub trait EventSubscriber {
    /// Event kinds this subscriber wants, in the order it registers for them.
    fn subscribed_events(&self) -> Vec<EventKind>;

    /// Handle one event. An error aborts the rest of the dispatch.
    fn handle(&self, event: &Event) -> Result<()>;
}

/// Synchronous notification bus.
///
/// Listeners for a kind are invoked in registration order. A subscriber is
/// registered at most once per kind, so re-registering is a no-op.
/// Handlers may register further subscribers while an event is dispatched;
/// those only see subsequent events.
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<HashMap<EventKind, Vec<Rc<dyn EventSubscriber>>>>,
}

impl EventBus {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Register `subscriber` for every kind it asks for. Returns how many
    /// new registrations were made.
    pub fn add_subscriber(&self, subscriber: Rc<dyn EventSubscriber>) -> usize {
        let mut added = 0;
        for kind in subscriber.subscribed_events() {
            if self.add_listener(kind, Rc::clone(&subscriber)) {
                added += 1;
            }
        }
        added
    }

    /// Returns `false` if the subscriber was already listening to `kind`.
    pub fn add_listener(&self, kind: EventKind, subscriber: Rc<dyn EventSubscriber>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let entry = listeners.entry(kind).or_default();
        if entry.iter().any(|existing| Rc::ptr_eq(existing, &subscriber)) {
            return false;
        }
        entry.push(subscriber);
        true
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.borrow().get(&kind).map_or(0, Vec::len)
    }

    pub fn dispatch(&self, event: &Event) -> Result<()> {
        let kind = event.kind();
        // Snapshot so handlers can register listeners mid-dispatch.
        let listeners: Vec<Rc<dyn EventSubscriber>> =
            self.listeners.borrow().get(&kind).cloned().unwrap_or_default();

        tracing::debug!(event = %kind, listeners = listeners.len(), "dispatching event");

        for listener in listeners {
            listener.handle(event)?;
        }
        Ok(())
    }
}
