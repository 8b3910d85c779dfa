//! In-process, synchronous event dispatcher.
//!
//! The dispatcher maps an event name to an ordered list of handlers:
//!
//! - `register` appends (duplicates allowed, each occurrence is invoked)
//! - `unregister` removes the first registration of that exact handler instance
//! - `unregister_all` clears every name
//! - `notify` invokes the handlers registered under the event's name, in
//!   registration order, on the caller's stack
//!
//! Handlers for different event types live in the same registry: each
//! registration is stored type-erased and recovered by downcasting to the
//! `SharedHandler<E>` of the notified event type.
//!
//! There is no internal locking. Mutation needs `&mut self`; hosts that share
//! a dispatcher across threads wrap it (e.g. `Mutex<EventDispatcher>`).

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use crate::handler::handler_address;
use crate::{DomainEvent, SharedHandler};

/// One entry in a dispatcher's handler list.
pub struct HandlerRegistration {
    handler: Box<dyn Any + Send + Sync>,
    address: usize,
    event_type: &'static str,
}

impl HandlerRegistration {
    fn new<E>(handler: SharedHandler<E>) -> Self
    where
        E: DomainEvent,
    {
        Self {
            address: handler_address(&handler),
            event_type: core::any::type_name::<E>(),
            handler: Box::new(handler),
        }
    }

    /// The registered handler, if it handles events of type `E`.
    pub fn handler<E>(&self) -> Option<&SharedHandler<E>>
    where
        E: DomainEvent,
    {
        self.handler.downcast_ref::<SharedHandler<E>>()
    }

    /// Whether this registration is exactly `handler` (same shared instance).
    pub fn is<E>(&self, handler: &SharedHandler<E>) -> bool
    where
        E: DomainEvent,
    {
        self.address == handler_address(handler) && self.handler::<E>().is_some()
    }

    /// Rust type name of the event this handler accepts.
    pub fn event_type(&self) -> &'static str {
        self.event_type
    }
}

impl core::fmt::Debug for HandlerRegistration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerRegistration")
            .field("event_type", &self.event_type)
            .field("address", &format_args!("{:#x}", self.address))
            .finish()
    }
}

/// Registry + synchronous fan-out of domain events to handlers.
///
/// Construct one explicitly and pass it to whoever raises events; there is no
/// process-wide instance.
#[derive(Default)]
pub struct EventDispatcher {
    event_handlers: HashMap<String, Vec<HandlerRegistration>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live view of the registry: event name → registrations in invocation order.
    pub fn event_handlers(&self) -> &HashMap<String, Vec<HandlerRegistration>> {
        &self.event_handlers
    }

    /// Handlers of type `E` registered under `event_name`, in invocation order.
    ///
    /// The returned `Arc`s are the registered instances, not copies.
    pub fn handlers<E>(&self, event_name: &str) -> Vec<SharedHandler<E>>
    where
        E: DomainEvent,
    {
        self.event_handlers
            .get(event_name)
            .map(|regs| regs.iter().filter_map(|r| r.handler::<E>().cloned()).collect())
            .unwrap_or_default()
    }

    /// Append `handler` to the list for `event_name`.
    pub fn register<E>(&mut self, event_name: impl Into<String>, handler: SharedHandler<E>)
    where
        E: DomainEvent,
    {
        let event_name = event_name.into();
        tracing::debug!(
            event_name = %event_name,
            event_type = core::any::type_name::<E>(),
            "registering event handler"
        );
        self.event_handlers
            .entry(event_name)
            .or_default()
            .push(HandlerRegistration::new(handler));
    }

    /// Remove the first registration of `handler` under `event_name`.
    ///
    /// Unknown names and handlers that were never registered are ignored.
    pub fn unregister<E>(&mut self, event_name: &str, handler: &SharedHandler<E>)
    where
        E: DomainEvent,
    {
        let Some(regs) = self.event_handlers.get_mut(event_name) else {
            tracing::trace!(event_name, "unregister: no handlers for event");
            return;
        };

        match regs.iter().position(|r| r.is(handler)) {
            Some(idx) => {
                regs.remove(idx);
                tracing::debug!(event_name, "unregistered event handler");
            }
            None => tracing::trace!(event_name, "unregister: handler not registered"),
        }
    }

    /// Drop every registration for every event name.
    pub fn unregister_all(&mut self) {
        tracing::debug!(events = self.event_handlers.len(), "unregistering all event handlers");
        self.event_handlers.clear();
    }

    /// Invoke every handler registered under the event's name, in order.
    ///
    /// Runs on the caller's stack and returns once the last handler returned.
    /// A panicking handler aborts the remaining ones for this call.
    pub fn notify<E>(&self, event: &E)
    where
        E: DomainEvent,
    {
        let event_name = event.event_name();
        let Some(regs) = self.event_handlers.get(event_name) else {
            tracing::trace!(event_name, "no handlers registered");
            return;
        };

        tracing::debug!(event_name, handlers = regs.len(), "notifying event handlers");
        for reg in regs {
            match reg.handler::<E>() {
                Some(handler) => handler.handle(event),
                None => tracing::warn!(
                    event_name,
                    expected = core::any::type_name::<E>(),
                    registered = reg.event_type(),
                    "skipping handler registered for a different event type"
                ),
            }
        }
    }
}

impl core::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let counts: BTreeMap<&str, usize> = self
            .event_handlers
            .iter()
            .map(|(name, regs)| (name.as_str(), regs.len()))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("event_handlers", &counts)
            .finish()
    }
}
