use std::sync::Arc;

use crate::DomainEvent;

/// Observer invoked synchronously with a domain event.
///
/// Handlers perform side effects only (logging, notifications, projection
/// updates, audit writes). There is no return contract: a handler that cannot
/// do its job should log and move on. Panicking propagates out of
/// `EventDispatcher::notify` and skips the handlers registered after it.
pub trait EventHandler<E>: Send + Sync
where
    E: DomainEvent,
{
    fn handle(&self, event: &E);
}

/// Shared handler reference, as stored by the dispatcher.
///
/// Identity (for `unregister`) is the address of the shared allocation, so
/// clones of the same `Arc` refer to the same handler.
pub type SharedHandler<E> = Arc<dyn EventHandler<E>>;

/// Address of the shared allocation behind a handler (vtable ignored).
pub(crate) fn handler_address<E>(handler: &SharedHandler<E>) -> usize
where
    E: DomainEvent,
{
    Arc::as_ptr(handler) as *const () as usize
}
