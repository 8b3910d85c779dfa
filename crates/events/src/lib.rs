//! Domain events and the in-process dispatcher that fans them out to handlers.

pub mod dispatcher;
pub mod event;
pub mod handler;

pub use dispatcher::{EventDispatcher, HandlerRegistration};
pub use event::DomainEvent;
pub use handler::{EventHandler, SharedHandler};
