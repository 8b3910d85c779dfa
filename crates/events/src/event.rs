use chrono::{DateTime, Utc};

/// A domain event: an immutable fact carrying a payload and the moment it
/// happened.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **named** (`EVENT_NAME` is the key handlers are registered under)
/// - **timestamped** at construction (wall clock, never caller-supplied)
pub trait DomainEvent: core::fmt::Debug + Send + Sync + 'static {
    /// Payload type exposed to handlers.
    type Data;

    /// Stable event name (e.g. `"CustomerCreatedEvent"`).
    const EVENT_NAME: &'static str;

    /// The event payload.
    fn event_data(&self) -> &Self::Data;

    /// When the event occurred.
    fn date_time_occurred(&self) -> DateTime<Utc>;

    /// Name used to look up handlers in an `EventDispatcher`.
    fn event_name(&self) -> &'static str {
        Self::EVENT_NAME
    }
}
