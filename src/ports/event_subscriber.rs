//! EventSubscriber port - Interface for receiving domain events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler invoked for events of a subscribed type.
///
/// Handlers must be idempotent: the same decision can arrive more than
/// once, once per page load at minimum. A handler error is the
/// handler's problem alone; it must not stop delivery to the others.
///
/// # Example
///
/// ```ignore
/// struct AnalyticsGate { /* ... */ }
///
/// #[async_trait]
/// impl EventHandler for AnalyticsGate {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let payload: ConsentUpdated = event.payload_as()?;
///         // Open or close the gate...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "AnalyticsGate"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Processes one event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name, used when logging failures.
    fn name(&self) -> &'static str;
}

/// Port for registering event handlers.
///
/// A subscription lasts for the life of the bus; there is no
/// unsubscribe, because the gates live exactly as long as the page.
///
/// # Example
///
/// ```ignore
/// subscriber.subscribe(CONSENT_UPDATED, analytics_gate);
/// ```
pub trait EventSubscriber: Send + Sync {
    /// Registers a handler for every event of the given type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time checks that the traits stay object-safe
    #[allow(dead_code)]
    fn assert_handler_object_safe(_: &dyn EventHandler) {}

    #[allow(dead_code)]
    fn assert_subscriber_object_safe(_: &dyn EventSubscriber) {}
}
