//! EventPublisher port - Interface for broadcasting domain events.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port through which decisions get broadcast.
///
/// Delivery is at-least-once; handlers must tolerate seeing the same
/// decision twice.
///
/// # Example
///
/// ```ignore
/// let event = ConsentUpdated::for_record(cookie_name, record);
/// publisher.publish(event.to_envelope()).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes a single enveloped event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}
