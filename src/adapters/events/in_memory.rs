//! In-memory event bus.
//!
//! The only delivery mechanism this crate ships. The whole subsystem
//! lives inside one page load, so publishing an envelope means running
//! the subscribed handlers right there, before `publish` returns. The
//! bus also keeps a capture log of everything published, which is how
//! tests observe the broadcast side of a flow.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// Synchronous, process-local event bus.
///
/// Delivery is deterministic: handlers run in subscription order,
/// inside the `publish` call. A failing handler is logged and skipped;
/// the remaining handlers still run and the publish still succeeds.
///
/// # Panics
///
/// Methods panic if an internal lock is poisoned, which only happens
/// after another thread panicked while holding it.
pub struct InMemoryEventBus {
    registry: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    captured: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(HashMap::new()),
            captured: RwLock::new(Vec::new()),
        }
    }

    // === Capture log ===

    /// Returns every captured envelope of the given type, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the capture lock is poisoned.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.captured
            .read()
            .expect("InMemoryEventBus: capture lock poisoned")
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    /// Returns how many envelopes have been published in total.
    ///
    /// # Panics
    ///
    /// Panics if the capture lock is poisoned.
    pub fn event_count(&self) -> usize {
        self.captured
            .read()
            .expect("InMemoryEventBus: capture lock poisoned")
            .len()
    }

    /// Returns true if at least one envelope of the given type was
    /// published.
    ///
    /// # Panics
    ///
    /// Panics if the capture lock is poisoned.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.captured
            .read()
            .expect("InMemoryEventBus: capture lock poisoned")
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.captured
            .write()
            .expect("InMemoryEventBus: capture lock poisoned")
            .push(event.clone());

        // Snapshot the subscriber list so no lock is held across await.
        let subscribers: Vec<Arc<dyn EventHandler>> = self
            .registry
            .read()
            .expect("InMemoryEventBus: registry lock poisoned")
            .get(&event.event_type)
            .cloned()
            .unwrap_or_default();

        tracing::debug!(
            event_type = %event.event_type,
            subscribers = subscribers.len(),
            "Dispatching event"
        );

        for handler in subscribers {
            // A failing handler must not stop delivery to the rest,
            // and must not fail the publish.
            if let Err(e) = handler.handle(event.clone()).await {
                tracing::warn!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    "Event handler failed: {}",
                    e
                );
            }
        }

        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.registry
            .write()
            .expect("InMemoryEventBus: registry lock poisoned")
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }
}
