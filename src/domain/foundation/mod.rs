//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, event infrastructure, and error
//! types that form the vocabulary of the Noova privacy domain.

mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::SessionId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
