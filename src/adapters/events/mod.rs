//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Synchronous, in-process bus; the only
//!   transport this crate needs

mod in_memory;

pub use in_memory::InMemoryEventBus;
