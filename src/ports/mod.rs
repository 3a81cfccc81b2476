//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports (async - may touch disk)
//!
//! - `ConsentStore` - Single source of truth for the consent decision
//! - `CookieJar` - Named cookie access with expiry/path/SameSite handling
//! - `KeyValueStore` - Origin- and tab-scoped string storage
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events (async)
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Host Environment Ports (sync - instantaneous in any real host)
//!
//! - `PageContext` - Current path, title, and referrer
//! - `ConsentSurface` - Banner, overlay, modal, and toggle anchors
//! - `ThemeSwitcher` - Visual theme application
//!
//! The `codec` module carries the lenient decode contract every stored
//! value is read under.

pub mod codec;

mod consent_store;
mod consent_surface;
mod cookie_jar;
mod event_publisher;
mod event_subscriber;
mod key_value_store;
mod page_context;
mod theme_switcher;

pub use consent_store::ConsentStore;
pub use consent_surface::ConsentSurface;
pub use cookie_jar::{CookieAttributes, CookieJar, SameSite};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use key_value_store::{KeyValueStore, StorageError};
pub use page_context::PageContext;
pub use theme_switcher::ThemeSwitcher;
