//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to the host environment:
//! - `events` - Event bus implementations (in-memory)
//! - `page` - Page context implementations
//! - `storage` - Cookie jar and key-value store implementations
//! - `surface` - Consent surface implementations (headless)

pub mod events;
pub mod page;
pub mod storage;
pub mod surface;

pub use events::InMemoryEventBus;
pub use page::StaticPageContext;
pub use storage::{
    CookieConsentStore, FileCookieJar, JsonFileStore, MemoryCookieJar, MemoryStore,
};
pub use surface::{HeadlessSurface, HeadlessThemeSwitcher};
