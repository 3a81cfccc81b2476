//! Storage Adapters
//!
//! Implementations of the storage ports, one pair per backend.
//!
//! ## Available Adapters
//!
//! - **MemoryStore / MemoryCookieJar** - In-process (testing, and the
//!   tab-scoped store)
//! - **JsonFileStore / FileCookieJar** - JSON documents on disk
//! - **CookieConsentStore** - The consent decision, over any `CookieJar`
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{CookieConsentStore, FileCookieJar, JsonFileStore};
//!
//! // Durable: JSON files on disk
//! let local = JsonFileStore::new("./data/local-storage.json");
//! let jar = Arc::new(FileCookieJar::new("./data/cookies.json"));
//!
//! let consent = CookieConsentStore::new(jar, "noova_cookie_consent", 365);
//! ```

mod cookie_consent_store;
mod in_memory;
mod json_file;

pub use cookie_consent_store::CookieConsentStore;
pub use in_memory::{MemoryCookieJar, MemoryStore};
pub use json_file::{FileCookieJar, JsonFileStore};
