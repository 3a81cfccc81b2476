//! Consent domain module.
//!
//! Models a visitor's cookie decision and the banner/modal flow that
//! captures it. Persistence and presentation live behind ports; this
//! module is pure state.
//!
//! # Events
//!
//! - `ConsentUpdated` - Published after every decision is persisted

mod errors;
mod events;
mod flow;
mod record;

pub use errors::ConsentError;
pub use events::{ConsentUpdated, CONSENT_UPDATED};
pub use flow::{BannerPhase, ConsentFlow, ModalState};
pub use record::{ConsentRecord, ConsentSelection, CookieCategory};
