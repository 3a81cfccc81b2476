//! ConsentStore port - Interface for persisting the consent decision.
//!
//! The single source of truth for whether and what a visitor consented
//! to. Exactly one component writes through this port (the consent
//! controller); everything else learns of changes through events.

use async_trait::async_trait;

use crate::domain::consent::ConsentRecord;

use super::StorageError;

/// Port for loading and saving the consent decision.
///
/// Implementations must ensure:
/// - A missing, expired, or undecodable stored record loads as `Ok(None)`
/// - `save` replaces the stored record whole and resets its lifetime
#[async_trait]
pub trait ConsentStore: Send + Sync {
    /// Load the stored decision, if a readable one exists.
    async fn load(&self) -> Result<Option<ConsentRecord>, StorageError>;

    /// Persist a decision, replacing any previous one.
    async fn save(&self, record: &ConsentRecord) -> Result<(), StorageError>;
}
