//! Consent flow state machines.
//!
//! Tracks where a visitor is in the consent capture flow. The flow is
//! never persisted: every page load starts a fresh one and resolves it
//! from whatever record the store holds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};

use super::ConsentRecord;

/// Where the visitor is with respect to the consent banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BannerPhase {
    /// Nothing known yet; storage has not been consulted.
    #[default]
    Unknown,
    /// No stored decision was found and the banner is prompting.
    BannerShown,
    /// A decision exists (stored earlier or just made).
    Decided,
}

impl StateMachine for BannerPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use BannerPhase::*;
        matches!(
            (self, target),
            // Returning visitors skip the banner entirely.
            (Unknown, BannerShown) | (Unknown, Decided) | (BannerShown, Decided)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use BannerPhase::*;
        match self {
            Unknown => vec![BannerShown, Decided],
            BannerShown => vec![Decided],
            Decided => vec![],
        }
    }
}

impl fmt::Display for BannerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BannerPhase::Unknown => "Unknown",
            BannerPhase::BannerShown => "BannerShown",
            BannerPhase::Decided => "Decided",
        };
        write!(f, "{}", s)
    }
}

/// Whether the settings modal is open. Orthogonal to the banner phase:
/// the modal can open before or after a decision exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

impl StateMachine for ModalState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ModalState::*;
        matches!((self, target), (Closed, Open) | (Open, Closed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ModalState::*;
        match self {
            Closed => vec![Open],
            Open => vec![Closed],
        }
    }
}

impl fmt::Display for ModalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModalState::Closed => "Closed",
            ModalState::Open => "Open",
        };
        write!(f, "{}", s)
    }
}

/// In-memory consent flow for a single page load.
///
/// # Invariants
///
/// - `phase == Decided` exactly when `consent` is present
/// - Re-deciding (via the settings modal) replaces the record whole
/// - Modal open/close is idempotent; redundant calls change nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentFlow {
    /// Banner progress for this page load.
    phase: BannerPhase,

    /// Settings modal visibility.
    modal: ModalState,

    /// The decision in effect, once one exists.
    consent: Option<ConsentRecord>,
}

impl ConsentFlow {
    /// Creates a fresh flow with nothing known yet.
    pub fn new() -> Self {
        Self {
            phase: BannerPhase::Unknown,
            modal: ModalState::Closed,
            consent: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the banner phase.
    pub fn phase(&self) -> BannerPhase {
        self.phase
    }

    /// Returns the modal state.
    pub fn modal(&self) -> ModalState {
        self.modal
    }

    /// Returns the decision in effect, if any.
    pub fn consent(&self) -> Option<&ConsentRecord> {
        self.consent.as_ref()
    }

    /// Returns true once a decision exists.
    pub fn has_decided(&self) -> bool {
        self.phase == BannerPhase::Decided
    }

    /// Returns true while the banner is prompting.
    ///
    /// Closing the settings modal keeps the shared overlay up while this
    /// is true, because the banner still needs it.
    pub fn banner_active(&self) -> bool {
        self.phase == BannerPhase::BannerShown
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolves the flow from a decision found in storage.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the banner already prompted or a
    ///   decision was already applied
    pub fn resolve_existing(&mut self, record: ConsentRecord) -> Result<(), DomainError> {
        if self.phase != BannerPhase::Unknown {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot resolve stored consent from phase {}", self.phase),
            ));
        }
        self.phase = BannerPhase::Decided;
        self.consent = Some(record);
        Ok(())
    }

    /// Marks the banner as prompting.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if a decision already exists
    pub fn show_banner(&mut self) -> Result<(), DomainError> {
        if !self.phase.can_transition_to(&BannerPhase::BannerShown) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Banner can only prompt before a decision exists",
            ));
        }
        self.phase = BannerPhase::BannerShown;
        Ok(())
    }

    /// Records a decision, replacing any previous one.
    ///
    /// Valid from any phase: the banner buttons decide from
    /// `BannerShown`, and the settings modal re-decides from `Decided`.
    /// Returns the record that was previously in effect.
    pub fn decide(&mut self, record: ConsentRecord) -> Option<ConsentRecord> {
        self.phase = BannerPhase::Decided;
        self.consent.replace(record)
    }

    /// Opens the settings modal. Returns false if it was already open.
    pub fn open_modal(&mut self) -> bool {
        if !self.modal.can_transition_to(&ModalState::Open) {
            return false;
        }
        self.modal = ModalState::Open;
        true
    }

    /// Closes the settings modal. Returns false if it was already closed.
    pub fn close_modal(&mut self) -> bool {
        if !self.modal.can_transition_to(&ModalState::Closed) {
            return false;
        }
        self.modal = ModalState::Closed;
        true
    }
}

impl Default for ConsentFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn record() -> ConsentRecord {
        ConsentRecord::accept_all(Timestamp::now())
    }

    // BannerPhase transitions

    #[test]
    fn unknown_can_show_banner_or_decide() {
        assert!(BannerPhase::Unknown.can_transition_to(&BannerPhase::BannerShown));
        assert!(BannerPhase::Unknown.can_transition_to(&BannerPhase::Decided));
    }

    #[test]
    fn banner_shown_can_only_decide() {
        assert!(BannerPhase::BannerShown.can_transition_to(&BannerPhase::Decided));
        assert!(!BannerPhase::BannerShown.can_transition_to(&BannerPhase::Unknown));
    }

    #[test]
    fn decided_is_terminal() {
        assert!(BannerPhase::Decided.is_terminal());
    }

    #[test]
    fn modal_toggles_between_closed_and_open() {
        assert!(ModalState::Closed.can_transition_to(&ModalState::Open));
        assert!(ModalState::Open.can_transition_to(&ModalState::Closed));
        assert!(!ModalState::Open.can_transition_to(&ModalState::Open));
    }

    // Flow construction

    #[test]
    fn new_flow_knows_nothing() {
        let flow = ConsentFlow::new();
        assert_eq!(flow.phase(), BannerPhase::Unknown);
        assert_eq!(flow.modal(), ModalState::Closed);
        assert!(flow.consent().is_none());
        assert!(!flow.has_decided());
        assert!(!flow.banner_active());
    }

    // Resolving stored decisions

    #[test]
    fn resolve_existing_moves_straight_to_decided() {
        let mut flow = ConsentFlow::new();
        flow.resolve_existing(record()).unwrap();

        assert!(flow.has_decided());
        assert!(!flow.banner_active());
        assert!(flow.consent().is_some());
    }

    #[test]
    fn resolve_existing_fails_after_banner_shown() {
        let mut flow = ConsentFlow::new();
        flow.show_banner().unwrap();
        let result = flow.resolve_existing(record());
        assert!(result.is_err());
    }

    // Banner prompting

    #[test]
    fn show_banner_activates_banner() {
        let mut flow = ConsentFlow::new();
        flow.show_banner().unwrap();
        assert!(flow.banner_active());
        assert!(!flow.has_decided());
    }

    #[test]
    fn show_banner_fails_once_decided() {
        let mut flow = ConsentFlow::new();
        flow.resolve_existing(record()).unwrap();
        assert!(flow.show_banner().is_err());
    }

    // Deciding

    #[test]
    fn decide_from_banner_returns_no_previous_record() {
        let mut flow = ConsentFlow::new();
        flow.show_banner().unwrap();

        let previous = flow.decide(record());
        assert!(previous.is_none());
        assert!(flow.has_decided());
        assert!(!flow.banner_active());
    }

    #[test]
    fn redecide_returns_previous_record() {
        let mut flow = ConsentFlow::new();
        flow.show_banner().unwrap();
        flow.decide(ConsentRecord::reject_all(Timestamp::now()));

        let previous = flow.decide(record());
        assert!(previous.is_some());
        assert!(!previous.unwrap().analytics());
        assert!(flow.consent().unwrap().analytics());
    }

    #[test]
    fn decide_without_banner_works() {
        // Settings modal can decide even when the banner never prompted.
        let mut flow = ConsentFlow::new();
        let previous = flow.decide(record());
        assert!(previous.is_none());
        assert!(flow.has_decided());
    }

    // Modal

    #[test]
    fn open_modal_is_idempotent() {
        let mut flow = ConsentFlow::new();
        assert!(flow.open_modal());
        assert!(!flow.open_modal());
        assert_eq!(flow.modal(), ModalState::Open);
    }

    #[test]
    fn close_modal_is_idempotent() {
        let mut flow = ConsentFlow::new();
        flow.open_modal();
        assert!(flow.close_modal());
        assert!(!flow.close_modal());
        assert_eq!(flow.modal(), ModalState::Closed);
    }

    #[test]
    fn modal_is_orthogonal_to_banner_phase() {
        let mut flow = ConsentFlow::new();
        flow.show_banner().unwrap();
        flow.open_modal();

        assert!(flow.banner_active());
        assert_eq!(flow.modal(), ModalState::Open);

        flow.decide(record());
        // Deciding does not close the modal by itself.
        assert_eq!(flow.modal(), ModalState::Open);
    }
}
