//! State machine trait for the consent flow statuses.
//!
//! The banner phase and the settings modal each move through a small
//! fixed set of states. Implementors declare which moves are legal;
//! the flow decides what error or fallback each illegal move gets.

/// Declares the legal moves for a status enum.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for BannerPhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!(
///             (self, target),
///             (Unknown, BannerShown) | (Unknown, Decided) | (BannerShown, Decided)
///         )
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Unknown => vec![BannerShown, Decided],
///             BannerShown => vec![Decided],
///             Decided => vec![],
///         }
///     }
/// }
/// ```
pub trait StateMachine: Sized {
    /// Returns true if the move from self to target is legal.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns every state reachable in one move from self.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true when no move leads out of this state.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
