//! Model-View-Intent primitives.
//!
//! ```text
//! Intent ──→ Store task ──→ Reducer ──→ State ──→ watch subscribers
//!    ↑                                               │
//!    └──────────────── screen controller ────────────┘
//! ```
//!
//! - **State**: immutable snapshot of one screen
//! - **Intent**: user action or completed repository call
//! - **Reducer**: pure `(State, Intent) -> State`

/// Marker trait for intent objects.
///
/// Intents represent user actions (typing, selecting a filter) and system
/// events (a fetch finished, a create was confirmed). Reducers turn them
/// into new states.
pub trait Intent: Send + 'static {}

/// Marker trait for screen state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (everything the consumer renders)
/// - Comparable (PartialEq for detecting changes)
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
