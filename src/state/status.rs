use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

/// Lifecycle of the screen's list fetch. There is no automatic retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Lifecycle of a mutating operation (create, update, delete, toggle).
///
/// `Succeeded` and `Failed` are idle states carrying the last signal; only
/// `Pending` blocks the mutating controls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl OperationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, OperationState::Pending)
    }
}

/// What happened to a mutating submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    /// The server confirmed the change.
    Accepted(T),
    /// Validation failed; the field errors are in the screen state.
    Invalid,
    /// Another submission for the same entity is still pending.
    Busy,
    /// The server or transport rejected the call; the message is also in
    /// the screen's `operation` state.
    Failed(String),
}

impl<T> Submission<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }

    pub fn accepted(self) -> Option<T> {
        match self {
            Submission::Accepted(value) => Some(value),
            _ => None,
        }
    }
}

/// Per-entity guard against concurrent mutating submissions.
#[derive(Debug, Default)]
pub struct InFlight {
    keys: Mutex<HashSet<String>>,
}

impl InFlight {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claims `key`; `None` while another claim on it is alive.
    pub fn try_acquire(self: &Arc<Self>, key: impl Into<String>) -> Option<InFlightGuard> {
        let key = key.into();
        if !self.keys.lock().insert(key.clone()) {
            tracing::debug!(key = %key, "Submission rejected: already in flight");
            return None;
        }
        Some(InFlightGuard {
            owner: Arc::clone(self),
            key,
        })
    }

    pub fn is_busy(&self, key: &str) -> bool {
        self.keys.lock().contains(key)
    }
}

/// Releases its key on drop, including when the owning task is aborted.
#[derive(Debug)]
pub struct InFlightGuard {
    owner: Arc<InFlight>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.owner.keys.lock().remove(&self.key);
    }
}
