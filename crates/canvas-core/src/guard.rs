//! Operation guard for session concurrency
//!
//! At most one remote operation runs per session. The guard provides:
//! - Atomic begin/end around an operation
//! - RAII permits that release on every exit path
//! - The current state for UI and error reporting

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Kind of remote operation a session can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Image generation
    Generate,
    /// Prompt improvement
    Improve,
}

/// What the session is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationState {
    /// No operation in flight
    Idle,
    /// Generating an image
    Generating,
    /// Improving the prompt
    Improving,
}

impl OperationState {
    /// Check if an operation is in flight
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !matches!(self, OperationState::Idle)
    }
}

impl Default for OperationState {
    fn default() -> Self {
        OperationState::Idle
    }
}

impl From<OperationKind> for OperationState {
    fn from(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Generate => OperationState::Generating,
            OperationKind::Improve => OperationState::Improving,
        }
    }
}

/// Guard enforcing one operation at a time
///
/// A rejected begin is final: callers get `false` and decide what to do,
/// nothing is queued.
#[derive(Debug, Default)]
pub struct OperationGuard {
    state: Mutex<OperationState>,
}

impl OperationGuard {
    /// Create new guard in the idle state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to begin an operation
    ///
    /// Returns `false` if any operation is already in flight, including
    /// one of the same kind.
    pub fn try_begin(&self, kind: OperationKind) -> bool {
        let mut state = self.state.lock();
        if state.is_busy() {
            return false;
        }
        *state = kind.into();
        true
    }

    /// End the current operation
    pub fn end(&self) {
        *self.state.lock() = OperationState::Idle;
    }

    /// Try to begin an operation, returning a releasing permit
    ///
    /// The permit calls [`end`](Self::end) when dropped, so the guard
    /// returns to idle on success, failure, and panic alike. A refusal
    /// reports the state observed under the same lock, so the returned
    /// busy state is the operation that actually caused the rejection.
    pub fn try_acquire(&self, kind: OperationKind) -> Result<OperationPermit<'_>, OperationState> {
        let mut state = self.state.lock();
        if state.is_busy() {
            return Err(*state);
        }
        *state = kind.into();
        Ok(OperationPermit { guard: self })
    }

    /// Get the current state
    #[inline]
    #[must_use]
    pub fn current(&self) -> OperationState {
        *self.state.lock()
    }

    /// Check if the guard is idle
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.current().is_busy()
    }
}

/// Permit for one running operation
///
/// Dropping the permit releases the guard.
#[derive(Debug)]
pub struct OperationPermit<'a> {
    guard: &'a OperationGuard,
}

impl Drop for OperationPermit<'_> {
    fn drop(&mut self) {
        self.guard.end();
    }
}
