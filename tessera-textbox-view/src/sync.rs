//! Re-entrancy fence for text write-back.
//!
//! Writing text to the native widget raises a change notification
//! synchronously, which would process and write back again. [`SyncGuard`]
//! marks the write-back in flight so the nested notification is swallowed.
//! The guard is released on drop, so unwinding out of the owner's input
//! processing can not leave the view stuck in [`SyncState::WritingBack`].

use std::cell::Cell;

/// Text sync state of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// No notification is being processed.
    #[default]
    Idle,
    /// A notification is being processed and may write text back.
    WritingBack,
}

/// Scoped ownership of [`SyncState::WritingBack`].
#[must_use = "the state returns to Idle as soon as the guard is dropped"]
pub struct SyncGuard<'a> {
    state: &'a Cell<SyncState>,
}

impl<'a> SyncGuard<'a> {
    /// Enters [`SyncState::WritingBack`]. Returns `None` if a write-back is
    /// already in flight.
    pub fn enter(state: &'a Cell<SyncState>) -> Option<Self> {
        match state.get() {
            SyncState::WritingBack => None,
            SyncState::Idle => {
                state.set(SyncState::WritingBack);
                Some(Self { state })
            }
        }
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.state.set(SyncState::Idle);
    }
}
