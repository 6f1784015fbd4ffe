//! Process-wide memo of the cursor field discovery.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::{CursorLayout, CursorTintError};

/// The three private field handles the cursor tint works through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorFieldHandles<F> {
    /// Resource id of the default cursor drawable, on the text widget.
    pub drawable_res: F,
    /// The internal editor object, on the text widget.
    pub editor: F,
    /// The cursor drawable storage, on the editor object.
    pub cursor_drawable: F,
}

#[derive(Debug)]
enum Discovery<F> {
    Pending,
    Unavailable,
    Ready {
        layout: CursorLayout,
        handles: CursorFieldHandles<F>,
    },
}

/// Result of a discovery: the active layout and its field handles.
pub type ResolvedFields<F> = (CursorLayout, CursorFieldHandles<F>);

/// Run-once discovery state.
///
/// The attempt is recorded before discovery starts, so a failing (or
/// panicking) discovery leaves the cache permanently unavailable and every
/// later request returns [`CursorTintError::Unavailable`] without retrying.
#[derive(Debug)]
pub struct CursorFieldCache<F> {
    state: Mutex<Discovery<F>>,
    attempts: AtomicUsize,
}

impl<F: Clone> CursorFieldCache<F> {
    /// Creates a cache that has not attempted discovery yet.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Discovery::Pending),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Returns the cached fields, running `discover` on the first call only.
    pub fn resolve(
        &self,
        discover: impl FnOnce() -> Result<ResolvedFields<F>, CursorTintError>,
    ) -> Result<ResolvedFields<F>, CursorTintError> {
        let mut state = self.state.lock();
        match &*state {
            Discovery::Ready { layout, handles } => return Ok((*layout, handles.clone())),
            Discovery::Unavailable => return Err(CursorTintError::Unavailable),
            Discovery::Pending => {}
        }

        *state = Discovery::Unavailable;
        self.attempts.fetch_add(1, Ordering::Relaxed);
        let (layout, handles) = discover()?;
        *state = Discovery::Ready {
            layout,
            handles: handles.clone(),
        };
        Ok((layout, handles))
    }

    /// Number of discovery runs so far. Never exceeds one.
    pub fn discovery_attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Whether discovery ran and failed.
    pub fn is_unavailable(&self) -> bool {
        matches!(*self.state.lock(), Discovery::Unavailable)
    }
}

impl<F: Clone> Default for CursorFieldCache<F> {
    fn default() -> Self {
        Self::new()
    }
}
