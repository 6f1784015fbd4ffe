//! The logical text input control that owns a view.

use std::sync::{Arc, Weak};

/// The cross-platform text input control that owns a native view.
///
/// The view keeps only a [`Weak`] back-reference; the owner controls the view's
/// lifetime, never the reverse.
pub trait TextInputOwner {
    /// Validates and formats raw input, returning the text that should be
    /// displayed. Returning the input unchanged is valid.
    fn process_text_input(&self, raw_text: &str) -> String;
}

impl<F> TextInputOwner for F
where
    F: Fn(&str) -> String,
{
    fn process_text_input(&self, raw_text: &str) -> String {
        self(raw_text)
    }
}

/// Creates a non-owning back-reference to `owner`.
pub fn downgrade_owner<O>(owner: &Arc<O>) -> Weak<dyn TextInputOwner>
where
    O: TextInputOwner + 'static,
{
    let weak: Weak<O> = Arc::downgrade(owner);
    weak
}
