//! The text box view: a native editable text widget kept in sync with its
//! logical text input control.
//!
//! ## Text sync
//!
//! The native widget raises a change notification for every mutation of its
//! buffer: keystrokes, IME composition, and writes made by the view itself.
//! Notifications can not be suppressed, so [`TextBoxView`] breaks the
//! feedback loop on its own. While a notification is processed the view is in
//! [`SyncState::WritingBack`]; the owner's
//! [`process_text_input`](TextInputOwner::process_text_input) result is written
//! back, and the notification raised by that write is swallowed.
//!
//! ## Layout
//!
//! Two native quirks are worked around on every layout and measurement pass:
//! layout requests are dropped while a selection is active (a layout pass
//! collapses it and dismisses the selection toolbar), and the measured width
//! never drops below a minimum content width plus padding (an empty field
//! measured at zero width hides the caret).
//!
//! ## Usage
//!
//! ```ignore
//! let owner = Arc::new(|raw: &str| raw.to_uppercase());
//! let view = TextBoxView::with_owner(widget, TextBoxViewArgs::default(), downgrade_owner(&owner));
//! view.set_text_native("hello");
//! ```

use std::{
    cell::{Cell, RefCell},
    sync::{Arc, Weak},
};

use derive_setters::Setters;
use tracing::{debug, trace, warn};

use crate::{
    Brush, Color, Dp, MeasureSpec, MeasuredSize, NativeTextWidget, PropertyChanged, Px,
    SyncGuard, SyncState, TextChange, TextInputOwner,
    brush::DEFAULT_FOREGROUND,
    cursor::{self, WidgetReflection},
};

/// Arguments for configuring a [`TextBoxView`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct TextBoxViewArgs {
    /// Smallest width of the text content, excluding padding. Large enough to
    /// show the caret in an empty field. Defaults to 10dp.
    pub min_content_width: Dp,
    /// Whether the native widget is restricted to one line. Defaults to true.
    pub single_line: bool,
    /// Background of the native widget. Defaults to transparent, which hides
    /// the native underline.
    pub background: Color,
}

impl Default for TextBoxViewArgs {
    fn default() -> Self {
        Self {
            min_content_width: Dp(10.0),
            single_line: true,
            background: Color::TRANSPARENT,
        }
    }
}

/// A native text widget bound to a logical text input control.
///
/// All methods must be called on the UI thread. The view owns the native
/// widget handle and holds only a weak reference to its owner.
pub struct TextBoxView<W> {
    widget: W,
    args: TextBoxViewArgs,
    owner: RefCell<Option<Weak<dyn TextInputOwner>>>,
    sync_state: Cell<SyncState>,
    initialized: Cell<bool>,
    foreground: RefCell<Brush>,
}

impl<W: NativeTextWidget> TextBoxView<W> {
    /// Wraps `widget` without configuring it.
    ///
    /// Change notifications are ignored until [`initialize`](Self::initialize)
    /// has run.
    pub fn new(widget: W, args: TextBoxViewArgs) -> Self {
        Self {
            widget,
            args,
            owner: RefCell::new(None),
            sync_state: Cell::new(SyncState::Idle),
            initialized: Cell::new(false),
            foreground: RefCell::new(DEFAULT_FOREGROUND),
        }
    }

    /// Wraps, attaches and initializes in one step.
    pub fn with_owner(widget: W, args: TextBoxViewArgs, owner: Weak<dyn TextInputOwner>) -> Self {
        let view = Self::new(widget, args);
        view.attach_owner(owner);
        view.initialize();
        view
    }

    /// Configures the native widget and starts processing change
    /// notifications.
    pub fn initialize(&self) {
        self.widget.set_single_line(self.args.single_line);
        self.widget.set_background_color(self.args.background);
        self.widget.set_padding(Px::ZERO, Px::ZERO, Px::ZERO, Px::ZERO);
        self.initialized.set(true);
        self.widget.set_wrap_content();
    }

    /// Whether [`initialize`](Self::initialize) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Sets the logical control that processes input.
    pub fn attach_owner(&self, owner: Weak<dyn TextInputOwner>) {
        *self.owner.borrow_mut() = Some(owner);
    }

    /// Returns the owner if it is attached and still alive.
    pub fn owner(&self) -> Option<Arc<dyn TextInputOwner>> {
        let owner = self.owner.borrow().clone();
        owner.and_then(|owner| owner.upgrade())
    }

    /// The wrapped native widget.
    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// The configuration this view was created with.
    pub fn args(&self) -> &TextBoxViewArgs {
        &self.args
    }

    /// Current text sync state.
    pub fn sync_state(&self) -> SyncState {
        self.sync_state.get()
    }

    /// Writes `text` to the native widget unless it is already displayed.
    ///
    /// `None` is written as the empty string. Equal text is skipped because a
    /// native write moves the caret back to the start. Text that can not be
    /// read back is always written.
    pub fn set_text_native<'t>(&self, text: impl Into<Option<&'t str>>) {
        let text = text.into().unwrap_or_default();
        if self.widget.text().as_deref() != Some(text) {
            self.widget.set_text(text);
        }
    }

    /// Handles a text change notification from the native widget.
    pub fn on_native_text_changed(&self, change: &TextChange) {
        if !self.initialized.get() {
            trace!("Ignoring text change raised during construction");
            return;
        }
        let Some(_guard) = SyncGuard::enter(&self.sync_state) else {
            trace!("Ignoring text change raised by write-back");
            return;
        };

        self.widget.default_on_text_changed(change);
        self.notify_text_changed();
    }

    fn notify_text_changed(&self) {
        // The native widget reports changes before the owner is attached.
        let Some(owner) = self.owner() else {
            trace!("No owner attached, skipping input processing");
            return;
        };
        let Some(text) = self.widget.text() else {
            warn!("Native text is unreadable, skipping input processing");
            return;
        };
        let final_text = owner.process_text_input(&text);
        self.set_text_native(final_text.as_str());
    }

    /// Handles a layout invalidation request.
    ///
    /// Dropped while a selection is active; selection state is only queried
    /// for a loaded widget.
    pub fn request_layout(&self) {
        if self.widget.is_loaded() && self.widget.has_selection() {
            debug!("Suppressing layout request to keep the active selection");
            return;
        }
        self.widget.default_request_layout();
    }

    /// Runs the native measurement pass and enforces the minimum width.
    pub fn on_measure(&self, width: MeasureSpec, height: MeasureSpec) {
        self.widget.default_measure(width, height);

        let measured = self.widget.measured_size();
        let width = measured.width.max(self.min_width());
        self.widget
            .set_measured_size(MeasuredSize::new(width, measured.height));
    }

    /// Minimum measured width: padding on both sides plus the minimum content
    /// width.
    pub fn min_width(&self) -> Px {
        let padding = self.widget.padding();
        padding
            .left
            .saturating_add(self.args.min_content_width.to_px())
            .saturating_add(padding.right)
    }
}

impl<W: NativeTextWidget + WidgetReflection> TextBoxView<W> {
    /// Current Foreground brush.
    pub fn foreground(&self) -> Brush {
        self.foreground.borrow().clone()
    }

    /// Sets the Foreground brush, raising the change callback when the value
    /// differs.
    pub fn set_foreground(&self, brush: Brush) {
        let old_value = self.foreground.replace(brush.clone());
        if old_value != brush {
            self.on_foreground_changed(PropertyChanged {
                old_value,
                new_value: brush,
            });
        }
    }

    /// Reacts to a Foreground change. Only solid brushes are applied.
    pub fn on_foreground_changed(&self, change: PropertyChanged<Brush>) {
        if let Some(color) = change.new_value.solid_color() {
            self.widget.set_text_color(color);
            self.set_cursor_color(color);
        }
    }

    /// Tints the native cursor. Silently keeps the native cursor when the
    /// platform does not allow it.
    pub fn set_cursor_color(&self, color: Color) {
        cursor::set_cursor_color(&self.widget, color);
    }
}
