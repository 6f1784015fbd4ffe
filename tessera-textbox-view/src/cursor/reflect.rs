//! Reflective primitives over the native widget's private state.
//!
//! The cursor tint needs three private fields of the native text widget that
//! no public API exposes. A backend implements these primitives against the
//! host runtime; the version-specific logic in [`CursorLayout`] is written
//! once on top of them.
//!
//! [`CursorLayout`]: super::CursorLayout

use super::{CursorFieldCache, CursorTintError, SdkVersion};
use crate::Color;

/// Compositing rule for a drawable tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TintMode {
    /// Keep the drawable's alpha, replace its color.
    SrcIn,
}

/// Field lookups against throwaway probe widgets.
///
/// A probe scope holds a fresh base text widget and a fresh editable widget,
/// both released when the scope ends. Returned fields must be usable despite
/// their declared visibility.
pub trait ProbeScope {
    /// Field handle type.
    type Field;

    /// Looks up a field declared on the base text widget class.
    fn text_view_field(&mut self, name: &'static str) -> Result<Self::Field, CursorTintError>;

    /// Reads `editor` from the editable probe and looks up a field declared on
    /// the class of that editor object.
    fn editor_field(
        &mut self,
        editor: &Self::Field,
        name: &'static str,
    ) -> Result<Self::Field, CursorTintError>;
}

/// Reflective access to one native text widget.
pub trait WidgetReflection {
    /// Handle to a private field, valid for the whole process.
    type Field: Clone;
    /// The widget's internal editor object.
    type Editor;
    /// A drawable instance.
    type Drawable;

    /// Platform version of the running host.
    fn sdk_version(&self) -> SdkVersion;

    /// Discovery cache shared by every widget of this backend.
    fn field_cache(&self) -> &CursorFieldCache<Self::Field>;

    /// Runs `lookup` with a probe scope, releasing the probe widgets on every
    /// exit path.
    fn with_probe<R>(
        &self,
        lookup: impl FnOnce(&mut dyn ProbeScope<Field = Self::Field>) -> Result<R, CursorTintError>,
    ) -> Result<R, CursorTintError>;

    /// Reads an integer field of this widget.
    fn read_int(&self, field: &Self::Field) -> Result<i32, CursorTintError>;

    /// Reads the editor object of this widget.
    fn read_editor(&self, field: &Self::Field) -> Result<Self::Editor, CursorTintError>;

    /// Inflates a new, unshared drawable from a resource id.
    fn fresh_drawable(&self, resource_id: i32) -> Result<Self::Drawable, CursorTintError>;

    /// Applies a color filter to `drawable`.
    fn tint(
        &self,
        drawable: &Self::Drawable,
        color: Color,
        mode: TintMode,
    ) -> Result<(), CursorTintError>;

    /// Stores a single drawable into `field` of `editor`.
    fn write_drawable(
        &self,
        editor: &Self::Editor,
        field: &Self::Field,
        drawable: Self::Drawable,
    ) -> Result<(), CursorTintError>;

    /// Stores a two-element drawable array into `field` of `editor`.
    fn write_drawable_pair(
        &self,
        editor: &Self::Editor,
        field: &Self::Field,
        drawables: [Self::Drawable; 2],
    ) -> Result<(), CursorTintError>;
}
