//! Platform-version variants of the cursor drawable storage.

use super::{CursorFieldHandles, CursorTintError, SdkVersion, TintMode, WidgetReflection};
use crate::Color;

/// Resource id field of the default cursor drawable.
pub const CURSOR_DRAWABLE_RES_FIELD: &str = "mCursorDrawableRes";
/// Internal editor field of the text widget.
pub const EDITOR_FIELD: &str = "mEditor";
/// Two-element cursor drawable array, before [`SdkVersion::P`].
pub const SPLIT_CURSOR_DRAWABLE_FIELD: &str = "mCursorDrawable";
/// Single cursor drawable, from [`SdkVersion::P`] on.
pub const SINGLE_CURSOR_DRAWABLE_FIELD: &str = "mDrawableForCursor";

/// Where a platform version keeps the cursor drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorLayout {
    /// The editor stores an array of two drawables. Both are replaced as a
    /// pair; the upstream widget does not document what the second one is.
    SplitDrawables,
    /// The editor stores a single drawable.
    SingleDrawable,
    /// No editor object exists; the cursor can not be tinted.
    Unsupported,
}

impl CursorLayout {
    /// Selects the layout for a platform version.
    pub fn for_sdk(sdk: SdkVersion) -> Self {
        if sdk < SdkVersion::JELLY_BEAN {
            CursorLayout::Unsupported
        } else if sdk < SdkVersion::P {
            CursorLayout::SplitDrawables
        } else {
            CursorLayout::SingleDrawable
        }
    }

    /// Name of the cursor drawable field on the editor object.
    pub fn cursor_field_name(self) -> Option<&'static str> {
        match self {
            CursorLayout::SplitDrawables => Some(SPLIT_CURSOR_DRAWABLE_FIELD),
            CursorLayout::SingleDrawable => Some(SINGLE_CURSOR_DRAWABLE_FIELD),
            CursorLayout::Unsupported => None,
        }
    }

    /// Finds the three field handles through a probe scope.
    pub fn locate<R: WidgetReflection>(
        self,
        widget: &R,
    ) -> Result<CursorFieldHandles<R::Field>, CursorTintError> {
        let cursor_field = self
            .cursor_field_name()
            .ok_or(CursorTintError::UnsupportedPlatform(widget.sdk_version()))?;

        widget.with_probe(|probe| {
            let drawable_res = probe.text_view_field(CURSOR_DRAWABLE_RES_FIELD)?;
            let editor = probe.text_view_field(EDITOR_FIELD)?;
            let cursor_drawable = probe.editor_field(&editor, cursor_field)?;
            Ok(CursorFieldHandles {
                drawable_res,
                editor,
                cursor_drawable,
            })
        })
    }

    /// Replaces the widget's cursor drawable with a tinted copy.
    pub fn apply<R: WidgetReflection>(
        self,
        widget: &R,
        handles: &CursorFieldHandles<R::Field>,
        color: Color,
    ) -> Result<(), CursorTintError> {
        let resource_id = widget.read_int(&handles.drawable_res)?;
        let editor = widget.read_editor(&handles.editor)?;

        match self {
            CursorLayout::SplitDrawables => {
                let pair = [
                    tinted_drawable(widget, resource_id, color)?,
                    tinted_drawable(widget, resource_id, color)?,
                ];
                widget.write_drawable_pair(&editor, &handles.cursor_drawable, pair)
            }
            CursorLayout::SingleDrawable => {
                let drawable = tinted_drawable(widget, resource_id, color)?;
                widget.write_drawable(&editor, &handles.cursor_drawable, drawable)
            }
            CursorLayout::Unsupported => {
                Err(CursorTintError::UnsupportedPlatform(widget.sdk_version()))
            }
        }
    }
}

fn tinted_drawable<R: WidgetReflection>(
    widget: &R,
    resource_id: i32,
    color: Color,
) -> Result<R::Drawable, CursorTintError> {
    let drawable = widget.fresh_drawable(resource_id)?;
    widget.tint(&drawable, color, TintMode::SrcIn)?;
    Ok(drawable)
}
