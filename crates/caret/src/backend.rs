use crate::mirror::MirrorStyle;
use css::ComputedStyle;
use input_core::{FieldKind, TextField};

/// Offset of the marker node inside the measurement surface, relative to the
/// surface's padding edge (the `offsetTop`/`offsetLeft` of an inline box
/// whose offset parent is the surface).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarkerBox {
    pub offset_top: f32,
    pub offset_left: f32,
}

/// An off-screen block that replicates a field's text layout.
///
/// The locator fills it in three steps: style, plain text before the caret,
/// then one marker node wrapping the text after the caret.
pub trait MeasurementSurface {
    fn apply_style(&mut self, style: &MirrorStyle);

    /// Replace the plain text content.
    fn set_text(&mut self, text: &str);

    /// Append the marker node. `text` is never empty.
    fn append_marker(&mut self, text: &str);

    /// Make the marker stand out while the surface is kept for inspection.
    fn highlight_marker(&mut self) {}
}

/// The environment-specific half of the locator: style lookup, a throwaway
/// measurement surface, and a text engine to lay it out.
pub trait MeasurementBackend {
    type Surface: MeasurementSurface;

    /// Whether a rendering environment exists at all.
    fn is_windowed(&self) -> bool {
        true
    }

    fn computed_style<F: TextField + ?Sized>(&self, field: &F) -> ComputedStyle {
        field.computed_style()
    }

    fn create_measurement_surface(&self) -> Self::Surface;

    fn measure(&self, surface: &Self::Surface) -> MarkerBox;

    /// Used value of `line-height: normal`: the height of a one-line sample
    /// of the given kind in the style's font, without padding.
    fn normal_line_height(&self, kind: FieldKind, style: &ComputedStyle) -> f32;

    fn remove_measurement_surface(&self, surface: Self::Surface) {
        drop(surface);
    }

    /// Keep `surface` on screen for debugging. A backend holds at most one
    /// retained surface; a new one replaces the previous.
    fn retain_for_inspection(&self, surface: Self::Surface) {
        self.remove_measurement_surface(surface);
    }
}
