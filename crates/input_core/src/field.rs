//! The capability surface a host text widget exposes to the engine.
//!
//! The engine never owns the widget. Hosts implement [`TextField`] over
//! whatever they render with and pass `&mut` access into each transition.

use crate::selection::SelectionRange;
use core_types::{Rect, ScrollOffset, TextDirection};
use css::ComputedStyle;

/// Single-line inputs and multi-line text areas lay text out differently:
/// inputs collapse whitespace and center text vertically in their box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    SingleLine,
    MultiLine,
}

/// Scroll position and viewport size of the window hosting a document.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindowMetrics {
    pub page_x_offset: f32,
    pub page_y_offset: f32,
    pub inner_width: f32,
    pub inner_height: f32,
}

/// Client metrics of the document's root element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RootMetrics {
    /// Width of the root element's top/left border.
    pub client_top: f32,
    pub client_left: f32,
    /// Viewport width excluding the scrollbar.
    pub client_width: f32,
}

/// The document a field is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DocumentMetrics {
    /// `None` for a detached document with no browsing context.
    pub window: Option<WindowMetrics>,
    pub root: Option<RootMetrics>,
}

/// An editable plain-text surface.
///
/// Offsets are UTF-8 byte indices on character boundaries. Implementations
/// must clamp whatever they are handed.
pub trait TextField {
    fn kind(&self) -> FieldKind;

    fn value(&self) -> &str;

    /// Replace the whole value. The selection is left for the caller to set.
    fn set_value(&mut self, value: String);

    fn selection(&self) -> SelectionRange;

    fn set_selection(&mut self, range: SelectionRange);

    fn scroll(&self) -> ScrollOffset;

    /// Border box in viewport coordinates.
    fn bounding_rect(&self) -> Rect;

    fn computed_style(&self) -> ComputedStyle;

    /// The `dir` attribute, if the widget sets one explicitly.
    fn dir_attribute(&self) -> Option<TextDirection> {
        None
    }

    fn owner_document(&self) -> Option<DocumentMetrics>;

    fn focus(&mut self);

    #[inline]
    fn selection_start(&self) -> usize {
        self.selection().start
    }

    #[inline]
    fn selection_end(&self) -> usize {
        self.selection().end
    }

    /// Collapse the selection to `caret`.
    fn set_caret(&mut self, caret: usize) {
        self.set_selection(SelectionRange::caret(caret));
    }

    /// Writing direction used for anchoring: the explicit attribute wins over
    /// the computed `direction`.
    fn direction(&self) -> TextDirection {
        self.dir_attribute()
            .unwrap_or_else(|| self.computed_style().direction)
    }
}
