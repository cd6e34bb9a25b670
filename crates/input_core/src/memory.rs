//! An in-memory [`TextField`] for headless hosts and tests.

use crate::field::{DocumentMetrics, FieldKind, RootMetrics, TextField, WindowMetrics};
use crate::selection::SelectionRange;
use crate::text::{filter_single_line, normalize_newlines, prev_cursor_boundary};
use core_types::{Rect, ScrollOffset, TextDirection};
use css::ComputedStyle;

/// A text field that lives entirely in memory.
///
/// Editing follows the usual widget rules: typed text replaces the selection
/// and leaves a collapsed caret after it, newlines are normalized for
/// multi-line fields and stripped for single-line ones.
///
/// ```
/// use input_core::{FieldKind, MemoryField, TextField};
///
/// let mut field = MemoryField::new(FieldKind::MultiLine);
/// field.type_text("a @po");
/// assert_eq!(field.value(), "a @po");
/// assert_eq!(field.selection_start(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct MemoryField {
    kind: FieldKind,
    value: String,
    selection: SelectionRange,
    /// Monotonic, bumped on every value change.
    value_rev: u64,
    scroll: ScrollOffset,
    rect: Rect,
    style: ComputedStyle,
    dir: Option<TextDirection>,
    document: Option<DocumentMetrics>,
    focused: bool,
}

impl MemoryField {
    /// A field attached to a plain 1024x768 window.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            value: String::new(),
            selection: SelectionRange::default(),
            value_rev: 0,
            scroll: ScrollOffset::default(),
            rect: Rect::new(0.0, 0.0, 300.0, 100.0),
            style: ComputedStyle::initial(),
            dir: None,
            document: Some(DocumentMetrics {
                window: Some(WindowMetrics {
                    page_x_offset: 0.0,
                    page_y_offset: 0.0,
                    inner_width: 1024.0,
                    inner_height: 768.0,
                }),
                root: Some(RootMetrics {
                    client_top: 0.0,
                    client_left: 0.0,
                    client_width: 1024.0,
                }),
            }),
            focused: false,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value.to_string());
        self.selection = SelectionRange::caret(self.value.len());
        self
    }

    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_document(mut self, document: Option<DocumentMetrics>) -> Self {
        self.document = document;
        self
    }

    pub fn with_dir(mut self, dir: TextDirection) -> Self {
        self.dir = Some(dir);
        self
    }

    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = ScrollOffset {
            top: scroll.top.max(0.0),
            left: scroll.left.max(0.0),
        };
    }

    pub fn value_revision(&self) -> u64 {
        self.value_rev
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Insert text at the caret, replacing any selection.
    pub fn type_text(&mut self, s: &str) {
        let s = match self.kind {
            FieldKind::SingleLine => filter_single_line(s),
            FieldKind::MultiLine => normalize_newlines(s),
        };
        if s.is_empty() {
            return;
        }

        let sel = self.selection.clamped_to(&self.value);
        self.value.replace_range(sel.start..sel.end, &s);
        self.selection = SelectionRange::caret(sel.start + s.len());
        self.mark_text_dirty();
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&mut self) {
        let sel = self.selection.clamped_to(&self.value);
        let start = if sel.is_collapsed() {
            prev_cursor_boundary(&self.value, sel.start)
        } else {
            sel.start
        };
        if start == sel.end {
            return;
        }
        self.value.drain(start..sel.end);
        self.selection = SelectionRange::caret(start);
        self.mark_text_dirty();
    }

    fn mark_text_dirty(&mut self) {
        self.value_rev = self.value_rev.wrapping_add(1);
    }
}

impl TextField for MemoryField {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
        self.selection = self.selection.clamped_to(&self.value);
        self.mark_text_dirty();
    }

    fn selection(&self) -> SelectionRange {
        self.selection
    }

    fn set_selection(&mut self, range: SelectionRange) {
        self.selection = range.clamped_to(&self.value);
    }

    fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn computed_style(&self) -> ComputedStyle {
        self.style.clone()
    }

    fn dir_attribute(&self) -> Option<TextDirection> {
        self.dir
    }

    fn owner_document(&self) -> Option<DocumentMetrics> {
        self.document
    }

    fn focus(&mut self) {
        self.focused = true;
        self.selection = self.selection.clamped_to(&self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_keeps_caret_on_char_boundary() {
        let mut field = MemoryField::new(FieldKind::MultiLine);
        field.type_text("€");
        assert_eq!(field.value(), "€");
        assert_eq!(field.selection_start(), 3);
    }

    #[test]
    fn typing_replaces_the_selection() {
        let mut field = MemoryField::new(FieldKind::MultiLine).with_value("hello world");
        field.set_selection(SelectionRange::new(0, 5));
        field.type_text("bye");
        assert_eq!(field.value(), "bye world");
        assert_eq!(field.selection(), SelectionRange::caret(3));
    }

    #[test]
    fn single_line_strips_newlines_multi_line_normalizes() {
        let mut single = MemoryField::new(FieldKind::SingleLine);
        single.type_text("a\r\nb");
        assert_eq!(single.value(), "ab");

        let mut multi = MemoryField::new(FieldKind::MultiLine);
        multi.type_text("a\r\nb");
        assert_eq!(multi.value(), "a\nb");
    }

    #[test]
    fn backspace_removes_a_full_unicode_scalar_value() {
        let mut field = MemoryField::new(FieldKind::MultiLine).with_value("a€");
        field.backspace();
        assert_eq!(field.value(), "a");
        assert_eq!(field.selection_start(), 1);

        field.set_caret(0);
        let rev = field.value_revision();
        field.backspace();
        assert_eq!(field.value(), "a");
        assert_eq!(field.value_revision(), rev);
    }

    #[test]
    fn set_value_clamps_a_stale_selection() {
        let mut field = MemoryField::new(FieldKind::MultiLine).with_value("abcdef");
        field.set_value("ab".to_string());
        assert_eq!(field.selection(), SelectionRange::caret(2));
    }

    #[test]
    fn direction_prefers_attribute() {
        let field = MemoryField::new(FieldKind::MultiLine).with_dir(TextDirection::Rtl);
        assert_eq!(field.direction(), TextDirection::Rtl);
        let field = MemoryField::new(FieldKind::MultiLine);
        assert_eq!(field.direction(), TextDirection::Ltr);
    }
}
