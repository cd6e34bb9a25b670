//! Text selection representation.

use crate::text::clamp_to_char_boundary;

/// A selection as a byte range into the field's UTF-8 value.
///
/// Always normalized so `start <= end`. A collapsed range is a plain caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start byte offset of the selection (inclusive).
    pub start: usize,
    /// End byte offset of the selection (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Create a new selection range; the ends may come in either order.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A collapsed selection at `caret`.
    #[inline]
    pub fn caret(caret: usize) -> Self {
        Self::new(caret, caret)
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Snap both ends onto character boundaries of `value`.
    pub fn clamped_to(self, value: &str) -> Self {
        Self::new(
            clamp_to_char_boundary(value, self.start),
            clamp_to_char_boundary(value, self.end),
        )
    }
}
