//! UTF-8 helpers for byte-offset carets.
//!
//! Every offset the engine hands to or receives from a field is a byte index
//! that sits on a `char` boundary. These helpers keep it that way.

use std::borrow::Cow;

/// Clamp an arbitrary byte index to a valid UTF-8 character boundary.
///
/// Indices past the end clamp to `s.len()`; indices inside a multi-byte
/// character move back to its first byte.
///
/// ```
/// use input_core::clamp_to_char_boundary;
///
/// let s = "@pö"; // 'ö' is 2 bytes
/// assert_eq!(clamp_to_char_boundary(s, 3), 2);
/// assert_eq!(clamp_to_char_boundary(s, 100), 4);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Start of the character ending at `i`, or 0 at the start of the text.
pub fn prev_cursor_boundary(s: &str, i: usize) -> usize {
    let head = &s[..clamp_to_char_boundary(s, i)];
    head.char_indices().next_back().map_or(0, |(start, _)| start)
}

/// Text typed into a single-line field: line breaks are dropped.
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if s.contains(['\n', '\r']) {
        Cow::Owned(s.replace(['\n', '\r'], ""))
    } else {
        Cow::Borrowed(s)
    }
}

/// Text typed into a multi-line field: `\r\n` and lone `\r` become `\n`.
pub fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if s.contains('\r') {
        Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(s)
    }
}
