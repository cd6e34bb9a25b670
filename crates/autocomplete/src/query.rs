use input_core::clamp_to_char_boundary;

/// Byte offset of the last `trigger` before `caret`.
pub fn trigger_start(text: &str, caret: usize, trigger: char) -> Option<usize> {
    let caret = clamp_to_char_boundary(text, caret);
    text[..caret].rfind(trigger)
}

/// The open query at `caret`: the text between the last trigger before the
/// caret and the caret.
///
/// `None` when no trigger precedes the caret. The query never contains the
/// trigger itself, so `"@a@b"` yields `"b"`.
pub fn extract_query(text: &str, caret: usize, trigger: char) -> Option<&str> {
    let caret = clamp_to_char_boundary(text, caret);
    let start = trigger_start(text, caret, trigger)?;
    Some(&text[start + trigger.len_utf8()..caret])
}

/// `(category, filter)` halves of a query, split on the first colon. No
/// colon means the whole query filters category names.
pub fn split_query(query: &str) -> (&str, Option<&str>) {
    match query.split_once(':') {
        Some((category, filter)) => (category, Some(filter)),
        None => (query, None),
    }
}
