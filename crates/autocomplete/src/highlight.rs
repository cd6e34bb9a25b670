use std::ops::Range;

use crate::query::split_query;
use crate::suggest::Suggestion;

/// Byte range of the first case-insensitive occurrence of `needle` in
/// `haystack`. An empty needle matches nothing.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .char_indices()
        .find_map(|(start, _)| match_at(haystack, start, needle).map(|end| start..end))
}

/// End of the match if `needle` matches at `start`.
fn match_at(haystack: &str, start: usize, needle: &str) -> Option<usize> {
    let mut rest = haystack[start..].char_indices();
    let mut end = start;
    for n in needle.chars() {
        let (i, h) = rest.next()?;
        if !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
        end = start + i + h.len_utf8();
    }
    Some(end)
}

/// The part of `query` a row's key is highlighted against: the whole query
/// for category rows, the filter after the colon for everything else.
pub fn highlight_needle<'q>(suggestion: &Suggestion, query: &'q str) -> &'q str {
    if suggestion.is_category() {
        return query;
    }
    match split_query(query) {
        (_, Some(filter)) => filter,
        (whole, None) => whole,
    }
}

/// A row's key split around the highlighted span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segments<'a> {
    pub before: &'a str,
    pub matched: &'a str,
    pub after: &'a str,
}

impl<'a> Segments<'a> {
    pub fn split(text: &'a str, range: Range<usize>) -> Self {
        Self {
            before: &text[..range.start],
            matched: &text[range.clone()],
            after: &text[range.end..],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::SuggestionKind;

    fn row(kind: SuggestionKind) -> Suggestion {
        Suggestion {
            key: "k".into(),
            value: "v".into(),
            kind,
            subtext: None,
        }
    }

    #[test]
    fn finds_case_insensitively() {
        assert_eq!(find_ignore_case("Arms Up", "ms u"), Some(2..6));
        assert_eq!(find_ignore_case("Manet", "AN"), Some(1..3));
        assert_eq!(find_ignore_case("Manet", "x"), None);
    }

    #[test]
    fn empty_needle_highlights_nothing() {
        assert_eq!(find_ignore_case("abc", ""), None);
    }

    #[test]
    fn byte_ranges_respect_multibyte_chars() {
        let r = find_ignore_case("Ça va", "ça").unwrap();
        assert_eq!(&"Ça va"[r], "Ça");
    }

    #[test]
    fn needle_longer_than_rest_does_not_match() {
        assert_eq!(find_ignore_case("ab", "abc"), None);
    }

    #[test]
    fn category_rows_use_the_whole_query() {
        assert_eq!(highlight_needle(&row(SuggestionKind::Category), "po"), "po");
    }

    #[test]
    fn leaf_rows_use_the_filter() {
        assert_eq!(highlight_needle(&row(SuggestionKind::Keyed), "pose:ar"), "ar");
        assert_eq!(highlight_needle(&row(SuggestionKind::Random), "pose:"), "");
    }

    #[test]
    fn category_rows_against_a_leaf_query_fall_back() {
        // the whole "pose:ar" is not inside "pose"
        let needle = highlight_needle(&row(SuggestionKind::Category), "pose:ar");
        assert_eq!(find_ignore_case("pose", needle), None);
    }

    #[test]
    fn segments_split_the_key() {
        let s = Segments::split("arms up", 0..2);
        assert_eq!((s.before, s.matched, s.after), ("", "ar", "ms up"));
    }
}
