use std::ops::Range;

use caret::{CaretAnchor, HorizontalAnchor};

use crate::highlight::{Segments, find_ignore_case, highlight_needle};
use crate::suggest::Suggestion;

/// One rendered suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownRow {
    pub suggestion: Suggestion,
    /// Highlighted byte range of the key, if the query was found in it.
    pub highlight: Option<Range<usize>>,
}

impl DropdownRow {
    fn new(suggestion: Suggestion, query: &str) -> Self {
        let highlight = find_ignore_case(&suggestion.key, highlight_needle(&suggestion, query));
        Self {
            suggestion,
            highlight,
        }
    }

    /// The key split around the highlight; `None` renders the key as is.
    pub fn segments(&self) -> Option<Segments<'_>> {
        self.highlight
            .clone()
            .map(|r| Segments::split(&self.suggestion.key, r))
    }
}

/// Where the overlay goes, in viewport px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropdownPlacement {
    pub horizontal: HorizontalAnchor,
    pub top: f32,
    /// The overlay never extends past the bottom of the viewport.
    pub max_height: f32,
}

impl DropdownPlacement {
    pub fn from_anchor(anchor: &CaretAnchor) -> Self {
        Self {
            horizontal: anchor.horizontal,
            top: anchor.top,
            max_height: anchor.viewport_height - anchor.top,
        }
    }
}

/// The suggestion overlay owned by one controller.
///
/// Open exactly when attached; while open there is at least one row and the
/// selection points at one of them. Hiding resets it for reuse.
#[derive(Clone, Debug, Default)]
pub struct Dropdown {
    rows: Vec<DropdownRow>,
    selected: Option<usize>,
    attached: bool,
    placement: Option<DropdownPlacement>,
    scroll_to: Option<usize>,
}

impl Dropdown {
    pub fn is_open(&self) -> bool {
        self.attached
    }

    pub fn rows(&self) -> &[DropdownRow] {
        &self.rows
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&DropdownRow> {
        self.rows.get(self.selected?)
    }

    /// Expanded line of the selected row. Only the selected row shows one.
    pub fn preview(&self) -> Option<String> {
        self.selected()?.suggestion.preview()
    }

    pub fn placement(&self) -> Option<DropdownPlacement> {
        self.placement
    }

    /// Row the host should scroll into view (nearest edge), once per
    /// selection change.
    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.scroll_to.take()
    }

    /// Replace the rows. A newly attached dropdown selects the first row; an
    /// open one keeps its selection when still in range.
    pub(crate) fn render(&mut self, suggestions: Vec<Suggestion>, query: &str) {
        debug_assert!(!suggestions.is_empty());
        self.rows = suggestions
            .into_iter()
            .map(|s| DropdownRow::new(s, query))
            .collect();

        let index = if !self.attached {
            self.attached = true;
            0
        } else {
            match self.selected {
                Some(i) if i < self.rows.len() => i,
                _ => 0,
            }
        };
        self.select(index);
    }

    pub(crate) fn select(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        self.selected = Some(index);
        self.scroll_to = Some(index);
    }

    pub(crate) fn place(&mut self, placement: DropdownPlacement) {
        self.placement = Some(placement);
    }

    pub(crate) fn hide(&mut self) {
        self.rows.clear();
        self.selected = None;
        self.attached = false;
        self.placement = None;
        self.scroll_to = None;
    }

    pub(crate) fn check_invariant(&self) -> bool {
        match self.selected {
            Some(i) => self.attached && i < self.rows.len(),
            None => !self.attached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::SuggestionKind;

    fn suggestion(key: &str, kind: SuggestionKind) -> Suggestion {
        Suggestion {
            key: key.into(),
            value: key.into(),
            kind,
            subtext: None,
        }
    }

    fn leaves(keys: &[&str]) -> Vec<Suggestion> {
        keys.iter().map(|k| suggestion(k, SuggestionKind::CsvItem)).collect()
    }

    #[test]
    fn first_render_selects_the_first_row() {
        let mut d = Dropdown::default();
        assert!(!d.is_open());
        d.render(leaves(&["a", "b"]), "x:");
        assert!(d.is_open());
        assert_eq!(d.selected_index(), Some(0));
        assert_eq!(d.take_scroll_request(), Some(0));
        assert_eq!(d.take_scroll_request(), None);
        assert!(d.check_invariant());
    }

    #[test]
    fn rerender_keeps_selection_in_range() {
        let mut d = Dropdown::default();
        d.render(leaves(&["a", "b", "c"]), "x:");
        d.select(2);
        d.render(leaves(&["a", "b", "c"]), "x:");
        assert_eq!(d.selected_index(), Some(2));
        d.render(leaves(&["a"]), "x:");
        assert_eq!(d.selected_index(), Some(0));
    }

    #[test]
    fn hide_resets() {
        let mut d = Dropdown::default();
        d.render(leaves(&["a"]), "x:");
        d.hide();
        assert!(!d.is_open());
        assert!(d.rows().is_empty());
        assert_eq!(d.selected_index(), None);
        assert!(d.check_invariant());
    }

    #[test]
    fn rows_carry_highlights() {
        let mut d = Dropdown::default();
        d.render(vec![suggestion("Manet", SuggestionKind::CsvItem)], "artist:an");
        let seg = d.rows()[0].segments().unwrap();
        assert_eq!((seg.before, seg.matched, seg.after), ("M", "an", "et"));

        d.render(vec![suggestion("pose", SuggestionKind::Category)], "pose:ar");
        assert_eq!(d.rows()[0].segments(), None);
    }

    #[test]
    fn placement_is_bounded_by_the_viewport() {
        let anchor = CaretAnchor {
            top: 300.0,
            horizontal: HorizontalAnchor::Left(40.0),
            line_height: 16.0,
            client_top: 100.0,
            viewport_height: 768.0,
        };
        let p = DropdownPlacement::from_anchor(&anchor);
        assert_eq!(p.top, 300.0);
        assert_eq!(p.max_height, 468.0);
        assert_eq!(p.horizontal, HorizontalAnchor::Left(40.0));
    }

    #[test]
    fn out_of_range_select_is_ignored() {
        let mut d = Dropdown::default();
        d.render(leaves(&["a"]), "x:");
        d.select(5);
        assert_eq!(d.selected_index(), Some(0));
    }
}
