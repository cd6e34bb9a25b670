use words::{Category, Dictionary};

use crate::query::split_query;
use crate::settings::Settings;

pub const RANDOM_KEY: &str = "Random";
pub const RANDOM_SUBTEXT: &str = "Roll the dice 🎲";

/// What a suggestion row does when committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    /// Completes a category name and keeps the dropdown open.
    Category,
    /// A word from a CSV category.
    CsvItem,
    /// Picks one of the leaf rows at random.
    Random,
    /// An entry of a keyed category; inserts its expansion.
    Keyed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    /// Display text.
    pub key: String,
    /// Text to insert.
    pub value: String,
    pub kind: SuggestionKind,
    pub subtext: Option<String>,
}

impl Suggestion {
    fn category(name: &str) -> Self {
        Self {
            key: name.to_string(),
            value: format!("{name}:"),
            kind: SuggestionKind::Category,
            subtext: None,
        }
    }

    fn random(csv: bool) -> Self {
        Self {
            key: RANDOM_KEY.to_string(),
            value: RANDOM_KEY.to_string(),
            kind: SuggestionKind::Random,
            subtext: (!csv).then(|| RANDOM_SUBTEXT.to_string()),
        }
    }

    pub fn is_category(&self) -> bool {
        self.kind == SuggestionKind::Category
    }

    pub fn is_random(&self) -> bool {
        self.kind == SuggestionKind::Random
    }

    /// Rows a random pick may land on.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, SuggestionKind::CsvItem | SuggestionKind::Keyed)
    }

    /// Expanded line shown under the row while it is selected.
    pub fn preview(&self) -> Option<String> {
        if let Some(subtext) = self.subtext.as_deref().filter(|s| !s.is_empty()) {
            return Some(subtext.to_string());
        }
        match self.kind {
            SuggestionKind::Keyed => Some(format!("> {}", self.value)),
            _ => None,
        }
    }
}

/// Suggestions for `query`, in dictionary order.
///
/// Without a colon the query filters category names. With one, the part
/// before it names a category and the part after filters that category's
/// keys; two or more matches get a leading random row. Disabled categories
/// contribute nothing either way. Matching is a case-insensitive substring
/// test.
pub fn filter_words(dictionary: &Dictionary, settings: &Settings, query: &str) -> Vec<Suggestion> {
    let term = query.to_lowercase();

    match split_query(&term) {
        (names, None) => dictionary
            .names()
            .filter(|name| !settings.is_disabled(name))
            .filter(|name| name.to_lowercase().contains(names))
            .map(Suggestion::category)
            .collect(),
        (name, Some(filter)) => {
            let Some((name, category)) = dictionary.find(name) else {
                return Vec::new();
            };
            if settings.is_disabled(name) {
                return Vec::new();
            }
            leaf_suggestions(category, filter)
        }
    }
}

fn leaf_suggestions(category: &Category, filter: &str) -> Vec<Suggestion> {
    let kind = if category.is_csv() {
        SuggestionKind::CsvItem
    } else {
        SuggestionKind::Keyed
    };

    let leaves: Vec<Suggestion> = category
        .entries()
        .filter(|(key, _)| key.to_lowercase().contains(filter))
        .map(|(key, value)| Suggestion {
            key: key.to_string(),
            value: value.to_string(),
            kind,
            subtext: None,
        })
        .collect();

    let mut out = Vec::with_capacity(leaves.len() + 1);
    if leaves.len() > 1 {
        out.push(Suggestion::random(category.is_csv()));
    }
    out.extend(leaves);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use words::Category;

    fn dict() -> Dictionary {
        let pose = Category::Keyed(
            [("arms up", "raising both arms"), ("sit", "sitting down")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        let artist = Category::Csv(vec!["Monet".into(), "Manet".into()]);
        [("pose", pose), ("artist", artist), ("Posters", Category::Csv(vec![]))]
            .into_iter()
            .collect()
    }

    fn keys(s: &[Suggestion]) -> Vec<&str> {
        s.iter().map(|s| s.key.as_str()).collect()
    }

    #[test]
    fn category_query_lists_matching_categories() {
        let s = filter_words(&dict(), &Settings::default(), "po");
        assert_eq!(keys(&s), vec!["pose", "Posters"]);
        assert_eq!(s[0].value, "pose:");
        assert!(s.iter().all(Suggestion::is_category));
    }

    #[test]
    fn empty_query_lists_every_category() {
        let s = filter_words(&dict(), &Settings::default(), "");
        assert_eq!(keys(&s), vec!["pose", "artist", "Posters"]);
    }

    #[test]
    fn single_keyed_match_has_no_random_row() {
        let s = filter_words(&dict(), &Settings::default(), "pose:ar");
        assert_eq!(
            s,
            vec![Suggestion {
                key: "arms up".into(),
                value: "raising both arms".into(),
                kind: SuggestionKind::Keyed,
                subtext: None,
            }]
        );
    }

    #[test]
    fn several_matches_get_a_random_row_first() {
        let s = filter_words(&dict(), &Settings::default(), "pose:");
        assert_eq!(keys(&s), vec!["Random", "arms up", "sit"]);
        assert_eq!(s[0].subtext.as_deref(), Some(RANDOM_SUBTEXT));
    }

    #[test]
    fn csv_random_row_has_no_subtext() {
        let s = filter_words(&dict(), &Settings::default(), "artist:");
        assert_eq!(keys(&s), vec!["Random", "Monet", "Manet"]);
        assert_eq!(s[0].subtext, None);
        assert_eq!(s[0].preview(), None);
        assert_eq!(s[1].kind, SuggestionKind::CsvItem);
        assert_eq!(s[1].value, "Monet");
    }

    #[test]
    fn csv_filter_is_case_insensitive() {
        let s = filter_words(&dict(), &Settings::default(), "artist:AN");
        assert_eq!(keys(&s), vec!["Manet"]);
    }

    #[test]
    fn category_lookup_ignores_case() {
        let s = filter_words(&dict(), &Settings::default(), "POSE:sit");
        assert_eq!(keys(&s), vec!["sit"]);
    }

    #[test]
    fn unknown_category_yields_nothing() {
        assert!(filter_words(&dict(), &Settings::default(), "nope:a").is_empty());
    }

    #[test]
    fn disabled_categories_are_unreachable() {
        let settings = Settings {
            disabled_categories: vec!["pose".into()],
            ..Settings::default()
        };
        assert_eq!(keys(&filter_words(&dict(), &settings, "po")), vec!["Posters"]);
        assert!(filter_words(&dict(), &settings, "pose:").is_empty());
        assert!(filter_words(&dict(), &settings, "POSE:sit").is_empty());
    }

    #[test]
    fn filtering_is_pure() {
        let d = dict();
        let s = Settings::default();
        for q in ["", "po", "pose:", "artist:n", "x:y"] {
            assert_eq!(filter_words(&d, &s, q), filter_words(&d, &s, q));
        }
    }

    #[test]
    fn previews() {
        let s = filter_words(&dict(), &Settings::default(), "pose:");
        assert_eq!(s[0].preview().as_deref(), Some(RANDOM_SUBTEXT));
        assert_eq!(s[1].preview().as_deref(), Some("> raising both arms"));
        let cats = filter_words(&dict(), &Settings::default(), "art");
        assert_eq!(cats[0].preview(), None);
    }
}
