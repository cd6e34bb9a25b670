use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One named bucket of words.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    /// Plain words; each inserts itself.
    Csv(Vec<String>),
    /// Display key to the text it expands to.
    Keyed(IndexMap<String, String>),
}

impl Category {
    pub fn is_csv(&self) -> bool {
        matches!(self, Category::Csv(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Category::Csv(items) => items.len(),
            Category::Keyed(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(key, value)` pairs in stored order. CSV items are their own value.
    pub fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        match self {
            Category::Csv(items) => Box::new(items.iter().map(|s| (s.as_str(), s.as_str()))),
            Category::Keyed(map) => Box::new(map.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
        }
    }
}

/// Category name to category, in load order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(IndexMap<String, Category>);

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a category. A replaced category keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, category: Category) -> Option<Category> {
        self.0.insert(name.into(), category)
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.0.get(name)
    }

    /// Look a category up ignoring case. An exact match wins over a
    /// case-folded one.
    pub fn find(&self, name: &str) -> Option<(&str, &Category)> {
        if let Some((k, v)) = self.0.get_key_value(name) {
            return Some((k.as_str(), v));
        }
        let folded = name.to_lowercase();
        self.0
            .iter()
            .find(|(k, _)| k.to_lowercase() == folded)
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Category)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, Category)>>(iter: I) -> Self {
        Dictionary(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The document served by the dictionary endpoint:
/// `{ "words": { ... }, "categories": [ ... ] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordData {
    #[serde(default)]
    pub words: Dictionary,
    /// Every category name the source saw, sorted. May list names whose
    /// data failed to load.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl WordData {
    /// Wrap a dictionary, deriving the sorted category list from its names.
    pub fn from_dictionary(words: Dictionary) -> Self {
        let mut categories: Vec<String> = words.names().map(str::to_string).collect();
        categories.sort();
        Self { words, categories }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.categories.is_empty()
    }
}
