//! # autocomplete
//!
//! Trigger-character autocomplete for prompt text fields.
//!
//! Typing the trigger (`@` by default) opens a query that runs to the caret.
//! A query without a colon suggests category names; `category:filter`
//! suggests that category's words, with a leading "Random" row when more
//! than one matches. Committing a category completes `@category:` and keeps
//! the dropdown open; committing a word replaces the whole query with the
//! word and `", "`.
//!
//! - [`query`]: locating the open query and splitting it
//! - [`filter_words`]: the pure suggestion step
//! - [`AutocompleteController`]: the per-field state machine
//! - [`FieldRegistry`]: controllers for every attached field
//!
//! The dropdown is a model, not a widget. Hosts render
//! [`AutocompleteController::rows`] at [`Dropdown::placement`] and feed input
//! events back in.

mod controller;
mod dropdown;
mod highlight;
pub mod query;
mod registry;
mod settings;
mod suggest;

pub use controller::{
    AutocompleteController, BLUR_HIDE_DELAY, CommitOutcome, ControllerState, Direction, Key, ScaleProvider,
};
pub use dropdown::{Dropdown, DropdownPlacement, DropdownRow};
pub use highlight::{Segments, find_ignore_case, highlight_needle};
pub use query::{extract_query, split_query, trigger_start};
pub use registry::FieldRegistry;
pub use settings::{CategoryToggle, Settings, SettingsError, SharedSettings, category_toggles};
pub use suggest::{RANDOM_KEY, RANDOM_SUBTEXT, Suggestion, SuggestionKind, filter_words};
