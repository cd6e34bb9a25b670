use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use caret::{CaretLocator, LocateError, MeasurementBackend};
use input_core::{TextField, clamp_to_char_boundary};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use words::WordCache;

use crate::dropdown::{Dropdown, DropdownPlacement, DropdownRow};
use crate::query::{extract_query, trigger_start};
use crate::settings::SharedSettings;
use crate::suggest::{Suggestion, SuggestionKind, filter_words};

/// How long a blur waits before hiding, so a pointer-down on a row can land
/// first.
pub const BLUR_HIDE_DELAY: Duration = Duration::from_millis(150);

/// Zoom factor of the canvas hosting the field, read at positioning time.
pub type ScaleProvider = Rc<dyn Fn() -> f32>;

macro_rules! debug_log {
    ($self:expr, $($arg:tt)+) => {
        if $self.settings.debug_output() {
            log::debug!(target: "autocomplete", $($arg)+);
        }
    };
}

/// Keys the controller reacts to, by DOM `KeyboardEvent.key` name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Tab,
    Escape,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Escape" => Key::Escape,
            _ => Key::Other,
        }
    }

    fn is_navigation_or_commit(self) -> bool {
        matches!(self, Key::ArrowUp | Key::ArrowDown | Key::Enter | Key::Tab)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Closed,
    Open,
}

/// Result of committing a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// `text` plus `", "` replaced the trigger span; the dropdown closed.
    Inserted { text: String },
    /// The trigger span now reads `<trigger><category>:`; the dropdown stays
    /// open and re-evaluates once the host reports the edit visible.
    CategoryChosen { category: String },
    /// Closed without touching the text.
    Closed,
    /// Nothing was open or the row does not exist.
    Ignored,
}

/// Per-field autocomplete state machine.
///
/// Transitions are plain methods; the host maps its input events onto them
/// (or uses [`key_down`](Self::key_down) / [`key_up`](Self::key_up), which
/// do that mapping). Deferred work is explicit: call
/// [`poll_deferred`](Self::poll_deferred) from the event loop, or
/// [`on_mutation_visible`](Self::on_mutation_visible) after a category
/// commit has been applied to the field.
pub struct AutocompleteController<B: MeasurementBackend> {
    locator: Rc<CaretLocator<B>>,
    words: Arc<WordCache>,
    settings: SharedSettings,
    scale: ScaleProvider,
    rng: Box<dyn RngCore>,
    dropdown: Dropdown,
    /// A pointer-down on a row is in progress.
    interacting: bool,
    pending_hide: Option<Instant>,
    pending_reevaluate: bool,
}

impl<B: MeasurementBackend> AutocompleteController<B> {
    pub fn new(locator: Rc<CaretLocator<B>>, words: Arc<WordCache>, settings: SharedSettings) -> Self {
        Self {
            locator,
            words,
            settings,
            scale: Rc::new(|| 1.0),
            rng: Box::new(StdRng::from_entropy()),
            dropdown: Dropdown::default(),
            interacting: false,
            pending_hide: None,
            pending_reevaluate: false,
        }
    }

    pub fn with_scale(mut self, scale: ScaleProvider) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn state(&self) -> ControllerState {
        if self.dropdown.is_open() {
            ControllerState::Open
        } else {
            ControllerState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.dropdown.selected_index()
    }

    pub fn rows(&self) -> &[DropdownRow] {
        self.dropdown.rows()
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.dropdown.take_scroll_request()
    }

    /// Earliest time [`poll_deferred`](Self::poll_deferred) has work to do.
    /// A pending re-evaluation is due immediately.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        if self.pending_reevaluate {
            return Some(now);
        }
        self.pending_hide
    }

    /// Re-derive the query and suggestions from the field and open, update
    /// or close the dropdown. Returns whether it is open afterwards.
    pub fn on_text_changed<F: TextField + ?Sized>(&mut self, field: &F) -> Result<bool, LocateError> {
        let settings = self.settings.snapshot();
        let Some(query) = extract_query(field.value(), field.selection_start(), settings.trigger_character)
        else {
            debug_log!(self, "no open query");
            self.hide();
            return Ok(false);
        };

        let data = self.words.get();
        let suggestions = filter_words(&data.words, &settings, query);
        debug_log!(self, "query {query:?}: {} suggestions", suggestions.len());
        if suggestions.is_empty() {
            self.hide();
            return Ok(false);
        }

        let anchor = match self.locator.caret_anchor(field, (self.scale)()) {
            Ok(anchor) => anchor,
            Err(err) => {
                self.hide();
                return Err(err);
            }
        };
        self.dropdown.render(suggestions, query);
        self.dropdown.place(DropdownPlacement::from_anchor(&anchor));
        debug_assert!(self.dropdown.check_invariant());
        Ok(true)
    }

    /// Move the selection one row, wrapping at both ends. Returns whether
    /// the dropdown was open.
    pub fn on_navigate(&mut self, direction: Direction) -> bool {
        let len = self.dropdown.rows().len();
        if !self.dropdown.is_open() || len == 0 {
            return false;
        }
        let current = self.dropdown.selected_index().unwrap_or(0);
        let next = match direction {
            Direction::Up if current == 0 => len - 1,
            Direction::Up => current - 1,
            Direction::Down if current + 1 >= len => 0,
            Direction::Down => current + 1,
        };
        debug_log!(self, "select row {next}");
        self.dropdown.select(next);
        true
    }

    /// Commit the selected row.
    pub fn on_commit<F: TextField + ?Sized>(&mut self, field: &mut F) -> CommitOutcome {
        match self.dropdown.selected_index() {
            Some(index) if self.dropdown.is_open() => self.commit_row(field, index),
            _ => CommitOutcome::Ignored,
        }
    }

    /// A row was clicked.
    pub fn on_row_activated<F: TextField + ?Sized>(&mut self, field: &mut F, index: usize) -> CommitOutcome {
        if !self.dropdown.is_open() {
            return CommitOutcome::Ignored;
        }
        self.commit_row(field, index)
    }

    /// Pointer pressed on a row; the blur that follows must not hide.
    pub fn on_row_pointer_down(&mut self) {
        self.interacting = true;
    }

    /// Close now and drop any deferred work.
    pub fn on_cancel(&mut self) {
        self.pending_hide = None;
        self.pending_reevaluate = false;
        self.hide();
    }

    /// A plain click in the field.
    pub fn on_click(&mut self) {
        self.on_cancel();
    }

    pub fn on_blur(&mut self, now: Instant) {
        if self.interacting {
            self.interacting = false;
            return;
        }
        self.pending_hide = Some(now + BLUR_HIDE_DELAY);
    }

    /// The host applied the last category commit to the field.
    pub fn on_mutation_visible<F: TextField + ?Sized>(&mut self, field: &F) -> Result<bool, LocateError> {
        if !self.pending_reevaluate {
            return Ok(self.is_open());
        }
        self.pending_reevaluate = false;
        self.on_text_changed(field)
    }

    /// Run deferred work that is due at `now`.
    pub fn poll_deferred<F: TextField + ?Sized>(&mut self, now: Instant, field: &F) -> Result<(), LocateError> {
        if self.pending_reevaluate {
            self.pending_reevaluate = false;
            self.on_text_changed(field)?;
        }
        if self.pending_hide.is_some_and(|due| due <= now) {
            self.pending_hide = None;
            debug_log!(self, "blur hide");
            self.hide();
        }
        Ok(())
    }

    /// Key pressed. Returns whether the host should suppress the key's
    /// default action.
    pub fn key_down<F: TextField + ?Sized>(&mut self, key: Key, field: &mut F) -> bool {
        debug_log!(self, "key down {key:?}");
        if !self.dropdown.is_open() {
            return false;
        }
        match key {
            Key::ArrowUp => self.on_navigate(Direction::Up),
            Key::ArrowDown => self.on_navigate(Direction::Down),
            Key::Enter | Key::Tab => {
                self.on_commit(field);
                true
            }
            Key::Escape | Key::Other => false,
        }
    }

    /// Key released.
    pub fn key_up<F: TextField + ?Sized>(&mut self, key: Key, field: &F) -> Result<(), LocateError> {
        if key == Key::Escape {
            self.on_cancel();
            return Ok(());
        }
        if !key.is_navigation_or_commit() {
            self.on_text_changed(field)?;
        }
        Ok(())
    }

    fn commit_row<F: TextField + ?Sized>(&mut self, field: &mut F, index: usize) -> CommitOutcome {
        let Some(row) = self.dropdown.rows().get(index) else {
            return CommitOutcome::Ignored;
        };
        let suggestion = row.suggestion.clone();
        debug_log!(self, "commit {:?} {:?}", suggestion.kind, suggestion.key);

        field.focus();
        let trigger = self.settings.trigger_character();
        let text = field.value().to_string();
        let caret = clamp_to_char_boundary(&text, field.selection_start());
        let Some(start) = trigger_start(&text, caret, trigger) else {
            self.hide();
            return CommitOutcome::Closed;
        };

        let value = match suggestion.kind {
            SuggestionKind::Category => {
                let inserted = format!("{trigger}{}:", suggestion.key);
                field.set_value(format!("{}{inserted}{}", &text[..start], &text[caret..]));
                field.set_caret(start + inserted.len());
                self.dropdown.select(0);
                self.pending_reevaluate = true;
                return CommitOutcome::CategoryChosen {
                    category: suggestion.key,
                };
            }
            SuggestionKind::Random => match self.random_leaf() {
                Some(value) => value,
                None => {
                    self.hide();
                    return CommitOutcome::Closed;
                }
            },
            SuggestionKind::CsvItem | SuggestionKind::Keyed => suggestion.value,
        };

        field.set_value(format!("{}{value}, {}", &text[..start], &text[caret..]));
        field.set_caret(start + value.len() + 2);
        self.hide();
        CommitOutcome::Inserted { text: value }
    }

    fn random_leaf(&mut self) -> Option<String> {
        let leaves: Vec<&Suggestion> = self
            .dropdown
            .rows()
            .iter()
            .map(|r| &r.suggestion)
            .filter(|s| s.is_leaf())
            .collect();
        if leaves.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range(0..leaves.len());
        Some(leaves[pick].value.clone())
    }

    fn hide(&mut self) {
        self.dropdown.hide();
    }
}
