//! # input_core
//!
//! UI-agnostic view of the text field the autocomplete engine is attached to.
//!
//! - [`TextField`]: the capability a host widget exposes (value, selection,
//!   scroll, geometry, computed style, focus, owning document)
//! - [`FieldId`]: opaque host-assigned identifier for a field
//! - [`SelectionRange`]: a normalized byte range into the field's value
//! - [`MemoryField`]: an in-memory field for headless hosts and tests
//!
//! It depends on no UI toolkit; offsets are UTF-8 byte indices that always sit
//! on character boundaries.

mod field;
mod id;
mod memory;
mod selection;
mod text;

pub use field::{DocumentMetrics, FieldKind, RootMetrics, TextField, WindowMetrics};
pub use id::FieldId;
pub use memory::MemoryField;
pub use selection::SelectionRange;

pub use text::{clamp_to_char_boundary, filter_single_line, normalize_newlines, prev_cursor_boundary};
