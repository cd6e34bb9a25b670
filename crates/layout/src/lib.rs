//! # layout
//!
//! A small text layout engine for preserved-white-space blocks, and a caret
//! measurement backend built on it.
//!
//! The engine only knows what a textarea mirror needs: words, spaces, tabs
//! and hard breaks laid out in lines of a fixed height, wrapping at a
//! definite width. Glyph widths come from a [`TextMeasurer`], so the host
//! decides how text is shaped.

mod backend;
mod lines;
mod text;
mod tokens;

pub use backend::{LayoutSurface, TextLayoutBackend};
pub use lines::{LineBox, TextLayout, layout_text};
pub use text::{FixedAdvanceMeasurer, TextMeasurer};
