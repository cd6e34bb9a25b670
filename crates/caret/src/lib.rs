//! # caret
//!
//! Pixel coordinates of a caret offset inside a plain-text field, computed
//! without native caret APIs.
//!
//! The field's layout is replayed on a throwaway measurement surface: the
//! surface copies every layout-relevant property of the field, takes the
//! text before the caret as plain content and the text after it inside a
//! marker node, and the marker's offset is the caret position. A second pass
//! turns that into a viewport anchor one line below the caret, compensating
//! for field scroll, page scroll and canvas zoom.
//!
//! Everything environment-specific sits behind [`MeasurementBackend`], so the
//! algorithm runs the same against a browser DOM, a native text engine, or a
//! fake in tests.

mod backend;
mod error;
mod locator;
mod mirror;

pub use backend::{MarkerBox, MeasurementBackend, MeasurementSurface};
pub use error::LocateError;
pub use locator::{CaretAnchor, CaretCoordinates, CaretLocator, CaretOptions, HorizontalAnchor};
pub use mirror::{MARKER_PLACEHOLDER, MirrorStyle, mirror_content, mirror_style};
