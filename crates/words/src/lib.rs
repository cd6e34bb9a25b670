//! # words
//!
//! The suggestion dictionary: its data model and JSON schema, the sources it
//! is loaded from, and the process-wide cache every controller reads.
//!
//! A dictionary maps category names to either a plain list of words (a CSV
//! category) or a key to expansion mapping (a keyed category). It is loaded
//! once, shared by reference, and only ever replaced as a whole.

mod cache;
mod data;
mod directory;
mod source;

pub use cache::WordCache;
pub use data::{Category, Dictionary, WordData};
pub use directory::{DirectorySource, USER_DIR_NAME};
pub use source::{SourceError, WordSource};
