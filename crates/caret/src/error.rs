use thiserror::Error;

/// Misuse of the locator. These are programming errors in the host, not user
/// input problems, and nothing in the engine recovers from them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LocateError {
    #[error("caret coordinates can only be computed in a windowed environment")]
    NotWindowed,
    #[error("field does not belong to a document")]
    NoOwnerDocument,
    #[error("field's document does not belong to a window")]
    NoWindow,
}
