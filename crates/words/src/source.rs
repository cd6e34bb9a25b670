use std::{io, path::PathBuf};

use thiserror::Error;

use crate::WordData;

/// Errors a [`WordSource`] can report.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid word data: {0}")]
    Decode(#[from] serde_json::Error),

    /// Failure of a source living in another crate (e.g. an HTTP fetch).
    #[error("word source failed: {0}")]
    Remote(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Somewhere a complete [`WordData`] document can be read from.
///
/// A fetch is idempotent and takes no parameters; the cache decides when to
/// call it.
pub trait WordSource: Send + Sync {
    fn fetch(&self) -> Result<WordData, SourceError>;
}

/// A fixed document; useful for hosts that embed their data and for tests.
impl WordSource for WordData {
    fn fetch(&self) -> Result<WordData, SourceError> {
        Ok(self.clone())
    }
}

impl<S: WordSource + ?Sized> WordSource for Box<S> {
    fn fetch(&self) -> Result<WordData, SourceError> {
        (**self).fetch()
    }
}
