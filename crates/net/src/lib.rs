//! # net
//!
//! The one outbound read of the autocomplete engine: fetching the word
//! dictionary document from the host server.

use std::io::Read;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use words::{SourceError, WordData, WordSource};

/// Path the host server serves the dictionary document on.
pub const WORDS_ENDPOINT: &str = "/cps/get_words";

const USER_AGENT: &str = "prompt-snippets/0.1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Dictionaries are small; anything past this is not one.
const MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("client build error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body: {0}")]
    Body(#[from] std::io::Error),

    #[error("response is not a word document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Reads [`WordData`] over HTTP with a blocking client.
#[derive(Clone, Debug)]
pub struct HttpWordSource {
    url: String,
    timeout: Duration,
    use_system_proxy: bool,
}

impl HttpWordSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            use_system_proxy: true,
        }
    }

    /// Source for the dictionary endpoint of the server at `base_url`.
    pub fn for_server(base_url: &str) -> Self {
        Self::new(format!("{}{WORDS_ENDPOINT}", base_url.trim_end_matches('/')))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connect directly, ignoring `HTTP_PROXY` and friends. Useful when the
    /// server is on the loopback interface.
    pub fn without_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn fetch_words(&self) -> Result<WordData, FetchError> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);
        if !self.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(FetchError::Client)?;

        let resp = client
            .get(&self.url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: self.url.clone(),
                source,
            })?;

        let status = resp.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let mut buf = Vec::new();
        resp.take(MAX_BODY_BYTES).read_to_end(&mut buf)?;
        Ok(serde_json::from_slice(&buf)?)
    }
}

impl WordSource for HttpWordSource {
    fn fetch(&self) -> Result<WordData, SourceError> {
        self.fetch_words()
            .map_err(|e| SourceError::Remote(Box::new(e)))
    }
}

/// Outcome of a background fetch.
#[derive(Debug)]
pub struct WordFetch {
    pub url: String,
    pub duration_ms: u128,
    pub result: Result<WordData, FetchError>,
}

/// Fetch on a new thread and report through `cb`.
pub fn fetch_words_in_background(
    source: HttpWordSource,
    cb: Arc<dyn Fn(WordFetch) + Send + Sync>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let start = Instant::now();
        let result = source.fetch_words();
        if let Err(err) = &result {
            log::warn!(target: "net", "word fetch failed: {err}");
        }
        cb(WordFetch {
            url: source.url,
            duration_ms: start.elapsed().as_millis(),
            result,
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_url_gets_the_endpoint_path() {
        assert_eq!(
            HttpWordSource::for_server("http://127.0.0.1:8188/").url(),
            "http://127.0.0.1:8188/cps/get_words"
        );
        assert_eq!(
            HttpWordSource::for_server("http://host").url(),
            "http://host/cps/get_words"
        );
    }

    #[test]
    fn status_error_names_the_code() {
        let err = FetchError::Status {
            url: "http://x".into(),
            status: 404,
        };
        assert_eq!(err.to_string(), "http://x answered with status 404");
    }
}
