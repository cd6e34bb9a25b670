use std::{
    sync::{Arc, Mutex, PoisonError, RwLock},
    thread,
};

use crate::{SourceError, WordData, WordSource};

/// Process-wide dictionary cache.
///
/// Constructed once at startup and handed to every controller as
/// `Arc<WordCache>`. The first access fetches from the source; later
/// accesses only take a short read guard. Fetches run under a separate lock,
/// so readers never wait on the source. Failed fetches degrade to an empty
/// dictionary and are not retried; [`WordCache::reload`] is the one way to
/// fetch again.
pub struct WordCache {
    source: Box<dyn WordSource>,
    data: RwLock<Option<Arc<WordData>>>,
    fetching: Mutex<()>,
}

impl WordCache {
    pub fn new(source: impl WordSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            data: RwLock::new(None),
            fetching: Mutex::new(()),
        }
    }

    /// A cache that starts out holding `data`; reloading re-reads the same
    /// document.
    pub fn preloaded(data: WordData) -> Self {
        let snapshot = Arc::new(data.clone());
        Self {
            source: Box::new(data),
            data: RwLock::new(Some(snapshot)),
            fetching: Mutex::new(()),
        }
    }

    /// The current dictionary, fetching it on first use.
    pub fn get(&self) -> Arc<WordData> {
        if let Some(data) = self.snapshot() {
            return data;
        }

        let _fetching = self.fetching.lock().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have fetched while we waited.
        if let Some(data) = self.snapshot() {
            return data;
        }

        let data = match self.source.fetch() {
            Ok(data) => {
                log::debug!(target: "words", "word data loaded: {} categories", data.categories.len());
                Arc::new(data)
            }
            Err(err) => {
                log::error!(target: "words", "failed to load words: {err}");
                Arc::new(WordData::default())
            }
        };
        self.publish(Arc::clone(&data));
        data
    }

    /// The cached dictionary without triggering a fetch.
    pub fn snapshot(&self) -> Option<Arc<WordData>> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Fetch again and replace the dictionary as a whole. On failure the
    /// previous dictionary stays in place.
    pub fn reload(&self) -> Result<Arc<WordData>, SourceError> {
        let _fetching = self.fetching.lock().unwrap_or_else(PoisonError::into_inner);
        let data = Arc::new(self.source.fetch()?);
        self.publish(Arc::clone(&data));
        log::info!(target: "words", "word data reloaded: {} categories", data.categories.len());
        Ok(data)
    }

    fn publish(&self, data: Arc<WordData>) {
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = Some(data);
    }

    /// Warm the cache on a background thread so the first keystroke does
    /// not wait for the fetch.
    pub fn preload_in_background(self: &Arc<Self>) -> thread::JoinHandle<()> {
        let cache = Arc::clone(self);
        thread::spawn(move || {
            cache.get();
        })
    }
}

impl std::fmt::Debug for WordCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordCache")
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Dictionary};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{self, Receiver, Sender};

    struct Counting {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl WordSource for Counting {
        fn fetch(&self) -> Result<WordData, SourceError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SourceError::Remote("offline".into()));
            }
            let words: Dictionary = [(format!("c{n}"), Category::Csv(vec!["x".into()]))]
                .into_iter()
                .collect();
            Ok(WordData::from_dictionary(words))
        }
    }

    fn counting(fail: bool) -> (WordCache, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = WordCache::new(Counting {
            calls: Arc::clone(&calls),
            fail,
        });
        (cache, calls)
    }

    #[test]
    fn fetches_once_lazily() {
        let (cache, calls) = counting(false);
        assert!(!cache.is_loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let a = cache.get();
        let b = cache.get();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.categories, vec!["c0"]);
    }

    #[test]
    fn failure_degrades_to_empty_without_retrying() {
        let (cache, calls) = counting(true);
        assert!(cache.get().is_empty());
        assert!(cache.get().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reload_replaces_wholesale() {
        let (cache, _) = counting(false);
        let first = cache.get();
        let second = cache.reload().unwrap();
        assert_eq!(second.categories, vec!["c1"]);
        assert!(!Arc::ptr_eq(&first, &cache.get()));
        // earlier snapshots are untouched
        assert_eq!(first.categories, vec!["c0"]);
    }

    #[test]
    fn failed_reload_reports_the_error() {
        let cache = WordCache::new(Counting {
            calls: Arc::new(AtomicUsize::new(0)),
            fail: true,
        });
        assert!(cache.reload().is_err());
        assert!(!cache.is_loaded());
    }

    #[test]
    fn preloaded_cache_never_fetches_first() {
        let words: Dictionary = [("pose", Category::Csv(vec![]))].into_iter().collect();
        let cache = WordCache::preloaded(WordData::from_dictionary(words));
        assert!(cache.is_loaded());
        assert_eq!(cache.get().categories, vec!["pose"]);
    }

    /// Announces the fetch, then holds it until the gate opens.
    struct Gated {
        started: Mutex<Sender<()>>,
        gate: Mutex<Receiver<()>>,
    }

    impl WordSource for Gated {
        fn fetch(&self) -> Result<WordData, SourceError> {
            let _ = self.started.lock().unwrap().send(());
            let _ = self.gate.lock().unwrap().recv();
            let words: Dictionary = [("pose", Category::Csv(vec![]))].into_iter().collect();
            Ok(WordData::from_dictionary(words))
        }
    }

    #[test]
    fn readers_do_not_wait_for_a_slow_fetch() {
        let (started_tx, started_rx) = mpsc::channel();
        let (gate_tx, gate_rx) = mpsc::channel();
        let cache = Arc::new(WordCache::new(Gated {
            started: Mutex::new(started_tx),
            gate: Mutex::new(gate_rx),
        }));

        let loader = cache.preload_in_background();
        started_rx.recv().unwrap();
        // the fetch is in flight and holds no guard on the data
        assert!(cache.snapshot().is_none());
        assert!(!cache.is_loaded());
        assert_eq!(format!("{cache:?}"), "WordCache { loaded: false, .. }");

        gate_tx.send(()).unwrap();
        loader.join().unwrap();
        assert!(cache.is_loaded());
        assert_eq!(cache.get().categories, vec!["pose"]);
    }

    #[test]
    fn background_preload_fills_the_cache() {
        let (cache, calls) = counting(false);
        let cache = Arc::new(cache);
        cache.preload_in_background().join().unwrap();
        assert!(cache.is_loaded());
        cache.get();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
