use crate::DEFAULT_MAX_GENERATION_ATTEMPTS;
use async_trait::async_trait;
use linkstash_core::error::Result;
use linkstash_core::{AliasStore, SaveOutcome, ShortCode, StorageError};
use linkstash_generator::{Generator, RandomGenerator};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Both directions of every mapping, always updated together.
#[derive(Debug, Default)]
struct Tables {
    short_to_long: HashMap<ShortCode, String>,
    long_to_short: HashMap<String, ShortCode>,
}

/// In-memory implementation of [`AliasStore`].
///
/// A single reader/writer lock guards both maps, so a save is one atomic
/// check-generate-insert step: writers are serialized against each other
/// and against readers, while readers run concurrently. The lock is never
/// held across an `.await`.
#[derive(Debug)]
pub struct InMemoryStore<G = RandomGenerator> {
    tables: RwLock<Tables>,
    generator: G,
    max_attempts: usize,
}

impl InMemoryStore {
    /// Creates an empty store with an entropy-seeded [`RandomGenerator`].
    pub fn new() -> Self {
        Self::with_generator(RandomGenerator::new())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Generator> InMemoryStore<G> {
    /// Creates an empty store drawing codes from `generator`.
    pub fn with_generator(generator: G) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            generator,
            max_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
        }
    }

    /// Sets how many candidates a single save may draw before giving up.
    ///
    /// Values below 1 are raised to 1.
    pub fn max_generation_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.tables.read().short_to_long.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draws candidates until one is unused. Caller must hold the write lock.
    fn next_free_code(&self, tables: &Tables) -> Result<ShortCode> {
        for attempt in 1..=self.max_attempts {
            let candidate: ShortCode = self.generator.generate().into();
            if !tables.short_to_long.contains_key(&candidate) {
                return Ok(candidate);
            }
            trace!(code = %candidate, attempt, "generated code already taken");
        }

        Err(StorageError::KeyspaceExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[async_trait]
impl<G: Generator> AliasStore for InMemoryStore<G> {
    async fn save(&self, original_url: &str) -> Result<SaveOutcome> {
        let mut tables = self.tables.write();

        if let Some(code) = tables.long_to_short.get(original_url) {
            trace!(code = %code, "url already shortened");
            return Ok(SaveOutcome::existing(code.clone()));
        }

        let code = self.next_free_code(&tables)?;
        tables
            .short_to_long
            .insert(code.clone(), original_url.to_owned());
        tables
            .long_to_short
            .insert(original_url.to_owned(), code.clone());

        debug!(code = %code, url = %original_url, "stored new mapping");
        Ok(SaveOutcome::created(code))
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        let tables = self.tables.read();
        Ok(tables.short_to_long.get(code).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    /// A generator replaying `codes` in order, then repeating the last one.
    fn scripted(codes: &[&str]) -> impl Generator<Output = ShortCode> {
        let queue: VecDeque<ShortCode> = codes.iter().map(|c| code(c)).collect();
        let queue = Mutex::new(queue);
        move || {
            let mut queue = queue.lock().unwrap();
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            }
        }
    }

    #[tokio::test]
    async fn save_and_get() {
        let store = InMemoryStore::new();

        let outcome = store.save("https://example.com").await.unwrap();
        assert!(outcome.created);
        assert!(outcome.code.is_well_formed());

        let url = store.get(&outcome.code).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn resave_returns_existing_code() {
        let store = InMemoryStore::new();

        let first = store.save("https://example.com").await.unwrap();
        let second = store.save("https://example.com").await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.code, second.code);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn distinct_urls_get_distinct_codes() {
        let store = InMemoryStore::new();

        let a = store.save("https://a.example").await.unwrap();
        let b = store.save("https://b.example").await.unwrap();

        assert_ne!(a.code, b.code);
        assert_eq!(
            store.get(&a.code).await.unwrap().as_deref(),
            Some("https://a.example")
        );
        assert_eq!(
            store.get(&b.code).await.unwrap().as_deref(),
            Some("https://b.example")
        );
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let store = InMemoryStore::new();

        assert!(store.get(&code("doesnotexist")).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn collision_draws_a_new_code() {
        let store = InMemoryStore::with_generator(scripted(&[
            "aaaaaaaaaa",
            "aaaaaaaaaa",
            "bbbbbbbbbb",
        ]));

        let first = store.save("https://one.example").await.unwrap();
        let second = store.save("https://two.example").await.unwrap();

        assert_eq!(first.code.as_str(), "aaaaaaaaaa");
        assert_eq!(second.code.as_str(), "bbbbbbbbbb");
    }

    #[tokio::test]
    async fn exhausted_keyspace_is_reported() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let generator = move || {
            counter.fetch_add(1, Ordering::SeqCst);
            code("aaaaaaaaaa")
        };
        let store = InMemoryStore::with_generator(generator).max_generation_attempts(5);

        store.save("https://one.example").await.unwrap();
        let err = store.save("https://two.example").await.unwrap_err();

        assert_eq!(err, StorageError::KeyspaceExhausted { attempts: 5 });
        assert_eq!(calls.load(Ordering::SeqCst), 1 + 5);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let store = InMemoryStore::new().max_generation_attempts(0);

        assert!(store.save("https://example.com").await.unwrap().created);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_of_same_url_create_once() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = vec![];

        for _ in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.save("https://race.example").await.unwrap()
            }));
        }

        let mut outcomes = vec![];
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }

        let created = outcomes.iter().filter(|o| o.created).count();
        assert_eq!(created, 1);
        let codes: HashSet<_> = outcomes.into_iter().map(|o| o.code).collect();
        assert_eq!(codes.len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_of_distinct_urls() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = vec![];

        for i in 0..64u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let url = format!("https://example{i}.com");
                let outcome = store.save(&url).await.unwrap();
                (url, outcome)
            }));
        }

        let mut codes = HashSet::new();
        for handle in handles {
            let (url, outcome) = handle.await.unwrap();
            assert!(outcome.created);
            assert_eq!(store.get(&outcome.code).await.unwrap(), Some(url));
            codes.insert(outcome.code);
        }

        assert_eq!(codes.len(), 64);
        assert_eq!(store.len(), 64);
    }
}
