//! Lazy keyed cache for externally computed annotations.
//!
//! A [`KeyedCache`] maps keys (raw text, or token vectors) to
//! [`Annotation`]s. A configured factory is invoked on the first lookup of a
//! key and never again for that key, including under concurrent misses,
//! which coalesce into a single factory call through a per-key gate. This is
//! the at-most-one-compute guarantee that makes it safe to hang an expensive
//! external NLP call behind the factory.
//!
//! Caches persist as **two parallel, order-correlated files**: a JSON array
//! of keys and a JSON array of annotations, index-aligned. The factory is
//! never serialized; it must be supplied again when the cache is rebuilt.
//!
//! # Examples
//!
//! ```
//! use textprep::annotation::{Annotation, TokenAnnotation};
//! use textprep::cache::KeyedCache;
//!
//! let cache: KeyedCache<String> = KeyedCache::new(Box::new(|text: &String| {
//!     Ok(Annotation::new(vec![TokenAnnotation::new(
//!         text.clone(),
//!         text.to_lowercase(),
//!         "WORD",
//!         false,
//!     )]))
//! }));
//!
//! let first = cache.get_or_compute(&"Hello".to_string()).unwrap();
//! let second = cache.get_or_compute(&"Hello".to_string()).unwrap();
//! // Same stored value, no recomputation.
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! ```

use std::fs::File;
use std::hash::Hash;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::annotation::Annotation;
use crate::error::{Result, TextPrepError};

/// The factory invoked on a cache miss.
pub type AnnotationFactory<K> = Box<dyn Fn(&K) -> Result<Annotation> + Send + Sync>;

/// A lazy keyed store of annotations with an at-most-one-compute guarantee.
pub struct KeyedCache<K> {
    entries: RwLock<AHashMap<K, Arc<Annotation>>>,
    in_flight: Mutex<AHashMap<K, Arc<Mutex<()>>>>,
    factory: AnnotationFactory<K>,
}

impl<K> KeyedCache<K>
where
    K: Eq + Hash + Clone + Serialize + DeserializeOwned,
{
    /// Create an empty cache with the given factory.
    pub fn new(factory: AnnotationFactory<K>) -> Self {
        KeyedCache {
            entries: RwLock::new(AHashMap::new()),
            in_flight: Mutex::new(AHashMap::new()),
            factory,
        }
    }

    /// Look up a key, computing and storing its annotation on first use.
    ///
    /// Concurrent lookups for the same missing key block on a per-key gate
    /// and all receive the one computed value. A factory error is returned
    /// to the caller and nothing is stored, so a later lookup retries.
    pub fn get_or_compute(&self, key: &K) -> Result<Arc<Annotation>> {
        if let Some(value) = self.entries.read().get(key) {
            return Ok(Arc::clone(value));
        }

        let gate = {
            let mut in_flight = self.in_flight.lock();
            Arc::clone(
                in_flight
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        let _guard = gate.lock();

        // A concurrent caller may have computed the value while we waited.
        if let Some(value) = self.entries.read().get(key) {
            self.in_flight.lock().remove(key);
            return Ok(Arc::clone(value));
        }

        let result = (self.factory)(key);
        let outcome = match result {
            Ok(annotation) => {
                let value = Arc::new(annotation);
                self.entries.write().insert(key.clone(), Arc::clone(&value));
                Ok(value)
            }
            Err(e) => Err(e),
        };
        self.in_flight.lock().remove(key);
        outcome
    }

    /// Look up a key without triggering computation.
    pub fn peek(&self, key: &K) -> Option<Arc<Annotation>> {
        self.entries.read().get(key).cloned()
    }

    /// Store an annotation under a key, replacing any previous value.
    pub fn insert(&self, key: K, annotation: Annotation) -> Arc<Annotation> {
        let value = Arc::new(annotation);
        self.entries.write().insert(key, Arc::clone(&value));
        value
    }

    /// Whether the cache holds a value for the key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    /// The number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Persist the cache as two parallel files: keys and annotations, in
    /// matching order. The factory is not persisted.
    ///
    /// Must not run concurrently with lookups that mutate the cache; treat
    /// it as an exclusive maintenance operation.
    pub fn save(&self, keys_path: &Path, docs_path: &Path) -> Result<()> {
        let entries = self.entries.read();
        let mut keys: Vec<&K> = Vec::with_capacity(entries.len());
        let mut docs: Vec<&Annotation> = Vec::with_capacity(entries.len());
        for (key, value) in entries.iter() {
            keys.push(key);
            docs.push(value.as_ref());
        }

        serde_json::to_writer(BufWriter::new(File::create(keys_path)?), &keys)?;
        serde_json::to_writer(BufWriter::new(File::create(docs_path)?), &docs)?;
        Ok(())
    }

    /// Replace the in-memory cache with the contents of the given files.
    ///
    /// Both files must exist and hold the same number of entries; a missing
    /// file or a length mismatch is a fatal load error and leaves the
    /// current contents untouched. Loading is a replacement, not a merge.
    pub fn load(&self, keys_path: &Path, docs_path: &Path) -> Result<()> {
        let keys: Vec<K> = serde_json::from_reader(BufReader::new(File::open(keys_path)?))?;
        let docs: Vec<Annotation> =
            serde_json::from_reader(BufReader::new(File::open(docs_path)?))?;

        if keys.len() != docs.len() {
            return Err(TextPrepError::cache(format!(
                "cache files disagree: {} keys vs {} annotations ({} / {})",
                keys.len(),
                docs.len(),
                keys_path.display(),
                docs_path.display(),
            )));
        }

        let mut entries = self.entries.write();
        entries.clear();
        for (key, doc) in keys.into_iter().zip(docs) {
            entries.insert(key, Arc::new(doc));
        }
        Ok(())
    }
}
