//! The annotation store: three caches plus the adapters that bridge
//! documents to annotations.
//!
//! An [`AnnotationStore`] owns the engine and three [`KeyedCache`]s:
//!
//! - `text_original`: the first-ever analysis of a raw text,
//! - `text_current`: the analysis after merge passes, overriding the
//!   original when present,
//! - `tokens`: keyed by token vectors, for documents that were built from
//!   pre-tokenized input and never went through the tokenizer.
//!
//! [`AnnotationStore::annotation_for`] resolves a document to its
//! annotation through this fallback chain, and the [`PropertyFn`] /
//! [`SplitFn`] adapters wrap raw annotation-consuming functions into
//! functions over documents. Property functions always cover *every*
//! original token; selection is the filters' job, not theirs.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use textprep::document::Document;
//! use textprep::engine::simple::SimpleAnalysisEngine;
//! use textprep::store::{AnnotationStore, PropertyFn};
//!
//! let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
//! let doc = Document::from_tokens(["The", "fox"]);
//!
//! let lemmas = store.lemmas();
//! assert_eq!(lemmas.properties(&doc).unwrap(), vec!["the", "fox"]);
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::annotation::{Annotation, Projection};
use crate::cache::KeyedCache;
use crate::document::Document;
use crate::engine::AnalysisEngine;
use crate::error::Result;

/// Functions that compute a per-token property for a document.
///
/// Contract: the result covers every *original* token, i.e.
/// `properties(doc)?.len() == doc.original_len()`, regardless of the
/// current selection.
pub trait PropertyFn<P>: Send + Sync {
    /// Compute the property of each original token, in order.
    fn properties(&self, doc: &Document) -> Result<Vec<P>>;
}

/// Functions that compute per-token properties organized into a partition
/// of the document, e.g. into sentences.
///
/// Contract: the inner lengths sum to `doc.original_len()`.
pub trait SplitFn<P>: Send + Sync {
    /// Compute the partitioned properties of the original tokens.
    fn splits(&self, doc: &Document) -> Result<Vec<Vec<P>>>;
}

/// The store of cached annotations for a corpus.
pub struct AnnotationStore {
    engine: Arc<dyn AnalysisEngine>,
    text_original: KeyedCache<String>,
    text_current: KeyedCache<String>,
    tokens: KeyedCache<Vec<String>>,
}

impl AnnotationStore {
    /// Create a store around the given engine.
    ///
    /// The store is explicitly constructed and injected wherever analysis
    /// results are needed; there is no process-wide cache.
    pub fn new(engine: Arc<dyn AnalysisEngine>) -> Arc<Self> {
        let text_factory = {
            let engine = Arc::clone(&engine);
            Box::new(move |text: &String| engine.analyze(text))
        };
        let tokens_factory = {
            let engine = Arc::clone(&engine);
            Box::new(move |tokens: &Vec<String>| engine.analyze_tokens(tokens))
        };
        Arc::new(AnnotationStore {
            engine,
            text_original: KeyedCache::new(text_factory),
            // The current cache is only ever written by merge passes and
            // segmentation; misses fall back to the original cache instead
            // of computing, so its factory never runs through lookups made
            // by this store.
            text_current: KeyedCache::new(Box::new(|_: &String| {
                Err(crate::error::TextPrepError::cache(
                    "current text cache has no factory",
                ))
            })),
            tokens: KeyedCache::new(tokens_factory),
        })
    }

    /// The engine backing this store.
    pub fn engine(&self) -> &Arc<dyn AnalysisEngine> {
        &self.engine
    }

    /// The analysis of the untouched tokenization of a text, computed on
    /// first use.
    pub fn original_text_annotation(&self, text: &str) -> Result<Arc<Annotation>> {
        self.text_original.get_or_compute(&text.to_string())
    }

    /// The currently valid analysis of a text: the merged version if a
    /// merge pass ran, the original otherwise.
    pub fn current_text_annotation(&self, text: &str) -> Result<Arc<Annotation>> {
        if let Some(current) = self.text_current.peek(&text.to_string()) {
            return Ok(current);
        }
        self.original_text_annotation(text)
    }

    /// Record the result of a merge pass for a text.
    pub fn set_current_text_annotation(&self, text: &str, annotation: Annotation) {
        self.text_current.insert(text.to_string(), annotation);
    }

    /// The synthetic analysis of pre-tokenized input, computed on first use
    /// without re-running segmentation.
    pub fn tokens_annotation(&self, tokens: &[String]) -> Result<Arc<Annotation>> {
        self.tokens.get_or_compute(&tokens.to_vec())
    }

    /// Whether either text cache holds an entry for this text.
    fn has_text(&self, text: &str) -> bool {
        let key = text.to_string();
        self.text_current.contains_key(&key) || self.text_original.contains_key(&key)
    }

    /// Resolve a document to its annotation.
    ///
    /// Documents produced by the tokenizer resolve through the text caches
    /// (current over original). Documents built directly from tokens never
    /// hit the text caches and resolve through the token-keyed cache, which
    /// synthesizes an annotation without re-tokenizing.
    pub fn annotation_for(&self, doc: &Document) -> Result<Arc<Annotation>> {
        if self.has_text(doc.original_text()) {
            return self.current_text_annotation(doc.original_text());
        }
        self.tokens_annotation(doc.original_tokens())
    }

    /// Resolve a document to a sentence-segmented annotation.
    ///
    /// Segmentation runs at most once per document: the segmented
    /// annotation is written back to the cache the document resolved
    /// through (the current text cache, or the token cache), leaving the
    /// original text cache untouched.
    pub fn segmented_annotation_for(&self, doc: &Document) -> Result<Arc<Annotation>> {
        let annotation = self.annotation_for(doc)?;
        if annotation.is_segmented() {
            return Ok(annotation);
        }

        let segmented = self.engine.segment_sentences(&annotation)?;
        if self.has_text(doc.original_text()) {
            Ok(self
                .text_current
                .insert(doc.original_text().to_string(), segmented))
        } else {
            Ok(self.tokens.insert(doc.original_tokens().to_vec(), segmented))
        }
    }

    /// A property function projecting each token through the given
    /// [`Projection`].
    pub fn projection_fn(self: &Arc<Self>, projection: Projection) -> AnnotationPropertyFn<String> {
        self.property_fn_with(move |annotation| projection.strings(annotation))
    }

    /// A property function yielding each token's surface text.
    pub fn texts(self: &Arc<Self>) -> AnnotationPropertyFn<String> {
        self.projection_fn(Projection::Text)
    }

    /// A property function yielding each token's lemma.
    pub fn lemmas(self: &Arc<Self>) -> AnnotationPropertyFn<String> {
        self.projection_fn(Projection::Lemma)
    }

    /// A property function yielding each token's POS tag.
    pub fn pos_tags(self: &Arc<Self>) -> AnnotationPropertyFn<String> {
        self.projection_fn(Projection::Pos)
    }

    /// A property function yielding each token's stop-word flag.
    pub fn stop_flags(self: &Arc<Self>) -> AnnotationPropertyFn<bool> {
        self.property_fn_with(|annotation| {
            annotation.tokens().iter().map(|t| t.is_stop).collect()
        })
    }

    /// A split function yielding each sentence's token texts.
    pub fn sentences(self: &Arc<Self>) -> AnnotationSplitFn<String> {
        self.split_fn_with(|annotation| {
            annotation
                .sentences()
                .unwrap_or_default()
                .iter()
                .map(|span| {
                    annotation.tokens()[span.start..span.end]
                        .iter()
                        .map(|t| t.text.clone())
                        .collect()
                })
                .collect()
        })
    }

    /// Wrap a raw annotation-consuming function into a [`PropertyFn`].
    pub fn property_fn_with<P, F>(self: &Arc<Self>, project: F) -> AnnotationPropertyFn<P>
    where
        F: Fn(&Annotation) -> Vec<P> + Send + Sync + 'static,
    {
        AnnotationPropertyFn {
            store: Arc::clone(self),
            project: Arc::new(project),
        }
    }

    /// Wrap a raw annotation-consuming function into a [`SplitFn`].
    ///
    /// The wrapped function is guaranteed to see a sentence-segmented
    /// annotation; segmentation is triggered lazily and cached.
    pub fn split_fn_with<P, F>(self: &Arc<Self>, project: F) -> AnnotationSplitFn<P>
    where
        F: Fn(&Annotation) -> Vec<Vec<P>> + Send + Sync + 'static,
    {
        AnnotationSplitFn {
            store: Arc::clone(self),
            project: Arc::new(project),
        }
    }

    /// Persist all three caches into a directory.
    ///
    /// Each cache becomes a `<prefix><name>_keys` / `<prefix><name>_docs`
    /// file pair (the prefix, when non-empty, is separated with `_`).
    pub fn save(&self, directory: &Path, file_prefix: &str) -> Result<()> {
        let prefix = Self::normalize_prefix(file_prefix);
        for (name, cache) in self.text_caches() {
            cache.save(
                &directory.join(format!("{prefix}{name}_keys")),
                &directory.join(format!("{prefix}{name}_docs")),
            )?;
        }
        self.tokens.save(
            &directory.join(format!("{prefix}tokens_keys")),
            &directory.join(format!("{prefix}tokens_docs")),
        )
    }

    /// Replace all three caches with previously saved contents.
    ///
    /// Missing or length-mismatched files abort the load.
    pub fn load(&self, directory: &Path, file_prefix: &str) -> Result<()> {
        let prefix = Self::normalize_prefix(file_prefix);
        for (name, cache) in self.text_caches() {
            cache.load(
                &directory.join(format!("{prefix}{name}_keys")),
                &directory.join(format!("{prefix}{name}_docs")),
            )?;
        }
        self.tokens.load(
            &directory.join(format!("{prefix}tokens_keys")),
            &directory.join(format!("{prefix}tokens_docs")),
        )
    }

    fn text_caches(&self) -> [(&'static str, &KeyedCache<String>); 2] {
        [
            ("text_original", &self.text_original),
            ("text_current", &self.text_current),
        ]
    }

    fn normalize_prefix(file_prefix: &str) -> String {
        if file_prefix.is_empty() {
            String::new()
        } else {
            format!("{file_prefix}_")
        }
    }
}

/// A [`PropertyFn`] built from a raw `Fn(&Annotation) -> Vec<P>`.
pub struct AnnotationPropertyFn<P> {
    store: Arc<AnnotationStore>,
    project: Arc<dyn Fn(&Annotation) -> Vec<P> + Send + Sync>,
}

impl<P> Clone for AnnotationPropertyFn<P> {
    fn clone(&self) -> Self {
        AnnotationPropertyFn {
            store: Arc::clone(&self.store),
            project: Arc::clone(&self.project),
        }
    }
}

impl<P> PropertyFn<P> for AnnotationPropertyFn<P> {
    fn properties(&self, doc: &Document) -> Result<Vec<P>> {
        let annotation = self.store.annotation_for(doc)?;
        Ok((self.project)(&annotation))
    }
}

/// A [`SplitFn`] built from a raw `Fn(&Annotation) -> Vec<Vec<P>>`.
///
/// Guarantees the wrapped function sees a sentence-segmented annotation.
pub struct AnnotationSplitFn<P> {
    store: Arc<AnnotationStore>,
    project: Arc<dyn Fn(&Annotation) -> Vec<Vec<P>> + Send + Sync>,
}

impl<P> Clone for AnnotationSplitFn<P> {
    fn clone(&self) -> Self {
        AnnotationSplitFn {
            store: Arc::clone(&self.store),
            project: Arc::clone(&self.project),
        }
    }
}

impl<P> SplitFn<P> for AnnotationSplitFn<P> {
    fn splits(&self, doc: &Document) -> Result<Vec<Vec<P>>> {
        let annotation = self.store.segmented_annotation_for(doc)?;
        Ok((self.project)(&annotation))
    }
}
