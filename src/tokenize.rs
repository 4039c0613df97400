//! Tokenization through the annotation store, with optional merge passes.
//!
//! A [`Tokenizer`] turns raw text into a [`Document`] by running the
//! external engine's analysis (cached in the store's original text cache),
//! optionally collapsing entity and noun-chunk spans, and projecting each
//! resulting token through a [`Projection`]; tokenizing into lemmas is
//! just `with_projection(Projection::Lemma)`.
//!
//! Merge passes work on a copy of the cached original annotation and record
//! their result in the *current* text cache, so property functions resolve
//! the merged view while the unmerged analysis stays available untouched.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use textprep::engine::simple::SimpleAnalysisEngine;
//! use textprep::store::AnnotationStore;
//! use textprep::tokenize::Tokenizer;
//!
//! let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
//! let tokenizer = Tokenizer::new(store);
//!
//! let doc = tokenizer.document("The fox runs.").unwrap();
//! assert_eq!(doc.original_tokens(), ["The", "fox", "runs", "."]);
//! ```

use std::sync::Arc;

use crate::annotation::{Annotation, Projection};
use crate::document::Document;
use crate::error::Result;
use crate::store::AnnotationStore;

/// A tokenizer backed by the annotation store, with optional merge passes.
#[derive(Clone)]
pub struct Tokenizer {
    store: Arc<AnnotationStore>,
    projection: Projection,
    merge_entities: bool,
    merge_noun_chunks: bool,
}

impl Tokenizer {
    /// Create a tokenizer projecting token texts, with no merge passes.
    pub fn new(store: Arc<AnnotationStore>) -> Self {
        Tokenizer {
            store,
            projection: Projection::Text,
            merge_entities: false,
            merge_noun_chunks: false,
        }
    }

    /// Set which token attribute becomes the document token.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Collapse named-entity spans into single tokens before projecting.
    pub fn merge_entities(mut self, merge: bool) -> Self {
        self.merge_entities = merge;
        self
    }

    /// Collapse noun-chunk spans into single tokens before projecting.
    pub fn merge_noun_chunks(mut self, merge: bool) -> Self {
        self.merge_noun_chunks = merge;
        self
    }

    /// Tokenize a text, applying the configured merge passes.
    ///
    /// The first call for a text runs the engine and caches the original
    /// analysis; later calls reuse it. When merge passes are configured,
    /// the merged annotation is recorded in the current text cache and the
    /// original cache entry is never modified.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let original = self.store.original_text_annotation(text)?;
        if !self.merge_entities && !self.merge_noun_chunks {
            return Ok(self.projection.strings(&original));
        }

        let engine = self.store.engine();
        let mut merged: Annotation = original.as_ref().clone();
        if self.merge_entities {
            merged = engine.merge_entities(&merged)?;
        }
        if self.merge_noun_chunks {
            merged = engine.merge_noun_chunks(&merged)?;
        }

        let tokens = self.projection.strings(&merged);
        self.store.set_current_text_annotation(text, merged);
        Ok(tokens)
    }

    /// Tokenize a text into a [`Document`] with all tokens selected.
    pub fn document(&self, text: &str) -> Result<Document> {
        let tokens = self.tokenize(text)?;
        Ok(Document::from_parts(text, tokens, None::<String>))
    }

    /// Lazily tokenize a corpus of raw texts into documents, preserving
    /// input order.
    pub fn documents<'a, I, S>(&'a self, texts: I) -> impl Iterator<Item = Result<Document>> + 'a
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 'a,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .map(move |text| self.document(text.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::annotation::Span;
    use crate::engine::AnalysisEngine;
    use crate::engine::simple::SimpleAnalysisEngine;
    use crate::store::PropertyFn;

    /// Delegates to the rule-based engine but tags the token pair
    /// "Deutsche Bahn" as an organization entity, and counts analyses.
    struct FixtureEngine {
        inner: SimpleAnalysisEngine,
        analyses: AtomicUsize,
    }

    impl FixtureEngine {
        fn new() -> Self {
            FixtureEngine {
                inner: SimpleAnalysisEngine::new(),
                analyses: AtomicUsize::new(0),
            }
        }
    }

    impl AnalysisEngine for FixtureEngine {
        fn analyze(&self, text: &str) -> Result<Annotation> {
            self.analyses.fetch_add(1, Ordering::SeqCst);
            let annotation = self.inner.analyze(text)?;
            let entities = annotation
                .tokens()
                .windows(2)
                .enumerate()
                .filter(|(_, pair)| pair[0].text == "Deutsche" && pair[1].text == "Bahn")
                .map(|(index, _)| Span::new(index, index + 2).with_label("ORG"))
                .collect();
            Ok(annotation.with_entities(entities))
        }

        fn analyze_tokens(&self, tokens: &[String]) -> Result<Annotation> {
            self.inner.analyze_tokens(tokens)
        }

        fn segment_sentences(&self, annotation: &Annotation) -> Result<Annotation> {
            self.inner.segment_sentences(annotation)
        }

        fn name(&self) -> &'static str {
            "fixture"
        }
    }

    #[test]
    fn test_tokenize_is_cached() {
        let engine = Arc::new(FixtureEngine::new());
        let store = AnnotationStore::new(Arc::clone(&engine) as Arc<dyn AnalysisEngine>);
        let tokenizer = Tokenizer::new(store);

        tokenizer.tokenize("The fox runs.").unwrap();
        tokenizer.tokenize("The fox runs.").unwrap();
        assert_eq!(engine.analyses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lemma_projection() {
        let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
        let tokenizer = Tokenizer::new(store).with_projection(Projection::Lemma);

        let tokens = tokenizer.tokenize("The Fox").unwrap();
        assert_eq!(tokens, vec!["the", "fox"]);
    }

    #[test]
    fn test_entity_merge_collapses_tokens() {
        let engine = Arc::new(FixtureEngine::new());
        let store = AnnotationStore::new(Arc::clone(&engine) as Arc<dyn AnalysisEngine>);
        let tokenizer = Tokenizer::new(Arc::clone(&store)).merge_entities(true);

        let doc = tokenizer.document("Deutsche Bahn streikt").unwrap();
        assert_eq!(doc.original_tokens(), ["Deutsche Bahn", "streikt"]);
        assert_eq!(doc.len(), 2);

        // The merged annotation is what property functions now resolve.
        let texts = store.texts().properties(&doc).unwrap();
        assert_eq!(texts.len(), doc.original_len());
    }

    #[test]
    fn test_merge_preserves_original_cache_entry() {
        let engine = Arc::new(FixtureEngine::new());
        let store = AnnotationStore::new(Arc::clone(&engine) as Arc<dyn AnalysisEngine>);
        let text = "Deutsche Bahn streikt";

        let tokenizer = Tokenizer::new(Arc::clone(&store)).merge_entities(true);
        tokenizer.document(text).unwrap();

        // The unmerged analysis still reports the original per-token count,
        // and no re-analysis happened.
        let original = store.original_text_annotation(text).unwrap();
        assert_eq!(original.len(), 3);
        assert_eq!(engine.analyses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_documents_preserve_order() {
        let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
        let tokenizer = Tokenizer::new(store);

        let docs: Vec<_> = tokenizer
            .documents(["first text", "second text"])
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(docs[0].original_tokens()[0], "first");
        assert_eq!(docs[1].original_tokens()[0], "second");
    }
}
