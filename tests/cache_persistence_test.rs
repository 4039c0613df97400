//! Persistence of the annotation store across process boundaries.
//!
//! The expensive part of pre-processing is the external analysis; these
//! tests prove that a reloaded store answers from disk without re-running
//! the engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use textprep::prelude::*;

/// Wraps the rule-based engine and counts every analysis call.
struct CountingEngine {
    inner: SimpleAnalysisEngine,
    analyses: AtomicUsize,
}

impl CountingEngine {
    fn new() -> Arc<Self> {
        Arc::new(CountingEngine {
            inner: SimpleAnalysisEngine::new(),
            analyses: AtomicUsize::new(0),
        })
    }

    fn analyses(&self) -> usize {
        self.analyses.load(Ordering::SeqCst)
    }
}

impl AnalysisEngine for CountingEngine {
    fn analyze(&self, text: &str) -> Result<Annotation> {
        self.analyses.fetch_add(1, Ordering::SeqCst);
        self.inner.analyze(text)
    }

    fn analyze_tokens(&self, tokens: &[String]) -> Result<Annotation> {
        self.analyses.fetch_add(1, Ordering::SeqCst);
        self.inner.analyze_tokens(tokens)
    }

    fn segment_sentences(&self, annotation: &Annotation) -> Result<Annotation> {
        self.inner.segment_sentences(annotation)
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

#[test]
fn test_reloaded_store_never_recomputes() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let texts = ["The fox runs.", "A dog sleeps."];

    let engine = CountingEngine::new();
    let store = AnnotationStore::new(Arc::clone(&engine) as Arc<dyn AnalysisEngine>);
    let tokenizer = Tokenizer::new(Arc::clone(&store));

    let docs: Vec<Document> = tokenizer.documents(texts).collect::<Result<_>>()?;
    // Property lookups hit the text caches populated by the tokenizer.
    for doc in &docs {
        store.lemmas().properties(doc)?;
    }
    assert_eq!(engine.analyses(), texts.len());

    store.save(dir.path(), "corpus")?;

    // A fresh store with a fresh engine, fed only from disk.
    let reloaded_engine = CountingEngine::new();
    let reloaded =
        AnnotationStore::new(Arc::clone(&reloaded_engine) as Arc<dyn AnalysisEngine>);
    reloaded.load(dir.path(), "corpus")?;

    let reloaded_tokenizer = Tokenizer::new(Arc::clone(&reloaded));
    let reloaded_docs: Vec<Document> =
        reloaded_tokenizer.documents(texts).collect::<Result<_>>()?;
    for (doc, original) in reloaded_docs.iter().zip(&docs) {
        assert_eq!(doc, original);
        assert_eq!(
            reloaded.lemmas().properties(doc)?,
            store.lemmas().properties(original)?
        );
    }
    assert_eq!(reloaded_engine.analyses(), 0);
    Ok(())
}

#[test]
fn test_prefixes_keep_corpora_apart() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();

    let store_a = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
    store_a.original_text_annotation("corpus a text")?;
    store_a.save(dir.path(), "a")?;

    let store_b = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
    store_b.original_text_annotation("corpus b text")?;
    store_b.save(dir.path(), "b")?;

    let engine = CountingEngine::new();
    let probe = AnnotationStore::new(Arc::clone(&engine) as Arc<dyn AnalysisEngine>);
    probe.load(dir.path(), "a")?;
    probe.original_text_annotation("corpus a text")?;
    assert_eq!(engine.analyses(), 0);
    probe.original_text_annotation("corpus b text")?;
    assert_eq!(engine.analyses(), 1);
    Ok(())
}

#[test]
fn test_load_from_missing_files_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
    assert!(store.load(dir.path(), "nothing_saved_here").is_err());
}
