//! The external NLP engine seam.
//!
//! All linguistic analysis (tagging, lemmatization, sentence segmentation,
//! entity and noun-chunk detection) happens outside this crate, behind the
//! [`AnalysisEngine`] trait. The crate only ever treats the engine as an
//! opaque, deterministic function from text (or tokens) to an
//! [`Annotation`](crate::annotation::Annotation), which is what allows
//! results to be cached and persisted.
//!
//! Merge transforms and segmentation take an annotation by reference and
//! return a new one; an engine must never mutate its input, so that cached
//! originals stay intact.
//!
//! # Implementations
//!
//! - [`simple::SimpleAnalysisEngine`] - rule-based engine, no external service
//!
//! # Examples
//!
//! ```
//! use textprep::engine::AnalysisEngine;
//! use textprep::engine::simple::SimpleAnalysisEngine;
//!
//! let engine = SimpleAnalysisEngine::new();
//! let annotation = engine.analyze("The fox runs.").unwrap();
//! assert_eq!(annotation.tokens()[0].text, "The");
//! ```

use crate::annotation::{Annotation, SpanKind};
use crate::error::Result;

/// Trait for external NLP analysis engines.
///
/// All methods are expected to be deterministic for identical input. The
/// trait requires `Send + Sync` so engines can be shared across threads
/// when a corpus is processed in parallel.
pub trait AnalysisEngine: Send + Sync {
    /// Analyze raw text, producing a fully tokenized annotation.
    fn analyze(&self, text: &str) -> Result<Annotation>;

    /// Construct an annotation directly from pre-tokenized input, without
    /// re-segmenting the tokens.
    fn analyze_tokens(&self, tokens: &[String]) -> Result<Annotation>;

    /// Collapse every named-entity span into a single token.
    ///
    /// The default implementation merges the spans recorded on the
    /// annotation itself. Idempotent: merged spans cover one token.
    fn merge_entities(&self, annotation: &Annotation) -> Result<Annotation> {
        Ok(annotation.merge_spans(SpanKind::Entity))
    }

    /// Collapse every noun-chunk span into a single token.
    ///
    /// The default implementation merges the spans recorded on the
    /// annotation itself. Idempotent: merged spans cover one token.
    fn merge_noun_chunks(&self, annotation: &Annotation) -> Result<Annotation> {
        Ok(annotation.merge_spans(SpanKind::NounChunk))
    }

    /// Return a sentence-segmented version of the annotation.
    ///
    /// The default analysis may omit sentence spans; this transform fills
    /// them in. Implementations must return the input unchanged when it is
    /// already segmented.
    fn segment_sentences(&self, annotation: &Annotation) -> Result<Annotation>;

    /// Get the name of this engine (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual engine modules
pub mod simple;
