//! Filter-pipeline execution.
//!
//! [`apply_filters`] runs a two-stage pipeline over a corpus, one document
//! at a time and lazily:
//!
//! 1. every *full-context* filter is evaluated against the same starting
//!    document, and their selections are intersected (an empty filter list
//!    restricts nothing),
//! 2. the intersected document is threaded through the *incremental*
//!    filters in declared order, each seeing the previous filter's output,
//!    which is what lets cheap filters shrink the document before expensive
//!    ones run.
//!
//! Output order matches input order. The returned iterator computes each
//! document only when consumed; re-running the pipeline means re-invoking
//! it with the same inputs, there is no resumable cursor.
//!
//! [`topic_modeling_pipeline`] is the stock pipeline generator: given the
//! corpus and a [`PipelineOptions`], it builds the filter list used for
//! topic-modeling pre-processing (drop unwanted POS tags, stop words and
//! lemmas, then keep lemmas inside a document-frequency interval).
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use textprep::document::Document;
//! use textprep::engine::simple::SimpleAnalysisEngine;
//! use textprep::filter::{BoxedFilter, negated};
//! use textprep::filter::flag::FlagFilter;
//! use textprep::pipeline::apply_filters;
//! use textprep::store::AnnotationStore;
//!
//! let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
//! let docs = vec![Document::from_tokens(["the", "quick", "fox"])];
//!
//! let no_stops: Vec<BoxedFilter> =
//!     vec![negated(Arc::new(FlagFilter::new(Arc::new(store.stop_flags()))))];
//!
//! let filtered: Vec<_> = apply_filters(docs, &[], &no_stops)
//!     .collect::<textprep::error::Result<_>>()
//!     .unwrap();
//! assert_eq!(filtered[0].len(), 2);
//! ```

use std::collections::BTreeSet;
use std::collections::HashSet;
use std::sync::Arc;

use crate::document::Document;
use crate::error::Result;
use crate::filter::flag::FlagFilter;
use crate::filter::property::PropertyFilter;
use crate::filter::{BoxedFilter, negated};
use crate::frequency::{DfInterval, document_frequency_filter};
use crate::store::AnnotationStore;

/// Apply one document through both pipeline stages.
fn filter_document(
    doc: Document,
    full_context: &[BoxedFilter],
    incremental: &[BoxedFilter],
) -> Result<Document> {
    let mut current = if full_context.is_empty() {
        doc
    } else {
        // Every full-context filter sees the same starting document; their
        // selections are intersected and applied once.
        let mut keep: BTreeSet<usize> = doc.selected().clone();
        for filter in full_context {
            let filtered = filter.apply(&doc)?;
            keep = keep.intersection(filtered.selected()).copied().collect();
        }
        doc.sub_doc(keep)
    };

    for filter in incremental {
        current = filter.apply(&current)?;
    }
    Ok(current)
}

/// Lazily apply a two-stage filter pipeline to a corpus.
///
/// Returns one result per input document, in input order. Documents are
/// independent; an error filtering one document is reported in its slot and
/// does not affect the others.
pub fn apply_filters<'a, I>(
    docs: I,
    full_context: &'a [BoxedFilter],
    incremental: &'a [BoxedFilter],
) -> impl Iterator<Item = Result<Document>> + 'a
where
    I: IntoIterator<Item = Document>,
    I::IntoIter: 'a,
{
    docs.into_iter()
        .map(move |doc| filter_document(doc, full_context, incremental))
}

/// An ordered filter pipeline, split by execution discipline.
#[derive(Default)]
pub struct PipelineStages {
    /// Filters evaluated against the original document and intersected.
    pub full_context: Vec<BoxedFilter>,
    /// Filters chained in order on the intersected document.
    pub incremental: Vec<BoxedFilter>,
}

impl PipelineStages {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a full-context filter.
    pub fn add_full_context(mut self, filter: BoxedFilter) -> Self {
        self.full_context.push(filter);
        self
    }

    /// Register an incremental filter.
    pub fn add_incremental(mut self, filter: BoxedFilter) -> Self {
        self.incremental.push(filter);
        self
    }

    /// Lazily apply this pipeline to a corpus.
    pub fn apply<'a, I>(&'a self, docs: I) -> impl Iterator<Item = Result<Document>> + 'a
    where
        I: IntoIterator<Item = Document>,
        I::IntoIter: 'a,
    {
        apply_filters(docs, &self.full_context, &self.incremental)
    }
}

/// Named options for the stock topic-modeling pipeline.
#[derive(Clone, Debug, Default)]
pub struct PipelineOptions {
    /// POS tags whose tokens are dropped (e.g. `PUNCT`, `SPACE`).
    pub ignored_pos_tags: HashSet<String>,
    /// Lemmas that are dropped outright (domain-specific noise).
    pub ignored_lemmas: HashSet<String>,
    /// Document-frequency interval lemmas must fall into.
    pub df_interval: DfInterval,
}

impl PipelineOptions {
    /// Create options with no ignored values and an unbounded interval.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ignored POS tags.
    pub fn with_ignored_pos_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_pos_tags = tags.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Set the ignored lemmas.
    pub fn with_ignored_lemmas<I, S>(mut self, lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_lemmas = lemmas.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Set the document-frequency interval.
    pub fn with_df_interval(mut self, interval: DfInterval) -> Self {
        self.df_interval = interval;
        self
    }
}

/// Generate the pre-processing pipeline used for topic modeling.
///
/// The corpus is required up front because the document-frequency filter
/// needs an initial analysis of every document. The generated filters are
/// all incremental, ordered so the cheap vocabulary filters shrink each
/// document before the frequency filter runs:
///
/// 1. drop tokens with an ignored POS tag,
/// 2. drop stop words,
/// 3. drop ignored lemmas,
/// 4. keep lemmas whose document frequency lies in the interval.
pub fn topic_modeling_pipeline(
    docs: &[Document],
    store: &Arc<AnnotationStore>,
    options: &PipelineOptions,
) -> Result<PipelineStages> {
    let df_filter = document_frequency_filter(
        docs,
        Arc::new(store.lemmas()),
        &options.df_interval,
    )?;

    Ok(PipelineStages::new()
        .add_incremental(negated(Arc::new(PropertyFilter::new(
            Arc::new(store.pos_tags()),
            options.ignored_pos_tags.clone(),
        ))))
        .add_incremental(negated(Arc::new(FlagFilter::new(Arc::new(
            store.stop_flags(),
        )))))
        .add_incremental(negated(Arc::new(PropertyFilter::new(
            Arc::new(store.lemmas()),
            options.ignored_lemmas.clone(),
        ))))
        .add_incremental(Arc::new(df_filter)))
}
