//! Corpus-wide document-frequency analysis.
//!
//! The *document frequency* of a property value is the number of documents
//! in a corpus containing it at least once: each document contributes its
//! *set* of distinct values (presence-per-document, not occurrence counts).
//! [`properties_by_document_frequency`] selects the values whose frequency
//! falls into a [`DfInterval`]; [`document_frequency_filter`] turns that
//! set into a membership filter, the usual way of dropping tokens that are
//! too rare to reason about or too frequent to carry meaning.
//!
//! Per-document property extraction is corpus-parallel via `rayon`;
//! documents are independent, and the annotation cache coalesces concurrent
//! misses, so the at-most-one-compute guarantee holds.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use textprep::document::Document;
//! use textprep::engine::simple::SimpleAnalysisEngine;
//! use textprep::frequency::{DfInterval, properties_by_document_frequency};
//! use textprep::store::AnnotationStore;
//!
//! let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
//! let docs = vec![
//!     Document::from_tokens(["a", "b", "c"]),
//!     Document::from_tokens(["b", "c"]),
//!     Document::from_tokens(["c"]),
//! ];
//!
//! // Lemmas in at least half of the documents: counts >= 1.5.
//! let interval = DfInterval::default().with_min_rate(0.5);
//! let frequent =
//!     properties_by_document_frequency(&docs, &store.lemmas(), &interval).unwrap();
//!
//! assert_eq!(frequent.len(), 2);
//! assert!(frequent.contains("b"));
//! assert!(frequent.contains("c"));
//! ```

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Result;
use crate::filter::property::PropertyFilter;
use crate::store::PropertyFn;

/// Test whether `x` lies in the interval described by the bounds.
///
/// Unbounded sides are treated as ±infinity. The interval is closed by
/// default; `open` switches both comparisons to strict.
pub fn in_interval(x: f64, lower: Option<f64>, upper: Option<f64>, open: bool) -> bool {
    let lower = lower.unwrap_or(f64::NEG_INFINITY);
    let upper = upper.unwrap_or(f64::INFINITY);

    if open {
        lower < x && x < upper
    } else {
        lower <= x && x <= upper
    }
}

/// A document-frequency interval specification.
///
/// Rates are relative to the corpus size and override the corresponding
/// absolute bound: `bound = corpus_len * rate`, kept as a real number (no
/// rounding), so `min_rate = 0.5` over three documents means "count >= 1.5",
/// i.e. at least two documents.
///
/// Nonsensical bounds are tolerated rather than rejected: an inverted
/// interval (`min > max`) matches nothing, rates outside `[0, 1]` simply
/// produce bounds outside the reachable count range (always-empty or
/// always-full results, depending on direction).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DfInterval {
    /// Absolute lower bound on the document frequency.
    pub min_count: Option<f64>,
    /// Absolute upper bound on the document frequency.
    pub max_count: Option<f64>,
    /// Relative lower bound; overrides `min_count` when set.
    pub min_rate: Option<f64>,
    /// Relative upper bound; overrides `max_count` when set.
    pub max_rate: Option<f64>,
    /// Use a strict interval instead of the default closed one.
    pub open: bool,
}

impl DfInterval {
    /// Set the absolute lower bound.
    pub fn with_min_count(mut self, min_count: f64) -> Self {
        self.min_count = Some(min_count);
        self
    }

    /// Set the absolute upper bound.
    pub fn with_max_count(mut self, max_count: f64) -> Self {
        self.max_count = Some(max_count);
        self
    }

    /// Set the relative lower bound.
    pub fn with_min_rate(mut self, min_rate: f64) -> Self {
        self.min_rate = Some(min_rate);
        self
    }

    /// Set the relative upper bound.
    pub fn with_max_rate(mut self, max_rate: f64) -> Self {
        self.max_rate = Some(max_rate);
        self
    }

    /// Switch to a strict (open) interval.
    pub fn open(mut self) -> Self {
        self.open = true;
        self
    }

    /// Resolve the effective bounds for a corpus of the given size.
    fn bounds(&self, corpus_len: usize) -> (Option<f64>, Option<f64>) {
        let lower = self
            .min_rate
            .map(|rate| corpus_len as f64 * rate)
            .or(self.min_count);
        let upper = self
            .max_rate
            .map(|rate| corpus_len as f64 * rate)
            .or(self.max_count);
        (lower, upper)
    }

    /// Test whether a document-frequency count lies in this interval, for a
    /// corpus of the given size.
    pub fn contains(&self, count: usize, corpus_len: usize) -> bool {
        let (lower, upper) = self.bounds(corpus_len);
        in_interval(count as f64, lower, upper, self.open)
    }
}

/// Compute the document frequency of every property value in the corpus.
///
/// Each document contributes the set of distinct values returned by
/// `property_fn`; a value's frequency is the number of contributing
/// documents. An empty corpus yields an empty map.
pub fn document_frequencies<P, F>(
    docs: &[Document],
    property_fn: &F,
) -> Result<AHashMap<P, usize>>
where
    P: Eq + Hash + Clone + Send + Sync,
    F: PropertyFn<P> + ?Sized,
{
    let doc_sets: Vec<HashSet<P>> = docs
        .par_iter()
        .map(|doc| {
            property_fn
                .properties(doc)
                .map(|properties| properties.into_iter().collect())
        })
        .collect::<Result<_>>()?;

    let mut frequencies = AHashMap::new();
    for set in doc_sets {
        for value in set {
            *frequencies.entry(value).or_insert(0) += 1;
        }
    }
    Ok(frequencies)
}

/// Return the property values whose document frequency lies in the interval.
pub fn properties_by_document_frequency<P, F>(
    docs: &[Document],
    property_fn: &F,
    interval: &DfInterval,
) -> Result<HashSet<P>>
where
    P: Eq + Hash + Clone + Send + Sync,
    F: PropertyFn<P> + ?Sized,
{
    let frequencies = document_frequencies(docs, property_fn)?;
    Ok(frequencies
        .into_iter()
        .filter(|(_, count)| interval.contains(*count, docs.len()))
        .map(|(value, _)| value)
        .collect())
}

/// Build a membership filter keeping tokens whose property value has a
/// document frequency inside the interval.
pub fn document_frequency_filter<P>(
    docs: &[Document],
    property_fn: Arc<dyn PropertyFn<P>>,
    interval: &DfInterval,
) -> Result<PropertyFilter<P>>
where
    P: Eq + Hash + Clone + Send + Sync + 'static,
{
    let values = properties_by_document_frequency(docs, property_fn.as_ref(), interval)?;
    Ok(PropertyFilter::new(property_fn, values))
}
