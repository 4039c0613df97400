//! Segment-length filter.
//!
//! Keeps tokens based on the length of the split segment covering them,
//! typically the sentence a token belongs to, so very short or very long
//! sentences can be dropped wholesale. This filter needs the full original
//! token context (segment boundaries are positions in the original
//! sequence), so register it as a full-context filter with the executor.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use textprep::document::Document;
//! use textprep::engine::simple::SimpleAnalysisEngine;
//! use textprep::filter::TokenFilter;
//! use textprep::filter::segment_len::SegmentLengthFilter;
//! use textprep::store::AnnotationStore;
//!
//! let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
//! // Two sentences: four tokens and two tokens.
//! let doc = Document::from_tokens(["One", "two", "three", ".", "Hi", "."]);
//!
//! let long_enough = SegmentLengthFilter::new(Arc::new(store.sentences())).with_min_len(3);
//! let filtered = long_enough.apply(&doc).unwrap();
//! assert_eq!(filtered.len(), 4);
//! ```

use std::sync::Arc;

use crate::document::Document;
use crate::error::Result;
use crate::filter::TokenFilter;
use crate::frequency::in_interval;
use crate::store::SplitFn;

/// A filter that keeps tokens whose covering segment's length lies in an
/// interval.
pub struct SegmentLengthFilter<P> {
    split_fn: Arc<dyn SplitFn<P>>,
    min_len: Option<usize>,
    max_len: Option<usize>,
    open: bool,
}

impl<P> SegmentLengthFilter<P> {
    /// Create a new filter with unbounded length interval.
    pub fn new(split_fn: Arc<dyn SplitFn<P>>) -> Self {
        SegmentLengthFilter {
            split_fn,
            min_len: None,
            max_len: None,
            open: false,
        }
    }

    /// Set the minimum segment length.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = Some(min_len);
        self
    }

    /// Set the maximum segment length.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Use a strict interval instead of the default closed one.
    pub fn open(mut self) -> Self {
        self.open = true;
        self
    }
}

impl<P> TokenFilter for SegmentLengthFilter<P>
where
    P: Send + Sync + 'static,
{
    fn apply(&self, doc: &Document) -> Result<Document> {
        let segments = self.split_fn.splits(doc)?;

        let mut keep = Vec::new();
        let mut index = 0usize;
        for segment in &segments {
            let fits = in_interval(
                segment.len() as f64,
                self.min_len.map(|len| len as f64),
                self.max_len.map(|len| len as f64),
                self.open,
            );
            for _ in segment {
                if fits {
                    keep.push(index);
                }
                index += 1;
            }
        }
        Ok(doc.sub_doc(keep))
    }

    fn name(&self) -> &'static str {
        "segment_length"
    }
}
