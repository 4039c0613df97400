//! Token-selection filters.
//!
//! A [`TokenFilter`] narrows a document's selected token indices and
//! returns the narrowed document; the original token sequence is never
//! touched. Filters are composed into pipelines by the executor in
//! [`pipeline`](crate::pipeline), which distinguishes two correctness
//! classes:
//!
//! - *full-context* filters need the untouched original document (token
//!   adjacency, sentence spans); the executor runs each against the same
//!   starting document and intersects their results,
//! - *incremental* filters only consult the currently selected tokens and
//!   are chained, each seeing the previous filter's output.
//!
//! The classes are a property of how a filter is registered with the
//! executor, not of the trait.
//!
//! # Available Filters
//!
//! - [`property::PropertyFilter`] - keeps tokens whose property value is in a set
//! - [`flag::FlagFilter`] - keeps tokens whose boolean property is true
//! - [`segment_len::SegmentLengthFilter`] - keeps tokens by covering-segment length
//! - [`negated`] - complements any filter's selection
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use textprep::document::Document;
//! use textprep::engine::simple::SimpleAnalysisEngine;
//! use textprep::filter::TokenFilter;
//! use textprep::filter::property::PropertyFilter;
//! use textprep::store::AnnotationStore;
//!
//! let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
//! let doc = Document::from_tokens(["The", "fox", "!"]);
//!
//! let keep_words = PropertyFilter::from_values(Arc::new(store.pos_tags()), ["WORD"]);
//! let filtered = keep_words.apply(&doc).unwrap();
//! let kept: Vec<_> = filtered.selected_tokens().collect();
//! assert_eq!(kept, vec!["The", "fox"]);
//! ```

use std::sync::Arc;

use crate::document::Document;
use crate::error::Result;

/// Trait for filters that narrow a document's token selection.
///
/// Implementations compute a target index set and apply it through
/// [`Document::sub_doc`], so the result is always a sub-document of the
/// input. The trait requires `Send + Sync` to allow corpus-parallel use.
pub trait TokenFilter: Send + Sync {
    /// Apply this filter, returning the narrowed document.
    fn apply(&self, doc: &Document) -> Result<Document>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A shareable filter trait object.
pub type BoxedFilter = Arc<dyn TokenFilter>;

/// Return a filter selecting the complement of the wrapped filter's result.
///
/// The complement is taken within the full token universe
/// `0..original_len`, evaluated against the document handed to the negated
/// filter, not against whatever selection the wrapped filter happens to
/// return. Applying the complement through `sub_doc` then intersects it
/// with the caller's selection, so negation partitions `doc.selected` and
/// double negation is the identity.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use textprep::document::Document;
/// use textprep::error::Result;
/// use textprep::filter::{TokenFilter, negated};
///
/// struct FirstToken;
///
/// impl TokenFilter for FirstToken {
///     fn apply(&self, doc: &Document) -> Result<Document> {
///         Ok(doc.sub_doc([0]))
///     }
///
///     fn name(&self) -> &'static str {
///         "first_token"
///     }
/// }
///
/// let doc = Document::from_tokens(["a", "b", "c"]);
/// let all_but_first = negated(Arc::new(FirstToken));
/// let filtered = all_but_first.apply(&doc).unwrap();
/// assert_eq!(filtered.selected_tokens().collect::<Vec<_>>(), vec!["b", "c"]);
/// ```
pub fn negated(filter: BoxedFilter) -> BoxedFilter {
    Arc::new(NegatedFilter { inner: filter })
}

/// The filter returned by [`negated`].
pub struct NegatedFilter {
    inner: BoxedFilter,
}

impl TokenFilter for NegatedFilter {
    fn apply(&self, doc: &Document) -> Result<Document> {
        let kept = self.inner.apply(doc)?;
        let complement =
            (0..doc.original_len()).filter(|index| !kept.selected().contains(index));
        Ok(doc.sub_doc(complement))
    }

    fn name(&self) -> &'static str {
        "negated"
    }
}

// Individual filter modules
pub mod flag;
pub mod property;
pub mod segment_len;
