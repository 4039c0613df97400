//! Property-membership filter.
//!
//! Keeps tokens whose property value (lemma, POS tag, ...) is a member of a
//! required set. Combined with [`negated`](crate::filter::negated) this
//! covers both "keep only" and "drop all" vocabularies; combined with the
//! frequency analyzer it becomes a document-frequency filter.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use textprep::document::Document;
//! use textprep::engine::simple::SimpleAnalysisEngine;
//! use textprep::filter::{TokenFilter, negated};
//! use textprep::filter::property::PropertyFilter;
//! use textprep::store::AnnotationStore;
//!
//! let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
//! let doc = Document::from_tokens(["The", "fox", "."]);
//!
//! // Drop punctuation by negating a POS membership filter.
//! let punct = PropertyFilter::from_values(Arc::new(store.pos_tags()), ["PUNCT"]);
//! let no_punct = negated(Arc::new(punct));
//! let filtered = no_punct.apply(&doc).unwrap();
//! assert_eq!(filtered.len(), 2);
//! ```

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use crate::document::Document;
use crate::error::Result;
use crate::filter::TokenFilter;
use crate::store::PropertyFn;

/// A filter that keeps tokens whose property value is in a required set.
pub struct PropertyFilter<P> {
    property_fn: Arc<dyn PropertyFn<P>>,
    values: HashSet<P>,
}

impl<P> PropertyFilter<P>
where
    P: Eq + Hash,
{
    /// Create a new filter over the given property function and value set.
    pub fn new(property_fn: Arc<dyn PropertyFn<P>>, values: HashSet<P>) -> Self {
        PropertyFilter {
            property_fn,
            values,
        }
    }

    /// Create a new filter from a list of required values.
    pub fn from_values<I, V>(property_fn: Arc<dyn PropertyFn<P>>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<P>,
    {
        let values = values.into_iter().map(|v| v.into()).collect();
        Self::new(property_fn, values)
    }

    /// The number of required values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the required set is empty (the filter then drops everything).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<P> TokenFilter for PropertyFilter<P>
where
    P: Eq + Hash + Send + Sync + 'static,
{
    fn apply(&self, doc: &Document) -> Result<Document> {
        let properties = self.property_fn.properties(doc)?;
        let keep = properties
            .iter()
            .enumerate()
            .filter(|(_, value)| self.values.contains(value))
            .map(|(index, _)| index);
        Ok(doc.sub_doc(keep))
    }

    fn name(&self) -> &'static str {
        "property"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::simple::SimpleAnalysisEngine;
    use crate::store::AnnotationStore;

    #[test]
    fn test_keeps_matching_tokens() {
        let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
        let doc = Document::from_tokens(["The", "Fox", "the"]);

        let filter = PropertyFilter::from_values(Arc::new(store.lemmas()), ["the"]);
        let filtered = filter.apply(&doc).unwrap();

        assert_eq!(
            filtered.selected_tokens().collect::<Vec<_>>(),
            vec!["The", "the"]
        );
    }

    #[test]
    fn test_empty_value_set_drops_everything() {
        let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
        let doc = Document::from_tokens(["a", "b"]);

        let filter: PropertyFilter<String> =
            PropertyFilter::new(Arc::new(store.lemmas()), HashSet::new());
        assert!(filter.is_empty());
        assert!(filter.apply(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_indices_refer_to_original_tokens() {
        let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
        // Token index 0 is already deselected; the filter's indices are
        // still relative to the original sequence.
        let doc = Document::from_tokens(["fox", "fox", "dog"]).sub_doc([1, 2]);

        let filter = PropertyFilter::from_values(Arc::new(store.lemmas()), ["fox"]);
        let filtered = filter.apply(&doc).unwrap();

        assert_eq!(filtered.selected().iter().copied().collect::<Vec<_>>(), vec![1]);
    }
}
