//! Boolean-property filter.
//!
//! Keeps tokens whose boolean property is `true`. The canonical use is the
//! stop-word flag: `negated(FlagFilter::new(store.stop_flags()))` drops
//! every stop word.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use textprep::document::Document;
//! use textprep::engine::simple::SimpleAnalysisEngine;
//! use textprep::filter::TokenFilter;
//! use textprep::filter::flag::FlagFilter;
//! use textprep::store::AnnotationStore;
//!
//! let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
//! let doc = Document::from_tokens(["the", "fox"]);
//!
//! let stops = FlagFilter::new(Arc::new(store.stop_flags()));
//! let filtered = stops.apply(&doc).unwrap();
//! assert_eq!(filtered.selected_tokens().collect::<Vec<_>>(), vec!["the"]);
//! ```

use std::sync::Arc;

use crate::document::Document;
use crate::error::Result;
use crate::filter::TokenFilter;
use crate::store::PropertyFn;

/// A filter that keeps tokens whose boolean property is true.
pub struct FlagFilter {
    property_fn: Arc<dyn PropertyFn<bool>>,
}

impl FlagFilter {
    /// Create a new filter over the given boolean property function.
    pub fn new(property_fn: Arc<dyn PropertyFn<bool>>) -> Self {
        FlagFilter { property_fn }
    }
}

impl TokenFilter for FlagFilter {
    fn apply(&self, doc: &Document) -> Result<Document> {
        let flags = self.property_fn.properties(doc)?;
        let keep = flags
            .iter()
            .enumerate()
            .filter(|(_, flag)| **flag)
            .map(|(index, _)| index);
        Ok(doc.sub_doc(keep))
    }

    fn name(&self) -> &'static str {
        "flag"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::simple::SimpleAnalysisEngine;
    use crate::filter::negated;
    use crate::store::AnnotationStore;

    #[test]
    fn test_negated_flag_drops_stop_words() {
        let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
        let doc = Document::from_tokens(["the", "quick", "fox", "and", "dog"]);

        let no_stops = negated(Arc::new(FlagFilter::new(Arc::new(store.stop_flags()))));
        let filtered = no_stops.apply(&doc).unwrap();

        assert_eq!(
            filtered.selected_tokens().collect::<Vec<_>>(),
            vec!["quick", "fox", "dog"]
        );
    }
}
