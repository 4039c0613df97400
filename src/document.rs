//! Document representation for corpus pre-processing.
//!
//! A [`Document`] is the fundamental unit that flows through filter
//! pipelines. It separates the *original* token sequence, which is fixed at
//! construction time and never changes, from the *selected* subset of token
//! indices that later filter stages narrow down. Keeping the original
//! sequence immutable is what lets externally computed annotations (which
//! are aligned to the original tokens) stay valid across any number of
//! filter stages.
//!
//! # Examples
//!
//! ```
//! use textprep::document::Document;
//!
//! let doc = Document::from_text("a b c", |text| {
//!     text.split_whitespace().map(str::to_string).collect()
//! });
//! assert_eq!(doc.len(), 3);
//!
//! // Narrow the selection; the original tokens are untouched.
//! let sub = doc.sub_doc([0, 2]);
//! let kept: Vec<_> = sub.selected_tokens().collect();
//! assert_eq!(kept, vec!["a", "c"]);
//! assert_eq!(sub.original_tokens().len(), 3);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// An immutable document: an original token sequence plus a selected subset.
///
/// Documents are values. Every "mutation" produces a new `Document` via
/// [`Document::sub_doc`]; the original token sequence is shared between the
/// old and new value, so narrowing is cheap. The selection is always a
/// subset of `0..original_tokens.len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// The raw text this document was built from. Empty when the document
    /// was constructed directly from tokens by a caller that had no text.
    original_text: String,

    /// The atomic token sequence. Never mutated after construction.
    original_tokens: Arc<[String]>,

    /// Indices into `original_tokens` that are currently considered live.
    selected: BTreeSet<usize>,

    /// Optional language tag. Metadata only; filtering never consults it.
    language: Option<String>,
}

impl Document {
    /// Create a document from raw text and a tokenization function.
    ///
    /// All tokens start out selected.
    pub fn from_text<F>(text: &str, tokenize: F) -> Self
    where
        F: FnOnce(&str) -> Vec<String>,
    {
        let tokens = tokenize(text);
        Self::from_parts(text, tokens, None::<String>)
    }

    /// Create a document from pre-tokenized input.
    ///
    /// The original text is reconstructed by joining the tokens with single
    /// spaces. All tokens start out selected.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(|s| s.into()).collect();
        let text = tokens.join(" ");
        Self::from_parts(&text, tokens, None::<String>)
    }

    /// Create a document from text and tokens that were produced together
    /// (e.g. by a [`Tokenizer`](crate::tokenize::Tokenizer)).
    ///
    /// All tokens start out selected.
    pub fn from_parts<S: Into<String>>(
        text: &str,
        tokens: Vec<String>,
        language: Option<S>,
    ) -> Self {
        let selected = (0..tokens.len()).collect();
        Document {
            original_text: text.to_string(),
            original_tokens: tokens.into(),
            selected,
            language: language.map(|s| s.into()),
        }
    }

    /// Return a new document whose selection is the intersection of this
    /// document's selection with the given indices.
    ///
    /// Indices outside `0..original_tokens.len()` cannot appear in the
    /// current selection and are therefore silently dropped by the
    /// intersection. The selection never grows.
    pub fn sub_doc<I>(&self, indices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let requested: BTreeSet<usize> = indices.into_iter().collect();
        let selected = self.selected.intersection(&requested).copied().collect();
        Document {
            original_text: self.original_text.clone(),
            original_tokens: Arc::clone(&self.original_tokens),
            selected,
            language: self.language.clone(),
        }
    }

    /// The raw text this document was built from.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// The full, immutable token sequence.
    pub fn original_tokens(&self) -> &[String] {
        &self.original_tokens
    }

    /// The currently selected token indices, ascending.
    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    /// The optional language tag.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Attach a language tag, returning the updated document.
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Iterate over the selected tokens in ascending original order.
    ///
    /// Original order is always preserved, regardless of the order in which
    /// filters narrowed the selection.
    pub fn selected_tokens(&self) -> impl Iterator<Item = &str> {
        self.selected
            .iter()
            .map(|&index| self.original_tokens[index].as_str())
    }

    /// The number of selected tokens.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether no tokens are selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The number of original tokens.
    pub fn original_len(&self) -> usize {
        self.original_tokens.len()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in self.selected_tokens() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{token}")?;
            first = false;
        }
        Ok(())
    }
}
