//! Rule-based analysis engine.
//!
//! This engine needs no external NLP service: it tokenizes on Unicode word
//! boundaries, lowercases for lemmas, assigns coarse POS tags from character
//! classes and flags stop words from a fixed English list. It reports no
//! entity or noun-chunk spans; span detection genuinely requires a trained
//! model, so merge passes over its output are no-ops.
//!
//! It exists so pipelines can be built and tested end to end without wiring
//! up a real engine; production deployments are expected to implement
//! [`AnalysisEngine`] against their NLP service of choice.
//!
//! # Examples
//!
//! ```
//! use textprep::engine::AnalysisEngine;
//! use textprep::engine::simple::SimpleAnalysisEngine;
//!
//! let engine = SimpleAnalysisEngine::new();
//! let annotation = engine.analyze("The quick fox runs!").unwrap();
//!
//! let texts: Vec<_> = annotation.tokens().iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["The", "quick", "fox", "runs", "!"]);
//! assert!(annotation.tokens()[0].is_stop);
//! assert_eq!(annotation.tokens()[4].pos, "PUNCT");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use unicode_segmentation::UnicodeSegmentation;

use crate::annotation::{Annotation, Span, TokenAnnotation};
use crate::engine::AnalysisEngine;
use crate::error::Result;

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// Tokens that end a sentence.
const SENTENCE_TERMINATORS: &[&str] = &[".", "!", "?"];

/// A rule-based [`AnalysisEngine`] with no external dependencies.
#[derive(Clone, Debug)]
pub struct SimpleAnalysisEngine {
    stop_words: Arc<HashSet<String>>,
}

impl SimpleAnalysisEngine {
    /// Create a new engine with the default English stop words.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_ENGLISH_STOP_WORDS_SET.clone())
    }

    /// Create a new engine with a custom stop word set.
    ///
    /// Stop words are matched against the lemma (lowercased text).
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        SimpleAnalysisEngine {
            stop_words: Arc::new(stop_words),
        }
    }

    fn annotate_token(&self, text: &str) -> TokenAnnotation {
        let lemma = text.to_lowercase();
        let pos = if text.chars().all(|c| c.is_ascii_punctuation()) {
            "PUNCT"
        } else if text.chars().all(|c| c.is_numeric()) {
            "NUM"
        } else {
            "WORD"
        };
        let is_stop = self.stop_words.contains(&lemma);
        TokenAnnotation::new(text, lemma, pos, is_stop)
    }
}

impl Default for SimpleAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine for SimpleAnalysisEngine {
    fn analyze(&self, text: &str) -> Result<Annotation> {
        let tokens = text
            .split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .map(|segment| self.annotate_token(segment))
            .collect();
        Ok(Annotation::new(tokens))
    }

    fn analyze_tokens(&self, tokens: &[String]) -> Result<Annotation> {
        let tokens = tokens
            .iter()
            .map(|token| self.annotate_token(token))
            .collect();
        Ok(Annotation::new(tokens))
    }

    fn segment_sentences(&self, annotation: &Annotation) -> Result<Annotation> {
        if annotation.is_segmented() {
            return Ok(annotation.clone());
        }

        let mut sentences = Vec::new();
        let mut start = 0usize;
        for (index, token) in annotation.tokens().iter().enumerate() {
            if SENTENCE_TERMINATORS.contains(&token.text.as_str()) {
                sentences.push(Span::new(start, index + 1));
                start = index + 1;
            }
        }
        if start < annotation.len() {
            sentences.push(Span::new(start, annotation.len()));
        }

        Ok(annotation.clone().with_sentences(sentences))
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_token_classes() {
        let engine = SimpleAnalysisEngine::new();
        let annotation = engine.analyze("The 12 foxes ran.").unwrap();

        let tokens = annotation.tokens();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0].lemma, "the");
        assert!(tokens[0].is_stop);
        assert_eq!(tokens[1].pos, "NUM");
        assert_eq!(tokens[2].pos, "WORD");
        assert_eq!(tokens[4].pos, "PUNCT");
    }

    #[test]
    fn test_analyze_tokens_preserves_tokenization() {
        let engine = SimpleAnalysisEngine::new();
        let tokens = vec!["New York".to_string(), "is".to_string()];
        let annotation = engine.analyze_tokens(&tokens).unwrap();

        // Pre-tokenized input is never re-segmented.
        assert_eq!(annotation.len(), 2);
        assert_eq!(annotation.tokens()[0].text, "New York");
    }

    #[test]
    fn test_segment_sentences() {
        let engine = SimpleAnalysisEngine::new();
        let annotation = engine.analyze("One ends here. Two runs on").unwrap();
        let segmented = engine.segment_sentences(&annotation).unwrap();

        let sentences = segmented.sentences().unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], Span::new(0, 4));
        assert_eq!(sentences[1], Span::new(4, 7));

        let total: usize = sentences.iter().map(|s| s.len()).sum();
        assert_eq!(total, segmented.len());
    }

    #[test]
    fn test_segment_sentences_is_idempotent() {
        let engine = SimpleAnalysisEngine::new();
        let annotation = engine.analyze("Just one sentence.").unwrap();
        let once = engine.segment_sentences(&annotation).unwrap();
        let twice = engine.segment_sentences(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_text() {
        let engine = SimpleAnalysisEngine::new();
        let annotation = engine.analyze("").unwrap();
        assert!(annotation.is_empty());

        let segmented = engine.segment_sentences(&annotation).unwrap();
        assert_eq!(segmented.sentences().unwrap().len(), 0);
    }
}
