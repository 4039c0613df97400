//! Externally computed linguistic annotations.
//!
//! An [`Annotation`] is the result of running an external NLP engine over a
//! text or token sequence: one [`TokenAnnotation`] per token, plus optional
//! sentence spans and entity / noun-chunk spans. Annotations are plain
//! serializable values; the engine that produced them is never part of the
//! value, which is what makes them cacheable and persistable.
//!
//! Merge transforms (collapsing an entity or noun-chunk span into a single
//! token) are pure: [`Annotation::merge_spans`] returns a new annotation and
//! leaves the input untouched, so a cached original annotation can never be
//! corrupted by a merge pass.
//!
//! # Examples
//!
//! ```
//! use textprep::annotation::{Annotation, Span, SpanKind, TokenAnnotation};
//!
//! let annotation = Annotation::new(vec![
//!     TokenAnnotation::new("Deutsche", "deutsche", "PROPN", false),
//!     TokenAnnotation::new("Bahn", "bahn", "PROPN", false),
//!     TokenAnnotation::new("streikt", "streiken", "VERB", false),
//! ])
//! .with_entities(vec![Span::new(0, 2).with_label("ORG")]);
//!
//! let merged = annotation.merge_spans(SpanKind::Entity);
//! assert_eq!(merged.len(), 2);
//! assert_eq!(merged.tokens()[0].text, "Deutsche Bahn");
//! // The input annotation still has three tokens.
//! assert_eq!(annotation.len(), 3);
//! ```

use serde::{Deserialize, Serialize};

/// The analysis of a single token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAnnotation {
    /// The token's surface text.
    pub text: String,

    /// The token's lemma.
    pub lemma: String,

    /// The token's part-of-speech tag (e.g. a universal POS tag).
    pub pos: String,

    /// Whether the token is a stop word.
    pub is_stop: bool,
}

impl TokenAnnotation {
    /// Create a new token annotation.
    pub fn new<T, L, P>(text: T, lemma: L, pos: P, is_stop: bool) -> Self
    where
        T: Into<String>,
        L: Into<String>,
        P: Into<String>,
    {
        TokenAnnotation {
            text: text.into(),
            lemma: lemma.into(),
            pos: pos.into(),
            is_stop,
        }
    }
}

/// A half-open range of token indices, optionally labeled.
///
/// Used for sentences (unlabeled) and for entity / noun-chunk spans
/// (labeled with the entity type or chunk head, if the engine provides one).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// First token index covered by the span.
    pub start: usize,
    /// One past the last token index covered by the span.
    pub end: usize,
    /// Optional label (entity type, chunk head, ...).
    pub label: Option<String>,
}

impl Span {
    /// Create a new unlabeled span over `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start,
            end,
            label: None,
        }
    }

    /// Attach a label to this span.
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The number of tokens covered by this span.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether this span covers no tokens.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Which span family a merge pass collapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanKind {
    /// Named-entity spans.
    Entity,
    /// Noun-chunk spans.
    NounChunk,
}

/// The named projections from a token annotation to a property value.
///
/// This is the enumerated replacement for reflective attribute lookup: a
/// property is picked by name through this enum and resolved with a match,
/// so the set of supported projections is closed and checked at compile
/// time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Projection {
    /// The surface text of the token.
    Text,
    /// The lemma of the token.
    Lemma,
    /// The part-of-speech tag of the token.
    Pos,
    /// The stop-word flag, rendered as `"true"` / `"false"`.
    IsStop,
}

impl Projection {
    /// Project a single token annotation to a string value.
    pub fn of(&self, token: &TokenAnnotation) -> String {
        match self {
            Projection::Text => token.text.clone(),
            Projection::Lemma => token.lemma.clone(),
            Projection::Pos => token.pos.clone(),
            Projection::IsStop => token.is_stop.to_string(),
        }
    }

    /// Project every token of an annotation, in order.
    pub fn strings(&self, annotation: &Annotation) -> Vec<String> {
        annotation.tokens().iter().map(|t| self.of(t)).collect()
    }
}

/// A complete externally computed analysis of a token sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    tokens: Vec<TokenAnnotation>,

    /// Sentence spans, if the annotation has been segmented. `None` means
    /// segmentation has not run yet; split adapters trigger it lazily.
    sentences: Option<Vec<Span>>,

    /// Named-entity spans reported by the engine.
    entities: Vec<Span>,

    /// Noun-chunk spans reported by the engine.
    noun_chunks: Vec<Span>,
}

impl Annotation {
    /// Create a new annotation over the given tokens, with no spans.
    pub fn new(tokens: Vec<TokenAnnotation>) -> Self {
        Annotation {
            tokens,
            sentences: None,
            entities: Vec::new(),
            noun_chunks: Vec::new(),
        }
    }

    /// Set the sentence spans.
    pub fn with_sentences(mut self, sentences: Vec<Span>) -> Self {
        self.sentences = Some(sentences);
        self
    }

    /// Set the entity spans.
    pub fn with_entities(mut self, entities: Vec<Span>) -> Self {
        self.entities = entities;
        self
    }

    /// Set the noun-chunk spans.
    pub fn with_noun_chunks(mut self, noun_chunks: Vec<Span>) -> Self {
        self.noun_chunks = noun_chunks;
        self
    }

    /// The per-token annotations.
    pub fn tokens(&self) -> &[TokenAnnotation] {
        &self.tokens
    }

    /// The sentence spans, if segmentation has run.
    pub fn sentences(&self) -> Option<&[Span]> {
        self.sentences.as_deref()
    }

    /// The entity spans.
    pub fn entities(&self) -> &[Span] {
        &self.entities
    }

    /// The noun-chunk spans.
    pub fn noun_chunks(&self) -> &[Span] {
        &self.noun_chunks
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the annotation has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether sentence segmentation has run.
    pub fn is_segmented(&self) -> bool {
        self.sentences.is_some()
    }

    /// Collapse every multi-token span of the given kind into a single
    /// token, returning the merged annotation.
    ///
    /// The merged token's text and lemma join the covered tokens with
    /// spaces; the POS tag is taken from the first covered token and the
    /// stop flag is cleared. All span families (including the merged one)
    /// are remapped to the new token indices, so a merged entity span ends
    /// up covering exactly one token and re-applying the merge is a no-op.
    ///
    /// Spans are expected sorted and non-overlapping, as engines report
    /// them; an overlapping span is skipped.
    pub fn merge_spans(&self, kind: SpanKind) -> Annotation {
        let spans = match kind {
            SpanKind::Entity => &self.entities,
            SpanKind::NounChunk => &self.noun_chunks,
        };

        // Only well-formed multi-token spans trigger any work.
        let mut to_merge: Vec<&Span> = Vec::new();
        let mut cursor = 0usize;
        for span in spans {
            if span.len() >= 2 && span.start >= cursor && span.end <= self.tokens.len() {
                to_merge.push(span);
                cursor = span.end;
            }
        }
        if to_merge.is_empty() {
            return self.clone();
        }

        let mut new_tokens: Vec<TokenAnnotation> = Vec::with_capacity(self.tokens.len());
        let mut index_map: Vec<usize> = Vec::with_capacity(self.tokens.len());
        let mut merge_iter = to_merge.iter().peekable();

        let mut old_index = 0usize;
        while old_index < self.tokens.len() {
            match merge_iter.peek() {
                Some(span) if span.start == old_index => {
                    let covered = &self.tokens[span.start..span.end];
                    let text = covered
                        .iter()
                        .map(|t| t.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    let lemma = covered
                        .iter()
                        .map(|t| t.lemma.as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    let merged =
                        TokenAnnotation::new(text, lemma, covered[0].pos.clone(), false);

                    let new_index = new_tokens.len();
                    new_tokens.push(merged);
                    for _ in span.start..span.end {
                        index_map.push(new_index);
                    }
                    old_index = span.end;
                    merge_iter.next();
                }
                _ => {
                    index_map.push(new_tokens.len());
                    new_tokens.push(self.tokens[old_index].clone());
                    old_index += 1;
                }
            }
        }

        let remap = |span: &Span| -> Option<Span> {
            if span.is_empty() || span.end > index_map.len() {
                return None;
            }
            Some(Span {
                start: index_map[span.start],
                end: index_map[span.end - 1] + 1,
                label: span.label.clone(),
            })
        };

        Annotation {
            tokens: new_tokens,
            sentences: self
                .sentences
                .as_ref()
                .map(|spans| spans.iter().filter_map(remap).collect()),
            entities: self.entities.iter().filter_map(remap).collect(),
            noun_chunks: self.noun_chunks.iter().filter_map(remap).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> TokenAnnotation {
        TokenAnnotation::new(text, text.to_lowercase(), "WORD", false)
    }

    fn sample() -> Annotation {
        Annotation::new(vec![
            word("The"),
            word("Deutsche"),
            word("Bahn"),
            word("strikes"),
            word("."),
        ])
        .with_entities(vec![Span::new(1, 3).with_label("ORG")])
        .with_sentences(vec![Span::new(0, 5)])
    }

    #[test]
    fn test_merge_collapses_entity_span() {
        let merged = sample().merge_spans(SpanKind::Entity);

        assert_eq!(merged.len(), 4);
        assert_eq!(merged.tokens()[1].text, "Deutsche Bahn");
        assert_eq!(merged.tokens()[1].lemma, "deutsche bahn");
        assert_eq!(merged.tokens()[1].pos, "WORD");
        assert_eq!(merged.entities(), &[Span::new(1, 2).with_label("ORG")]);
        assert_eq!(merged.sentences().unwrap(), &[Span::new(0, 4)]);
    }

    #[test]
    fn test_merge_is_pure_and_idempotent() {
        let annotation = sample();
        let merged = annotation.merge_spans(SpanKind::Entity);

        // The input is untouched.
        assert_eq!(annotation.len(), 5);
        // Re-applying the merge changes nothing.
        assert_eq!(merged.merge_spans(SpanKind::Entity), merged);
    }

    #[test]
    fn test_merge_without_spans_is_identity() {
        let annotation = Annotation::new(vec![word("a"), word("b")]);
        assert_eq!(annotation.merge_spans(SpanKind::NounChunk), annotation);
    }

    #[test]
    fn test_merge_skips_overlapping_spans() {
        let annotation = Annotation::new(vec![word("a"), word("b"), word("c")])
            .with_noun_chunks(vec![Span::new(0, 2), Span::new(1, 3)]);

        let merged = annotation.merge_spans(SpanKind::NounChunk);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.tokens()[0].text, "a b");
        assert_eq!(merged.tokens()[1].text, "c");
    }

    #[test]
    fn test_projection_switch() {
        let token = TokenAnnotation::new("Bahn", "bahn", "NOUN", true);
        assert_eq!(Projection::Text.of(&token), "Bahn");
        assert_eq!(Projection::Lemma.of(&token), "bahn");
        assert_eq!(Projection::Pos.of(&token), "NOUN");
        assert_eq!(Projection::IsStop.of(&token), "true");
    }
}
