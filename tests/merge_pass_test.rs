//! Merge-pass scenarios with an engine that reports spans.
//!
//! The rule-based engine never reports entities or noun chunks, so these
//! tests use a fixture engine with canned spans to exercise the merge
//! machinery the way a real NLP engine would.

use std::sync::Arc;

use textprep::prelude::*;

/// Delegates analysis to the rule-based engine, then tags "New York" as an
/// entity and any leading "The <word> <word>" run as a noun chunk.
struct SpanEngine {
    inner: SimpleAnalysisEngine,
}

impl SpanEngine {
    fn new() -> Arc<Self> {
        Arc::new(SpanEngine {
            inner: SimpleAnalysisEngine::new(),
        })
    }
}

impl AnalysisEngine for SpanEngine {
    fn analyze(&self, text: &str) -> Result<Annotation> {
        let annotation = self.inner.analyze(text)?;
        let tokens = annotation.tokens();

        let entities: Vec<Span> = tokens
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].text == "New" && pair[1].text == "York")
            .map(|(index, _)| Span::new(index, index + 2).with_label("GPE"))
            .collect();

        let mut noun_chunks = Vec::new();
        if tokens.len() >= 3 && tokens[0].text == "The" {
            noun_chunks.push(Span::new(0, 3));
        }

        Ok(annotation.with_entities(entities).with_noun_chunks(noun_chunks))
    }

    fn analyze_tokens(&self, tokens: &[String]) -> Result<Annotation> {
        self.inner.analyze_tokens(tokens)
    }

    fn segment_sentences(&self, annotation: &Annotation) -> Result<Annotation> {
        self.inner.segment_sentences(annotation)
    }

    fn name(&self) -> &'static str {
        "span_fixture"
    }
}

#[test]
fn test_entity_and_noun_chunk_merges_compose() -> Result<()> {
    let store = AnnotationStore::new(SpanEngine::new() as Arc<dyn AnalysisEngine>);
    let tokenizer = Tokenizer::new(Arc::clone(&store))
        .merge_entities(true)
        .merge_noun_chunks(true);

    let doc = tokenizer.document("The big dog sees New York")?;
    assert_eq!(
        doc.original_tokens(),
        ["The big dog", "sees", "New York"]
    );

    // Property functions resolve the merged annotation for this document.
    let lemmas = store.lemmas().properties(&doc)?;
    assert_eq!(lemmas, vec!["the big dog", "sees", "new york"]);
    Ok(())
}

#[test]
fn test_merged_and_unmerged_views_coexist() -> Result<()> {
    let store = AnnotationStore::new(SpanEngine::new() as Arc<dyn AnalysisEngine>);
    let text = "New York sleeps";

    let merging = Tokenizer::new(Arc::clone(&store)).merge_entities(true);
    let merged_doc = merging.document(text)?;
    assert_eq!(merged_doc.original_len(), 2);

    // The original analysis of the very same text is still the unmerged
    // one, token for token.
    let original = store.original_text_annotation(text)?;
    assert_eq!(original.len(), 3);
    assert_eq!(original.tokens()[0].text, "New");
    assert_eq!(original.entities(), &[Span::new(0, 2).with_label("GPE")]);
    Ok(())
}

#[test]
fn test_merge_pass_without_spans_is_a_no_op() -> Result<()> {
    // The rule-based engine reports no spans at all.
    let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
    let plain = Tokenizer::new(Arc::clone(&store));
    let merging = Tokenizer::new(Arc::clone(&store))
        .merge_entities(true)
        .merge_noun_chunks(true);

    let text = "New York sleeps";
    assert_eq!(merging.tokenize(text)?, plain.tokenize(text)?);
    Ok(())
}

#[test]
fn test_merged_token_survives_filtering() -> Result<()> {
    let store = AnnotationStore::new(SpanEngine::new() as Arc<dyn AnalysisEngine>);
    let tokenizer = Tokenizer::new(Arc::clone(&store)).merge_entities(true);

    let docs: Vec<Document> = tokenizer
        .documents(["The mayor of New York waved"])
        .collect::<Result<_>>()?;

    // Drop stop words; the collapsed entity token is kept as one unit.
    let pipeline = textprep::pipeline::PipelineStages::new().add_incremental(negated(
        Arc::new(textprep::filter::flag::FlagFilter::new(Arc::new(
            store.stop_flags(),
        ))),
    ));
    let filtered: Vec<Document> = pipeline.apply(docs).collect::<Result<_>>()?;
    assert_eq!(
        filtered[0].selected_tokens().collect::<Vec<_>>(),
        vec!["mayor", "New York", "waved"]
    );
    Ok(())
}
