//! # TextPrep
//!
//! A composable corpus pre-processing pipeline library for Rust.
//!
//! ## Features
//!
//! - Immutable documents: filtering selects token indices, never rewrites
//! - Composable token filters with full-context and incremental stages
//! - Pluggable analysis engines behind a small trait
//! - Annotation caches with at-most-one-compute per key and persistence
//! - Corpus-wide document-frequency analysis, parallel via rayon
//! - Tokenization with entity and noun-chunk merge passes
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//!
//! use textprep::prelude::*;
//!
//! let store = AnnotationStore::new(Arc::new(SimpleAnalysisEngine::new()));
//! let tokenizer = Tokenizer::new(Arc::clone(&store));
//!
//! let docs: Vec<Document> = tokenizer
//!     .documents(["The fox runs.", "A dog sleeps."])
//!     .collect::<Result<_>>()
//!     .unwrap();
//!
//! let pipeline = topic_modeling_pipeline(&docs, &store, &PipelineOptions::default()).unwrap();
//! let filtered: Vec<Document> = pipeline.apply(docs).collect::<Result<_>>().unwrap();
//! assert_eq!(filtered.len(), 2);
//! ```

pub mod annotation;
pub mod cache;
pub mod document;
pub mod engine;
pub mod error;
pub mod filter;
pub mod frequency;
pub mod pipeline;
pub mod store;
pub mod tokenize;

pub mod prelude {
    //! The most common types, for glob import.

    pub use crate::annotation::{Annotation, Projection, Span, SpanKind, TokenAnnotation};
    pub use crate::document::Document;
    pub use crate::engine::AnalysisEngine;
    pub use crate::engine::simple::SimpleAnalysisEngine;
    pub use crate::error::{Result, TextPrepError};
    pub use crate::filter::{BoxedFilter, TokenFilter, negated};
    pub use crate::frequency::DfInterval;
    pub use crate::pipeline::{
        PipelineOptions, PipelineStages, apply_filters, topic_modeling_pipeline,
    };
    pub use crate::store::{AnnotationStore, PropertyFn, SplitFn};
    pub use crate::tokenize::Tokenizer;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
