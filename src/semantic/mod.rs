//! Semantic text similarity on top of a pretrained embedding model.
//!
//! This module provides local semantic similarity using fastembed-rs for
//! generating embeddings and plain cosine similarity for scoring.
//!
//! # Architecture
//!
//! - `embeddings`: The `EmbeddingProvider` capability and its fastembed implementation
//! - `similarity`: Cosine similarity and best-match selection
//! - `service`: Lazily-loaded search service (vectorize, similarity, find_most_similar)

pub mod embeddings;
pub mod service;
pub mod similarity;

pub use embeddings::{is_supported_model, EmbeddingModel};
pub use service::SemanticSearch;

/// Default embedding model name (multilingual, 384 dimensions)
pub const DEFAULT_MODEL: &str = "paraphrase-multilingual-MiniLM-L12-v2";
