//! Semantic search service.
//!
//! Provides a high-level interface over an embedding provider:
//! - Lazy-loads the provider exactly once, on first use
//! - Encodes texts, scores pairwise similarity, picks the best document
//! - Thread-safe: concurrent first calls share a single load

use std::path::PathBuf;

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::config::SemanticSearchConfig;
use crate::semantic::embeddings::{EmbeddingError, EmbeddingModel, EmbeddingProvider};
use crate::semantic::similarity::{best_match, cosine_similarity, SimilarityError};

/// Errors that can occur during semantic search operations.
#[derive(Debug, thiserror::Error)]
pub enum SemanticSearchError {
    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(EmbeddingError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Similarity error: {0}")]
    Similarity(#[from] SimilarityError),
}

/// Best match for a query among a list of documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Position of the document in the input list
    pub index: usize,
    /// The matching document text
    pub document: String,
    /// Cosine similarity between query and document
    pub score: f32,
}

type Loader<P> = Box<dyn Fn() -> Result<P, EmbeddingError> + Send + Sync>;

/// Semantic search over an embedding provider.
///
/// The provider starts unloaded and is created by the loader on the first
/// call that needs it. It is never unloaded afterwards.
pub struct SemanticSearch<P> {
    model_name: String,
    loader: Loader<P>,
    provider: OnceCell<P>,
}

impl SemanticSearch<EmbeddingModel> {
    /// Create a service backed by a fastembed model.
    ///
    /// Nothing is loaded here; the model is fetched from `cache_dir`
    /// (downloading it if needed) on first use.
    pub fn new(config: SemanticSearchConfig, cache_dir: PathBuf) -> Self {
        let model_name = config.model.clone();
        Self::with_loader(model_name, move || {
            EmbeddingModel::new(
                &config.model,
                cache_dir.clone(),
                config.batch_size,
                config.show_download_progress,
            )
        })
    }
}

impl<P: EmbeddingProvider> SemanticSearch<P> {
    /// Create a service with a custom provider loader.
    pub fn with_loader<F>(model_name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<P, EmbeddingError> + Send + Sync + 'static,
    {
        Self {
            model_name: model_name.into(),
            loader: Box::new(loader),
            provider: OnceCell::new(),
        }
    }

    /// Name of the model this service loads.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Check if the provider has been loaded.
    pub fn is_initialized(&self) -> bool {
        self.provider.get().is_some()
    }

    /// Force loading of the provider.
    ///
    /// Normally loading happens lazily on first use.
    pub fn initialize(&self) -> Result<(), SemanticSearchError> {
        self.provider().map(|_| ())
    }

    /// Embedding dimensions of the loaded provider (loads it if needed).
    pub fn dimensions(&self) -> Result<usize, SemanticSearchError> {
        Ok(self.provider()?.dimensions())
    }

    /// Convert text into its embedding vector.
    pub fn vectorize(&self, text: &str) -> Result<Vec<f32>, SemanticSearchError> {
        let provider = self.provider()?;
        Ok(provider.encode(text)?)
    }

    /// Cosine similarity between the embeddings of two texts.
    pub fn similarity(&self, text1: &str, text2: &str) -> Result<f32, SemanticSearchError> {
        let provider = self.provider()?;
        let emb1 = provider.encode(text1)?;
        let emb2 = provider.encode(text2)?;

        Ok(cosine_similarity(&emb1, &emb2)?)
    }

    /// Find the document closest in meaning to `query`.
    ///
    /// When several documents share the top score the one with the lowest
    /// index wins. Fails with `InvalidInput` if `documents` is empty.
    pub fn find_most_similar(
        &self,
        query: &str,
        documents: &[String],
    ) -> Result<SearchResult, SemanticSearchError> {
        if documents.is_empty() {
            return Err(SemanticSearchError::InvalidInput(
                "documents must not be empty".to_string(),
            ));
        }

        let provider = self.provider()?;
        let query_embedding = provider.encode(query)?;
        let doc_embeddings = provider.encode_batch(documents)?;

        if doc_embeddings.len() != documents.len() {
            return Err(EmbeddingError::BatchSizeMismatch {
                expected: documents.len(),
                got: doc_embeddings.len(),
            }
            .into());
        }

        let scores = doc_embeddings
            .iter()
            .map(|emb| cosine_similarity(&query_embedding, emb))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("query={query:?} scores={scores:?}");

        let (index, score) = best_match(&scores).ok_or_else(|| {
            SemanticSearchError::InvalidInput("no scores to rank".to_string())
        })?;

        Ok(SearchResult {
            index,
            document: documents[index].clone(),
            score,
        })
    }

    /// Get the provider, loading it on first call.
    fn provider(&self) -> Result<&P, SemanticSearchError> {
        self.provider
            .get_or_try_init(|| {
                let _span = tracing::info_span!("model_load", model = %self.model_name).entered();
                log::info!("Initializing semantic search with model '{}'", self.model_name);

                (self.loader)().map_err(|e| {
                    log::error!("Failed to load model '{}': {}", self.model_name, e);
                    SemanticSearchError::ModelUnavailable(e)
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Axis(usize);

    impl EmbeddingProvider for Axis {
        fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let mut v = vec![0.0; self.0];
            v[text.len() % self.0] = 1.0;
            Ok(v)
        }

        fn dimensions(&self) -> usize {
            self.0
        }
    }

    fn failing_service() -> SemanticSearch<Axis> {
        SemanticSearch::with_loader("broken", || {
            Err(EmbeddingError::InitFailed("corrupt cache".to_string()))
        })
    }

    #[test]
    fn test_not_initialized_initially() {
        let service = SemanticSearch::with_loader("axis", || Ok(Axis(4)));
        assert!(!service.is_initialized());
        assert_eq!(service.model_name(), "axis");
    }

    #[test]
    fn test_initialize_loads_provider() {
        let service = SemanticSearch::with_loader("axis", || Ok(Axis(4)));
        service.initialize().unwrap();
        assert!(service.is_initialized());
        assert_eq!(service.dimensions().unwrap(), 4);
    }

    #[test]
    fn test_empty_documents_is_invalid_input() {
        let service = SemanticSearch::with_loader("axis", || Ok(Axis(4)));
        let result = service.find_most_similar("query", &[]);

        assert!(matches!(result, Err(SemanticSearchError::InvalidInput(_))));
        // rejected before the provider was touched
        assert!(!service.is_initialized());
    }

    #[test]
    fn test_load_failure_is_model_unavailable() {
        let service = failing_service();

        assert!(matches!(
            service.vectorize("text"),
            Err(SemanticSearchError::ModelUnavailable(EmbeddingError::InitFailed(_)))
        ));
        assert!(matches!(
            service.similarity("a", "b"),
            Err(SemanticSearchError::ModelUnavailable(_))
        ));
        assert!(!service.is_initialized());
    }

    #[test]
    fn test_dimension_mismatch_surfaces() {
        struct Ragged;

        impl EmbeddingProvider for Ragged {
            fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
                Ok(vec![1.0; text.len()])
            }

            fn dimensions(&self) -> usize {
                0
            }
        }

        let service = SemanticSearch::with_loader("ragged", || Ok(Ragged));
        assert!(matches!(
            service.similarity("ab", "abc"),
            Err(SemanticSearchError::Similarity(SimilarityError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_short_batch_is_rejected() {
        struct ShortBatch;

        impl EmbeddingProvider for ShortBatch {
            fn encode(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
                Ok(vec![1.0, 0.0])
            }

            fn encode_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
                Ok(vec![vec![1.0, 0.0]])
            }

            fn dimensions(&self) -> usize {
                2
            }
        }

        let service = SemanticSearch::with_loader("short", || Ok(ShortBatch));
        let docs = vec!["a".to_string(), "b".to_string()];
        assert!(matches!(
            service.find_most_similar("q", &docs),
            Err(SemanticSearchError::Embedding(EmbeddingError::BatchSizeMismatch {
                expected: 2,
                got: 1
            }))
        ));
    }
}
