//! The search facade tying an embedding model to a flat index.

use std::sync::Arc;

use exactsearch_core::EmbeddingModel;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::index::{FlatIndex, VectorIndex};
use crate::metric::Metric;
use crate::mmr::{self, validate_lambda};
use crate::types::{Document, Metadata, RecordId, ScoredRecord, SearchResult, VectorRecord};

/// In-memory exact similarity search over embedded documents.
///
/// `ExactSearch` combines an embedding model with a [`FlatIndex`]: texts are embedded on
/// insertion, queries are embedded on search, and every query is answered by scoring all stored
/// vectors. Clones share the same index and embedder.
///
/// # Example
///
/// ```rust
/// use exactsearch_core::EmbeddingModel;
/// use exactsearch_index::{Document, ExactSearch, Metric, SearchConfig};
///
/// struct LengthEmbedding;
///
/// impl EmbeddingModel for LengthEmbedding {
///     fn dim(&self) -> usize {
///         2
///     }
///
///     async fn embed(&self, text: &str) -> exactsearch_core::Result<Vec<f32>> {
///         Ok(vec![1.0, text.len() as f32])
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let search = ExactSearch::from_texts(
///     ["a", "abcd", "abcdefgh"],
///     LengthEmbedding,
///     None,
///     SearchConfig::builder().metric(Metric::EuclideanDist).build(),
/// )
/// .await
/// .unwrap();
///
/// let hits = search.similarity_search("abc", 1, None).await.unwrap();
/// assert_eq!(hits, vec![Document::new("abcd")]);
/// # });
/// ```
pub struct ExactSearch<M: EmbeddingModel> {
    embedder: Arc<M>,
    index: Arc<FlatIndex>,
    config: SearchConfig,
}

impl<M: EmbeddingModel> Clone for ExactSearch<M> {
    fn clone(&self) -> Self {
        Self {
            embedder: Arc::clone(&self.embedder),
            index: Arc::clone(&self.index),
            config: self.config.clone(),
        }
    }
}

impl<M: EmbeddingModel> std::fmt::Debug for ExactSearch<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExactSearch")
            .field("index", &self.index)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<M> ExactSearch<M>
where
    M: EmbeddingModel,
{
    /// Creates an empty store sized to the embedder's dimension, with default configuration.
    #[must_use]
    pub fn new(embedder: M) -> Self {
        Self::with_config(embedder, SearchConfig::default())
    }

    /// Creates an empty store with custom configuration.
    ///
    /// The configuration is not validated here; invalid defaults surface as
    /// [`SearchError::InvalidArgument`] from the operations that use them. Use
    /// [`ExactSearch::try_with_config`] to reject them up front.
    #[must_use]
    pub fn with_config(embedder: M, config: SearchConfig) -> Self {
        let dimension = embedder.dim();
        Self {
            embedder: Arc::new(embedder),
            index: Arc::new(FlatIndex::new(dimension)),
            config,
        }
    }

    /// Creates an empty store after validating `config`.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidArgument`] if the configuration is inconsistent.
    pub fn try_with_config(embedder: M, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(embedder, config))
    }

    /// Builds a store and populates it from `texts`.
    ///
    /// # Errors
    /// Fails like [`ExactSearch::try_with_config`] and [`ExactSearch::add_texts`].
    pub async fn from_texts<I, S>(
        texts: I,
        embedder: M,
        metadatas: Option<Vec<Metadata>>,
        config: SearchConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let search = Self::try_with_config(embedder, config)?;
        search.add_texts(texts, metadatas).await?;
        Ok(search)
    }

    /// Embeds `texts` and appends them to the store in input order.
    ///
    /// All texts are embedded with one [`EmbeddingModel::embed_batch`] call. Nothing is committed
    /// unless every text embeds successfully with the right dimension.
    ///
    /// # Returns
    /// The ids assigned to the new records, ascending.
    ///
    /// # Errors
    /// - [`SearchError::InvalidArgument`] if `metadatas` does not have one entry per text.
    /// - [`SearchError::Embedding`] if the embedding model fails or returns the wrong number of
    ///   vectors.
    /// - [`SearchError::DimensionMismatch`] if a vector has the wrong length.
    pub async fn add_texts<I, S>(
        &self,
        texts: I,
        metadatas: Option<Vec<Metadata>>,
    ) -> Result<Vec<RecordId>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        let metadatas = match metadatas {
            Some(metadatas) if metadatas.len() != texts.len() => {
                return Err(SearchError::invalid(format!(
                    "got {} metadata entries for {} texts",
                    metadatas.len(),
                    texts.len()
                )));
            }
            Some(metadatas) => metadatas,
            None => vec![Metadata::new(); texts.len()],
        };
        self.embed_and_insert(texts, metadatas).await
    }

    /// Embeds ready-made documents and appends them to the store in input order.
    ///
    /// # Errors
    /// Fails like [`ExactSearch::add_texts`].
    pub async fn add_documents<I>(&self, documents: I) -> Result<Vec<RecordId>>
    where
        I: IntoIterator<Item = Document>,
    {
        let (texts, metadatas) = documents
            .into_iter()
            .map(|document| (document.text, document.metadata))
            .unzip();
        self.embed_and_insert(texts, metadatas).await
    }

    async fn embed_and_insert(
        &self,
        texts: Vec<String>,
        metadatas: Vec<Metadata>,
    ) -> Result<Vec<RecordId>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let vectors = self
            .embedder
            .embed_batch(&texts)
            .await
            .map_err(SearchError::Embedding)?;
        if vectors.len() != texts.len() {
            return Err(SearchError::Embedding(anyhow::anyhow!(
                "embedding model returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }

        let entries = texts
            .into_iter()
            .zip(metadatas)
            .zip(vectors)
            .map(|((text, metadata), vector)| (Document::with_metadata(text, metadata), vector))
            .collect();
        let ids = self.index.insert_batch(entries)?;

        tracing::debug!(count = ids.len(), first = ?ids.first(), "indexed texts");
        Ok(ids)
    }

    /// Embeds `query` and returns the `k` closest documents.
    ///
    /// `metric` falls back to the configured default when `None`.
    ///
    /// # Errors
    /// [`SearchError::Embedding`] if the query cannot be embedded, or
    /// [`SearchError::DimensionMismatch`] if the query vector has the wrong length.
    pub async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        metric: Option<Metric>,
    ) -> Result<Vec<Document>> {
        let vector = self.embed_query(query).await?;
        self.similarity_search_by_vector(&vector, k, metric)
    }

    /// Like [`ExactSearch::similarity_search`], but also returns raw metric scores.
    ///
    /// # Errors
    /// Fails like [`ExactSearch::similarity_search`].
    pub async fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
        metric: Option<Metric>,
    ) -> Result<Vec<SearchResult>> {
        let vector = self.embed_query(query).await?;
        self.similarity_search_by_vector_with_score(&vector, k, metric)
    }

    /// Returns the `k` documents closest to a precomputed vector, bypassing the embedder.
    ///
    /// # Errors
    /// [`SearchError::DimensionMismatch`] if `vector` has the wrong length.
    pub fn similarity_search_by_vector(
        &self,
        vector: &[f32],
        k: usize,
        metric: Option<Metric>,
    ) -> Result<Vec<Document>> {
        let hits = self.top_k(vector, k, metric)?;
        Ok(hits.iter().map(ScoredRecord::document).collect())
    }

    /// Like [`ExactSearch::similarity_search_by_vector`], but also returns raw metric scores.
    ///
    /// # Errors
    /// [`SearchError::DimensionMismatch`] if `vector` has the wrong length.
    pub fn similarity_search_by_vector_with_score(
        &self,
        vector: &[f32],
        k: usize,
        metric: Option<Metric>,
    ) -> Result<Vec<SearchResult>> {
        let hits = self.top_k(vector, k, metric)?;
        Ok(hits.into_iter().map(SearchResult::from).collect())
    }

    /// Embeds `query`, fetches the `fetch_k` closest records and reranks them with MMR down to
    /// `k` diverse documents, in selection order.
    ///
    /// `metric` and `lambda` fall back to the configured defaults when `None`.
    ///
    /// # Errors
    /// [`SearchError::InvalidArgument`] if `fetch_k < k` or `lambda` is outside `[0, 1]`;
    /// otherwise fails like [`ExactSearch::similarity_search`].
    pub async fn max_marginal_relevance_search(
        &self,
        query: &str,
        k: usize,
        fetch_k: usize,
        metric: Option<Metric>,
        lambda: Option<f64>,
    ) -> Result<Vec<Document>> {
        let lambda = self.check_mmr_arguments(k, fetch_k, lambda)?;
        let vector = self.embed_query(query).await?;
        self.rerank_by_vector(&vector, k, fetch_k, metric, lambda)
    }

    /// MMR search over a precomputed vector, bypassing the embedder.
    ///
    /// # Errors
    /// Fails like [`ExactSearch::max_marginal_relevance_search`].
    pub fn max_marginal_relevance_search_by_vector(
        &self,
        vector: &[f32],
        k: usize,
        fetch_k: usize,
        metric: Option<Metric>,
        lambda: Option<f64>,
    ) -> Result<Vec<Document>> {
        let lambda = self.check_mmr_arguments(k, fetch_k, lambda)?;
        self.rerank_by_vector(vector, k, fetch_k, metric, lambda)
    }

    /// Similarity search using the configured `default_k` and metric.
    ///
    /// # Errors
    /// Fails like [`ExactSearch::similarity_search_with_score`].
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.similarity_search_with_score(query, self.config.default_k, None)
            .await
    }

    /// MMR search using the configured `default_k`, `fetch_k`, metric and lambda.
    ///
    /// # Errors
    /// Fails like [`ExactSearch::max_marginal_relevance_search`].
    pub async fn mmr_search(&self, query: &str) -> Result<Vec<Document>> {
        self.max_marginal_relevance_search(
            query,
            self.config.default_k,
            self.config.fetch_k,
            None,
            None,
        )
        .await
    }

    /// Returns the number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the embedding dimension shared by every record.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    /// Returns every record in insertion order.
    #[must_use]
    pub fn records(&self) -> Vec<Arc<VectorRecord>> {
        self.index.records()
    }

    /// Returns a reference to the underlying index.
    #[must_use]
    pub fn index(&self) -> &FlatIndex {
        &self.index
    }

    /// Returns a reference to the embedder.
    #[must_use]
    pub fn embedder(&self) -> &M {
        &self.embedder
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        self.embedder
            .embed(query)
            .await
            .map_err(SearchError::Embedding)
    }

    fn top_k(&self, vector: &[f32], k: usize, metric: Option<Metric>) -> Result<Vec<ScoredRecord>> {
        let metric = metric.unwrap_or(self.config.metric);
        let hits = self.index.top_k(vector, k, metric)?;
        tracing::debug!(k, %metric, hits = hits.len(), "similarity search");
        Ok(hits)
    }

    fn check_mmr_arguments(&self, k: usize, fetch_k: usize, lambda: Option<f64>) -> Result<f64> {
        if fetch_k < k {
            return Err(SearchError::invalid(format!(
                "fetch_k ({fetch_k}) must be at least k ({k})"
            )));
        }
        let lambda = lambda.unwrap_or(self.config.lambda);
        validate_lambda(lambda)?;
        Ok(lambda)
    }

    fn rerank_by_vector(
        &self,
        vector: &[f32],
        k: usize,
        fetch_k: usize,
        metric: Option<Metric>,
        lambda: f64,
    ) -> Result<Vec<Document>> {
        let metric = metric.unwrap_or(self.config.metric);
        let candidates = self.top_k(vector, fetch_k, Some(metric))?;
        let pool = candidates.len();
        let selected = mmr::rerank(candidates, k, metric, lambda)?;
        tracing::debug!(k, fetch_k, pool, lambda, %metric, "mmr search");
        Ok(selected.iter().map(ScoredRecord::document).collect())
    }
}
