//! # Embedding Module
//!
//! Embeddings are dense vector representations of text that capture semantic meaning. Similar
//! texts produce similar vectors, which is what makes nearest-neighbour search over them useful.
//!
//! The search engine treats embedding generation as an external capability: it asks for one
//! vector per query and one vector per document, and relies on two guarantees:
//!
//! - **Fixed dimension**: every vector produced by one model instance has length [`dim`].
//! - **Determinism**: identical input within a session yields an identical vector.
//!
//! Retry policy, rate limiting and batching strategy all belong to the provider.
//!
//! ```rust
//! use exactsearch_core::EmbeddingModel;
//!
//! async fn example<T: EmbeddingModel>(model: &T) -> exactsearch_core::Result<()> {
//!     let dim = model.dim();
//!     let embedding = model.embed("Hello, world!").await?;
//!     assert_eq!(embedding.len(), dim);
//!     Ok(())
//! }
//! ```
//!
//! [`dim`]: EmbeddingModel::dim

use alloc::{string::String, vec::Vec};
use core::future::Future;

/// A type alias for an embedding vector of 32-bit floats.
pub type Embedding = Vec<f32>;

/// Converts text to vector representations.
///
/// # Implementation Requirements
///
/// - [`embed`](EmbeddingModel::embed) must return vectors with length equal to
///   [`dim`](EmbeddingModel::dim)
/// - [`embed_batch`](EmbeddingModel::embed_batch) must return exactly one vector per input, in
///   input order
///
/// # Example
///
/// ```rust
/// use exactsearch_core::EmbeddingModel;
///
/// struct ConstantEmbedding;
///
/// impl EmbeddingModel for ConstantEmbedding {
///     fn dim(&self) -> usize {
///         3
///     }
///
///     async fn embed(&self, _text: &str) -> exactsearch_core::Result<Vec<f32>> {
///         Ok(vec![1.0; self.dim()])
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let model = ConstantEmbedding;
/// let embedding = model.embed("The quick brown fox").await.unwrap();
/// assert_eq!(embedding.len(), 3);
/// # });
/// ```
pub trait EmbeddingModel: Send + Sync + Sized {
    /// Returns the embedding vector dimension.
    fn dim(&self) -> usize;

    /// Converts a single text (usually a query) to an embedding vector.
    fn embed(&self, text: &str) -> impl Future<Output = crate::Result<Embedding>> + Send;

    /// Converts a batch of documents to embedding vectors, one per input and in the same order.
    ///
    /// The default implementation calls [`embed`](EmbeddingModel::embed) once per text and stops
    /// at the first failure. Providers with a native batch endpoint should override it.
    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = crate::Result<Vec<Embedding>>> + Send {
        async move {
            let mut embeddings = Vec::with_capacity(texts.len());
            for text in texts {
                embeddings.push(self.embed(text).await?);
            }
            Ok(embeddings)
        }
    }
}
