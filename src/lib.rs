//! # exactsearch
//!
//! High level façade crate that re-exports everything from [`exactsearch_core`] and
//! [`exactsearch_index`]. Pull this crate into your binary to index embedded documents in memory
//! and query them exactly, with the metric of your choice and optional diversity reranking.
//!
//! ## What's inside?
//!
//! - [`EmbeddingModel`] — the capability you implement (or wrap) to turn text into vectors.
//! - [`ExactSearch`] — the store: `add_texts`, `similarity_search*`,
//!   `max_marginal_relevance_search*`.
//! - [`Metric`] — cosine similarity, Euclidean distance, squared Euclidean distance.
//!
//! ## Example
//!
//! ```rust
//! use exactsearch::{EmbeddingModel, ExactSearch, Metric, SearchConfig};
//!
//! struct Letters;
//!
//! impl EmbeddingModel for Letters {
//!     fn dim(&self) -> usize {
//!         3
//!     }
//!
//!     async fn embed(&self, text: &str) -> exactsearch::Result<Vec<f32>> {
//!         let count = |c: char| text.matches(c).count() as f32;
//!         Ok(vec![count('a'), count('b'), count('c')])
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let config = SearchConfig::builder().metric(Metric::SqEuclideanDist).build();
//! let search = ExactSearch::from_texts(["aaa", "bbb", "abc"], Letters, None, config)
//!     .await
//!     .unwrap();
//!
//! let docs = search.similarity_search("aaab", 1, None).await.unwrap();
//! assert_eq!(docs[0].text, "aaa");
//! # });
//! ```
//!
//! ## Modules
//!
//! - [`exactsearch_core::embedding`] — convert text to vectors.
//! - [`index`] — records, metrics, top-k selection, MMR and the [`ExactSearch`] facade.

pub use exactsearch_core::*;
#[doc(inline)]
pub use exactsearch_index::{
    Direction, Document, ExactSearch, FlatIndex, Metadata, Metric, RecordId, ScoredRecord,
    SearchConfig, SearchConfigBuilder, SearchError, SearchResult, VectorIndex, VectorRecord,
};

/// The search engine crate, re-exported whole.
pub use exactsearch_index as index;
