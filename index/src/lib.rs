//! In-memory exact vector similarity search.
//!
//! The [`ExactSearch`] type glues any [`EmbeddingModel`](exactsearch_core::EmbeddingModel) to a
//! [`FlatIndex`] that scores every stored vector on every query, so results are the true top-k
//! rather than an approximation. The API surface is small:
//!
//! - [`ExactSearch::add_texts`] – embed and append documents.
//! - [`ExactSearch::similarity_search`] – embed a query and fetch the closest documents.
//! - [`ExactSearch::max_marginal_relevance_search`] – the same, reranked for diversity.
//!
//! Three [`Metric`]s are supported: cosine similarity, Euclidean distance and squared Euclidean
//! distance. Ranking code only ever asks a metric which of two scores is better, so distance and
//! similarity metrics share every code path.
//!
//! # Example
//!
//! ```rust
//! use exactsearch_core::EmbeddingModel;
//! use exactsearch_index::{ExactSearch, Metric};
//!
//! struct AxisEmbedding;
//!
//! impl EmbeddingModel for AxisEmbedding {
//!     fn dim(&self) -> usize {
//!         2
//!     }
//!
//!     async fn embed(&self, text: &str) -> exactsearch_core::Result<Vec<f32>> {
//!         Ok(if text.starts_with('x') { vec![1.0, 0.0] } else { vec![0.0, 1.0] })
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let search = ExactSearch::new(AxisEmbedding);
//! search.add_texts(["xylophone", "yak"], None).await.unwrap();
//!
//! let hits = search
//!     .similarity_search_with_score("xenon", 1, Some(Metric::CosineSim))
//!     .await
//!     .unwrap();
//! assert_eq!(hits[0].document.text, "xylophone");
//! assert!((hits[0].score - 1.0).abs() < 1e-6);
//! # });
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod metric;
pub mod mmr;
pub mod search;
pub mod types;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{Result, SearchError};
pub use index::{FlatIndex, VectorIndex};
pub use metric::{Direction, Metric};
pub use search::ExactSearch;
pub use types::{Document, Metadata, RecordId, ScoredRecord, SearchResult, VectorRecord};
