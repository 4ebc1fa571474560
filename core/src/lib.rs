//! # exactsearch-core
//!
//! `exactsearch-core` hosts the no-std trait APIs that the search engine consumes but does not
//! implement. The engine never produces embeddings itself: any provider (a remote API, a local
//! ONNX model, a deterministic fake for tests) plugs in by implementing [`EmbeddingModel`].
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Your App      │───▶│   exactsearch    │───▶│   Providers     │
//! │                 │    │                  │    │                 │
//! │ - Search        │    │ - ExactSearch    │    │ - remote APIs   │
//! │ - RAG context   │    │ - Metric / MMR   │    │ - local models  │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//!                                 │
//!                                 ▼
//!                        EmbeddingModel (this crate)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use exactsearch_core::EmbeddingModel;
//!
//! async fn embed_all(
//!     model: impl EmbeddingModel,
//!     documents: &[String],
//! ) -> exactsearch_core::Result<usize> {
//!     let vectors = model.embed_batch(documents).await?;
//!     Ok(vectors.len())
//! }
//! ```

#![no_std]
extern crate alloc;

/// Text embeddings.
pub mod embedding;

#[doc(inline)]
pub use embedding::{Embedding, EmbeddingModel};

/// Result type used by embedding providers.
///
/// Type alias for [`anyhow::Result<T>`](anyhow::Result).
pub type Result<T> = anyhow::Result<T>;

pub use anyhow::Error;
