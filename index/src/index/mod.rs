//! Vector index implementations.
//!
//! This module provides the [`VectorIndex`] trait and the [`FlatIndex`] implementation, which
//! answers every query with an exact full scan. An approximate index would plug in behind the
//! same trait.

mod flat;
pub mod select;

pub use flat::FlatIndex;

use std::sync::Arc;

use crate::error::{Result, SearchError};
use crate::metric::Metric;
use crate::types::{Document, RecordId, ScoredRecord, VectorRecord};

/// Trait for vector index implementations.
///
/// An index owns records, assigns their ids and answers top-k queries. It only grows.
pub trait VectorIndex: Send + Sync {
    /// Returns the embedding dimension shared by every record.
    fn dimension(&self) -> usize;

    /// Returns the number of indexed records.
    fn len(&self) -> usize;

    /// Returns `true` if the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a single record and returns its id.
    fn insert(&self, document: Document, vector: Vec<f32>) -> Result<RecordId> {
        self.insert_batch(vec![(document, vector)])?
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::invalid("index assigned no id to the inserted record"))
    }

    /// Appends records in order and returns their ids.
    ///
    /// Either every entry is committed or, on error, none is.
    fn insert_batch(&self, entries: Vec<(Document, Vec<f32>)>) -> Result<Vec<RecordId>>;

    /// Looks up a record by id.
    fn get(&self, id: RecordId) -> Option<Arc<VectorRecord>>;

    /// Returns every record in insertion order.
    fn records(&self) -> Vec<Arc<VectorRecord>>;

    /// Returns the `k` records ranking best against `query` under `metric`, best first.
    ///
    /// # Arguments
    /// * `query` - The query embedding vector
    /// * `k` - Maximum number of results to return
    /// * `metric` - Metric used for scoring and ranking
    fn top_k(&self, query: &[f32], k: usize, metric: Metric) -> Result<Vec<ScoredRecord>>;
}
