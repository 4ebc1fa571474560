//! Exact brute-force index over an append-only record list.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::{Result, SearchError};
use crate::metric::Metric;
use crate::types::{Document, RecordId, ScoredRecord, VectorRecord};

use super::{VectorIndex, select};

/// Internal state for the flat index.
#[derive(Default)]
struct IndexState {
    /// All stored records, in insertion (and therefore id) order.
    records: Vec<Arc<VectorRecord>>,
    /// Id handed to the next inserted record.
    next_id: u64,
}

/// Flat vector index answering every query with an exact full scan.
///
/// Records are append-only: ids increase monotonically, are never reused, and enumeration
/// order equals insertion order.
///
/// # Example
///
/// ```rust
/// use exactsearch_index::{Document, FlatIndex, Metric, VectorIndex};
///
/// let index = FlatIndex::new(2);
/// index.insert(Document::new("east"), vec![1.0, 0.0]).unwrap();
/// index.insert(Document::new("north"), vec![0.0, 1.0]).unwrap();
///
/// let hits = index.top_k(&[0.9, 0.1], 1, Metric::CosineSim).unwrap();
/// assert_eq!(hits[0].record.document.text, "east");
/// ```
pub struct FlatIndex {
    dimension: usize,
    state: RwLock<IndexState>,
}

impl std::fmt::Debug for FlatIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("FlatIndex")
            .field("dimension", &self.dimension)
            .field("len", &state.records.len())
            .finish()
    }
}

impl FlatIndex {
    /// Creates an empty index for vectors of the given dimension.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            state: RwLock::new(IndexState::default()),
        }
    }

    /// Rejects vectors of the wrong length or with NaN/infinite components.
    fn check_vector(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        match vector.iter().position(|value| !value.is_finite()) {
            Some(idx) => Err(SearchError::invalid(format!(
                "vector component {idx} is not finite ({})",
                vector[idx]
            ))),
            None => Ok(()),
        }
    }
}

impl VectorIndex for FlatIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.state.read().records.len()
    }

    fn insert_batch(&self, entries: Vec<(Document, Vec<f32>)>) -> Result<Vec<RecordId>> {
        for (_, vector) in &entries {
            self.check_vector(vector)?;
        }

        let mut state = self.state.write();
        let mut ids = Vec::with_capacity(entries.len());
        state.records.reserve(entries.len());

        for (document, vector) in entries {
            let id = RecordId(state.next_id);
            state.next_id += 1;
            state.records.push(Arc::new(VectorRecord {
                id,
                vector,
                document,
            }));
            ids.push(id);
        }

        tracing::debug!(
            inserted = ids.len(),
            total = state.records.len(),
            "appended records to flat index"
        );
        Ok(ids)
    }

    fn get(&self, id: RecordId) -> Option<Arc<VectorRecord>> {
        let state = self.state.read();
        state
            .records
            .binary_search_by_key(&id, |record| record.id)
            .ok()
            .map(|idx| Arc::clone(&state.records[idx]))
    }

    fn records(&self) -> Vec<Arc<VectorRecord>> {
        self.state.read().records.clone()
    }

    fn top_k(&self, query: &[f32], k: usize, metric: Metric) -> Result<Vec<ScoredRecord>> {
        self.check_vector(query)?;
        let state = self.state.read();
        select::top_k(&state.records, query, k, metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_search() {
        let index = FlatIndex::new(4);

        index
            .insert(Document::new("hello"), vec![1.0, 0.0, 0.0, 0.0])
            .unwrap();
        index
            .insert(Document::new("world"), vec![0.0, 1.0, 0.0, 0.0])
            .unwrap();

        assert_eq!(index.len(), 2);

        let results = index
            .top_k(&[1.0, 0.0, 0.0, 0.0], 1, Metric::CosineSim)
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.document.text, "hello");
    }

    #[test]
    fn ids_are_ascending_and_distinct() {
        let index = FlatIndex::new(2);
        let first = index
            .insert_batch(vec![
                (Document::new("foo"), vec![1.0, 0.0]),
                (Document::new("bar"), vec![0.0, 1.0]),
            ])
            .unwrap();
        let second = index
            .insert(Document::new("baz"), vec![1.0, 1.0])
            .unwrap();

        assert_eq!(first, vec![RecordId(0), RecordId(1)]);
        assert_eq!(second, RecordId(2));

        let texts: Vec<_> = index
            .records()
            .iter()
            .map(|record| record.document.text.clone())
            .collect();
        assert_eq!(texts, vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn dimension_mismatch_leaves_index_unchanged() {
        let index = FlatIndex::new(4);
        index
            .insert(Document::new("hello"), vec![1.0, 0.0, 0.0, 0.0])
            .unwrap();

        let result = index.insert(Document::new("long"), vec![1.0; 5]);
        assert!(matches!(
            result,
            Err(SearchError::DimensionMismatch {
                expected: 4,
                actual: 5
            })
        ));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn batch_insert_is_all_or_nothing() {
        let index = FlatIndex::new(2);
        let result = index.insert_batch(vec![
            (Document::new("ok"), vec![1.0, 0.0]),
            (Document::new("bad"), vec![1.0]),
        ]);

        assert!(result.is_err());
        assert!(index.is_empty());

        // A failed batch does not consume ids.
        let id = index.insert(Document::new("ok"), vec![1.0, 0.0]).unwrap();
        assert_eq!(id, RecordId(0));
    }

    #[test]
    fn query_dimension_is_checked() {
        let index = FlatIndex::new(3);
        let result = index.top_k(&[1.0, 0.0], 1, Metric::EuclideanDist);
        assert!(matches!(result, Err(SearchError::DimensionMismatch { .. })));
    }

    #[test]
    fn non_finite_vectors_are_rejected() {
        let index = FlatIndex::new(2);
        index.insert(Document::new("good"), vec![1.0, 0.0]).unwrap();

        let result = index.insert_batch(vec![
            (Document::new("fine"), vec![0.0, 1.0]),
            (Document::new("nan"), vec![f32::NAN, 0.0]),
        ]);
        assert!(matches!(result, Err(SearchError::InvalidArgument(_))));
        let result = index.insert(Document::new("inf"), vec![0.0, f32::INFINITY]);
        assert!(matches!(result, Err(SearchError::InvalidArgument(_))));
        assert_eq!(index.len(), 1);

        for metric in Metric::ALL {
            let hits = index.top_k(&[1.0, 0.0], 1, metric).unwrap();
            assert_eq!(hits[0].record.document.text, "good", "{metric}");

            let result = index.top_k(&[f32::NAN, 0.0], 1, metric);
            assert!(matches!(result, Err(SearchError::InvalidArgument(_))), "{metric}");
        }
    }

    #[test]
    fn empty_index_returns_no_hits() {
        let index = FlatIndex::new(3);
        for metric in Metric::ALL {
            assert!(index.top_k(&[1.0, 0.0, 0.0], 5, metric).unwrap().is_empty());
        }
    }

    #[test]
    fn get_by_id() {
        let index = FlatIndex::new(2);
        let id = index.insert(Document::new("foo"), vec![1.0, 0.0]).unwrap();

        assert_eq!(index.get(id).unwrap().document.text, "foo");
        assert!(index.get(RecordId(42)).is_none());
    }
}
