//! Exact top-k selection over a slice of records.

use std::cmp::Ordering;
use std::sync::Arc;

use rayon::prelude::*;

use crate::error::Result;
use crate::metric::Metric;
use crate::types::{ScoredRecord, VectorRecord};

/// Scores every record against `query` and returns the best `k`, best first.
///
/// Equal scores keep ascending id order. Returns an empty vector when `k == 0` or `records` is
/// empty.
///
/// # Errors
/// Returns [`SearchError::DimensionMismatch`](crate::SearchError::DimensionMismatch) if a record
/// vector differs in length from `query`.
pub fn top_k(
    records: &[Arc<VectorRecord>],
    query: &[f32],
    k: usize,
    metric: Metric,
) -> Result<Vec<ScoredRecord>> {
    if records.is_empty() || k == 0 {
        return Ok(Vec::new());
    }

    let mut scored = records
        .par_iter()
        .map(|record| {
            Ok(ScoredRecord {
                score: metric.score(query, &record.vector)?,
                record: Arc::clone(record),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let by_rank = |a: &ScoredRecord, b: &ScoredRecord| -> Ordering {
        metric
            .rank(a.score, b.score)
            .then_with(|| a.record.id.cmp(&b.record.id))
    };

    if k < scored.len() {
        scored.select_nth_unstable_by(k, by_rank);
        scored.truncate(k);
    }
    scored.par_sort_unstable_by(by_rank);
    Ok(scored)
}
