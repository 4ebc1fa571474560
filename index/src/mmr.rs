//! Max Marginal Relevance reranking.
//!
//! Given a candidate pool already ranked by relevance, MMR greedily picks the candidate that
//! maximizes
//!
//! ```text
//! lambda * relevance(c) - (1 - lambda) * max(similarity(c, s) for s in selected)
//! ```
//!
//! so that later picks trade a little relevance for less redundancy with earlier picks.
//! `lambda = 1` reproduces plain relevance order; `lambda = 0` maximizes diversity.

use ordered_float::OrderedFloat;

use crate::error::{Result, SearchError};
use crate::metric::Metric;
use crate::types::ScoredRecord;

/// Default trade-off between relevance and diversity.
pub const DEFAULT_LAMBDA: f64 = 0.5;

struct Candidate {
    hit: ScoredRecord,
    relevance: f64,
    /// Highest similarity to any selected record; `None` while nothing is selected.
    redundancy: Option<f64>,
}

impl Candidate {
    fn mmr_score(&self, lambda: f64) -> f64 {
        lambda * self.relevance - (1.0 - lambda) * self.redundancy.unwrap_or(0.0)
    }
}

/// Checks that `lambda` lies in `[0, 1]`.
///
/// # Errors
/// Returns [`SearchError::InvalidArgument`] otherwise (including NaN).
pub fn validate_lambda(lambda: f64) -> Result<()> {
    if (0.0..=1.0).contains(&lambda) {
        Ok(())
    } else {
        Err(SearchError::invalid(format!(
            "lambda must be within [0, 1], got {lambda}"
        )))
    }
}

/// Reranks `candidates` with MMR and returns up to `k` of them in selection order.
///
/// Relevance is the metric score in its similarity sense ([`Metric::relevance`]), and redundancy
/// uses [`Metric::similarity`] between candidate vectors. Exact ties go to the candidate with the
/// better original relevance rank, then the lower record id. Each returned hit keeps its original
/// metric score.
///
/// # Errors
/// Returns [`SearchError::InvalidArgument`] if `lambda` is outside `[0, 1]`, and
/// [`SearchError::DimensionMismatch`] if candidate vectors differ in length.
pub fn rerank(
    candidates: Vec<ScoredRecord>,
    k: usize,
    metric: Metric,
    lambda: f64,
) -> Result<Vec<ScoredRecord>> {
    validate_lambda(lambda)?;

    let mut remaining: Vec<Candidate> = candidates
        .into_iter()
        .map(|hit| Candidate {
            relevance: metric.relevance(hit.score),
            redundancy: None,
            hit,
        })
        .collect();
    remaining.sort_by(|a, b| {
        OrderedFloat(b.relevance)
            .cmp(&OrderedFloat(a.relevance))
            .then_with(|| a.hit.record.id.cmp(&b.hit.record.id))
    });

    let target = k.min(remaining.len());
    let mut selected = Vec::with_capacity(target);

    while selected.len() < target {
        let mut best: Option<(usize, f64)> = None;
        for (idx, candidate) in remaining.iter().enumerate() {
            let score = candidate.mmr_score(lambda);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((idx, score));
            }
        }
        let Some((idx, mmr_score)) = best else {
            break;
        };

        let chosen = remaining.remove(idx);
        for candidate in &mut remaining {
            let similarity =
                metric.similarity(&candidate.hit.record.vector, &chosen.hit.record.vector)?;
            candidate.redundancy = Some(
                candidate
                    .redundancy
                    .map_or(similarity, |current| current.max(similarity)),
            );
        }

        tracing::trace!(
            id = %chosen.hit.record.id,
            rank = selected.len(),
            mmr_score,
            "mmr selected record"
        );
        selected.push(chosen.hit);
    }

    Ok(selected)
}
