//! Vector comparison metrics.
//!
//! Every [`Metric`] pairs a scoring function with a ranking direction, so ranking code can ask
//! "is this score better?" without caring whether the metric measures similarity or distance.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Which way scores rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Larger scores are better (similarities).
    HigherIsBetter,
    /// Smaller scores are better (distances).
    LowerIsBetter,
}

/// Metric used to compare a query vector with stored vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Cosine similarity in `[-1, 1]`; 1.0 means identical direction.
    #[default]
    #[serde(rename = "cosine_sim")]
    CosineSim,
    /// Euclidean (L2) distance; 0.0 means identical vectors.
    #[serde(rename = "euclidean_dist")]
    EuclideanDist,
    /// Squared Euclidean distance. Ranks exactly like [`Metric::EuclideanDist`] without the
    /// square root.
    #[serde(rename = "sqeuclidean_dist")]
    SqEuclideanDist,
}

impl Metric {
    /// Every supported metric.
    pub const ALL: [Self; 3] = [Self::CosineSim, Self::EuclideanDist, Self::SqEuclideanDist];

    /// Canonical name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CosineSim => "cosine_sim",
            Self::EuclideanDist => "euclidean_dist",
            Self::SqEuclideanDist => "sqeuclidean_dist",
        }
    }

    /// Ranking direction of raw scores.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::CosineSim => Direction::HigherIsBetter,
            Self::EuclideanDist | Self::SqEuclideanDist => Direction::LowerIsBetter,
        }
    }

    /// Score of a vector compared with itself.
    #[must_use]
    pub const fn best_score(self) -> f64 {
        match self {
            Self::CosineSim => 1.0,
            Self::EuclideanDist | Self::SqEuclideanDist => 0.0,
        }
    }

    /// Computes the raw score between two vectors.
    ///
    /// # Errors
    /// Returns [`SearchError::DimensionMismatch`] if the vectors differ in length.
    pub fn score(self, a: &[f32], b: &[f32]) -> Result<f64> {
        if a.len() != b.len() {
            return Err(SearchError::DimensionMismatch {
                expected: a.len(),
                actual: b.len(),
            });
        }
        Ok(match self {
            Self::CosineSim => cosine_similarity(a, b),
            Self::EuclideanDist => squared_euclidean(a, b).sqrt(),
            Self::SqEuclideanDist => squared_euclidean(a, b),
        })
    }

    /// Returns `true` if score `x` ranks strictly ahead of score `y`.
    #[must_use]
    pub fn is_better(self, x: f64, y: f64) -> bool {
        self.rank(x, y) == Ordering::Less
    }

    /// Orders two scores best-first, suitable for `sort_by`.
    #[must_use]
    pub fn rank(self, x: f64, y: f64) -> Ordering {
        let (x, y) = (OrderedFloat(x), OrderedFloat(y));
        match self.direction() {
            Direction::HigherIsBetter => y.cmp(&x),
            Direction::LowerIsBetter => x.cmp(&y),
        }
    }

    /// Maps a raw score to its similarity sense, where larger always means more relevant.
    ///
    /// Distances are negated, which keeps the ranking and the scale of the metric.
    #[must_use]
    pub fn relevance(self, score: f64) -> f64 {
        match self.direction() {
            Direction::HigherIsBetter => score,
            Direction::LowerIsBetter => -score,
        }
    }

    /// Similarity between two vectors in the sense of [`Metric::relevance`].
    ///
    /// # Errors
    /// Returns [`SearchError::DimensionMismatch`] if the vectors differ in length.
    pub fn similarity(self, a: &[f32], b: &[f32]) -> Result<f64> {
        self.score(a, b).map(|score| self.relevance(score))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = SearchError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.name() == name)
            .ok_or_else(|| {
                SearchError::invalid(format!(
                    "unknown metric `{name}`, expected one of cosine_sim, euclidean_dist, sqeuclidean_dist"
                ))
            })
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&lhs, &rhs) in a.iter().zip(b) {
        let (lhs, rhs) = (f64::from(lhs), f64::from(rhs));
        dot += lhs * rhs;
        norm_a += lhs * lhs;
        norm_b += rhs * rhs;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

fn squared_euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&lhs, &rhs)| {
            let diff = f64::from(lhs) - f64::from(rhs);
            diff * diff
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn cosine_similarity_handles_zero_norms() {
        let score = Metric::CosineSim.score(&[0.0, 0.0], &[1.0, 0.0]).unwrap();
        assert!(score.abs() < TOLERANCE);
        let score = Metric::CosineSim.score(&[0.0, 0.0], &[0.0, 0.0]).unwrap();
        assert!(score.abs() < TOLERANCE);
    }

    #[test]
    fn cosine_similarity_values() {
        let same = Metric::CosineSim.score(&[1.0, 2.0], &[2.0, 4.0]).unwrap();
        assert!((same - 1.0).abs() < TOLERANCE);

        let orthogonal = Metric::CosineSim.score(&[1.0, 0.0], &[0.0, 3.0]).unwrap();
        assert!(orthogonal.abs() < TOLERANCE);

        let opposite = Metric::CosineSim.score(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((opposite + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn euclidean_values() {
        let a = [0.0, 0.0];
        let b = [3.0, 4.0];
        let dist = Metric::EuclideanDist.score(&a, &b).unwrap();
        let sq = Metric::SqEuclideanDist.score(&a, &b).unwrap();
        assert!((dist - 5.0).abs() < TOLERANCE);
        assert!((sq - 25.0).abs() < TOLERANCE);
    }

    #[test]
    fn self_comparison_yields_best_score() {
        let v = [0.3, -1.5, 2.25, 8.0];
        for metric in Metric::ALL {
            let score = metric.score(&v, &v).unwrap();
            assert!(
                (score - metric.best_score()).abs() < 1e-6,
                "{metric}: {score}"
            );
        }
    }

    #[test]
    fn dimension_mismatch() {
        for metric in Metric::ALL {
            let err = metric.score(&[1.0, 2.0], &[1.0]).unwrap_err();
            assert!(matches!(
                err,
                SearchError::DimensionMismatch {
                    expected: 2,
                    actual: 1
                }
            ));
        }
    }

    #[test]
    fn ranking_direction() {
        assert!(Metric::CosineSim.is_better(0.9, 0.1));
        assert!(!Metric::CosineSim.is_better(0.1, 0.9));
        assert!(Metric::EuclideanDist.is_better(0.1, 0.9));
        assert!(Metric::SqEuclideanDist.is_better(0.1, 0.9));
        assert!(!Metric::EuclideanDist.is_better(0.5, 0.5));

        let mut scores = vec![0.5, 2.0, 0.1];
        scores.sort_by(|a, b| Metric::CosineSim.rank(*a, *b));
        assert_eq!(scores, vec![2.0, 0.5, 0.1]);
        scores.sort_by(|a, b| Metric::EuclideanDist.rank(*a, *b));
        assert_eq!(scores, vec![0.1, 0.5, 2.0]);
    }

    #[test]
    fn relevance_is_larger_for_better_scores() {
        for metric in Metric::ALL {
            let (good, bad) = match metric.direction() {
                Direction::HigherIsBetter => (0.9, 0.2),
                Direction::LowerIsBetter => (0.2, 0.9),
            };
            assert!(metric.relevance(good) > metric.relevance(bad));
        }
    }

    #[test]
    fn names_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(metric.to_string().parse::<Metric>().unwrap(), metric);
            let json = serde_json::to_string(&metric).unwrap();
            assert_eq!(json, format!("\"{}\"", metric.name()));
            assert_eq!(serde_json::from_str::<Metric>(&json).unwrap(), metric);
        }
    }

    #[test]
    fn unknown_metric_name_is_rejected() {
        let err = "manhattan".parse::<Metric>().unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
        assert_eq!(Metric::default(), Metric::CosineSim);
    }
}
