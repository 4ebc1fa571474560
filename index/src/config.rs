//! Configuration for the search facade.

use crate::error::{Result, SearchError};
use crate::metric::Metric;
use crate::mmr::{DEFAULT_LAMBDA, validate_lambda};

/// Facade-wide defaults, fixed at construction and overridable per call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Metric used when a query does not name one.
    pub metric: Metric,
    /// Number of results returned by [`ExactSearch::search`](crate::ExactSearch::search).
    pub default_k: usize,
    /// Candidate pool size used by [`ExactSearch::mmr_search`](crate::ExactSearch::mmr_search).
    pub fetch_k: usize,
    /// MMR trade-off between relevance (1.0) and diversity (0.0).
    pub lambda: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            metric: Metric::CosineSim,
            default_k: 4,
            fetch_k: 20,
            lambda: DEFAULT_LAMBDA,
        }
    }
}

impl SearchConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom configuration.
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
    }

    /// Checks that the defaults are usable together.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidArgument`] if `lambda` is outside `[0, 1]` or
    /// `fetch_k < default_k`.
    pub fn validate(&self) -> Result<()> {
        validate_lambda(self.lambda)?;
        if self.fetch_k < self.default_k {
            return Err(SearchError::invalid(format!(
                "fetch_k ({}) must be at least default_k ({})",
                self.fetch_k, self.default_k
            )));
        }
        Ok(())
    }
}

/// Builder for [`SearchConfig`].
#[derive(Debug, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Creates a new configuration builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Sets the default metric.
    #[must_use]
    pub const fn metric(mut self, metric: Metric) -> Self {
        self.config.metric = metric;
        self
    }

    /// Sets the default number of results to return.
    #[must_use]
    pub const fn default_k(mut self, k: usize) -> Self {
        self.config.default_k = k;
        self
    }

    /// Sets the default MMR candidate pool size.
    #[must_use]
    pub const fn fetch_k(mut self, fetch_k: usize) -> Self {
        self.config.fetch_k = fetch_k;
        self
    }

    /// Sets the default MMR lambda.
    #[must_use]
    pub const fn lambda(mut self, lambda: f64) -> Self {
        self.config.lambda = lambda;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> SearchConfig {
        self.config
    }
}
