//! End-to-end run with a `tracing` subscriber installed.
//!
//! Run with `RUST_LOG=exactsearch_index=trace` to see insert, search and MMR events.

use exactsearch_core::EmbeddingModel;
use exactsearch_index::{Document, ExactSearch, Metric, SearchConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Maps each text to a point on the unit circle by its first byte.
struct Compass;

impl EmbeddingModel for Compass {
    fn dim(&self) -> usize {
        2
    }

    async fn embed(&self, text: &str) -> exactsearch_core::Result<Vec<f32>> {
        let vector = match text.as_bytes().first() {
            Some(b'n') => vec![0.0, 1.0],
            Some(b'e') => vec![1.0, 0.0],
            Some(b's') => vec![0.0, -1.0],
            Some(b'w') => vec![-1.0, 0.0],
            _ => anyhow::bail!("no bearing for {text:?}"),
        };
        Ok(vector)
    }
}

#[tokio::test]
async fn logged_end_to_end() -> anyhow::Result<()> {
    init_tracing();

    let config = SearchConfig::builder()
        .metric(Metric::EuclideanDist)
        .default_k(2)
        .fetch_k(4)
        .build();
    let search =
        ExactSearch::from_texts(["north", "east", "south", "west"], Compass, None, config).await?;

    let nearest = search.similarity_search("northwest", 1, None).await?;
    assert_eq!(nearest, vec![Document::new("north")]);

    let scored = search.search("east").await?;
    assert_eq!(scored[0].document, Document::new("east"));
    assert!(scored[0].score.abs() < 1e-6);

    let diverse = search.mmr_search("north").await?;
    assert_eq!(diverse.len(), 2);
    assert_eq!(diverse[0], Document::new("north"));

    assert!(search.add_texts(["up"], None).await.is_err());
    assert_eq!(search.len(), 4);
    Ok(())
}
