//! Core types for the search engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Key/value metadata attached to documents.
///
/// Values may be any JSON scalar or structure, e.g. `{"page": 3}`.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// A document as seen by callers: text plus metadata.
///
/// Two documents are equal iff their text and metadata are equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Raw text content.
    pub text: String,
    /// Arbitrary metadata for filtering/citations.
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Document {
    /// Creates a new document with empty metadata.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Creates a new document with metadata.
    #[must_use]
    pub fn with_metadata(text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// Identifier assigned to a record at insertion.
///
/// Ids increase monotonically in insertion order and are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An indexed document together with its embedding vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Identifier assigned by the store.
    pub id: RecordId,
    /// The embedding vector.
    pub vector: Vec<f32>,
    /// The document the vector was computed from.
    pub document: Document,
}

/// A stored record paired with its score against a query.
#[derive(Clone, Debug)]
pub struct ScoredRecord {
    /// The matching record, shared with the store.
    pub record: Arc<VectorRecord>,
    /// Raw metric score (similarity or distance, depending on the metric).
    pub score: f64,
}

impl ScoredRecord {
    /// Returns a copy of the record's document.
    #[must_use]
    pub fn document(&self) -> Document {
        self.record.document.clone()
    }
}

/// A search result containing a document and its score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matching document.
    pub document: Document,
    /// Raw metric score: higher is better for cosine similarity, lower is better for distances.
    pub score: f64,
}

impl From<ScoredRecord> for SearchResult {
    fn from(hit: ScoredRecord) -> Self {
        Self {
            document: hit.document(),
            score: hit.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn documents_compare_structurally() {
        let mut metadata = Metadata::new();
        metadata.insert("page".into(), json!(1));

        assert_eq!(Document::new("foo"), Document::new("foo"));
        assert_ne!(
            Document::new("foo"),
            Document::with_metadata("foo", metadata.clone())
        );
        assert_eq!(
            Document::with_metadata("foo", metadata.clone()),
            Document::with_metadata("foo", metadata)
        );
    }

    #[test]
    fn document_serde_skips_empty_metadata() {
        let encoded = serde_json::to_value(Document::new("foo")).unwrap();
        assert_eq!(encoded, json!({ "text": "foo" }));

        let decoded: Document = serde_json::from_value(json!({ "text": "bar" })).unwrap();
        assert_eq!(decoded, Document::new("bar"));
    }

    #[test]
    fn record_ids_order_by_insertion() {
        assert!(RecordId(0) < RecordId(1));
        assert_eq!(RecordId(7).to_string(), "#7");
    }
}
