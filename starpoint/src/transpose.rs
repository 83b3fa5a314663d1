//! Columnar-to-row conversion for column inserts and updates.
//!
//! Columns are paired positionally and truncated to the shortest column.
//! Unmatched trailing entries are dropped with a warning, not an error.

use tracing::warn;

use crate::document::{Document, Metadata, UpdateDocument};

const LENGTH_MISMATCH_WARNING: &str = "column lengths differ; unmatched trailing entries are dropped";

/// Pair `embeddings[i]` with `metadata[i]` for `i < min(len)`.
pub fn transpose(embeddings: Vec<Vec<f32>>, metadata: Vec<Metadata>) -> Vec<Document> {
    if embeddings.len() != metadata.len() {
        warn!(
            embeddings = embeddings.len(),
            metadata = metadata.len(),
            "{LENGTH_MISMATCH_WARNING}"
        );
    }

    embeddings
        .into_iter()
        .zip(metadata)
        .map(|(embedding, metadata)| Document { embedding, metadata: Some(metadata) })
        .collect()
}

/// Zip ids, embeddings, and metadata into update documents, truncating to the
/// shortest column.
pub fn transpose_updates(
    ids: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    metadata: Vec<Metadata>,
) -> Vec<UpdateDocument> {
    if ids.len() != embeddings.len() || ids.len() != metadata.len() {
        warn!(
            ids = ids.len(),
            embeddings = embeddings.len(),
            metadata = metadata.len(),
            "{LENGTH_MISMATCH_WARNING}"
        );
    }

    ids.into_iter()
        .zip(embeddings)
        .zip(metadata)
        .map(|((id, embedding), metadata)| UpdateDocument {
            id,
            embedding: Some(embedding),
            metadata: Some(metadata),
        })
        .collect()
}
