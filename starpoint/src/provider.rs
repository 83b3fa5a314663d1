//! External embedding provider trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One embedding returned by a provider, tagged with the position of its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedEmbedding {
    pub embedding: Vec<f32>,
    /// Index of the input text this embedding belongs to.
    pub index: usize,
}

/// A provider that generates embeddings outside of Starpoint (OpenAI, or a
/// test double).
///
/// Providers may return embeddings in any order; callers sort by
/// [`IndexedEmbedding::index`].
///
/// # Example
///
/// ```rust,ignore
/// use starpoint::EmbeddingProvider;
///
/// let provider = MyEmbeddingProvider::new();
/// let data = provider
///     .create_embedding("text-embedding-ada-002", &["hello".into()], None)
///     .await?;
/// assert_eq!(data[0].index, 0);
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed every string in `input` with `model`.
    ///
    /// `user` is an optional end-user identifier forwarded to the provider.
    async fn create_embedding(
        &self,
        model: &str,
        input: &[String],
        user: Option<&str>,
    ) -> Result<Vec<IndexedEmbedding>>;

    /// A short name used in logs and errors.
    fn name(&self) -> &str;
}
