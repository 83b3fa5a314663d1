//! Client-side request validation.
//!
//! Every check is synchronous and side-effect free. Endpoints run these before
//! building a request, so an invalid request never reaches the network.

use crate::document::{CollectionRef, Document, UpdateDocument};
use crate::embedding::EmbeddingModel;
use crate::error::ValidationError;
use crate::request::{CreateCollectionRequest, DeleteCollectionRequest};

type Result<T> = std::result::Result<T, ValidationError>;

/// Check that exactly one non-empty collection identifier is present.
pub fn validate_collection_reference(collection: &CollectionRef) -> Result<()> {
    match (collection.collection_id.as_deref(), collection.collection_name.as_deref()) {
        (Some(_), Some(_)) => Err(ValidationError::TooManyIdentifiers),
        (None, None) => Err(ValidationError::MissingCollectionIdentifier),
        (Some(id), None) if id.is_empty() => Err(ValidationError::EmptyCollectionId),
        (None, Some(name)) if name.is_empty() => Err(ValidationError::EmptyCollectionName),
        _ => Ok(()),
    }
}

/// Check that documents are present and each carries an embedding.
pub fn validate_documents_for_insert(documents: &[Document]) -> Result<()> {
    if documents.is_empty() {
        return Err(ValidationError::MissingDocuments);
    }
    if documents.iter().any(|doc| doc.embedding.is_empty()) {
        return Err(ValidationError::MissingEmbedding);
    }
    Ok(())
}

/// Check that documents are present and each has an id and non-empty metadata.
pub fn validate_documents_for_update(documents: &[UpdateDocument]) -> Result<()> {
    if documents.is_empty() {
        return Err(ValidationError::MissingDocuments);
    }
    for doc in documents {
        if doc.id.is_empty() {
            return Err(ValidationError::MissingDocumentId);
        }
        if doc.metadata.as_ref().is_none_or(|m| m.is_empty()) {
            return Err(ValidationError::MissingMetadata);
        }
    }
    Ok(())
}

pub fn validate_delete_ids(ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        return Err(ValidationError::MissingDeleteIds);
    }
    Ok(())
}

pub fn validate_create_collection(request: &CreateCollectionRequest) -> Result<()> {
    if request.name.is_empty() {
        return Err(ValidationError::MissingCollectionName);
    }
    match request.dimensionality {
        None => Err(ValidationError::MissingDimensionality),
        Some(d) if d <= 0 => Err(ValidationError::NonPositiveDimensionality),
        Some(_) => Ok(()),
    }
}

pub fn validate_delete_collection(request: &DeleteCollectionRequest) -> Result<()> {
    if request.collection_id.is_empty() {
        return Err(ValidationError::MissingCollectionId);
    }
    Ok(())
}

/// Resolve `model` to a supported [`EmbeddingModel`].
pub fn validate_embedding_model(model: &str) -> Result<EmbeddingModel> {
    model.parse()
}

pub fn validate_embed_input<T>(input: &[T]) -> Result<()> {
    if input.is_empty() {
        return Err(ValidationError::MissingEmbedInput);
    }
    Ok(())
}
