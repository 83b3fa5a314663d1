//! # starpoint
//!
//! Rust client for the Starpoint vector database.
//!
//! ## Overview
//!
//! Starpoint is split into three HTTP services, each wrapped by a client in
//! this crate:
//!
//! - [`Writer`] - insert, update, and delete documents; create and delete collections
//! - [`Reader`] - SQL and similarity queries, schema inference
//! - [`EmbeddingClient`] - embeddings from Starpoint-hosted models
//!
//! [`Client`] bundles all three, and can also generate embeddings with an
//! external [`EmbeddingProvider`] such as [`OpenAIEmbeddingProvider`] before
//! inserting them.
//!
//! Every request is validated locally first. A request that fails validation
//! never reaches the network. Every endpoint returns an [`ApiResult`]: the
//! decoded response body, or an [`ErrorPayload`] carrying either a message or
//! the service's own error body.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use starpoint::{Client, CollectionRef, ColumnInsertRequest, Metadata, QueryRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(&std::env::var("STARPOINT_API_KEY")?)?;
//!
//! let metadata = Metadata::from([("label".to_string(), "first".into())]);
//! client
//!     .column_insert(ColumnInsertRequest::new(
//!         CollectionRef::name("books"),
//!         vec![vec![0.1, 0.2, 0.3]],
//!         vec![metadata],
//!     ))
//!     .await?;
//!
//! let results = client
//!     .query_documents(&QueryRequest::new(CollectionRef::name("books")).sql("SELECT * FROM books"))
//!     .await?;
//! println!("{} rows", results.result_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Hosts
//!
//! | Service | Default host |
//! |---------|--------------|
//! | writer | `https://writer.starpoint.ai` |
//! | reader | `https://reader.starpoint.ai` |
//! | embedding | `https://embedding.starpoint.ai` |
//!
//! Override them with [`ClientConfig::builder`] or the `STARPOINT_*_HOST`
//! environment variables read by [`ClientConfig::from_env`].

pub mod client;
pub mod config;
pub mod document;
pub mod embedding;
mod endpoint;
pub mod error;
pub mod openai;
pub mod provider;
pub mod reader;
pub mod request;
pub mod transport;
pub mod transpose;
pub mod validation;
pub mod writer;

pub use client::{BuildAndInsertOutcome, Client};
pub use config::{ClientConfig, ClientConfigBuilder, validate_host};
pub use document::{CollectionRef, Document, Metadata, MetadataValue, UpdateDocument};
pub use embedding::{EmbeddingClient, EmbeddingModel};
pub use error::{
    ApiResult, ErrorPayload, Result, StarpointError, TransportError, ValidationError, normalize,
};
pub use openai::OpenAIEmbeddingProvider;
pub use provider::{EmbeddingProvider, IndexedEmbedding};
pub use reader::Reader;
pub use request::*;
pub use transport::{HttpRequest, HttpTransport, Transport};
pub use transpose::{transpose, transpose_updates};
pub use writer::Writer;
