//! # OpenAI Ingest Example
//!
//! Embeds a handful of texts with OpenAI and inserts them into an existing
//! Starpoint collection, storing each text as the document metadata.
//!
//! Requires `STARPOINT_API_KEY` and `OPENAI_API_KEY`, plus the name of a
//! collection created with dimensionality 1536.
//!
//! Run: `cargo run --example openai_ingest -- <collection_name>`

use starpoint::{Client, CollectionRef};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let collection = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: openai_ingest <collection_name>"))?;

    // OPENAI_API_KEY in the environment attaches the OpenAI provider.
    let client = Client::from_env()?;

    let texts = vec![
        "Rust guarantees memory safety without a garbage collector.".to_string(),
        "Vector databases index embeddings for similarity search.".to_string(),
        "Tokio is an asynchronous runtime for Rust.".to_string(),
    ];

    println!("Embedding {} text(s)...", texts.len());
    let outcome = client
        .build_and_insert_default_embeddings(CollectionRef::name(&collection), texts)
        .await?;
    println!("  received {} embedding(s)", outcome.embeddings.len());

    match outcome.insert {
        Some(Ok(response)) => {
            println!("  inserted {} document(s) into {collection}", response.documents.len())
        }
        Some(Err(e)) => println!("  insert failed: {e}"),
        None => println!("  nothing to insert"),
    }

    println!("\nDone.");
    Ok(())
}
