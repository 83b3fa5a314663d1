//! # Column Insert Example
//!
//! Creates a collection, inserts documents given as parallel embedding and
//! metadata columns, queries them back, then cleans up.
//!
//! Requires `STARPOINT_API_KEY`. Point at a local deployment with
//! `STARPOINT_WRITER_HOST` / `STARPOINT_READER_HOST`.
//!
//! Run: `cargo run --example column_insert`

use serde_json::json;
use starpoint::{
    Client, CollectionRef, ColumnInsertRequest, CreateCollectionRequest, DeleteCollectionRequest,
    InferSchemaRequest, Metadata, MetadataValue, QueryRequest,
};
use tracing_subscriber::EnvFilter;

const DIMENSIONALITY: i64 = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let client = Client::from_env()?;
    client.check_health().await?;

    // -- 1. Create a collection -------------------------------------------
    let collection = client
        .create_collection(&CreateCollectionRequest::new("demo_books", DIMENSIONALITY))
        .await?;
    println!("Created collection {} ({})", collection.name, collection.id);

    // -- 2. Insert two columns --------------------------------------------
    let embeddings = vec![vec![0.1, 0.2, 0.3, 0.4], vec![0.9, 0.8, 0.7, 0.6]];
    let metadata: Vec<Metadata> = [("Dune", 1965), ("Neuromancer", 1984)]
        .into_iter()
        .map(|(title, year)| {
            Metadata::from([
                ("title".to_string(), MetadataValue::from(title)),
                ("year".to_string(), MetadataValue::from(year as i64)),
            ])
        })
        .collect();

    let inserted = client
        .column_insert(ColumnInsertRequest::new(
            CollectionRef::id(&collection.id),
            embeddings,
            metadata,
        ))
        .await?;
    println!("Inserted {} document(s)", inserted.documents.len());

    // -- 3. Query them back -----------------------------------------------
    let results = client
        .query_documents(
            &QueryRequest::new(CollectionRef::id(&collection.id))
                .sql("SELECT * FROM demo_books WHERE year > ?")
                .params(vec![json!(1970)]),
        )
        .await?;
    println!("\nQuery returned {} row(s)", results.result_count);
    for row in &results.results {
        println!("  {}", serde_json::Value::Object(row.clone()));
    }

    let schema =
        client.infer_schema(&InferSchemaRequest::new(CollectionRef::id(&collection.id))).await?;
    println!("\nInferred types: {:?}", schema.inferred_schema.types);

    // -- 4. Clean up ------------------------------------------------------
    client.delete_collection(&DeleteCollectionRequest::new(&collection.id)).await?;
    println!("\nDone.");
    Ok(())
}
