//! Endpoint behavior against an in-memory recording transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};
use starpoint::{
    Client, ClientConfig, CollectionRef, ColumnInsertRequest, ColumnUpdateRequest,
    CreateCollectionRequest, DeleteCollectionRequest, DeleteDocumentsRequest, Document,
    EmbedRequest, EmbeddingModel, ErrorPayload, HttpRequest, InferSchemaRequest,
    InsertDocumentsRequest, Metadata, MetadataValue, QueryRequest, Transport, TransportError,
    UpdateDocument, UpdateDocumentsRequest,
};

const WRITER: &str = "http://writer.test";
const READER: &str = "http://reader.test";
const EMBEDDING: &str = "http://embedding.test";

/// Records every request and replays queued responses, defaulting to `{}`.
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    health_body: Mutex<Option<String>>,
}

impl RecordingTransport {
    fn respond_with(&self, response: Result<Value, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| Ok(json!({})))
    }

    async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(HttpRequest {
            method: Method::GET,
            url: url.to_string(),
            body: Value::Null,
        });
        Ok(self.health_body.lock().unwrap().clone().unwrap_or_else(|| "hello.".to_string()))
    }
}

fn client() -> (Client, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let config = ClientConfig::builder()
        .writer_host(WRITER)
        .reader_host(READER)
        .embedding_host(EMBEDDING)
        .build()
        .unwrap();
    let client = Client::with_transport(config, transport.clone()).unwrap();
    (client, transport)
}

fn meta(key: &str, value: &str) -> Metadata {
    Metadata::from([(key.to_string(), MetadataValue::from(value))])
}

fn message(payload: ErrorPayload) -> String {
    match payload {
        ErrorPayload::Message { error_message } => error_message,
        other => panic!("expected a message payload, got {other:?}"),
    }
}

const MISSING_IDENTIFIER: &str = "Did not specify id or name identifier for collection in request";
const TOO_MANY_IDENTIFIERS: &str =
    "Request has too many identifiers. Either pass in collection_id or collection_name, not both";

fn both_identifiers() -> CollectionRef {
    CollectionRef { collection_id: Some("abc".into()), collection_name: Some("books".into()) }
}

// ── Validation happens before the network ──────────────────────────

#[tokio::test]
async fn missing_identifier_never_reaches_transport() {
    let (client, transport) = client();
    let none = CollectionRef::default();
    let doc = Document::new(vec![1.0]);

    let errors = vec![
        client
            .insert_documents(&InsertDocumentsRequest::new(none.clone(), vec![doc.clone()]))
            .await
            .unwrap_err(),
        client
            .update_documents(&UpdateDocumentsRequest::new(
                none.clone(),
                vec![UpdateDocument::metadata("1", meta("k", "v"))],
            ))
            .await
            .unwrap_err(),
        client
            .delete_documents(&DeleteDocumentsRequest::new(none.clone(), vec!["1".into()]))
            .await
            .unwrap_err(),
        client.query_documents(&QueryRequest::new(none.clone()).sql("SELECT 1")).await.unwrap_err(),
        client.infer_schema(&InferSchemaRequest::new(none.clone())).await.unwrap_err(),
        client
            .column_insert(ColumnInsertRequest::new(none, vec![vec![1.0]], vec![meta("k", "v")]))
            .await
            .unwrap_err(),
    ];

    for err in errors {
        assert_eq!(message(err), MISSING_IDENTIFIER);
    }
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn both_identifiers_are_rejected() {
    let (client, transport) = client();

    let insert = client
        .insert_documents(&InsertDocumentsRequest::new(
            both_identifiers(),
            vec![Document::new(vec![1.0])],
        ))
        .await
        .unwrap_err();
    let query = client.query_documents(&QueryRequest::new(both_identifiers())).await.unwrap_err();

    assert_eq!(message(insert), TOO_MANY_IDENTIFIERS);
    assert_eq!(message(query), TOO_MANY_IDENTIFIERS);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn empty_identifiers_are_rejected() {
    let (client, transport) = client();

    let by_id = client.infer_schema(&InferSchemaRequest::new(CollectionRef::id(""))).await;
    let by_name = client.infer_schema(&InferSchemaRequest::new(CollectionRef::name(""))).await;

    assert_eq!(message(by_id.unwrap_err()), "Id cannot be null for collection in request");
    assert_eq!(
        message(by_name.unwrap_err()),
        "Name identifier cannot be null for collection in request"
    );
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn non_positive_dimensionality_is_rejected() {
    let (client, transport) = client();

    for dimensionality in [0, -3] {
        let err = client
            .create_collection(&CreateCollectionRequest::new("books", dimensionality))
            .await
            .unwrap_err();
        assert_eq!(message(err), "Dimensionality cannot be less than or equal to 0");
    }

    let missing = CreateCollectionRequest { name: "books".into(), dimensionality: None };
    let err = client.create_collection(&missing).await.unwrap_err();
    assert_eq!(message(err), "Did not specify dimensionality of collection in request");

    let err = client.create_collection(&CreateCollectionRequest::new("", 4)).await.unwrap_err();
    assert_eq!(message(err), "Did not specify name of collection in request");

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn empty_delete_ids_are_rejected() {
    let (client, transport) = client();

    let err = client
        .delete_documents(&DeleteDocumentsRequest::new(CollectionRef::name("books"), vec![]))
        .await
        .unwrap_err();

    assert_eq!(message(err), "Did not specify document id(s) to delete in request");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn document_level_checks() {
    let (client, transport) = client();
    let books = CollectionRef::name("books");

    let empty = client
        .insert_documents(&InsertDocumentsRequest::new(books.clone(), vec![]))
        .await
        .unwrap_err();
    let no_embedding = client
        .insert_documents(&InsertDocumentsRequest::new(books.clone(), vec![Document::new(vec![])]))
        .await
        .unwrap_err();
    let no_id = client
        .update_documents(&UpdateDocumentsRequest::new(
            books.clone(),
            vec![UpdateDocument::metadata("", meta("k", "v"))],
        ))
        .await
        .unwrap_err();
    let no_metadata = client
        .update_documents(&UpdateDocumentsRequest::new(
            books.clone(),
            vec![UpdateDocument::metadata("1", Metadata::new())],
        ))
        .await
        .unwrap_err();
    let no_collection_id =
        client.delete_collection(&DeleteCollectionRequest::new("")).await.unwrap_err();

    assert_eq!(message(empty), "Did not specify documents in request");
    assert_eq!(message(no_embedding), "Did not specify an embedding for a document in the request");
    assert_eq!(message(no_id), "Did not specify an id for a document in the request");
    assert_eq!(message(no_metadata), "Did not specify metadata for a document in the request");
    assert_eq!(message(no_collection_id), "Did not specify collection_id in request");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn column_insert_with_empty_columns_is_rejected() {
    let (client, transport) = client();

    let err = client
        .column_insert(ColumnInsertRequest::new(
            CollectionRef::name("books"),
            vec![vec![1.0], vec![2.0]],
            vec![],
        ))
        .await
        .unwrap_err();

    assert_eq!(message(err), "Did not specify documents in request");
    assert_eq!(transport.call_count(), 0);
}

// ── Valid requests reach the transport unchanged ───────────────────

#[tokio::test]
async fn create_collection_forwards_exact_body() {
    let (client, transport) = client();
    transport.respond_with(Ok(json!({"id": "c-1", "name": "books", "dimensionality": 5})));

    let response =
        client.create_collection(&CreateCollectionRequest::new("books", 5)).await.unwrap();

    assert_eq!(response.id, "c-1");
    assert_eq!(response.dimensionality, 5);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].url, format!("{WRITER}/api/v1/collections"));
    assert_eq!(requests[0].body, json!({"name": "books", "dimensionality": 5}));
}

#[tokio::test]
async fn column_insert_truncates_to_shortest_column() {
    let (client, transport) = client();

    client
        .column_insert(ColumnInsertRequest::new(
            CollectionRef::name("books"),
            vec![vec![0.5, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]],
            vec![meta("label", "a"), meta("label", "b")],
        ))
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, format!("{WRITER}/api/v1/documents"));
    assert_eq!(
        requests[0].body,
        json!({
            "collection_name": "books",
            "documents": [
                {"embedding": [0.5, 1.0], "metadata": {"label": "a"}},
                {"embedding": [2.0, 3.0], "metadata": {"label": "b"}},
            ]
        })
    );
}

#[tokio::test]
async fn column_update_patches_documents() {
    let (client, transport) = client();

    client
        .column_update(ColumnUpdateRequest {
            collection: CollectionRef::id("c-1"),
            ids: vec!["d-1".into()],
            embeddings: vec![vec![1.0]],
            metadata: vec![meta("label", "x")],
        })
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::PATCH);
    assert_eq!(
        requests[0].body,
        json!({
            "collection_id": "c-1",
            "documents": [{"id": "d-1", "embedding": [1.0], "metadata": {"label": "x"}}]
        })
    );
}

#[tokio::test]
async fn delete_documents_sends_ids_in_body() {
    let (client, transport) = client();
    transport.respond_with(Ok(json!({"collection_id": "c-1", "documents": [{"id": "d-1"}]})));

    let response = client
        .delete_documents(&DeleteDocumentsRequest::new(CollectionRef::id("c-1"), vec!["d-1".into()]))
        .await
        .unwrap();

    assert_eq!(response.documents[0].id, "d-1");
    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::DELETE);
    assert_eq!(requests[0].body, json!({"collection_id": "c-1", "documents": ["d-1"]}));
}

#[tokio::test]
async fn query_goes_to_reader_host() {
    let (client, transport) = client();
    transport.respond_with(Ok(json!({
        "collection_id": "c-1",
        "result_count": 1,
        "results": [{"__id": "d-1", "label": "a"}]
    })));

    let response = client
        .query_documents(&QueryRequest::new(CollectionRef::name("books")).sql("SELECT * FROM books"))
        .await
        .unwrap();

    assert_eq!(response.result_count, 1);
    assert_eq!(response.results[0]["__id"], "d-1");

    let requests = transport.requests();
    assert_eq!(requests[0].url, format!("{READER}/api/v1/query"));
    assert_eq!(requests[0].body, json!({"collection_name": "books", "sql": "SELECT * FROM books"}));
}

#[tokio::test]
async fn embed_goes_to_embedding_host() {
    let (client, transport) = client();
    transport.respond_with(Ok(json!({"results": [{"text": "hi", "embedding": [0.1, 0.2]}]})));

    let response = client
        .embed(&EmbedRequest::new(vec!["hi".into()], EmbeddingModel::MiniLm))
        .await
        .unwrap();

    assert_eq!(response.results[0].embedding, vec![0.1, 0.2]);
    let requests = transport.requests();
    assert_eq!(requests[0].url, format!("{EMBEDDING}/api/v1/embed"));
    assert_eq!(requests[0].body, json!({"text": ["hi"], "model": "MiniLm"}));
}

#[tokio::test]
async fn embed_rejects_empty_input_and_unknown_models() {
    let (client, transport) = client();

    let empty = client.embed(&EmbedRequest::new(vec![], EmbeddingModel::MiniLm)).await;
    let unknown = client
        .embed(&EmbedRequest { text: vec!["hi".into()], model: "bert".into() })
        .await;

    assert_eq!(message(empty.unwrap_err()), "Did not specify text(s) to embed in request");
    assert_eq!(message(unknown.unwrap_err()), "Embedding model 'bert' is not supported");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn embed_and_join_metadata_pairs_items() {
    let (client, transport) = client();

    client
        .embed_and_join_metadata(
            vec!["a".into(), "b".into()],
            vec![meta("n", "1"), meta("n", "2")],
            EmbeddingModel::MiniLm,
        )
        .await
        .unwrap();

    assert_eq!(
        transport.requests()[0].body,
        json!({
            "items": [
                {"text": "a", "metadata": {"n": "1"}},
                {"text": "b", "metadata": {"n": "2"}},
            ],
            "model": "MiniLm"
        })
    );
}

// ── Error normalization ────────────────────────────────────────────

#[tokio::test]
async fn server_error_becomes_message_payload() {
    let (client, transport) = client();
    transport.respond_with(Err(TransportError::Status {
        status: 500,
        body: None,
        text: "Internal Server Error".into(),
    }));

    let err = client
        .insert_documents(&InsertDocumentsRequest::new(
            CollectionRef::name("books"),
            vec![Document::new(vec![1.0])],
        ))
        .await
        .unwrap_err();

    assert_eq!(
        message(err),
        "Request failed with status code 500 and the following message: Internal Server Error"
    );
}

#[tokio::test]
async fn upstream_error_body_passes_through() {
    let (client, transport) = client();
    let body = json!({"error_message": "collection does not exist"});
    transport.respond_with(Err(TransportError::Status {
        status: 400,
        body: Some(body.clone()),
        text: body.to_string(),
    }));

    let err = client.infer_schema(&InferSchemaRequest::new(CollectionRef::id("c-1"))).await;

    assert_eq!(err, Err(ErrorPayload::Upstream(body)));
}

#[tokio::test]
async fn empty_success_body_uses_defaults() {
    let (client, transport) = client();
    transport.respond_with(Ok(Value::Null));

    let response =
        client.delete_collection(&DeleteCollectionRequest::new("c-1")).await.unwrap();

    assert!(!response.success);
}

#[tokio::test]
async fn unexpected_success_body_is_still_ok() {
    let (client, transport) = client();
    transport.respond_with(Ok(json!({
        "collection_id": "c1",
        "documents": [{"id": 7}],
        "took_ms": 12
    })));
    transport.respond_with(Ok(json!({
        "id": "c9",
        "name": "x",
        "dimensionality": 5,
        "created_at": "2024-01-01T00:00:00Z"
    })));

    let inserted = client
        .insert_documents(&InsertDocumentsRequest::new(
            CollectionRef::id("c1"),
            vec![Document::new(vec![1.0])],
        ))
        .await
        .unwrap();
    let created =
        client.create_collection(&CreateCollectionRequest::new("x", 5)).await.unwrap();

    assert_eq!(inserted.documents[0].id, json!(7));
    assert_eq!(inserted.extra["took_ms"], 12);
    assert_eq!(created.dimensionality, 5);
    assert_eq!(created.extra["created_at"], "2024-01-01T00:00:00Z");
}

// ── Construction and health ────────────────────────────────────────

#[test]
fn invalid_host_fails_construction() {
    let config = ClientConfig { writer_host: "asdf".into(), ..ClientConfig::default() };
    let result = Client::with_transport(config, Arc::new(RecordingTransport::default()));

    assert!(result.is_err());
}

#[test]
fn host_with_stray_whitespace_fails_construction() {
    for host in ["http://127.0.0.1:1 ", " http://writer.test", "http://writer.test\n"] {
        let config = ClientConfig { writer_host: host.into(), ..ClientConfig::default() };
        let result = Client::with_transport(config, Arc::new(RecordingTransport::default()));

        assert!(result.is_err(), "{host:?} was accepted");
    }
}

#[test]
fn empty_api_key_fails_construction() {
    let err = Client::new("").err().unwrap();

    assert_eq!(err.to_string(), "No API key provided. An API key must be provided.");
}

#[tokio::test]
async fn construction_does_no_io_and_health_check_probes_each_host() {
    let (client, transport) = client();
    assert_eq!(transport.call_count(), 0);

    client.check_health().await.unwrap();

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![WRITER, READER, EMBEDDING]);
}

#[tokio::test]
async fn unexpected_health_body_is_not_an_error() {
    let (client, transport) = client();
    *transport.health_body.lock().unwrap() = Some("maintenance".into());

    assert!(client.writer().check_health().await.is_ok());
}
