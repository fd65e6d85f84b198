mod common;

use assert2::check;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use common::app;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt as _;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Test: A successful search returns the camelCase outcome.
#[rstest]
#[tokio::test]
async fn search_returns_outcome(app: Router) {
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/search",
        Some(json!({ "query": "vacation days", "documents": ["1"] })),
    )
    .await;

    check!(status == StatusCode::OK);
    check!(body["success"] == true);
    check!(body["query"] == "vacation days");
    check!(body["results"][0]["documentId"] == "1");
    check!(body["results"][0]["pageNumber"] == 1);
    check!(body["results"][0]["relevanceScore"].as_f64().unwrap() > 0.3);
    check!(body.get("error").is_none());
    check!(
        body["summary"]
            .as_str()
            .unwrap()
            .starts_with("Based on the policy outlined in Employment_Contract_2024.pdf:")
    );
}

/// Test: Empty and missing queries are rejected with 400.
#[rstest]
#[case(json!({ "query": "  " }))]
#[case(json!({ "documents": ["1"] }))]
#[case(json!({ "query": null }))]
#[tokio::test]
async fn search_rejects_empty_query(app: Router, #[case] request: Value) {
    let (status, body) = send(&app, Method::POST, "/api/search", Some(request)).await;

    check!(status == StatusCode::BAD_REQUEST);
    check!(body["success"] == false);
    check!(body["error"] == "Query cannot be empty");
    check!(body["results"] == json!([]));
    check!(body.get("summary").is_none());
}

/// Test: A body that is not JSON gets a 400 failure outcome.
#[rstest]
#[tokio::test]
async fn search_rejects_malformed_body(app: Router) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    check!(response.status() == StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    check!(body["success"] == false);
    check!(body["error"].is_string());
}

/// Test: Uploaded records can be listed and deleted once.
#[rstest]
#[tokio::test]
async fn upload_list_delete(app: Router) {
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/documents/upload",
        Some(json!({ "filename": "handbook.pdf", "size": 2048 })),
    )
    .await;
    check!(status == StatusCode::OK);
    check!(body["success"] == true);
    let document = &body["document"];
    check!(document["filename"] == "handbook.pdf");
    check!(document["size"] == 2048);
    check!(document["type"] == "application/pdf");
    check!(document["status"] == "ready");
    check!(document["uploadedAt"].is_string());
    let id = document["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/api/documents", None).await;
    check!(status == StatusCode::OK);
    check!(body["documents"].as_array().unwrap().len() == 1);
    check!(body["documents"][0]["id"] == id.as_str());

    let uri = format!("/api/documents/{}", id);
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    check!(status == StatusCode::OK);
    check!(body["success"] == true);
    check!(body["message"] == "Document deleted successfully");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    check!(status == StatusCode::NOT_FOUND);
    check!(body["success"] == false);
    check!(body["error"] == "Document not found");

    let (_, body) = send(&app, Method::GET, "/api/documents", None).await;
    check!(body["documents"] == json!([]));
}

/// Test: An upload with no body gets generated metadata.
#[rstest]
#[tokio::test]
async fn upload_without_body_generates_metadata(app: Router) {
    let (status, body) = send(&app, Method::POST, "/api/documents/upload", None).await;
    check!(status == StatusCode::OK);

    let document = &body["document"];
    check!(document["filename"].as_str().unwrap().starts_with("document_"));
    let size = document["size"].as_u64().unwrap();
    check!((100_000..5_100_000).contains(&size));
}

/// Test: A browser-style multipart upload takes name, size and type from the file part.
#[rstest]
#[tokio::test]
async fn upload_accepts_multipart_document(app: Router) {
    let boundary = "docqa-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"document\"; filename=\"a.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         %PDF-1.4 hello\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/documents/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    check!(response.status() == StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    check!(body["success"] == true);
    check!(body["document"]["filename"] == "a.pdf");
    check!(body["document"]["size"] == "%PDF-1.4 hello".len());
    check!(body["document"]["type"] == "application/pdf");
    check!(body["document"]["status"] == "ready");

    let (_, body) = send(&app, Method::GET, "/api/documents", None).await;
    check!(body["documents"].as_array().unwrap().len() == 1);
}

/// Test: Uploads do not change what search sees.
#[rstest]
#[tokio::test]
async fn uploads_are_not_searchable(app: Router) {
    send(
        &app,
        Method::POST,
        "/api/documents/upload",
        Some(json!({ "filename": "xyzzy.pdf" })),
    )
    .await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/search",
        Some(json!({ "query": "xyzzy" })),
    )
    .await;
    check!(body["success"] == true);
    check!(body["results"] == json!([]));
}

/// Test: Liveness endpoints.
#[rstest]
#[tokio::test]
async fn ping_and_health(app: Router) {
    let (status, body) = send(&app, Method::GET, "/api/ping", None).await;
    check!(status == StatusCode::OK);
    check!(body == json!({ "message": "pong" }));

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    check!(status == StatusCode::OK);
    check!(body["status"] == "ok");
    check!(body["documents"] == 5);
    check!(body["excerpts"] == 26);
    check!(body["uploads"] == 0);
}
