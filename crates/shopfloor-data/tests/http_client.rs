//! HttpClient against a local mock server.

use serde_json::json;
use shopfloor_data::{ApiClient, ApiClientExt, FetchError, HttpClient, Request};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(format!("{}/api", server.uri()))
}

#[tokio::test]
async fn get_resolves_path_against_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "nombre": "Widget", "precio": 10.0}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let items: Vec<serde_json::Value> = client.get("/productos").await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["nombre"], "Widget");
}

#[tokio::test]
async fn post_sends_json_body_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ventas"))
        .and(header("authorization", "Bearer abc"))
        .and(body_json(json!({"total": 30.0})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = Request::post("/ventas")
        .json(&json!({"total": 30.0}))
        .unwrap()
        .bearer_auth("abc");
    let response = client.send(request).await.unwrap();

    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn error_status_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ventas"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "server error"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.post("/ventas", &json!({})).await.unwrap_err();

    match err {
        FetchError::HttpError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("server error"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn default_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/proveedores/7"))
        .and(header("x-client", "shopfloor"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)
        .await
        .with_default_header("X-Client", "shopfloor");
    client.delete("/proveedores/7").await.unwrap();
}

#[tokio::test]
async fn unreachable_server_is_request_error() {
    // Port 9 (discard) on localhost is not expected to accept HTTP.
    let client = HttpClient::new("http://127.0.0.1:9/api");
    let err = client.get::<serde_json::Value>("/productos").await.unwrap_err();
    assert!(matches!(err, FetchError::RequestError(_)));
}
