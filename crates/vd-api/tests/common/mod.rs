use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::{Value, json};
use tower::ServiceExt;
use vd_api::{ApiConfig, ApiState, router};

/// Test state builder backed by a fresh in-memory store
pub struct TestStateBuilder {
    config: ApiConfig,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    pub fn max_import_rows(mut self, max_rows: usize) -> Self {
        self.config.max_import_rows = max_rows;
        self
    }

    pub fn build(self) -> ApiState {
        ApiState::in_memory(&self.config)
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Client over the full API with default configuration
    pub fn with_state(state: ApiState) -> Self {
        Self::new(router::router().with_state(state))
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send("DELETE", uri, None).await
    }

    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.send("POST", uri, Some(serde_json::to_string(body).expect("Failed to serialize body")))
            .await
    }

    pub async fn patch_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.send("PATCH", uri, Some(serde_json::to_string(body).expect("Failed to serialize body")))
            .await
    }

    async fn send(&self, method: &str, uri: &str, json_body: Option<String>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);

        let request = match json_body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }
}

/// Import `rows` into `book_id` and return the response body.
pub async fn import_rows(client: &TestClient, book_id: &str, rows: Value) -> Value {
    let response = client
        .post_json(
            &format!("/books/{book_id}/import"),
            &json!({ "bookName": format!("{book_id}.xlsx"), "rows": rows }),
        )
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

/// Id of the imported word with the given English form.
pub fn word_id(import: &Value, english: &str) -> String {
    import["words"]
        .as_array()
        .expect("words should be an array")
        .iter()
        .find(|word| word["english"] == english)
        .and_then(|word| word["id"].as_str())
        .unwrap_or_else(|| panic!("{english} should have been imported"))
        .to_string()
}
