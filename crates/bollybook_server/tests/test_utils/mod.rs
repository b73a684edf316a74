//! Shared test helpers.

pub mod fakes;
pub mod mock_driver;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use bollybook_core::{GenerationJob, JobStatus};
use bollybook_database::InMemoryJobStore;
use bollybook_interface::{JobStore, TranscriptSource};
use bollybook_narrative::{BookAssembler, GenerationSession};
use bollybook_server::{AppState, create_router};
use fakes::{FakeTranscripts, FlakyStore};
use mock_driver::MockDriver;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

/// A router over in-memory collaborators, with handles to inspect them.
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub driver: Arc<MockDriver>,
    pub store: Arc<InMemoryJobStore>,
    pub upload_dir: TempDir,
    pub output_dir: TempDir,
}

/// Raw response parts.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is UTF-8")
    }
}

#[allow(dead_code)]
impl TestApp {
    pub fn new(driver: MockDriver) -> Self {
        Self::with_transcripts(driver, Arc::new(FakeTranscripts::default()))
    }

    pub fn with_transcripts(driver: MockDriver, transcripts: Arc<dyn TranscriptSource>) -> Self {
        let store = Arc::new(InMemoryJobStore::new());
        Self::build(driver, transcripts, store.clone(), store)
    }

    /// Route through a store that fails its first `failures` completion writes.
    pub fn with_flaky_completion(driver: MockDriver, failures: usize) -> Self {
        let store = Arc::new(InMemoryJobStore::new());
        let flaky = Arc::new(FlakyStore::new(store.clone(), failures));
        Self::build(driver, Arc::new(FakeTranscripts), flaky, store)
    }

    fn build(
        driver: MockDriver,
        transcripts: Arc<dyn TranscriptSource>,
        routed: Arc<dyn JobStore>,
        store: Arc<InMemoryJobStore>,
    ) -> Self {
        let driver = Arc::new(driver);
        let upload_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();

        let assembler = BookAssembler::new(GenerationSession::new(driver.clone()));
        let state = AppState::builder()
            .store(routed)
            .assembler(Arc::new(assembler))
            .transcripts(transcripts)
            .upload_dir(upload_dir.path())
            .output_dir(output_dir.path())
            .build()
            .unwrap();

        Self {
            router: create_router(state, &["*".to_string()]),
            driver,
            store,
            upload_dir,
            output_dir,
        }
    }

    /// Poll until the only job leaves `generating`.
    pub async fn settled_job(&self) -> GenerationJob {
        for _ in 0..100 {
            let jobs = self.store.jobs().await;
            if let Some(job) = jobs.into_iter().find(|j| j.status != JobStatus::Generating) {
                return job;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("job never reached a terminal state");
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Request::post(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// POST a multipart body with a single field.
    pub async fn post_multipart(
        &self,
        uri: &str,
        field: &str,
        filename: Option<&str>,
        content: &[u8],
    ) -> TestResponse {
        const BOUNDARY: &str = "bollybook-test-boundary";
        let disposition = match filename {
            Some(name) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream",
                field, name
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"", field),
        };

        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n{}\r\n\r\n", BOUNDARY, disposition).as_bytes());
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        self.send(
            Request::post(uri)
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }
}
