use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
use bollybook_core::{GenerateRequest, Message};
use bollybook_error::{BollybookErrorKind, GenerationErrorKind};
use bollybook_interface::BollybookDriver;
use bollybook_models::{OpenAiClient, OpenAiConfig};
use serde_json::{Value, json};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn request() -> GenerateRequest {
    GenerateRequest::builder()
        .session_key("title_english")
        .messages(vec![Message::system("persona"), Message::user("title please")])
        .build()
        .unwrap()
}

async fn echo_completion(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let prompt = body["messages"][1]["content"].as_str().unwrap_or_default().to_string();
    Json(json!({
        "id": "cmpl-test",
        "model": body["model"],
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": format!("{} | {}", auth, prompt)},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
    }))
}

#[tokio::test]
async fn generate_sends_bearer_key_and_returns_text() {
    let base_url = serve(Router::new().route("/v1/chat/completions", post(echo_completion))).await;
    let client = OpenAiClient::new(
        OpenAiConfig::builder()
            .base_url(base_url)
            .api_key("sk-test")
            .build()
            .unwrap(),
    );

    let response = client.generate(&request()).await.unwrap();
    assert_eq!(response.text(), "Bearer sk-test | title please");
    assert_eq!(client.provider_name(), "openai");
    assert_eq!(client.model_name(), "gpt-4o");
}

#[tokio::test]
async fn provider_error_status_is_reported() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let base_url = serve(router).await;
    let client = OpenAiClient::new(OpenAiConfig::builder().base_url(base_url).build().unwrap());

    let err = client.generate(&request()).await.unwrap_err();
    match err.kind() {
        BollybookErrorKind::Generation(e) => assert_eq!(
            e.kind,
            GenerationErrorKind::Provider {
                status: 429,
                message: "slow down".to_string()
            }
        ),
        other => panic!("unexpected error: {}", other),
    }
}
