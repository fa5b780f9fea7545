//! Generation Pipeline Integration Tests
//!
//! Drives `GenerationOrchestrator::from_config` against a local HTTP server
//! speaking the chat-completion envelope.

use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use prompt_to_app::{
    AppConfig, Database, GenerationErrorKind, GenerationOrchestrator, SessionEvent,
    DEFAULT_SOURCE, ERROR_SOURCE,
};

// ============================================================================
// Test server
// ============================================================================

/// Serve one canned response per connection, in order. Resolves to the raw
/// requests received.
async fn serve(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            requests.push(String::from_utf8_lossy(&raw).to_string());
        }
        requests
    });

    (format!("http://{}/v1/chat/completions", addr), handle)
}

fn envelope(content: &str) -> String {
    serde_json::json!({
        "model": "gpt-3.5-turbo",
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

fn orchestrator_for(
    endpoint: &str,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
) -> GenerationOrchestrator {
    let mut config = AppConfig::default();
    config.provider.endpoint = endpoint.to_string();
    config.provider.timeout_secs = 5;
    let storage = Arc::new(Database::new_in_memory().unwrap());
    GenerationOrchestrator::from_config(&config, storage, events).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_red_button_over_http() {
    let content =
        "```jsx\nexport default function App(){return <button style={{color:'red'}}>Hi</button>}\n```";
    let (endpoint, server) = serve(vec![(200, envelope(content))]).await;
    let orchestrator = orchestrator_for(&endpoint, None);

    let source = orchestrator.generate("a red button").await.unwrap();

    assert_eq!(
        source,
        "import React from \"react\";\n\nexport default function App(){return <button style={{color:'red'}}>Hi</button>}"
    );
    assert_eq!(orchestrator.history().await.len(), 1);
    assert_eq!(
        orchestrator.preview_payload().await.app_source(),
        Some(source.as_str())
    );

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 1);
    let raw = &requests[0];
    let lower = raw.to_ascii_lowercase();
    assert!(raw.starts_with("POST /v1/chat/completions"));
    assert!(lower.contains("authorization: bearer unused"));
    assert!(lower.contains("content-type: application/json"));
    assert!(raw.contains(r#""model":"gpt-3.5-turbo""#));
    assert!(raw.contains(r#""temperature":0.7"#));
    assert!(raw.contains(r#"Prompt: \"a red button\""#));
}

#[tokio::test]
async fn test_http_error_is_transport_failure() {
    let (endpoint, server) = serve(vec![(
        500,
        r#"{"error":{"message":"upstream exploded"}}"#.to_string(),
    )])
    .await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let orchestrator = orchestrator_for(&endpoint, Some(tx));

    let err = orchestrator.generate("a navbar").await.unwrap_err();

    assert_eq!(err.kind(), GenerationErrorKind::Transport);
    assert_eq!(orchestrator.current_source().await.source_text, ERROR_SOURCE);
    assert!(!orchestrator.is_busy());
    server.await.unwrap();

    let mut failed = false;
    while let Ok(event) = rx.try_recv() {
        if let SessionEvent::GenerationFailed { kind, .. } = event {
            assert_eq!(kind, GenerationErrorKind::Transport);
            failed = true;
        }
    }
    assert!(failed);
}

#[tokio::test]
async fn test_garbage_body_is_parse_failure() {
    let (endpoint, server) = serve(vec![(200, "<html>gateway</html>".to_string())]).await;
    let orchestrator = orchestrator_for(&endpoint, None);

    let err = orchestrator.generate("a navbar").await.unwrap_err();

    assert_eq!(err.kind(), GenerationErrorKind::Parse);
    assert_eq!(orchestrator.current_source().await.source_text, ERROR_SOURCE);
    server.await.unwrap();
}

#[tokio::test]
async fn test_missing_content_falls_back_to_placeholder() {
    let (endpoint, server) = serve(vec![(200, r#"{"choices":[]}"#.to_string())]).await;
    let orchestrator = orchestrator_for(&endpoint, None);

    let source = orchestrator.generate("a navbar").await.unwrap();

    assert_eq!(source, DEFAULT_SOURCE);
    assert_eq!(orchestrator.history().await[0].source_text, DEFAULT_SOURCE);
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let orchestrator = orchestrator_for(&format!("http://{}/v1/chat/completions", addr), None);
    let err = orchestrator.generate("a navbar").await.unwrap_err();

    assert_eq!(err.kind(), GenerationErrorKind::Transport);
    assert!(!orchestrator.is_busy());
}

#[tokio::test]
async fn test_blank_prompt_sends_nothing() {
    // No server at all: any request would fail as transport, not validation
    let orchestrator = orchestrator_for("http://127.0.0.1:9/v1/chat/completions", None);

    let err = orchestrator.generate("   ").await.unwrap_err();
    assert_eq!(err.kind(), GenerationErrorKind::Validation);
}
