// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE stream parser for chat-completions streaming responses.
//!
//! Converts a reqwest response byte stream into typed [`StreamEvent`]s using
//! the `eventsource-stream` crate. OpenAI streams unnamed events whose data
//! is a JSON chunk, terminated by the literal sentinel `[DONE]`.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures::stream::{Stream, StreamExt};
use mentora_core::MentoraError;

use crate::types::CompletionChunk;

/// Typed events from the chat-completions streaming protocol.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// An incremental chunk carrying a content delta and/or finish reason.
    Chunk(CompletionChunk),
    /// The `[DONE]` sentinel; the stream is complete.
    Done,
}

/// Parses a reqwest streaming response into a stream of typed [`StreamEvent`]s.
pub fn parse_sse_stream(
    response: reqwest::Response,
) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, MentoraError>> + Send>> {
    let byte_stream = response.bytes_stream();
    let event_stream = byte_stream.eventsource();

    let mapped = event_stream.filter_map(|result| async move {
        match result {
            Ok(event) => {
                let data = event.data.trim();
                if data == "[DONE]" {
                    return Some(Ok(StreamEvent::Done));
                }
                let parsed = serde_json::from_str::<CompletionChunk>(data)
                    .map(StreamEvent::Chunk)
                    .map_err(|e| MentoraError::Provider {
                        message: format!("failed to parse stream chunk: {e}"),
                        source: Some(Box::new(e)),
                    });
                Some(parsed)
            }
            Err(e) => Some(Err(MentoraError::Provider {
                message: format!("SSE stream error: {e}"),
                source: None,
            })),
        }
    });

    Box::pin(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    /// Serve raw SSE text through wiremock to get a real reqwest::Response.
    async fn mock_sse_response(sse_text: &str) -> reqwest::Response {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse_text.to_string()),
            )
            .mount(&server)
            .await;

        reqwest::get(&server.uri()).await.unwrap()
    }

    #[tokio::test]
    async fn parse_content_chunk() {
        let sse = "data: {\"choices\":[{\"delta\":{\"content\":\"Hello\"},\"finish_reason\":null}]}\n\n";
        let response = mock_sse_response(sse).await;
        let mut stream = parse_sse_stream(response);

        let event = stream.next().await.unwrap().unwrap();
        match event {
            StreamEvent::Chunk(chunk) => {
                assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Hello"));
            }
            other => panic!("expected Chunk, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn parse_done_sentinel() {
        let sse = "data: [DONE]\n\n";
        let response = mock_sse_response(sse).await;
        let mut stream = parse_sse_stream(response);

        let event = stream.next().await.unwrap().unwrap();
        assert!(matches!(event, StreamEvent::Done));
    }

    #[tokio::test]
    async fn chunk_sequence_then_done() {
        let sse = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"},\"finish_reason\":null}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"lo\"},\"finish_reason\":null}]}\n\n",
            "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
            "data: [DONE]\n\n",
        );
        let response = mock_sse_response(sse).await;
        let mut stream = parse_sse_stream(response);

        let mut text = String::new();
        let mut finish = None;
        let mut done = false;
        while let Some(event) = stream.next().await {
            match event.unwrap() {
                StreamEvent::Chunk(chunk) => {
                    let choice = &chunk.choices[0];
                    if let Some(delta) = &choice.delta.content {
                        text.push_str(delta);
                    }
                    if let Some(reason) = &choice.finish_reason {
                        finish = Some(reason.clone());
                    }
                }
                StreamEvent::Done => done = true,
            }
        }
        assert_eq!(text, "Hello");
        assert_eq!(finish.as_deref(), Some("stop"));
        assert!(done);
    }

    #[tokio::test]
    async fn malformed_chunk_is_an_error() {
        let sse = "data: {not json}\n\n";
        let response = mock_sse_response(sse).await;
        let mut stream = parse_sse_stream(response);

        let event = stream.next().await.unwrap();
        assert!(event.is_err());
    }
}
