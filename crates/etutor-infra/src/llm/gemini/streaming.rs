//! SSE stream adapter for `streamGenerateContent?alt=sse`.
//!
//! Every SSE `data:` line carries a partial `GenerateContentResponse`. Text
//! parts become `TextDelta`s; the chunk that carries a `finishReason` also
//! yields `MessageDelta` and (when present) `Usage`. The stream ends with
//! `Done` once the body closes.

use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};

use etutor_core::llm::provider::EventStream;
use etutor_types::llm::{LlmError, StreamEvent};

use super::client::{API_KEY_HEADER, error_from_reqwest, error_from_status};
use super::types::{GeminiRequest, GeminiResponse};

/// Convert one SSE payload into zero or more stream events.
///
/// `index` counts text deltas so far and is advanced for each one emitted.
fn process_chunk(data: &str, index: &mut u32) -> Result<Vec<StreamEvent>, LlmError> {
    let chunk: GeminiResponse = serde_json::from_str(data)
        .map_err(|e| LlmError::Deserialization(format!("stream chunk: {e}")))?;
    chunk.check_blocked()?;

    let mut events = Vec::new();
    let text = chunk.text();
    if !text.is_empty() {
        events.push(StreamEvent::TextDelta {
            index: *index,
            text,
        });
        *index += 1;
    }
    if let Some(stop_reason) = chunk.stop_reason() {
        if let Some(usage) = chunk.usage() {
            events.push(StreamEvent::Usage(usage));
        }
        events.push(StreamEvent::MessageDelta { stop_reason });
    }
    Ok(events)
}

/// Create a streaming SSE connection to the Gemini API.
///
/// # Arguments
///
/// * `client` - Shared reqwest HTTP client
/// * `url` - Full `streamGenerateContent?alt=sse` URL
/// * `body` - Gemini request body
/// * `api_key` - API key wrapped in SecretString
pub fn create_gemini_stream(
    client: &reqwest::Client,
    url: &str,
    body: GeminiRequest,
    api_key: &SecretString,
) -> EventStream {
    let client = client.clone();
    let url = url.to_string();
    let api_key = api_key.clone();

    Box::pin(async_stream::try_stream! {
        let response = client
            .post(&url)
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(error_from_reqwest)?;

        let status = response.status();
        let response = if status.is_success() {
            response
        } else {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Gemini stream API error response");
            Err(error_from_status(status, &error_body))?
        };

        yield StreamEvent::Connected;

        let mut events = response.bytes_stream().eventsource();
        let mut index = 0u32;

        while let Some(event) = events.next().await {
            let event = event.map_err(|e| LlmError::Stream(format!("SSE read: {e}")))?;
            if event.data.trim().is_empty() {
                continue;
            }
            for ev in process_chunk(&event.data, &mut index)? {
                yield ev;
            }
        }

        yield StreamEvent::Done;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use etutor_types::llm::StopReason;

    #[test]
    fn test_process_text_chunk() {
        let mut index = 0;
        let data = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hel"}]}}]}"#;
        let events = process_chunk(data, &mut index).unwrap();
        assert_eq!(
            events,
            vec![StreamEvent::TextDelta {
                index: 0,
                text: "Hel".into()
            }]
        );
        assert_eq!(index, 1);
    }

    #[test]
    fn test_process_final_chunk() {
        let mut index = 3;
        let data = r#"{
            "candidates":[{"content":{"role":"model","parts":[{"text":"lo"}]},"finishReason":"STOP"}],
            "usageMetadata":{"promptTokenCount":40,"candidatesTokenCount":7}
        }"#;
        let events = process_chunk(data, &mut index).unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], StreamEvent::TextDelta { index: 3, text } if text == "lo"));
        assert!(matches!(&events[1], StreamEvent::Usage(u) if u.input_tokens == 40));
        assert_eq!(
            events[2],
            StreamEvent::MessageDelta {
                stop_reason: StopReason::EndTurn
            }
        );
    }

    #[test]
    fn test_process_blocked_prompt() {
        let mut index = 0;
        let data = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        assert!(matches!(
            process_chunk(data, &mut index),
            Err(LlmError::Blocked(_))
        ));
    }

    #[test]
    fn test_process_malformed_chunk() {
        let mut index = 0;
        assert!(matches!(
            process_chunk("{not json", &mut index),
            Err(LlmError::Deserialization(_))
        ));
    }
}
