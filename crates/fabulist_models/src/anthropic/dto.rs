//! Anthropic messages API data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One block of message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContentBlock {
    /// Plain text
    Text {
        /// The text
        text: String,
    },
    /// Any block type this client does not read (thinking, tool use, ...)
    #[serde(other)]
    Other,
}

impl AnthropicContentBlock {
    /// A text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// A conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct AnthropicMessage {
    /// "user" or "assistant"
    role: String,
    /// Content blocks
    content: Vec<AnthropicContentBlock>,
}

impl AnthropicMessage {
    /// Creates a new builder for `AnthropicMessage`.
    pub fn builder() -> AnthropicMessageBuilder {
        AnthropicMessageBuilder::default()
    }
}

/// Request body for `POST /v1/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct AnthropicRequest {
    /// Model identifier
    model: String,
    /// Output token ceiling
    max_tokens: u32,
    /// System prompt
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Conversation so far
    messages: Vec<AnthropicMessage>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl AnthropicRequest {
    /// Creates a new builder for `AnthropicRequest`.
    pub fn builder() -> AnthropicRequestBuilder {
        AnthropicRequestBuilder::default()
    }
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Getters)]
pub struct AnthropicUsage {
    /// Input tokens consumed
    #[serde(default)]
    input_tokens: u64,
    /// Output tokens generated
    #[serde(default)]
    output_tokens: u64,
}

/// Response body of a successful messages call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct AnthropicResponse {
    /// Message id
    id: String,
    /// Model that answered
    #[serde(default)]
    model: String,
    /// Content blocks
    content: Vec<AnthropicContentBlock>,
    /// Why generation stopped ("end_turn", "max_tokens", "refusal", ...)
    #[serde(default)]
    stop_reason: Option<String>,
    /// Token usage
    #[serde(default)]
    usage: AnthropicUsage,
}

impl AnthropicResponse {
    /// Concatenated text of every text block.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                AnthropicContentBlock::Text { text } => Some(text.as_str()),
                AnthropicContentBlock::Other => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_options() {
        let request = AnthropicRequest::builder()
            .model("claude-test")
            .max_tokens(512u32)
            .messages(vec![
                AnthropicMessage::builder()
                    .role("user")
                    .content(vec![AnthropicContentBlock::text("hello")])
                    .build()
                    .unwrap(),
            ])
            .build()
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "claude-test",
                "max_tokens": 512,
                "messages": [{"role": "user", "content": [{"type": "text", "text": "hello"}]}]
            })
        );
    }

    #[test]
    fn response_joins_text_and_skips_other_blocks() {
        let response: AnthropicResponse = serde_json::from_value(serde_json::json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "model": "claude-test",
            "content": [
                {"type": "thinking", "thinking": "hmm", "signature": "x"},
                {"type": "text", "text": "{\"title\": "},
                {"type": "text", "text": "\"Leo\"}"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }))
        .unwrap();

        assert_eq!(response.text(), "{\"title\": \"Leo\"}");
        assert_eq!(*response.usage().output_tokens(), 5);
        assert_eq!(response.stop_reason().as_deref(), Some("end_turn"));
    }
}
