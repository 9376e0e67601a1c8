//! Anthropic messages API.

mod client;
mod dto;

pub use client::AnthropicClient;
pub use dto::{
    AnthropicContentBlock, AnthropicMessage, AnthropicMessageBuilder, AnthropicRequest,
    AnthropicRequestBuilder, AnthropicResponse, AnthropicUsage,
};
