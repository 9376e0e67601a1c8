//! Story generator integrations for Fabulist.
//!
//! - [`AnthropicClient`] calls the Anthropic messages API.
//! - [`ReplayGenerator`] replays recorded responses, for offline runs and
//!   demos.
//!
//! ```no_run
//! use fabulist_config::GeneratorConfig;
//! use fabulist_models::AnthropicClient;
//! use fabulist_interface::StoryGenerator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnthropicClient::from_env(GeneratorConfig::default())?;
//! assert_eq!(client.provider_name(), "anthropic");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anthropic;
mod replay;

pub use anthropic::{
    AnthropicClient, AnthropicContentBlock, AnthropicMessage, AnthropicMessageBuilder,
    AnthropicRequest, AnthropicRequestBuilder, AnthropicResponse, AnthropicUsage,
};
pub use replay::ReplayGenerator;
