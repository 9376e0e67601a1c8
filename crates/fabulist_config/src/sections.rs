//! Scalar configuration sections.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repair loop and request budget settings.
///
/// # Example
///
/// ```toml
/// [orchestrator]
/// max_attempts = 3
/// generator_timeout_ms = 120_000
/// wall_clock_budget_ms = 600_000
/// continuity_window = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Generation attempts per request before returning degraded output
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Deadline for a single generator call
    #[serde(default = "default_generator_timeout_ms")]
    pub generator_timeout_ms: u64,

    /// Deadline for the whole attempt chain
    #[serde(default = "default_wall_clock_budget_ms")]
    pub wall_clock_budget_ms: u64,

    /// How many recent adventures feed the prompt
    #[serde(default = "default_continuity_window")]
    pub continuity_window: usize,

    /// First backoff after a transient generator failure
    #[serde(default = "default_backoff_initial_ms")]
    pub backoff_initial_ms: u64,

    /// Longest backoff between attempts
    #[serde(default = "default_backoff_max_ms")]
    pub backoff_max_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_generator_timeout_ms() -> u64 {
    120_000
}

fn default_wall_clock_budget_ms() -> u64 {
    600_000
}

fn default_continuity_window() -> usize {
    3
}

fn default_backoff_initial_ms() -> u64 {
    500
}

fn default_backoff_max_ms() -> u64 {
    8_000
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            generator_timeout_ms: default_generator_timeout_ms(),
            wall_clock_budget_ms: default_wall_clock_budget_ms(),
            continuity_window: default_continuity_window(),
            backoff_initial_ms: default_backoff_initial_ms(),
            backoff_max_ms: default_backoff_max_ms(),
        }
    }
}

impl OrchestratorConfig {
    /// Deadline for a single generator call.
    pub fn generator_timeout(&self) -> Duration {
        Duration::from_millis(self.generator_timeout_ms)
    }

    /// Deadline for the whole attempt chain.
    pub fn wall_clock_budget(&self) -> Duration {
        Duration::from_millis(self.wall_clock_budget_ms)
    }
}

/// Profile acceptance bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Youngest supported subject
    #[serde(default = "default_min_age")]
    pub min_age: u8,

    /// Oldest supported subject
    #[serde(default = "default_max_age")]
    pub max_age: u8,

    /// Longest accepted name
    #[serde(default = "default_max_name_chars")]
    pub max_name_chars: usize,

    /// Most interests accepted
    #[serde(default = "default_max_interests")]
    pub max_interests: usize,
}

fn default_min_age() -> u8 {
    3
}

fn default_max_age() -> u8 {
    10
}

fn default_max_name_chars() -> usize {
    40
}

fn default_max_interests() -> usize {
    12
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            min_age: default_min_age(),
            max_age: default_max_age(),
            max_name_chars: default_max_name_chars(),
            max_interests: default_max_interests(),
        }
    }
}

/// Output contract tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Slack around the word band before a page is flagged
    #[serde(default = "default_length_tolerance_percent")]
    pub length_tolerance_percent: u8,

    /// The name must appear at least once per this many pages on average
    #[serde(default = "default_pages_per_name_mention")]
    pub pages_per_name_mention: usize,

    /// Distinct pages an interest must drive the plot on
    #[serde(default = "default_min_interest_pages")]
    pub min_interest_pages: usize,

    /// Required start of every illustration prompt; `{name}` is substituted
    #[serde(default = "default_illustration_opener")]
    pub illustration_opener: String,

    /// Required end of every illustration prompt
    #[serde(default = "default_illustration_style_suffix")]
    pub illustration_style_suffix: String,

    /// Extra regular expression the title must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_pattern: Option<String>,

    /// Longest accepted title
    #[serde(default = "default_max_title_chars")]
    pub max_title_chars: usize,

    /// Shortest single-word exclusion stem that also matches inside longer words
    #[serde(default = "default_min_substring_stem_len")]
    pub min_substring_stem_len: usize,
}

fn default_length_tolerance_percent() -> u8 {
    10
}

fn default_pages_per_name_mention() -> usize {
    3
}

fn default_min_interest_pages() -> usize {
    2
}

fn default_illustration_opener() -> String {
    "A children's storybook illustration of {name}".to_string()
}

fn default_illustration_style_suffix() -> String {
    "Warm watercolor storybook style, soft lighting, safe and joyful mood.".to_string()
}

fn default_max_title_chars() -> usize {
    120
}

fn default_min_substring_stem_len() -> usize {
    4
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            length_tolerance_percent: default_length_tolerance_percent(),
            pages_per_name_mention: default_pages_per_name_mention(),
            min_interest_pages: default_min_interest_pages(),
            illustration_opener: default_illustration_opener(),
            illustration_style_suffix: default_illustration_style_suffix(),
            title_pattern: None,
            max_title_chars: default_max_title_chars(),
            min_substring_stem_len: default_min_substring_stem_len(),
        }
    }
}

impl ValidationConfig {
    /// The illustration opener for a given subject name.
    pub fn opener_for(&self, name: &str) -> String {
        self.illustration_opener.replace("{name}", name)
    }
}

/// Remote generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Output token ceiling
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Messages endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_model() -> String {
    "claude-sonnet-4-5-20250929".to_string()
}

fn default_max_tokens() -> u32 {
    8192
}

fn default_api_url() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
            api_url: default_api_url(),
        }
    }
}
