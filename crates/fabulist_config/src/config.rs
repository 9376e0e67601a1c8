//! Top-level configuration and loading.

use crate::{GeneratorConfig, LexiconConfig, OrchestratorConfig, ProfileConfig, ValidationConfig};
use config::{Config, Environment, File, FileFormat};
use fabulist_error::{ConfigError, FabulistError, FabulistResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Top-level Fabulist configuration.
///
/// # Example
///
/// ```no_run
/// use fabulist_config::FabulistConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FabulistConfig::load()?;
/// println!("Up to {} attempts per story", config.orchestrator.max_attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FabulistConfig {
    /// Repair loop and budgets
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    /// Profile acceptance bounds
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Output contract tuning
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Word tables
    #[serde(default)]
    pub lexicon: LexiconConfig,

    /// Remote generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl FabulistConfig {
    /// Load configuration from a specific file path, over code defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// [`FabulistConfig::validate`].
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FabulistResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                FabulistError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FabulistError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.finish()
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed or the merged
    /// result fails [`FabulistConfig::validate`].
    #[instrument]
    pub fn load() -> FabulistResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../fabulist.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/fabulist/fabulist.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("fabulist").required(false))
            .add_source(
                Environment::with_prefix("FABULIST")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder
            .build()
            .map_err(|e| {
                FabulistError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FabulistError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.finish()
    }

    fn finish(mut self) -> FabulistResult<Self> {
        self.lexicon = self.lexicon.with_defaults();
        self.validate()?;
        Ok(self)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first bad setting.
    pub fn validate(&self) -> FabulistResult<()> {
        if self.orchestrator.max_attempts == 0 {
            return Err(ConfigError::new("orchestrator.max_attempts must be at least 1").into());
        }
        if self.orchestrator.generator_timeout_ms == 0 || self.orchestrator.wall_clock_budget_ms == 0 {
            return Err(ConfigError::new(
                "orchestrator timeouts must be greater than zero",
            )
            .into());
        }
        if self.profile.min_age > self.profile.max_age {
            return Err(ConfigError::new(format!(
                "profile.min_age ({}) exceeds profile.max_age ({})",
                self.profile.min_age, self.profile.max_age
            ))
            .into());
        }
        if self.validation.length_tolerance_percent > 100 {
            return Err(ConfigError::new(
                "validation.length_tolerance_percent must be at most 100",
            )
            .into());
        }
        if self.validation.pages_per_name_mention == 0 {
            return Err(ConfigError::new(
                "validation.pages_per_name_mention must be at least 1",
            )
            .into());
        }
        if self.validation.illustration_opener.trim().is_empty()
            || self.validation.illustration_style_suffix.trim().is_empty()
        {
            return Err(ConfigError::new(
                "validation.illustration_opener and illustration_style_suffix must not be blank",
            )
            .into());
        }
        Ok(())
    }
}
