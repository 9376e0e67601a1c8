//! Offline generator that replays recorded responses.

use async_trait::async_trait;
use fabulist_core::{Prompt, RawCandidate};
use fabulist_error::{FabulistResult, GeneratorError, GeneratorErrorKind};
use fabulist_interface::StoryGenerator;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Replays recorded generator responses in order.
///
/// Each call returns the next response; once they run out the last one
/// repeats. Prompts are ignored. A counter is shared across every request
/// using the same generator, so concurrent requests interleave through one
/// sequence.
///
/// # Examples
///
/// ```
/// use fabulist_core::{Framework, Prompt};
/// use fabulist_interface::StoryGenerator;
/// use fabulist_models::ReplayGenerator;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let replay = ReplayGenerator::new(vec!["first".to_string(), "second".to_string()])?;
/// let prompt = Prompt::builder()
///     .system("rules")
///     .user("story")
///     .attempt(1u32)
///     .framework(Framework::Builder)
///     .build()?;
///
/// assert_eq!(replay.generate(&prompt).await?.as_str(), "first");
/// assert_eq!(replay.generate(&prompt).await?.as_str(), "second");
/// assert_eq!(replay.generate(&prompt).await?.as_str(), "second");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReplayGenerator {
    responses: Vec<String>,
    source: String,
    next: AtomicUsize,
}

impl ReplayGenerator {
    /// Replay the given responses.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` with `Rejected` when `responses` is empty.
    pub fn new(responses: Vec<String>) -> FabulistResult<Self> {
        Self::with_source(responses, "memory")
    }

    /// Replay every file in `dir`, in file name order.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` with `Rejected` when the directory cannot be
    /// read or holds no files.
    #[tracing::instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn from_dir(dir: impl AsRef<Path>) -> FabulistResult<Self> {
        let dir = dir.as_ref();
        let rejected = |e: std::io::Error| {
            GeneratorError::new(GeneratorErrorKind::Rejected(format!(
                "cannot read replay directory {}: {}",
                dir.display(),
                e
            )))
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(rejected)? {
            let path = entry.map_err(rejected)?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let responses = paths
            .iter()
            .map(std::fs::read_to_string)
            .collect::<Result<Vec<_>, _>>()
            .map_err(rejected)?;

        tracing::info!(responses = responses.len(), "Loaded replay responses");
        Self::with_source(responses, dir.display().to_string())
    }

    fn with_source(responses: Vec<String>, source: impl Into<String>) -> FabulistResult<Self> {
        let source = source.into();
        if responses.is_empty() {
            return Err(GeneratorError::new(GeneratorErrorKind::Rejected(format!(
                "no recorded responses in {}",
                source
            )))
            .into());
        }
        Ok(Self {
            responses,
            source,
            next: AtomicUsize::new(0),
        })
    }

    /// Number of recorded responses.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Always false; an empty replay cannot be built.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[async_trait]
impl StoryGenerator for ReplayGenerator {
    async fn generate(&self, prompt: &Prompt) -> FabulistResult<RawCandidate> {
        let call = self.next.fetch_add(1, Ordering::SeqCst);
        let index = call.min(self.responses.len() - 1);
        tracing::debug!(attempt = prompt.attempt(), index, "Replaying response");
        Ok(RawCandidate::new(self.responses[index].clone()))
    }

    fn provider_name(&self) -> &'static str {
        "replay"
    }

    fn model_name(&self) -> &str {
        &self.source
    }
}
