//! Framework selection from interests and history.

use fabulist_core::{Framework, SubjectProfile};
use fabulist_validation::{stem, tokenize};
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;

/// Final tie breaker among frameworks with equal score and recency.
pub trait TieBreak: Send + Sync + Debug {
    /// Pick one of `tied`, which is never empty and is in priority order.
    fn choose(&self, tied: &[Framework]) -> Framework;
}

/// Picks the highest-priority framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityTieBreak;

impl TieBreak for PriorityTieBreak {
    fn choose(&self, tied: &[Framework]) -> Framework {
        tied.iter().min().copied().unwrap_or(Framework::ALL[0])
    }
}

/// Chooses the narrative framework for a story.
///
/// Each framework scores one point per pair of interest word and affinity
/// tag that share a stem. The highest score wins. Ties go to the framework
/// used least recently (never-used first), then to the [`TieBreak`].
/// With the default [`PriorityTieBreak`] the choice is deterministic.
///
/// # Examples
///
/// ```
/// use fabulist_config::ProfileConfig;
/// use fabulist_core::{Framework, RawProfile};
/// use fabulist_narrative::FrameworkSelector;
/// use fabulist_validation::ProfileValidator;
///
/// let raw = RawProfile {
///     name: Some("Leo".to_string()),
///     age: Some(5),
///     interests: Some(vec!["trucks".to_string(), "mud".to_string(), "dinosaurs".to_string()]),
///     ..Default::default()
/// };
/// let profile = ProfileValidator::new(ProfileConfig::default()).validate(raw).unwrap();
///
/// assert_eq!(FrameworkSelector::default().select(&profile), Framework::Builder);
/// ```
#[derive(Debug, Clone)]
pub struct FrameworkSelector {
    tie_break: Arc<dyn TieBreak>,
}

impl Default for FrameworkSelector {
    fn default() -> Self {
        Self::new(PriorityTieBreak)
    }
}

impl FrameworkSelector {
    /// Create a selector with a custom final tie breaker.
    pub fn new(tie_break: impl TieBreak + 'static) -> Self {
        Self {
            tie_break: Arc::new(tie_break),
        }
    }

    /// Pick the framework for the next story.
    pub fn select(&self, profile: &SubjectProfile) -> Framework {
        let interest_stems: Vec<String> = profile
            .interests()
            .iter()
            .flat_map(|interest| tokenize(interest))
            .map(|token| stem(&token))
            .collect();

        let scores: Vec<(Framework, usize)> = Framework::ALL
            .iter()
            .map(|framework| (*framework, affinity_score(*framework, &interest_stems)))
            .collect();
        let best = scores.iter().map(|(_, score)| *score).max().unwrap_or(0);
        let tied: Vec<Framework> = scores
            .iter()
            .filter(|(_, score)| *score == best)
            .map(|(framework, _)| *framework)
            .collect();

        tracing::debug!(scores = ?scores, best, "Scored frameworks");

        let chosen = match tied.as_slice() {
            [only] => *only,
            _ => {
                let history = profile.history();
                let last_use = |framework: &Framework| {
                    history
                        .iter()
                        .rposition(|summary| summary.framework() == framework)
                };
                let stalest = tied.iter().map(last_use).min().flatten();
                let least_recent: Vec<Framework> = tied
                    .iter()
                    .filter(|framework| last_use(framework) == stalest)
                    .copied()
                    .collect();
                self.tie_break.choose(&least_recent)
            }
        };

        tracing::debug!(framework = %chosen, "Framework selected");
        chosen
    }
}

fn affinity_score(framework: Framework, interest_stems: &[String]) -> usize {
    let tags: BTreeSet<String> = framework
        .affinity_tags()
        .iter()
        .map(|tag| stem(tag))
        .collect();
    interest_stems
        .iter()
        .filter(|interest| tags.contains(*interest))
        .count()
}
