//! `validate` command handler.

use super::commands::{OutputFormat, ValidateArgs};
use super::{load_config, read_profile};
use fabulist::{
    FabulistResult, FrameworkSelector, JsonError, OutputValidator, ProfileValidator, RawCandidate,
};

/// Validate a saved story. Returns 1 when the story fails, 0 when it passes.
pub fn run_validate(args: ValidateArgs) -> FabulistResult<usize> {
    let config = load_config(args.config.as_deref())?;
    let profile = ProfileValidator::new(config.profile.clone())
        .with_lexicon(&config.lexicon, config.validation.min_substring_stem_len)
        .validate(read_profile(&args.profile)?)?;
    let framework = args
        .framework
        .unwrap_or_else(|| FrameworkSelector::default().select(&profile));

    let text = std::fs::read_to_string(&args.story)
        .map_err(|e| JsonError::new(format!("{}: {}", args.story.display(), e)))?;
    let validator = OutputValidator::new(&config)?;
    let (_, report) = validator.validate_raw(&RawCandidate::new(text), &profile, framework);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            if report.pass() {
                println!("PASS: {} ({})", args.story.display(), framework);
            } else {
                println!(
                    "FAIL: {} ({}), {} violation(s)",
                    args.story.display(),
                    framework,
                    report.violations().len()
                );
                for violation in report.violations() {
                    println!("  {}", violation);
                }
            }
        }
    }

    Ok(usize::from(!report.pass()))
}
