//! Model discovery from `llm models` output.
//!
//! The tool prints one model per line:
//!
//! ```text
//! OpenAI Chat: gpt-4o (aliases: 4o)
//! OpenAI Chat: gpt-4o-mini (aliases: 4o-mini)
//! Anthropic Messages: claude-3-opus-20240229 (aliases: claude-3-opus)
//! ```
//!
//! Model names and aliases are both selectable, so both end up in the list.

use std::collections::BTreeSet;

use crate::config::LlmCliConfig;
use crate::runner::{CommandOutput, CommandRunner, CommandSpec};

/// Models offered when the tool cannot be queried.
pub const FALLBACK_MODELS: [&str; 4] = [
    "gpt-4-turbo-preview",
    "gpt-3.5-turbo",
    "claude-3-opus",
    "claude-3-sonnet",
];

const ALIASES_MARKER: &str = "aliases:";

/// Outcome of model discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelDiscovery {
    /// Models parsed from the tool's listing.
    Discovered(Vec<String>),
    /// The tool could not be queried; the built-in list is used instead.
    Fallback {
        /// The sorted [`FALLBACK_MODELS`].
        models: Vec<String>,
        /// Why discovery failed.
        reason: String,
    },
}

impl ModelDiscovery {
    /// Creates a fallback outcome with the built-in model list.
    #[must_use]
    pub fn fallback(reason: impl Into<String>) -> Self {
        let models: BTreeSet<String> = FALLBACK_MODELS.iter().map(|m| (*m).to_string()).collect();
        Self::Fallback {
            models: models.into_iter().collect(),
            reason: reason.into(),
        }
    }

    /// Returns the model names, sorted and duplicate-free.
    #[must_use]
    pub fn models(&self) -> &[String] {
        match self {
            Self::Discovered(models) | Self::Fallback { models, .. } => models,
        }
    }

    /// Consumes the outcome, returning the model names.
    #[must_use]
    pub fn into_models(self) -> Vec<String> {
        match self {
            Self::Discovered(models) | Self::Fallback { models, .. } => models,
        }
    }

    /// Returns true if the built-in list was used.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Parses `llm models` output into sorted, duplicate-free model names.
///
/// Lines without a `:` are skipped, as are entries whose name is empty. Every
/// non-empty alias is returned alongside its model.
///
/// ```
/// use llm_bridge_cli::discovery::parse_model_listing;
///
/// let models = parse_model_listing("OpenAI Chat: gpt-4o (aliases: 4o, gpt4o)\nnot a model");
/// assert_eq!(models, ["4o", "gpt-4o", "gpt4o"]);
/// ```
#[must_use]
pub fn parse_model_listing(listing: &str) -> Vec<String> {
    let mut models = BTreeSet::new();

    for line in listing.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let Some((_provider, model_info)) = line.split_once(':') else {
            continue;
        };

        let model_info = model_info.trim();
        let (name, annotation) = match model_info.split_once(" (") {
            Some((name, annotation)) => (name.trim(), Some(annotation)),
            None => (model_info, None),
        };

        if name.is_empty() {
            continue;
        }
        models.insert(name.to_string());

        let aliases = annotation
            .and_then(|annotation| annotation.split_once(ALIASES_MARKER))
            .map(|(_, aliases)| aliases.trim_matches(|c: char| c == ' ' || c == ')'));

        if let Some(aliases) = aliases {
            models.extend(
                aliases
                    .split(',')
                    .map(str::trim)
                    .filter(|alias| !alias.is_empty())
                    .map(str::to_string),
            );
        }
    }

    models.into_iter().collect()
}

/// Runs the listing subcommand and parses its output.
///
/// Never fails: any error is logged and turned into [`ModelDiscovery::Fallback`].
pub async fn discover_models(runner: &dyn CommandRunner, config: &LlmCliConfig) -> ModelDiscovery {
    let command = CommandSpec::new(&config.executable).arg(&config.models_subcommand);

    let listing = match runner.run(&command).await.and_then(CommandOutput::into_stdout) {
        Ok(listing) => listing,
        Err(err) => {
            tracing::warn!(
                executable = %config.executable,
                error = %err,
                "Error fetching models, using fallback list"
            );
            return ModelDiscovery::fallback(err.to_string());
        }
    };

    let models = parse_model_listing(&listing);
    tracing::debug!(count = models.len(), "discovered llm CLI models");
    ModelDiscovery::Discovered(models)
}
