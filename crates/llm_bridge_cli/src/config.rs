//! Configuration for the `llm` CLI provider.

use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`LlmCliConfig::executable`].
pub const EXECUTABLE_ENV: &str = "LLM_CLI_EXECUTABLE";

/// Environment variable setting [`LlmCliConfig::timeout_secs`].
pub const TIMEOUT_ENV: &str = "LLM_CLI_TIMEOUT_SECS";

/// How to reach and drive the `llm` tool.
///
/// Every field has a default matching the stock `llm` tool, so an empty
/// TOML/JSON table deserializes to [`LlmCliConfig::default()`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmCliConfig {
    /// Program to run. Resolved through `PATH` when not absolute.
    pub executable: String,
    /// Kill the tool if it runs longer than this. `None` waits forever.
    pub timeout_secs: Option<u64>,
    /// Subcommand listing installed models.
    pub models_subcommand: String,
    /// Subcommand running a prompt.
    pub prompt_subcommand: String,
    /// Flag selecting the model.
    pub model_flag: String,
    /// Flag naming the environment variable that holds the message list.
    pub messages_flag: String,
    /// Child environment variable carrying the temperature.
    pub temperature_env: String,
    /// Child environment variable carrying the token limit.
    pub max_tokens_env: String,
    /// Child environment variable carrying the JSON message list.
    pub messages_env: String,
}

impl Default for LlmCliConfig {
    fn default() -> Self {
        Self {
            executable: "llm".to_string(),
            timeout_secs: None,
            models_subcommand: "models".to_string(),
            prompt_subcommand: "prompt".to_string(),
            model_flag: "-m".to_string(),
            messages_flag: "--messages-env".to_string(),
            temperature_env: "LLM_TEMPERATURE".to_string(),
            max_tokens_env: "LLM_MAX_TOKENS".to_string(),
            messages_env: "LLM_MESSAGES".to_string(),
        }
    }
}

impl LlmCliConfig {
    /// Creates a configuration running the given executable.
    #[must_use]
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            ..Self::default()
        }
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads [`EXECUTABLE_ENV`] and [`TIMEOUT_ENV`]; everything else uses defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Unparseable timeouts are logged and ignored.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(executable) = lookup(EXECUTABLE_ENV).filter(|value| !value.trim().is_empty()) {
            config.executable = executable.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.timeout_secs = Some(secs),
                Err(err) => tracing::warn!(
                    variable = TIMEOUT_ENV,
                    value = %raw,
                    error = %err,
                    "ignoring invalid timeout"
                ),
            }
        }

        config
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Returns the timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_stock_tool() {
        let config = LlmCliConfig::default();
        assert_eq!(config.executable, "llm");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.messages_env, "LLM_MESSAGES");
        assert_eq!(config.temperature_env, "LLM_TEMPERATURE");
        assert_eq!(config.max_tokens_env, "LLM_MAX_TOKENS");
    }

    #[test]
    fn lookup_overrides_executable_and_timeout() {
        let config = LlmCliConfig::from_lookup(lookup(&[
            (EXECUTABLE_ENV, " /opt/bin/llm "),
            (TIMEOUT_ENV, "30"),
        ]));
        assert_eq!(config.executable, "/opt/bin/llm");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn invalid_timeout_is_ignored() {
        let config = LlmCliConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")]));
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn blank_executable_keeps_default() {
        let config = LlmCliConfig::from_lookup(lookup(&[(EXECUTABLE_ENV, "  ")]));
        assert_eq!(config.executable, "llm");
    }

    #[test]
    fn deserializes_partial_tables() {
        let config: LlmCliConfig =
            serde_json::from_str(r#"{ "executable": "llm-dev", "timeout_secs": 5 }"#).unwrap();
        assert_eq!(config.executable, "llm-dev");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.prompt_subcommand, "prompt");
    }
}
