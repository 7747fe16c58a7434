//! `llm` CLI [`CompletionProvider`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use llm_bridge_host::{CompletionProvider, CompletionRequest, error_text};

use crate::config::LlmCliConfig;
use crate::discovery::{ModelDiscovery, discover_models};
use crate::error::CliError;
use crate::invocation::build_completion_command;
use crate::runner::{CommandRunner, ProcessRunner};

/// Serves completions by running the `llm` tool once per request.
#[derive(Clone)]
pub struct LlmCliProvider {
    config: LlmCliConfig,
    runner: Arc<dyn CommandRunner>,
}

impl core::fmt::Debug for LlmCliProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LlmCliProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LlmCliProvider {
    /// Creates a provider spawning real processes.
    #[must_use]
    pub fn new(config: LlmCliConfig) -> Self {
        let runner = ProcessRunner::new().with_timeout(config.timeout());
        Self::with_runner(config, Arc::new(runner))
    }

    /// Creates a provider using a custom runner.
    #[must_use]
    pub fn with_runner(config: LlmCliConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &LlmCliConfig {
        &self.config
    }

    /// Lists the models the tool knows about.
    pub async fn discover_models(&self) -> ModelDiscovery {
        discover_models(self.runner.as_ref(), &self.config).await
    }

    /// Runs one completion, returning trimmed stdout.
    ///
    /// # Errors
    ///
    /// - [`CliError::Invocation`] if the tool exits unsuccessfully
    /// - [`CliError::Spawn`] if the tool cannot be started
    /// - [`CliError::Serialize`] if the message list cannot be serialized
    /// - [`CliError::TimedOut`] if the configured timeout elapses
    pub async fn try_complete(&self, request: &CompletionRequest) -> Result<String, CliError> {
        let command = build_completion_command(&self.config, request)?;
        let stdout = self.runner.run(&command).await?.into_stdout()?;
        Ok(stdout.trim().to_string())
    }
}

#[async_trait]
impl CompletionProvider for LlmCliProvider {
    async fn complete(&self, request: CompletionRequest) -> String {
        match self.try_complete(&request).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(
                    model = %request.model,
                    invocation_failure = err.is_invocation_failure(),
                    "{err}"
                );
                error_text(err)
            }
        }
    }
}
