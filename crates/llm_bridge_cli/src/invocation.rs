//! Translation of completion requests into `llm prompt` invocations.

use llm_bridge_host::{ChatMessage, CompletionRequest};

use crate::config::LlmCliConfig;
use crate::error::CliError;
use crate::runner::CommandSpec;

/// Model used when the request does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// Temperature used when the request does not set one.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Token limit used when the request does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Returns the message list for chat-style requests.
///
/// A request is chat-style when it carries a non-empty system prompt or any
/// history. The list is the system message (if any), the history in order,
/// then the new prompt as a `user` message. Plain requests return `None`.
#[must_use]
pub fn chat_messages(request: &CompletionRequest) -> Option<Vec<ChatMessage>> {
    let system = request.system.as_deref().filter(|system| !system.is_empty());

    if system.is_none() && request.chat_history.is_empty() {
        return None;
    }

    let mut messages = Vec::with_capacity(request.chat_history.len() + 2);
    messages.extend(system.map(ChatMessage::system));
    messages.extend(request.chat_history.iter().cloned());
    messages.push(ChatMessage::user(&request.prompt));
    Some(messages)
}

/// Renders a temperature the way the tool has always received it (`0.7`, `1.0`).
#[must_use]
pub fn format_temperature(temperature: f64) -> String {
    format!("{temperature:?}")
}

/// Builds the `llm prompt` command for a request.
///
/// Sampling parameters travel in the child's environment. Chat-style requests
/// pass the serialized message list through [`LlmCliConfig::messages_env`];
/// plain requests pass the prompt as the final argument, unchanged.
///
/// # Errors
///
/// Returns [`CliError::Serialize`] if the message list cannot be serialized.
pub fn build_completion_command(
    config: &LlmCliConfig,
    request: &CompletionRequest,
) -> Result<CommandSpec, CliError> {
    let model = if request.model.is_empty() {
        DEFAULT_MODEL
    } else {
        request.model.as_str()
    };
    let temperature = request.temperature.unwrap_or(DEFAULT_TEMPERATURE);
    let max_tokens = request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);

    let command = CommandSpec::new(&config.executable)
        .arg(&config.prompt_subcommand)
        .arg(&config.model_flag)
        .arg(model)
        .env(&config.temperature_env, format_temperature(temperature))
        .env(&config.max_tokens_env, max_tokens.to_string());

    let command = match chat_messages(request) {
        Some(messages) => {
            let payload = serde_json::to_string(&messages)?;
            command
                .env(&config.messages_env, payload)
                .arg(&config.messages_flag)
                .arg(&config.messages_env)
        }
        None => command.arg(&request.prompt),
    };

    Ok(command)
}
