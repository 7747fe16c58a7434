//! Completion request types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RequestError;

/// One prior turn of a conversation.
///
/// Roles are free-form and passed to providers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The speaker, e.g. `"user"`, `"assistant"` or `"system"`.
    pub role: String,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a message with an arbitrary role.
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Creates a `system` message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Creates a `user` message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Creates an `assistant` message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// A single completion request from the host.
///
/// Sampling parameters are optional; providers apply their own defaults.
/// Bounds declared in a provider's settings schema are advisory and are not
/// checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The new user prompt.
    pub prompt: String,
    /// The selected model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// System prompt. An empty string is treated as absent by providers.
    pub system: Option<String>,
    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,
    /// Prior conversation turns, oldest first.
    pub chat_history: Vec<ChatMessage>,
}

/// The subset of host settings understood by [`CompletionRequest`].
///
/// Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RequestSettings {
    temperature: Option<f64>,
    system: Option<String>,
    max_tokens: Option<u32>,
    chat_history: Option<Vec<ChatMessage>>,
}

impl CompletionRequest {
    /// Creates a request with no sampling parameters and no history.
    ///
    /// # Example
    ///
    /// ```
    /// use llm_bridge_host::CompletionRequest;
    ///
    /// let request = CompletionRequest::new("Tell me a joke", "gpt-4o")
    ///     .temperature(1.2)
    ///     .system("You are terse.");
    /// assert_eq!(request.system.as_deref(), Some("You are terse."));
    /// ```
    #[must_use]
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            temperature: None,
            system: None,
            max_tokens: None,
            chat_history: Vec::new(),
        }
    }

    /// Builds a request from the host's settings object.
    ///
    /// Reads `temperature`, `system`, `max_tokens` and `chat_history`; all
    /// other keys are ignored. A `null` settings value is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidSettings`] if a known key has the wrong type.
    pub fn from_settings(
        prompt: impl Into<String>,
        model: impl Into<String>,
        settings: &Value,
    ) -> Result<Self, RequestError> {
        let settings = if settings.is_null() {
            RequestSettings::default()
        } else {
            RequestSettings::deserialize(settings)?
        };

        Ok(Self {
            prompt: prompt.into(),
            model: model.into(),
            temperature: settings.temperature,
            system: settings.system,
            max_tokens: settings.max_tokens,
            chat_history: settings.chat_history.unwrap_or_default(),
        })
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Sets the maximum number of tokens to generate.
    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Appends prior conversation turns.
    #[must_use]
    pub fn history(mut self, messages: impl IntoIterator<Item = ChatMessage>) -> Self {
        self.chat_history.extend(messages);
        self
    }
}
