//! The [`CompletionProvider`] trait for model backends.

use crate::request::CompletionRequest;
use async_trait::async_trait;

/// Prefix the host uses to recognise a failed completion.
pub const ERROR_PREFIX: &str = "Error: ";

/// Trait implemented by providers to serve completion requests.
///
/// The host contract is text in, text out: a provider never returns an error
/// to the host. Failures are rendered as text starting with [`ERROR_PREFIX`]
/// (see [`error_text`]).
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Runs one completion and returns the generated text or an error text.
    async fn complete(&self, request: CompletionRequest) -> String;
}

/// Renders an error in the host's text form, `Error: <message>`.
#[must_use]
pub fn error_text(error: impl core::fmt::Display) -> String {
    format!("{ERROR_PREFIX}{error}")
}

/// Returns true if a completion result is an error text.
#[must_use]
pub fn is_error_text(text: &str) -> bool {
    text.starts_with(ERROR_PREFIX)
}
