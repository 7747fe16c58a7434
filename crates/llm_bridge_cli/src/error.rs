//! Error types for `llm` CLI invocations.

use core::time::Duration;

/// Errors running the `llm` CLI.
///
/// The `Display` form is what the host sees after the `Error: ` prefix, so
/// every variant other than [`Invocation`](Self::Invocation) reads as an
/// unexpected error.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The tool ran and exited unsuccessfully.
    #[error("llm CLI error: {stderr}")]
    Invocation {
        /// Exit code, or `None` if the process was killed by a signal.
        status: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// The tool could not be started (e.g. the binary is not installed).
    #[error("Unexpected error: {0}")]
    Spawn(#[from] std::io::Error),

    /// The message payload could not be serialized.
    #[error("Unexpected error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The tool did not exit within the configured timeout.
    #[error("Unexpected error: llm CLI timed out after {0:?}")]
    TimedOut(Duration),
}

impl CliError {
    /// Returns true if the tool ran but reported failure.
    #[must_use]
    pub fn is_invocation_failure(&self) -> bool {
        matches!(self, Self::Invocation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_failure_embeds_stderr_verbatim() {
        let err = CliError::Invocation {
            status: Some(1),
            stderr: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "llm CLI error: rate limited");
        assert!(err.is_invocation_failure());
    }

    #[test]
    fn spawn_failure_reads_as_unexpected() {
        let err = CliError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "No such file or directory",
        ));
        assert_eq!(err.to_string(), "Unexpected error: No such file or directory");
        assert!(!err.is_invocation_failure());
    }

    #[test]
    fn timeout_reads_as_unexpected() {
        let err = CliError::TimedOut(Duration::from_secs(5));
        assert_eq!(err.to_string(), "Unexpected error: llm CLI timed out after 5s");
    }
}
