//! Process execution seam.
//!
//! Command construction produces a [`CommandSpec`]; a [`CommandRunner`] turns
//! it into a [`CommandOutput`]. [`ProcessRunner`] spawns real processes, tests
//! substitute scripted runners.

use core::time::Duration;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::CliError;

/// One invocation of an external program.
///
/// `env` is applied to the child process only; the parent environment is
/// never modified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandSpec {
    /// Program to run.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Extra environment variables for the child.
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    /// Creates a spec with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets a child environment variable, replacing an earlier value.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.env.retain(|(existing, _)| *existing != key);
        self.env.push((key, value.into()));
        self
    }

    /// Returns the value of a child environment variable.
    #[must_use]
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v.as_str()))
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` if the process was killed by a signal.
    pub status: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Creates a successful output.
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Creates a failed output with the given exit code.
    #[must_use]
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Returns true if the process exited with status 0.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }

    /// Returns stdout on success, or an [`CliError::Invocation`] carrying stderr.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Invocation`] for any non-zero or missing exit code.
    pub fn into_stdout(self) -> Result<String, CliError> {
        if self.is_success() {
            Ok(self.stdout)
        } else {
            Err(CliError::Invocation {
                status: self.status,
                stderr: self.stderr,
            })
        }
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs a [`CommandSpec`] to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync + 'static {
    /// Runs the command and captures its output.
    ///
    /// A non-zero exit is *not* an error here; see [`CommandOutput::into_stdout`].
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, CliError>;
}

/// [`CommandRunner`] spawning real processes with `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Creates a runner without a timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Kills processes that run longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CliError> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(
            program = %spec.program,
            args = ?spec.args,
            env = ?spec.env.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            "spawning llm CLI"
        );

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| CliError::TimedOut(limit))??,
            None => command.output().await?,
        };

        let output = CommandOutput::from(output);
        tracing::debug!(
            program = %spec.program,
            status = ?output.status,
            stdout_bytes = output.stdout.len(),
            "llm CLI exited"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_replaces_earlier_values() {
        let spec = CommandSpec::new("llm").env("A", "1").env("B", "2").env("A", "3");
        assert_eq!(spec.env_var("A"), Some("3"));
        assert_eq!(spec.env_var("B"), Some("2"));
        assert_eq!(spec.env.len(), 2);
        assert_eq!(spec.env_var("C"), None);
    }

    #[test]
    fn into_stdout_maps_status() {
        assert_eq!(
            CommandOutput::success("ok").into_stdout().unwrap(),
            "ok"
        );

        let err = CommandOutput::failure(2, "boom").into_stdout().unwrap_err();
        assert!(matches!(
            err,
            CliError::Invocation { status: Some(2), ref stderr } if stderr == "boom"
        ));
    }

    #[test]
    fn signal_termination_is_a_failure() {
        let output = CommandOutput {
            status: None,
            stdout: "partial".to_string(),
            stderr: String::new(),
        };
        assert!(!output.is_success());
        assert!(output.into_stdout().is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn process_runner_captures_output_and_env() {
        let spec = CommandSpec::new("sh")
            .arg("-c")
            .arg("printf '%s' \"$BRIDGE_TEST_VALUE\"; printf 'warn' >&2")
            .env("BRIDGE_TEST_VALUE", "scoped");

        let output = ProcessRunner::new().run(&spec).await.unwrap();

        assert!(output.is_success());
        assert_eq!(output.stdout, "scoped");
        assert_eq!(output.stderr, "warn");
        assert!(std::env::var("BRIDGE_TEST_VALUE").is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn process_runner_reports_exit_code() {
        let spec = CommandSpec::new("sh").arg("-c").arg("echo nope >&2; exit 3");
        let output = ProcessRunner::new().run(&spec).await.unwrap();
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stderr, "nope\n");
    }

    #[tokio::test]
    async fn process_runner_missing_binary_is_spawn_error() {
        let spec = CommandSpec::new("definitely-not-an-installed-llm-binary");
        let err = ProcessRunner::new().run(&spec).await.unwrap_err();
        assert!(matches!(err, CliError::Spawn(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn process_runner_times_out() {
        let spec = CommandSpec::new("sh").arg("-c").arg("sleep 5");
        let err = ProcessRunner::new()
            .with_timeout(Some(Duration::from_millis(50)))
            .run(&spec)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::TimedOut(_)));
    }
}
