//! Shared test helpers for provider tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::collections::VecDeque;
use std::sync::{Arc, Once};

use async_trait::async_trait;
use llm_bridge_cli::{CliError, CommandOutput, CommandRunner, CommandSpec};
use parking_lot::Mutex;

static INIT: Once = Once::new();

/// Initialize environment variables from `.env` file (once).
pub fn init_env() {
    INIT.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}

/// Log sink for a test subscriber, shared between writer handles.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    /// A plain-text subscriber writing into this buffer at `level` and above.
    pub fn subscriber(&self, level: tracing::Level) -> impl tracing::Subscriber + Send + Sync + use<> {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(level)
            .finish()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// A scripted reply for one invocation.
pub enum Reply {
    Output(CommandOutput),
    NotFound,
}

/// [`CommandRunner`] replaying canned replies and recording every command.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: Mutex<VecDeque<Reply>>,
    commands: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            commands: Mutex::new(Vec::new()),
        })
    }

    /// Runner whose every invocation succeeds with `stdout`.
    pub fn stdout(stdout: &str) -> Arc<Self> {
        Self::new([Reply::Output(CommandOutput::success(stdout))])
    }

    /// Runner whose every invocation exits with `status` and `stderr`.
    pub fn failing(status: i32, stderr: &str) -> Arc<Self> {
        Self::new([Reply::Output(CommandOutput::failure(status, stderr))])
    }

    /// Runner behaving as if the binary is not installed.
    pub fn missing_binary() -> Arc<Self> {
        Self::new([Reply::NotFound])
    }

    /// Commands received so far.
    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.lock().clone()
    }

    /// The most recent command.
    pub fn last_command(&self) -> CommandSpec {
        self.commands
            .lock()
            .last()
            .cloned()
            .expect("runner should have been invoked")
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, CliError> {
        self.commands.lock().push(command.clone());

        // The last reply repeats once the script runs out.
        let mut replies = self.replies.lock();
        let reply = if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().map(|reply| match reply {
                Reply::Output(output) => Reply::Output(output.clone()),
                Reply::NotFound => Reply::NotFound,
            })
        };

        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::NotFound) | None => Err(CliError::Spawn(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No such file or directory (os error 2)",
            ))),
        }
    }
}
