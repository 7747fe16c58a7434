//! Provider plugin exposing the [`llm`](https://llm.datasette.io) command-line
//! tool as a model backend.
//!
//! When added to a [`Host`](llm_bridge_host::Host), [`LlmCliPlugin`] runs
//! `llm models` to discover the installed models and registers itself with the
//! [`ProviderRegistry`](llm_bridge_host::ProviderRegistry) under
//! [`PROVIDER_NAME`].
//!
//! Each completion runs `llm prompt -m <model> ...` as a child process. The
//! temperature, token limit and (for chat-style requests) the JSON message list
//! are passed in the child's environment only, so concurrent requests never
//! observe each other's parameters.
//!
//! # Usage
//!
//! ```no_run
//! use llm_bridge_cli::{LlmCliConfig, LlmCliPlugin, PROVIDER_NAME};
//! use llm_bridge_host::{CompletionRequest, Host, TracingPlugin};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut host = Host::new();
//! host.add_plugins(TracingPlugin::default());
//! host.add_plugins(LlmCliPlugin::new(LlmCliConfig::from_env()));
//! host.finish()?;
//!
//! let provider = host.registry().handle(PROVIDER_NAME)?;
//! let text = provider
//!     .complete(CompletionRequest::new("Say hello", "gpt-4o-mini").temperature(0.2))
//!     .await;
//!
//! if llm_bridge_host::is_error_text(&text) {
//!     eprintln!("{text}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LLM_CLI_EXECUTABLE` | `llm` | Program to run |
//! | `LLM_CLI_TIMEOUT_SECS` | unset | Kill the tool after this many seconds |

mod config;
pub mod discovery;
mod error;
pub mod invocation;
mod plugin;
mod provider;
pub mod runner;
mod schema;

pub use config::{EXECUTABLE_ENV, LlmCliConfig, TIMEOUT_ENV};
pub use discovery::{FALLBACK_MODELS, ModelDiscovery, discover_models, parse_model_listing};
pub use error::CliError;
pub use plugin::{LlmCliPlugin, PROVIDER_EMOJI, PROVIDER_NAME};
pub use provider::LlmCliProvider;
pub use runner::{CommandOutput, CommandRunner, CommandSpec, ProcessRunner};
pub use schema::settings_schema;
