//! Command-line front end for the `llm` CLI provider.
//!
//! # Usage
//!
//! ```bash
//! llm-bridge models
//! llm-bridge schema
//! llm-bridge prompt -m gpt-4o-mini --temperature 0.2 "Say hello"
//! llm-bridge prompt -m claude-3-opus --system "Be terse." "What is Rust?"
//! ```

#![expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "command-line output"
)]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use llm_bridge_cli::{LlmCliConfig, LlmCliPlugin, PROVIDER_NAME};
use llm_bridge_host::{CompletionRequest, Host, TracingFormat, TracingPlugin, is_error_text};
use tracing::Level;

#[derive(Parser)]
#[command(name = "llm-bridge")]
#[command(about = "Run prompts through the llm command-line tool")]
struct Args {
    /// Program to run instead of `llm` (overrides LLM_CLI_EXECUTABLE)
    #[arg(long, global = true)]
    executable: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the models the provider registered
    Models,
    /// Print the provider's settings schema as JSON
    Schema,
    /// Run a single prompt
    Prompt {
        /// Model identifier
        #[arg(short, long, default_value = "gpt-4-turbo-preview")]
        model: String,
        /// Sampling temperature
        #[arg(short, long)]
        temperature: Option<f64>,
        /// System prompt
        #[arg(short, long)]
        system: Option<String>,
        /// Maximum tokens to generate
        #[arg(long)]
        max_tokens: Option<u32>,
        /// Prompt text
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let mut config = LlmCliConfig::from_env();
    if let Some(executable) = args.executable {
        config.executable = executable;
    }

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };

    let mut host = Host::new();
    host.add_plugins(
        TracingPlugin::new()
            .with_level(level)
            .with_format(TracingFormat::Compact),
    );
    host.add_plugins(LlmCliPlugin::new(config));
    if let Err(err) = host.finish() {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    let provider = match host.registry().handle(PROVIDER_NAME) {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match args.command {
        Command::Models => {
            for model in provider.models() {
                println!("{model}");
            }
            ExitCode::SUCCESS
        }
        Command::Schema => match serde_json::to_string_pretty(&provider.spec().settings_schema) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Error: {err}");
                ExitCode::FAILURE
            }
        },
        Command::Prompt {
            model,
            temperature,
            system,
            max_tokens,
            prompt,
        } => {
            let mut request = CompletionRequest::new(prompt, model);
            request.temperature = temperature;
            request.system = system;
            request.max_tokens = max_tokens;

            let text = provider.complete(request).await;
            if is_error_text(&text) {
                eprintln!("{text}");
                ExitCode::FAILURE
            } else {
                println!("{text}");
                ExitCode::SUCCESS
            }
        }
    }
}
