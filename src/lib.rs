//! Exposes the `llm` command-line tool as a model provider for a pluggable host.
//!
//! [`host`] defines the plugin and provider registry contract; [`cli`] ships
//! the plugin that discovers models and runs completions through `llm`.

pub use llm_bridge_cli as cli;
pub use llm_bridge_host as host;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use llm_bridge_cli::{LlmCliConfig, LlmCliPlugin, LlmCliProvider, ModelDiscovery, PROVIDER_NAME};
    pub use llm_bridge_host::{
        CompletionProvider, CompletionRequest, ChatMessage, Host, ProviderHandle, TracingPlugin,
        is_error_text,
    };
    pub use llm_bridge_host::plugin::Plugin;
}
