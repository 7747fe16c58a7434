//! Host plugin contract and provider registry for `llm_bridge`.
//!
//! A host application (a prompt-engineering or evaluation tool) exposes model
//! backends to its users through *providers*. This crate describes the contract
//! between the host and those providers, decoupling the host from any specific
//! backend.
//!
//! # Overview
//!
//! - [`Plugin`](plugin::Plugin): the unit of composition. Provider crates ship a
//!   plugin which registers itself during [`Host::finish`].
//!
//! - [`ProviderRegistry`]: maps provider display names to their
//!   [`ProviderSpec`] (models, icon, rate-limit hint, settings schema) and the
//!   [`CompletionProvider`] that serves requests.
//!
//! - [`SettingsSchema`]: a declarative description of user-tunable settings,
//!   rendered by the host's form UI.
//!
//! # Example
//!
//! ```ignore
//! use llm_bridge_host::{CompletionRequest, Host};
//!
//! let mut host = Host::new();
//! host.add_plugins(MyProviderPlugin::default());
//! host.finish()?;
//!
//! let provider = host.registry().handle("my provider")?;
//! let text = provider
//!     .complete(CompletionRequest::new("Say hello", "some-model"))
//!     .await;
//! ```

pub mod error;
pub mod host;
pub mod plugin;
mod provider;
mod registry;
mod request;
mod settings;
mod tracing_plugin;

pub use error::{HostError, RegistryError, RequestError};
pub use host::Host;
pub use provider::{CompletionProvider, ERROR_PREFIX, error_text, is_error_text};
pub use registry::{ProviderHandle, ProviderRegistry, ProviderSpec, RateLimit};
pub use request::{ChatMessage, CompletionRequest};
pub use settings::{SettingField, SettingKind, SettingsSchema, SettingsSchemaBuilder, UiHint};
pub use tracing_plugin::{TracingFormat, TracingPlugin};
