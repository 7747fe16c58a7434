//! Provider registry.

use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Serialize, Serializer};

use crate::error::RegistryError;
use crate::provider::CompletionProvider;
use crate::request::CompletionRequest;
use crate::settings::SettingsSchema;

/// How the host should pace calls into a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateLimit {
    /// One call at a time.
    #[default]
    Sequential,
    /// At most this many requests per minute.
    RequestsPerMinute(u32),
}

impl Serialize for RateLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Sequential => serializer.serialize_str("sequential"),
            Self::RequestsPerMinute(limit) => serializer.serialize_u32(*limit),
        }
    }
}

/// Everything the host needs to present a provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSpec {
    /// Display name, also the registry key.
    pub name: String,
    /// Icon shown next to the name.
    pub emoji: String,
    /// Selectable model names.
    pub models: Vec<String>,
    /// Pacing hint for the host's scheduler.
    pub rate_limit: RateLimit,
    /// User-tunable settings.
    pub settings_schema: SettingsSchema,
}

impl ProviderSpec {
    /// Creates a spec with no models, no icon and an empty settings schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: String::new(),
            models: Vec::new(),
            rate_limit: RateLimit::default(),
            settings_schema: SettingsSchema::default(),
        }
    }

    /// Sets the icon.
    #[must_use]
    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    /// Sets the model list.
    #[must_use]
    pub fn models(mut self, models: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the rate-limit hint.
    #[must_use]
    pub fn rate_limit(mut self, rate_limit: RateLimit) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Sets the settings schema.
    #[must_use]
    pub fn settings_schema(mut self, schema: SettingsSchema) -> Self {
        self.settings_schema = schema;
        self
    }
}

/// A handle to a registered provider.
///
/// Created via [`ProviderRegistry::handle()`].
#[derive(Clone)]
pub struct ProviderHandle {
    spec: Arc<ProviderSpec>,
    provider: Arc<dyn CompletionProvider>,
}

impl core::fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("name", &self.spec.name)
            .finish_non_exhaustive()
    }
}

impl ProviderHandle {
    /// Returns the provider's spec.
    #[must_use]
    pub fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Returns the selectable model names.
    #[must_use]
    pub fn models(&self) -> &[String] {
        &self.spec.models
    }

    /// Runs a completion. Failures come back as `Error: ...` text.
    pub async fn complete(&self, request: CompletionRequest) -> String {
        self.provider.complete(request).await
    }
}

/// Registry of provider implementations, keyed by display name.
///
/// Provider plugins register during their `build()` phase, when the registry
/// is reachable through [`Host::registry_mut`](crate::Host::registry_mut).
/// After the host finishes, the registry is read-only.
///
/// ```
/// # use llm_bridge_host::{CompletionProvider, CompletionRequest, Host, ProviderSpec};
/// # use llm_bridge_host::plugin::Plugin;
/// # use async_trait::async_trait;
/// # use std::sync::Arc;
/// struct Echo;
///
/// #[async_trait]
/// impl CompletionProvider for Echo {
///     async fn complete(&self, request: CompletionRequest) -> String {
///         request.prompt
///     }
/// }
///
/// struct EchoPlugin;
///
/// impl Plugin for EchoPlugin {
///     fn build(&self, host: &mut Host) {
///         let Some(registry) = host.registry_mut() else {
///             panic!("EchoPlugin must be built by Host::finish()");
///         };
///         registry.register_provider(ProviderSpec::new("echo").models(["echo-1"]), Arc::new(Echo));
///     }
/// }
///
/// let mut host = Host::new();
/// host.add_plugins(EchoPlugin);
/// host.finish().unwrap();
/// assert_eq!(host.registry().handle("echo").unwrap().models(), ["echo-1"]);
/// ```
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderHandle>,
}

impl core::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.provider_names())
            .finish()
    }
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under `spec.name`.
    ///
    /// # Panics
    ///
    /// Panics if a provider with the same name is already registered.
    pub fn register_provider<P: CompletionProvider>(&mut self, spec: ProviderSpec, provider: Arc<P>) {
        let name = spec.name.clone();
        assert!(
            !self.providers.contains_key(&name),
            "Provider '{name}' is already registered"
        );

        tracing::info!(
            provider = %name,
            models = spec.models.len(),
            rate_limit = ?spec.rate_limit,
            "registered provider"
        );

        self.providers.insert(
            name,
            ProviderHandle {
                spec: Arc::new(spec),
                provider: provider as Arc<dyn CompletionProvider>,
            },
        );
    }

    /// Returns a handle to a provider.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownProvider`] if no provider has this name.
    pub fn handle(&self, name: impl AsRef<str>) -> Result<ProviderHandle, RegistryError> {
        let name = name.as_ref();
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownProvider(name.to_string()))
    }

    /// Returns a provider's spec.
    #[must_use]
    pub fn spec(&self, name: impl AsRef<str>) -> Option<&ProviderSpec> {
        self.providers.get(name.as_ref()).map(ProviderHandle::spec)
    }

    /// Checks if a provider is registered.
    #[must_use]
    pub fn has_provider(&self, name: impl AsRef<str>) -> bool {
        self.providers.contains_key(name.as_ref())
    }

    /// Lists registered provider names, sorted.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}
