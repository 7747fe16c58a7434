//! `llm` CLI provider plugin.

use std::sync::Arc;

use llm_bridge_host::plugin::Plugin;
use llm_bridge_host::{Host, ProviderSpec, RateLimit};

use crate::config::LlmCliConfig;
use crate::discovery::{ModelDiscovery, discover_models};
use crate::provider::LlmCliProvider;
use crate::runner::{CommandRunner, ProcessRunner};
use crate::schema::settings_schema;

/// Display name the provider registers under.
pub const PROVIDER_NAME: &str = "llm CLI";

/// Icon shown next to the provider name.
pub const PROVIDER_EMOJI: &str = "🚀";

/// Plugin registering the `llm` CLI as a provider.
///
/// Models are discovered by running `llm models` while the host builds,
/// unless a [`ModelDiscovery`] is supplied up front. Discovery failures are
/// logged during build, so add a `TracingPlugin` before this plugin.
///
/// ```no_run
/// use llm_bridge_cli::{LlmCliPlugin, PROVIDER_NAME};
/// use llm_bridge_host::{Host, TracingPlugin};
///
/// let mut host = Host::new();
/// host.add_plugins(TracingPlugin::default());
/// host.add_plugins(LlmCliPlugin::from_env());
/// host.finish().unwrap();
///
/// let provider = host.registry().handle(PROVIDER_NAME).unwrap();
/// println!("{:?}", provider.models());
/// ```
pub struct LlmCliPlugin {
    config: LlmCliConfig,
    runner: Arc<dyn CommandRunner>,
    discovery: Option<ModelDiscovery>,
}

impl core::fmt::Debug for LlmCliPlugin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LlmCliPlugin")
            .field("config", &self.config)
            .field("discovery", &self.discovery)
            .finish_non_exhaustive()
    }
}

impl LlmCliPlugin {
    /// Creates a plugin spawning real processes with the given configuration.
    #[must_use]
    pub fn new(config: LlmCliConfig) -> Self {
        let runner = ProcessRunner::new().with_timeout(config.timeout());
        Self {
            config,
            runner: Arc::new(runner),
            discovery: None,
        }
    }

    /// Creates a plugin configured from the process environment.
    ///
    /// See [`LlmCliConfig::from_env`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(LlmCliConfig::from_env())
    }

    /// Replaces the process runner.
    #[must_use]
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Uses a known model list instead of running discovery during build.
    #[must_use]
    pub fn with_discovery(mut self, discovery: ModelDiscovery) -> Self {
        self.discovery = Some(discovery);
        self
    }

    /// Runs discovery from synchronous code.
    ///
    /// Plugin builds are synchronous, so discovery gets a dedicated thread and
    /// a current-thread runtime; this also works when called from inside
    /// another runtime. The caller's subscriber is carried onto that thread.
    fn discover_blocking(&self) -> ModelDiscovery {
        let dispatch = tracing::dispatcher::get_default(tracing::Dispatch::clone);

        std::thread::scope(|s| {
            s.spawn(|| {
                tracing::dispatcher::with_default(&dispatch, || {
                    match tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                    {
                        Ok(rt) => {
                            rt.block_on(discover_models(self.runner.as_ref(), &self.config))
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "failed to start runtime for model discovery");
                            ModelDiscovery::fallback(format!("failed to start runtime: {err}"))
                        }
                    }
                })
            })
            .join()
            .unwrap_or_else(|_| ModelDiscovery::fallback("model discovery thread panicked"))
        })
    }
}

impl Default for LlmCliPlugin {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Plugin for LlmCliPlugin {
    fn build(&self, host: &mut Host) {
        let discovery = match &self.discovery {
            Some(discovery) => discovery.clone(),
            None => self.discover_blocking(),
        };

        if let ModelDiscovery::Fallback { reason, .. } = &discovery {
            tracing::warn!(%reason, "llm CLI provider registered with fallback models");
        }

        let spec = ProviderSpec::new(PROVIDER_NAME)
            .emoji(PROVIDER_EMOJI)
            .models(discovery.into_models())
            .rate_limit(RateLimit::Sequential)
            .settings_schema(settings_schema());

        let provider = LlmCliProvider::with_runner(self.config.clone(), Arc::clone(&self.runner));

        let Some(registry) = host.registry_mut() else {
            panic!("ProviderRegistry is not writable. LlmCliPlugin must be built by Host::finish().");
        };

        registry.register_provider(spec, Arc::new(provider));
    }
}
