//! Error types for the host, its registry, and request decoding.

/// Error raised while finishing a [`Host`](crate::Host).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HostError {
    /// A plugin declared a dependency that was never added.
    #[error("plugin '{plugin}' requires '{dependency}' which was not added")]
    MissingDependency {
        /// Name of the plugin declaring the dependency.
        plugin: String,
        /// Type name of the missing dependency.
        dependency: String,
    },

    /// Plugins depend on each other in a cycle.
    #[error("circular dependency detected among plugins: {0:?}")]
    DependencyCycle(Vec<String>),

    /// [`Host::finish`](crate::Host::finish) was called more than once.
    #[error("host was already finished")]
    AlreadyFinished,
}

/// Error looking up a provider in the registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No provider is registered under this name.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}

/// Error building a [`CompletionRequest`](crate::CompletionRequest) from host settings.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The settings object could not be decoded.
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}
