//! Tracing and logging plugin.
//!
//! Provides [`TracingPlugin`] which installs a `tracing` subscriber while the
//! host builds. Plugins added after it log their own build phase (model
//! discovery, registration) to the operator, so add it first.
//!
//! # Example
//!
//! ```
//! use llm_bridge_host::{Host, TracingFormat, TracingPlugin};
//! use tracing::Level;
//!
//! let mut host = Host::new();
//! host.add_plugins(
//!     TracingPlugin::default()
//!         .with_level(Level::DEBUG)
//!         .with_format(TracingFormat::Compact),
//! );
//! host.finish().unwrap();
//! ```

use crate::host::Host;
use crate::plugin::Plugin;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

/// Installs the global `tracing` subscriber.
///
/// Uses the [`tracing`] and [`tracing_subscriber`] crates under the hood. If a
/// subscriber is already installed, this plugin leaves it in place.
///
/// ```
/// use llm_bridge_host::TracingPlugin;
///
/// TracingPlugin::new().with_env_filter("llm_bridge_cli=debug,llm_bridge_host=info");
/// ```
#[derive(Debug, Clone)]
pub struct TracingPlugin {
    level: Level,
    format: TracingFormat,
    /// Environment filter (e.g., `"llm_bridge_cli=debug"`).
    env_filter: Option<String>,
}

impl Default for TracingPlugin {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
        }
    }
}

impl TracingPlugin {
    /// Creates a new `TracingPlugin` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter string.
    ///
    /// Format: `target=level,target=level,...`. Falls back to the configured
    /// level if the string does not parse.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn env_filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        }
    }
}

impl Plugin for TracingPlugin {
    fn build(&self, _host: &mut Host) {
        let env_filter = self.env_filter();

        // try_init().ok() ignores errors if already initialized
        match self.format {
            TracingFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().pretty())
                    .try_init()
                    .ok();
            }
            TracingFormat::Compact => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().compact())
                    .try_init()
                    .ok();
            }
            TracingFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json())
                    .try_init()
                    .ok();
            }
        }

        tracing::debug!(
            level = %self.level,
            format = ?self.format,
            "TracingPlugin initialized"
        );
    }
}
