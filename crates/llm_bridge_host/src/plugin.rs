//! Plugin contract between the host and provider crates.
//!
//! Every provider reaches the host through a plugin. The host collects plugins,
//! orders them by their declared dependencies, and drives them through a short
//! lifecycle:
//!
//! 1. **Build** - `build()` is called in dependency order. Providers register
//!    themselves with the [`ProviderRegistry`](crate::ProviderRegistry) here.
//! 2. **Ready** - `ready()` is called in dependency order once every plugin
//!    has been built.
//!
//! # Example
//!
//! ```
//! use llm_bridge_host::Host;
//! use llm_bridge_host::plugin::{Plugin, PluginId};
//!
//! struct LoggingPlugin;
//!
//! impl Plugin for LoggingPlugin {
//!     fn build(&self, _host: &mut Host) {}
//! }
//!
//! struct MyProviderPlugin;
//!
//! impl Plugin for MyProviderPlugin {
//!     fn build(&self, _host: &mut Host) {
//!         // register with host.registry_mut()
//!     }
//!
//!     fn dependencies(&self) -> Vec<PluginId> {
//!         vec![PluginId::of::<LoggingPlugin>()]
//!     }
//! }
//!
//! let mut host = Host::new();
//! host.add_plugins(MyProviderPlugin).add_plugins(LoggingPlugin);
//! host.finish().unwrap();
//! ```

use core::any::TypeId;

use crate::host::Host;

/// Unique identifier for a plugin type.
///
/// Used for dependency resolution and duplicate detection. Based on [`TypeId`],
/// so each plugin type has exactly one `PluginId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginId {
    type_id: TypeId,
    type_name: &'static str,
}

impl PluginId {
    /// Creates a `PluginId` for the given plugin type.
    #[must_use]
    pub fn of<P: Plugin>() -> Self {
        Self {
            type_id: TypeId::of::<P>(),
            type_name: core::any::type_name::<P>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name for debugging.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// A unit of functionality added to a [`Host`].
pub trait Plugin: Send + Sync + 'static {
    /// Configures the host. Called once while the host is finishing.
    ///
    /// The provider registry is mutable only during this phase.
    fn build(&self, host: &mut Host);

    /// Called after all plugins have been built.
    fn ready(&self, _host: &mut Host) {}

    /// Returns the plugin's name for debugging and error messages.
    ///
    /// Default implementation returns the type name.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }

    /// Declares plugins that must be built before this one.
    fn dependencies(&self) -> Vec<PluginId> {
        Vec::new()
    }

    /// Returns true if this plugin can only be added once.
    ///
    /// Default is `true`; adding the same plugin type twice will panic.
    fn is_unique(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PluginA;
    impl Plugin for PluginA {
        fn build(&self, _host: &mut Host) {}
    }

    struct PluginB;
    impl Plugin for PluginB {
        fn build(&self, _host: &mut Host) {}
        fn dependencies(&self) -> Vec<PluginId> {
            vec![PluginId::of::<PluginA>()]
        }
    }

    #[test]
    fn plugin_id_equality() {
        assert_eq!(PluginId::of::<PluginA>(), PluginId::of::<PluginA>());
        assert_ne!(PluginId::of::<PluginA>(), PluginId::of::<PluginB>());
        assert_eq!(
            PluginId::of::<PluginA>().type_id(),
            TypeId::of::<PluginA>()
        );
    }

    #[test]
    fn plugin_id_type_name() {
        assert!(PluginId::of::<PluginA>().type_name().ends_with("PluginA"));
    }

    #[test]
    fn plugin_defaults() {
        assert!(PluginA.name().ends_with("PluginA"));
        assert!(PluginA.is_unique());
        assert!(PluginA.dependencies().is_empty());
    }

    #[test]
    fn plugin_with_dependencies() {
        assert_eq!(PluginB.dependencies(), vec![PluginId::of::<PluginA>()]);
    }
}
