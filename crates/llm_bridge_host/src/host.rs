//! The [`Host`] plugin orchestrator.
//!
//! The host owns the [`ProviderRegistry`] and drives plugins through their
//! lifecycle:
//!
//! 1. **Dependency Resolution** - Validate and topologically sort plugins
//! 2. **Build Phase** - Call `plugin.build()` in dependency order
//! 3. **Ready Phase** - Call `plugin.ready()` in dependency order
//!
//! After [`finish()`](Host::finish) returns, the registry is read-only.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::error::HostError;
use crate::plugin::{Plugin, PluginId};
use crate::registry::ProviderRegistry;

/// Represents the build state of the host.
///
/// The host progresses through these states linearly:
/// `NotStarted` → `Building` → `Built`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum BuildState {
    #[default]
    NotStarted,
    Building,
    Built,
}

struct PluginEntry {
    id: PluginId,
    name: String,
    plugin: Box<dyn Plugin>,
}

/// The runtime that collects provider plugins and exposes their registry.
///
/// # Example
///
/// ```
/// use llm_bridge_host::{Host, TracingPlugin};
///
/// let mut host = Host::new();
/// host.add_plugins(TracingPlugin::default());
/// host.finish().expect("plugins should resolve");
///
/// assert!(host.is_built());
/// assert!(host.registry().provider_names().is_empty());
/// ```
#[derive(Default)]
pub struct Host {
    registry: ProviderRegistry,
    pending: Vec<PluginEntry>,
    built: Vec<PluginEntry>,
    plugin_ids: HashSet<PluginId>,
    state: BuildState,
}

impl core::fmt::Debug for Host {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names = |entries: &[PluginEntry]| {
            entries
                .iter()
                .map(|entry| entry.name.clone())
                .collect::<Vec<_>>()
        };

        f.debug_struct("Host")
            .field("state", &self.state)
            .field("pending", &names(self.pending.as_slice()))
            .field("built", &names(self.built.as_slice()))
            .field("registry", &self.registry)
            .finish()
    }
}

impl Host {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a plugin to be built by [`finish()`](Self::finish).
    ///
    /// # Panics
    ///
    /// - If a unique plugin is added twice.
    /// - If the host has already started finishing.
    pub fn add_plugins<P: Plugin>(&mut self, plugin: P) -> &mut Self {
        let id = PluginId::of::<P>();
        let name = plugin.name().to_string();

        assert!(
            self.state == BuildState::NotStarted,
            "Plugin '{name}' was added after Host::finish() was called."
        );

        if plugin.is_unique() && self.plugin_ids.contains(&id) {
            panic!(
                "Plugin '{name}' is unique and was already added.\n\
                 If you intended to add this plugin multiple times, \
                 set `is_unique()` to return `false`."
            );
        }

        self.plugin_ids.insert(id);
        self.pending.push(PluginEntry {
            id,
            name,
            plugin: Box::new(plugin),
        });
        self
    }

    /// Returns true if a plugin of the given type has been added.
    #[must_use]
    pub fn has_plugin<P: Plugin>(&self) -> bool {
        self.plugin_ids.contains(&PluginId::of::<P>())
    }

    /// Returns true once [`finish()`](Self::finish) has completed.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.state == BuildState::Built
    }

    /// Returns the provider registry.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Returns the provider registry for registration.
    ///
    /// Only available while plugins are being built; returns `None` before
    /// and after the build phase.
    pub fn registry_mut(&mut self) -> Option<&mut ProviderRegistry> {
        (self.state == BuildState::Building).then_some(&mut self.registry)
    }

    /// Builds and readies all plugins.
    ///
    /// # Errors
    ///
    /// - [`HostError::AlreadyFinished`] if called more than once
    /// - [`HostError::MissingDependency`] if a declared dependency was not added
    /// - [`HostError::DependencyCycle`] if plugins depend on each other in a cycle
    pub fn finish(&mut self) -> Result<(), HostError> {
        if self.state != BuildState::NotStarted {
            return Err(HostError::AlreadyFinished);
        }

        let sorted = self.sort_plugins_by_dependencies()?;

        self.state = BuildState::Building;
        for entry in &sorted {
            tracing::debug!(plugin = %entry.name, "building plugin");
            entry.plugin.build(self);
        }

        // Registration closes before any plugin observes the ready phase.
        self.state = BuildState::Built;
        for entry in &sorted {
            entry.plugin.ready(self);
        }
        self.built = sorted;

        tracing::debug!(
            plugins = self.built.len(),
            providers = ?self.registry.provider_names(),
            "host finished"
        );
        Ok(())
    }

    /// Sorts pending plugins with Kahn's algorithm, keeping insertion order
    /// among plugins that do not depend on each other.
    ///
    /// A dependency on a non-unique plugin type waits for every instance of it.
    fn sort_plugins_by_dependencies(&mut self) -> Result<Vec<PluginEntry>, HostError> {
        let n = self.pending.len();
        let mut indices_of: HashMap<PluginId, Vec<usize>> = HashMap::new();
        for (i, entry) in self.pending.iter().enumerate() {
            indices_of.entry(entry.id).or_default().push(i);
        }

        let mut in_degree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (i, entry) in self.pending.iter().enumerate() {
            for dependency in entry.plugin.dependencies() {
                let Some(dep_indices) = indices_of.get(&dependency) else {
                    return Err(HostError::MissingDependency {
                        plugin: entry.name.clone(),
                        dependency: dependency.type_name().to_string(),
                    });
                };
                for &dep_idx in dep_indices {
                    dependents[dep_idx].push(i);
                    in_degree[i] += 1;
                }
            }
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);

        while let Some(idx) = queue.pop_front() {
            order.push(idx);
            for &dependent in &dependents[idx] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if order.len() != n {
            let in_cycle = in_degree
                .iter()
                .enumerate()
                .filter(|(_, deg)| **deg > 0)
                .map(|(i, _)| self.pending[i].name.clone())
                .collect();
            return Err(HostError::DependencyCycle(in_cycle));
        }

        let mut slots: Vec<Option<PluginEntry>> =
            core::mem::take(&mut self.pending).into_iter().map(Some).collect();
        Ok(order
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        label: &'static str,
        log: Log,
    }

    impl Plugin for Recorder {
        fn build(&self, host: &mut Host) {
            assert!(host.registry_mut().is_some());
            self.log.lock().unwrap().push(format!("build:{}", self.label));
        }

        fn ready(&self, host: &mut Host) {
            assert!(host.registry_mut().is_none());
            self.log.lock().unwrap().push(format!("ready:{}", self.label));
        }

        fn is_unique(&self) -> bool {
            false
        }
    }

    struct Base {
        log: Log,
    }

    impl Plugin for Base {
        fn build(&self, _host: &mut Host) {
            self.log.lock().unwrap().push("build:base".to_string());
        }
    }

    struct Dependent {
        log: Log,
    }

    impl Plugin for Dependent {
        fn build(&self, _host: &mut Host) {
            self.log.lock().unwrap().push("build:dependent".to_string());
        }

        fn dependencies(&self) -> Vec<PluginId> {
            vec![PluginId::of::<Base>()]
        }
    }

    struct AfterRecorders {
        log: Log,
    }

    impl Plugin for AfterRecorders {
        fn build(&self, _host: &mut Host) {
            self.log.lock().unwrap().push("build:after".to_string());
        }

        fn dependencies(&self) -> Vec<PluginId> {
            vec![PluginId::of::<Recorder>()]
        }
    }

    struct CycleA;
    impl Plugin for CycleA {
        fn build(&self, _host: &mut Host) {}
        fn dependencies(&self) -> Vec<PluginId> {
            vec![PluginId::of::<CycleB>()]
        }
    }

    struct CycleB;
    impl Plugin for CycleB {
        fn build(&self, _host: &mut Host) {}
        fn dependencies(&self) -> Vec<PluginId> {
            vec![PluginId::of::<CycleA>()]
        }
    }

    #[test]
    fn builds_then_readies_in_insertion_order() {
        let log = Log::default();
        let mut host = Host::new();
        host.add_plugins(Recorder {
            label: "a",
            log: log.clone(),
        })
        .add_plugins(Recorder {
            label: "b",
            log: log.clone(),
        });
        host.finish().unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["build:a", "build:b", "ready:a", "ready:b"]
        );
        assert!(host.is_built());
    }

    #[test]
    fn dependencies_build_first() {
        let log = Log::default();
        let mut host = Host::new();
        host.add_plugins(Dependent { log: log.clone() });
        host.add_plugins(Base { log: log.clone() });
        host.finish().unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["build:base", "build:dependent"]);
    }

    #[test]
    fn dependency_on_repeated_plugin_waits_for_every_instance() {
        let log = Log::default();
        let mut host = Host::new();
        host.add_plugins(Recorder {
            label: "a",
            log: log.clone(),
        })
        .add_plugins(AfterRecorders { log: log.clone() })
        .add_plugins(Recorder {
            label: "b",
            log: log.clone(),
        });
        host.finish().unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log[..3], ["build:a", "build:b", "build:after"]);
    }

    #[test]
    fn missing_dependency_is_reported() {
        let mut host = Host::new();
        host.add_plugins(Dependent {
            log: Log::default(),
        });

        let err = host.finish().unwrap_err();
        assert!(matches!(err, HostError::MissingDependency { .. }));
        assert!(err.to_string().contains("Base"));
    }

    #[test]
    fn cycle_is_reported() {
        let mut host = Host::new();
        host.add_plugins(CycleA).add_plugins(CycleB);

        match host.finish() {
            Err(HostError::DependencyCycle(names)) => assert_eq!(names.len(), 2),
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn finish_twice_fails() {
        let mut host = Host::new();
        host.finish().unwrap();
        assert_eq!(host.finish(), Err(HostError::AlreadyFinished));
    }

    #[test]
    #[should_panic(expected = "is unique and was already added")]
    fn duplicate_unique_plugin_panics() {
        let mut host = Host::new();
        host.add_plugins(CycleA).add_plugins(CycleA);
    }

    #[test]
    fn registry_is_read_only_outside_build() {
        let mut host = Host::new();
        assert!(host.registry_mut().is_none());
        host.finish().unwrap();
        assert!(host.registry_mut().is_none());
    }

    #[test]
    fn has_plugin_tracks_added_types() {
        let mut host = Host::new();
        host.add_plugins(CycleA);
        assert!(host.has_plugin::<CycleA>());
        assert!(!host.has_plugin::<CycleB>());
    }
}
