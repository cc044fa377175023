// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The extension registry: validates capability bundles, grafts their
//! callables onto the host namespace, and later retracts them safely.
//!
//! The registry owns the name -> descriptor mapping exclusively. All
//! invariants (name uniqueness, eager dependency validation, dependency-aware
//! removal, first-writer-wins shadowing) are enforced here; the namespace
//! itself only guarantees that `bind` never overwrites.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use indexmap::IndexMap;
use plinth_core::{HostNamespace, PlinthError, SharedCapability};
use serde_json::Value;
use tracing::{debug, warn};

use crate::bundle::{BundleEntry, CapabilityBundle, INIT_KEY, LEGACY_INIT_KEY};

/// The registry's stored record for one plugin. Immutable once registered:
/// only read accessors are exposed, and the record is dropped on removal.
///
/// `capabilities` holds exactly the entries that won their namespace key, not
/// the original bundle. Shadowed and non-callable entries are gone by the
/// time the descriptor exists.
#[derive(Clone)]
pub struct PluginDescriptor {
    name: String,
    version: Option<String>,
    dependencies: Vec<String>,
    capabilities: IndexMap<String, SharedCapability>,
}

impl PluginDescriptor {
    /// The plugin's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The plugin's version string, if it declared one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The dependency names declared at registration.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Keys of the capabilities this plugin holds live on the namespace.
    pub fn capability_keys(&self) -> Vec<String> {
        self.capabilities.keys().cloned().collect()
    }

    /// Look up a retained capability by key.
    pub fn capability(&self, key: &str) -> Option<SharedCapability> {
        self.capabilities.get(key).cloned()
    }
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("dependencies", &self.dependencies)
            .field("capabilities", &self.capability_keys())
            .finish()
    }
}

/// Registry of plugins grafted onto a shared host namespace.
///
/// The registry does not own the namespace; every mutating operation receives
/// it as an injected `&mut dyn HostNamespace`. Methods take `&self` so the
/// registry can sit behind an `Rc` and be reachable from initialization
/// hooks; an in-flight guard turns any mutation attempted from inside a hook
/// into `ReentrantOperation` instead of corrupting state mid-`add`.
///
/// Single-threaded by design: all operations are synchronous and run to
/// completion before returning.
pub struct ExtensionRegistry {
    plugins: RefCell<IndexMap<String, PluginDescriptor>>,
    in_hook: Cell<bool>,
}

/// Resets the in-flight flag when a hook invocation unwinds.
struct HookGuard<'a>(&'a Cell<bool>);

impl Drop for HookGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl ExtensionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            plugins: RefCell::new(IndexMap::new()),
            in_hook: Cell::new(false),
        }
    }

    /// Validate `bundle` and graft its callable entries onto `host`.
    ///
    /// Validation is all-or-nothing: the name must be non-empty and unused,
    /// and every dependency must be well-formed and already registered. The
    /// first failure aborts the call before anything is mutated.
    ///
    /// Grafting walks the bundle's entries in insertion order. Non-callable
    /// entries are dropped. The `_init` hook (and the deprecated `init_`
    /// spelling) is invoked synchronously with the host namespace and is
    /// never grafted or retained. Every other callable is bound to the
    /// namespace unless its key is already occupied, in which case it is
    /// dropped silently; the stored descriptor reflects exactly the bindings
    /// that went live.
    pub fn add(
        &self,
        host: &mut dyn HostNamespace,
        bundle: CapabilityBundle,
    ) -> Result<(), PlinthError> {
        self.guard()?;
        let CapabilityBundle {
            name,
            version,
            dependencies,
            entries,
        } = bundle;

        if name.is_empty() {
            return Err(PlinthError::InvalidArgument(
                "plugin name must not be empty".to_string(),
            ));
        }

        {
            let plugins = self.plugins.borrow();
            if plugins.contains_key(&name) {
                return Err(PlinthError::Conflict { name });
            }

            let mut seen = HashSet::new();
            for dependency in &dependencies {
                if dependency.is_empty() {
                    return Err(PlinthError::InvalidArgument(format!(
                        "plugin '{name}' lists an empty dependency name"
                    )));
                }
                if *dependency == name {
                    return Err(PlinthError::InvalidArgument(format!(
                        "plugin '{name}' cannot depend on itself"
                    )));
                }
                if !seen.insert(dependency.as_str()) {
                    return Err(PlinthError::InvalidArgument(format!(
                        "plugin '{name}' lists dependency '{dependency}' more than once"
                    )));
                }
                if !plugins.contains_key(dependency) {
                    return Err(PlinthError::MissingDependency {
                        name: name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        let mut retained: IndexMap<String, SharedCapability> = IndexMap::new();
        for (key, entry) in entries {
            let capability = match entry {
                BundleEntry::Callable(capability) => capability,
                BundleEntry::Data(_) => {
                    debug!(plugin = %name, key = %key, "dropping non-callable bundle entry");
                    continue;
                }
            };

            if key == LEGACY_INIT_KEY {
                warn!(
                    plugin = %name,
                    "the `init_` initialization key is deprecated, use `_init`"
                );
                self.run_hook(host, &capability);
                continue;
            }
            if key == INIT_KEY {
                self.run_hook(host, &capability);
                continue;
            }

            if host.bind(&key, capability.clone()) {
                retained.insert(key, capability);
            } else {
                debug!(plugin = %name, key = %key, "capability key already bound, dropping");
            }
        }

        debug!(plugin = %name, capabilities = retained.len(), "registered plugin");
        self.plugins.borrow_mut().insert(
            name.clone(),
            PluginDescriptor {
                name,
                version,
                dependencies,
                capabilities: retained,
            },
        );
        Ok(())
    }

    /// Remove the plugin called `name`, retracting its live capability
    /// bindings from `host`.
    ///
    /// Fails with `DependentsExist` (naming every blocker) while any other
    /// registered plugin lists `name` as a dependency; nothing is mutated in
    /// that case.
    pub fn remove(&self, host: &mut dyn HostNamespace, name: &str) -> Result<(), PlinthError> {
        self.guard()?;
        let descriptor = {
            let mut plugins = self.plugins.borrow_mut();
            if !plugins.contains_key(name) {
                return Err(PlinthError::NotFound {
                    name: name.to_string(),
                });
            }

            let dependents: Vec<String> = plugins
                .iter()
                .filter(|(_, descriptor)| descriptor.dependencies.iter().any(|dep| dep == name))
                .map(|(other, _)| other.clone())
                .collect();
            if !dependents.is_empty() {
                return Err(PlinthError::DependentsExist {
                    name: name.to_string(),
                    dependents,
                });
            }

            plugins.shift_remove(name)
        };

        if let Some(descriptor) = descriptor {
            for key in descriptor.capabilities.keys() {
                host.unbind(key);
            }
            debug!(plugin = %name, "removed plugin");
        }
        Ok(())
    }

    /// Whether a plugin called `name` is currently registered.
    pub fn has(&self, name: &str) -> bool {
        self.plugins.borrow().contains_key(name)
    }

    /// Names of all registered plugins, in registration order.
    pub fn list(&self) -> Vec<String> {
        self.plugins.borrow().keys().cloned().collect()
    }

    /// Snapshot of the descriptor registered under `name`.
    pub fn get(&self, name: &str) -> Option<PluginDescriptor> {
        self.plugins.borrow().get(name).cloned()
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.borrow().len()
    }

    /// Whether no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.borrow().is_empty()
    }

    /// Remove every registered plugin via fixed-point elimination.
    ///
    /// A single pass over the names can be blocked by dependency order, so
    /// passes repeat over the residue until either the registry is empty or a
    /// full pass removes nothing. The latter means the remaining dependency
    /// lists block each other and is reported as `UnremovableResidue` rather
    /// than looping forever. Each continuing pass removes at least one
    /// plugin, so the pass count is bounded by the plugin count.
    pub fn clear(&self, host: &mut dyn HostNamespace) -> Result<(), PlinthError> {
        self.guard()?;
        loop {
            let names = self.list();
            if names.is_empty() {
                return Ok(());
            }

            let mut removed = 0usize;
            let mut residue = Vec::new();
            for name in names {
                match self.remove(host, &name) {
                    Ok(()) => removed += 1,
                    Err(PlinthError::DependentsExist { name, .. }) => residue.push(name),
                    Err(err) => return Err(err),
                }
            }

            if removed == 0 {
                return Err(PlinthError::UnremovableResidue { residue });
            }
        }
    }

    fn guard(&self) -> Result<(), PlinthError> {
        if self.in_hook.get() {
            return Err(PlinthError::ReentrantOperation);
        }
        Ok(())
    }

    fn run_hook(&self, host: &mut dyn HostNamespace, hook: &SharedCapability) {
        self.in_hook.set(true);
        let _reset = HookGuard(&self.in_hook);
        hook.invoke(host, Value::Null);
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
