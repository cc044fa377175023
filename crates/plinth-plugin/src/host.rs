// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thin bootstrap facade tying a namespace and a registry together.
//!
//! `Host` is convenience glue for callers that do not need to manage the two
//! halves separately. The registry and namespace remain usable on their own;
//! nothing here adds semantics beyond wiring them up.

use plinth_core::{HostNamespace, Namespace, PlinthError};
use serde_json::Value;

use crate::bundle::CapabilityBundle;
use crate::registry::ExtensionRegistry;

/// A plugin host: one namespace plus the registry that grafts onto it.
#[derive(Default)]
pub struct Host {
    namespace: Namespace,
    registry: ExtensionRegistry,
}

impl Host {
    /// Create a host with an empty namespace and registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin bundle. Shortcut for `plugins().add(...)` with the
    /// host's own namespace.
    pub fn use_plugin(&mut self, bundle: CapabilityBundle) -> Result<(), PlinthError> {
        self.registry.add(&mut self.namespace, bundle)
    }

    /// Remove a plugin and retract its capabilities.
    pub fn remove_plugin(&mut self, name: &str) -> Result<(), PlinthError> {
        self.registry.remove(&mut self.namespace, name)
    }

    /// Remove every plugin. See `ExtensionRegistry::clear`.
    pub fn clear_plugins(&mut self) -> Result<(), PlinthError> {
        self.registry.clear(&mut self.namespace)
    }

    /// The plugin registry.
    pub fn plugins(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// The shared namespace, read-only.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Invoke the capability bound under `key`, passing it the namespace and
    /// `args`. Fails with `NotFound` when the key has no live binding.
    pub fn invoke(&mut self, key: &str, args: Value) -> Result<Value, PlinthError> {
        let capability = self
            .namespace
            .get(key)
            .ok_or_else(|| PlinthError::NotFound {
                name: key.to_string(),
            })?;
        Ok(capability.invoke(&mut self.namespace, args))
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("plugins", &self.registry.list())
            .field("namespace", &self.namespace)
            .finish()
    }
}
