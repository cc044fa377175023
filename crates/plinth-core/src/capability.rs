// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability abstraction: callables that plugins export into the host
//! namespace.

use std::sync::Arc;

use serde_json::Value;

use crate::namespace::HostNamespace;

/// A callable exported by a plugin.
///
/// Capabilities receive the host namespace as an explicit first argument. In
/// the host they are grafted onto, the namespace is their natural receiver;
/// passing it explicitly keeps the hand-off visible instead of routing it
/// through a hidden global. Initialization hooks use the same shape and are
/// invoked with `Value::Null` as their argument.
pub trait Capability {
    /// Invoke the capability against the host namespace.
    fn invoke(&self, host: &mut dyn HostNamespace, args: Value) -> Value;
}

/// Shared handle to a capability. The registry, the descriptor that retained
/// the capability, and the namespace binding all hold the same allocation.
pub type SharedCapability = Arc<dyn Capability>;

impl<F> Capability for F
where
    F: Fn(&mut dyn HostNamespace, Value) -> Value,
{
    fn invoke(&self, host: &mut dyn HostNamespace, args: Value) -> Value {
        self(host, args)
    }
}
