// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Plinth plugin host.

use thiserror::Error;

/// The primary error type for registry and namespace operations.
///
/// Every validation failure is detected before any mutation takes place, so a
/// returned error always means the registry and the host namespace are exactly
/// as they were before the call.
#[derive(Debug, Error)]
pub enum PlinthError {
    /// Malformed input: an empty plugin name, an empty dependency entry, a
    /// duplicate dependency entry, or a plugin naming itself as a dependency.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A plugin with the same name is already registered.
    #[error("plugin '{name}' is already registered")]
    Conflict { name: String },

    /// A declared dependency has not been registered yet.
    #[error("plugin '{name}' requires '{dependency}', which is not registered")]
    MissingDependency { name: String, dependency: String },

    /// The named plugin is not registered.
    #[error("plugin '{name}' is not registered")]
    NotFound { name: String },

    /// The plugin cannot be removed while other plugins list it as a
    /// dependency.
    #[error("plugin '{name}' cannot be removed: required by {dependents:?}")]
    DependentsExist {
        name: String,
        dependents: Vec<String>,
    },

    /// A mutating registry call was made from inside an in-flight
    /// initialization hook.
    #[error("registry mutation attempted from inside an initialization hook")]
    ReentrantOperation,

    /// `clear` stopped making progress before the registry was empty. The
    /// residue names plugins whose dependency lists block each other.
    #[error("clear left unremovable plugins behind: {residue:?}")]
    UnremovableResidue { residue: Vec<String> },
}
