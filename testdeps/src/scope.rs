// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{DependencyManager, errors::ScopeKindParseError};
use smol_str::SmolStr;
use std::{
    fmt,
    str::FromStr,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::debug;

/// The level of the test tree a dependency registry is attached to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ScopeKind {
    /// One registry per module. Dependencies resolve against tests in the same module.
    ///
    /// This is the default.
    #[default]
    Module,

    /// One registry for the whole session. Dependencies resolve against every test that ran.
    Session,
}

impl ScopeKind {
    /// Returns the names of all scope kinds.
    pub fn variants() -> [&'static str; 2] {
        ["module", "session"]
    }

    /// Returns the name of this scope kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Session => "session",
        }
    }
}

impl FromStr for ScopeKind {
    type Err = ScopeKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "module" => Ok(Self::Module),
            "session" => Ok(Self::Session),
            other => Err(ScopeKindParseError::new(other)),
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host node (a module or the session) that owns one dependency registry.
///
/// The registry is created the first time it is asked for and lives as long as the anchor.
#[derive(Debug)]
pub struct ScopeAnchor {
    kind: ScopeKind,
    name: SmolStr,
    registry: OnceLock<Mutex<DependencyManager>>,
}

impl ScopeAnchor {
    /// Creates an anchor with no registry attached yet.
    pub fn new(kind: ScopeKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
            registry: OnceLock::new(),
        }
    }

    /// Creates an anchor for a module.
    pub fn module(name: impl Into<SmolStr>) -> Self {
        Self::new(ScopeKind::Module, name)
    }

    /// Creates an anchor for a session.
    pub fn session() -> Self {
        Self::new(ScopeKind::Session, "session")
    }

    /// Returns the kind of this anchor.
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Returns the name of this anchor.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if a registry has been attached to this anchor.
    pub fn has_registry(&self) -> bool {
        self.registry.get().is_some()
    }

    /// Returns the registry attached to this anchor, creating it on first use.
    pub fn registry(&self) -> MutexGuard<'_, DependencyManager> {
        let registry = self.registry.get_or_init(|| {
            debug!(scope = %self.kind, name = %self.name, "creating dependency registry");
            Mutex::new(DependencyManager::new(self.kind))
        });
        // Registry updates don't panic midway, so a poisoned lock still guards consistent data.
        registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
