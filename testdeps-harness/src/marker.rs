// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use smol_str::SmolStr;
use testdeps::{RequirementSelector, ScopeKind};

/// Marks a test as taking part in dependency tracking.
///
/// A marked test has its outcomes recorded, so other tests can depend on it. If it declares
/// dependencies of its own, they are checked before its setup phase runs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DependencyMarker {
    name: Option<SmolStr>,
    depends: Vec<SmolStr>,
    requirement: RequirementSelector,
    scope: ScopeKind,
}

impl DependencyMarker {
    /// Creates a marker with no name and no dependencies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit name that other tests can depend on, in addition to the names derived
    /// from the test itself.
    pub fn with_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the tests this test depends on.
    pub fn depends_on<I, S>(mut self, depends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.depends = depends.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the pass requirement, either by name (`"any"`) or as a
    /// [`PassRequirement`](testdeps::PassRequirement).
    pub fn with_requirement(mut self, requirement: impl Into<RequirementSelector>) -> Self {
        self.requirement = requirement.into();
        self
    }

    /// Sets the scope dependencies are resolved in.
    pub fn with_scope(mut self, scope: ScopeKind) -> Self {
        self.scope = scope;
        self
    }

    /// Returns the explicit name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the declared dependencies, in declaration order.
    pub fn depends(&self) -> &[SmolStr] {
        &self.depends
    }

    /// Returns the pass requirement selector.
    pub fn requirement(&self) -> &RequirementSelector {
        &self.requirement
    }

    /// Returns the scope dependencies are resolved in.
    pub fn scope(&self) -> ScopeKind {
        self.scope
    }
}
