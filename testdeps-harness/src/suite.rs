// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The tree of tests a harness runs: a session holds modules, and modules hold test cases.

use crate::{
    context::{PhaseResult, TestContext},
    marker::DependencyMarker,
};
use smol_str::SmolStr;
use std::fmt;
use testdeps::{ScopeAnchor, TestItem, canonical_name};

pub(crate) type PhaseFn = Box<dyn Fn(&TestContext<'_>) -> PhaseResult>;

/// A single test, with optional setup and teardown phases.
pub struct TestCase {
    name: SmolStr,
    group: Option<SmolStr>,
    module: SmolStr,
    marker: Option<DependencyMarker>,
    setup: Option<PhaseFn>,
    call: PhaseFn,
    teardown: Option<PhaseFn>,
}

impl TestCase {
    /// Creates a test with the given name and body.
    ///
    /// The name must consist of word characters, optionally followed by a bracketed
    /// parametrization suffix.
    pub fn new(
        name: impl Into<SmolStr>,
        call: impl Fn(&TestContext<'_>) -> PhaseResult + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            group: None,
            module: SmolStr::default(),
            marker: None,
            setup: None,
            call: Box::new(call),
            teardown: None,
        }
    }

    /// Creates one test per parameter, named `name[param]`.
    pub fn parametrized<P, F>(
        name: &str,
        params: impl IntoIterator<Item = P>,
        call: F,
    ) -> Vec<TestCase>
    where
        P: fmt::Display + 'static,
        F: Fn(&TestContext<'_>, &P) -> PhaseResult + Clone + 'static,
    {
        params
            .into_iter()
            .map(|param| {
                let call = call.clone();
                TestCase::new(format!("{name}[{param}]"), move |ctx| call(ctx, &param))
            })
            .collect()
    }

    /// Places this test in a group. The test is then also known as `Group::name`.
    pub fn with_group(mut self, group: impl Into<SmolStr>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Attaches a dependency marker.
    pub fn with_marker(mut self, marker: DependencyMarker) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Adds a setup phase, run after dependency checks and before the body.
    pub fn with_setup(mut self, setup: impl Fn(&TestContext<'_>) -> PhaseResult + 'static) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Adds a teardown phase, run after the body whether or not earlier phases succeeded.
    pub fn with_teardown(
        mut self,
        teardown: impl Fn(&TestContext<'_>) -> PhaseResult + 'static,
    ) -> Self {
        self.teardown = Some(Box::new(teardown));
        self
    }

    /// Returns the dependency marker, if any.
    pub fn marker(&self) -> Option<&DependencyMarker> {
        self.marker.as_ref()
    }

    /// Returns the qualified name: `Group::name` or `name`.
    pub fn qualified_name(&self) -> String {
        canonical_name(self)
    }

    /// Returns the full name, including the module: `module::Group::name`.
    pub fn full_name(&self) -> String {
        format!("{}::{}", self.module, self.qualified_name())
    }

    pub(crate) fn setup_fn(&self) -> Option<&PhaseFn> {
        self.setup.as_ref()
    }

    pub(crate) fn call_fn(&self) -> &PhaseFn {
        &self.call
    }

    pub(crate) fn teardown_fn(&self) -> Option<&PhaseFn> {
        self.teardown.as_ref()
    }
}

impl TestItem for TestCase {
    fn name(&self) -> &str {
        &self.name
    }

    fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    fn module(&self) -> &str {
        &self.module
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("module", &self.module)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

/// A module of tests. Each module anchors its own dependency registry.
#[derive(Debug)]
pub struct TestModule {
    anchor: ScopeAnchor,
    tests: Vec<TestCase>,
}

impl TestModule {
    /// Creates an empty module.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            anchor: ScopeAnchor::module(name),
            tests: Vec::new(),
        }
    }

    /// Adds a test. Tests run in the order they are added.
    pub fn with_test(mut self, test: TestCase) -> Self {
        self.push(test);
        self
    }

    /// Adds several tests, in order.
    pub fn with_tests(mut self, tests: impl IntoIterator<Item = TestCase>) -> Self {
        for test in tests {
            self.push(test);
        }
        self
    }

    fn push(&mut self, mut test: TestCase) {
        test.module = self.anchor.name().into();
        self.tests.push(test);
    }

    /// Returns the module name.
    pub fn name(&self) -> &str {
        self.anchor.name()
    }

    /// Returns the module's scope anchor.
    pub fn anchor(&self) -> &ScopeAnchor {
        &self.anchor
    }

    /// Iterates over the tests in this module.
    pub fn tests(&self) -> impl ExactSizeIterator<Item = &TestCase> {
        self.tests.iter()
    }
}

/// The whole set of modules in a run. The session anchors the session-wide registry.
#[derive(Debug)]
pub struct TestSession {
    anchor: ScopeAnchor,
    modules: Vec<TestModule>,
}

impl TestSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self {
            anchor: ScopeAnchor::session(),
            modules: Vec::new(),
        }
    }

    /// Adds a module. Modules run in the order they are added.
    ///
    /// The session registry tells tests apart by module name, so a module named like an earlier
    /// one is merged into it: its tests run after the earlier module's tests.
    pub fn with_module(mut self, module: TestModule) -> Self {
        match self
            .modules
            .iter_mut()
            .find(|existing| existing.name() == module.name())
        {
            Some(existing) => existing.tests.extend(module.tests),
            None => self.modules.push(module),
        }
        self
    }

    /// Returns the session's scope anchor.
    pub fn anchor(&self) -> &ScopeAnchor {
        &self.anchor
    }

    /// Iterates over the modules in this session.
    pub fn modules(&self) -> impl ExactSizeIterator<Item = &TestModule> {
        self.modules.iter()
    }

    /// Returns the total number of tests in this session.
    pub fn test_count(&self) -> usize {
        self.modules.iter().map(|module| module.tests.len()).sum()
    }
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}
