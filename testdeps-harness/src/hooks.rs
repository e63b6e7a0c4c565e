// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The points where the harness hands test outcomes to dependency tracking, and where
//! dependency tracking can veto a test.

use crate::{
    config::DependencySettings,
    context::{PhaseError, PhaseResult},
    suite::{TestCase, TestModule, TestSession},
};
use testdeps::{
    PassRequirement, ScopeAnchor, ScopeKind, TestOutcome, TestPhase,
    errors::TestNameParseError,
};
use tracing::{debug, info};

/// The scope anchors enclosing a test.
#[derive(Clone, Copy, Debug)]
pub struct Scopes<'a> {
    session: &'a ScopeAnchor,
    module: &'a ScopeAnchor,
}

impl<'a> Scopes<'a> {
    /// Returns the anchors enclosing tests of `module` in `session`.
    pub fn new(session: &'a TestSession, module: &'a TestModule) -> Self {
        Self {
            session: session.anchor(),
            module: module.anchor(),
        }
    }

    /// Returns the anchor for the given scope.
    pub fn anchor(&self, kind: ScopeKind) -> &'a ScopeAnchor {
        match kind {
            ScopeKind::Module => self.module,
            ScopeKind::Session => self.session,
        }
    }

    fn all(&self) -> [&'a ScopeAnchor; 2] {
        [self.module, self.session]
    }
}

/// Feeds outcomes into dependency registries and checks dependencies before tests run.
#[derive(Clone, Debug, Default)]
pub struct DependencyHooks {
    settings: DependencySettings,
}

impl DependencyHooks {
    /// Creates hooks with the given settings.
    pub fn new(settings: DependencySettings) -> Self {
        Self { settings }
    }

    /// Returns the settings these hooks were created with.
    pub fn settings(&self) -> &DependencySettings {
        &self.settings
    }

    /// Returns true if outcomes of `test` are recorded.
    pub fn is_tracked(&self, test: &TestCase) -> bool {
        test.marker().is_some() || self.settings.automark()
    }

    /// Called once per phase of every test, with the phase's outcome.
    ///
    /// Outcomes of tracked tests are recorded in both the module and the session registry, so
    /// that dependents can resolve them in either scope.
    pub fn record_outcome(
        &self,
        scopes: &Scopes<'_>,
        test: &TestCase,
        phase: TestPhase,
        outcome: TestOutcome,
    ) -> Result<(), TestNameParseError> {
        if !self.is_tracked(test) {
            return Ok(());
        }
        let explicit_name = test.marker().and_then(|marker| marker.name());
        for anchor in scopes.all() {
            anchor
                .registry()
                .add_result(test, explicit_name, phase, outcome)?;
        }
        Ok(())
    }

    /// Called before the setup phase of every test.
    ///
    /// Returns an error if the test must not run: a skip if its dependencies weren't satisfied,
    /// or a failure if its pass requirement is unknown or some dependencies were never recorded.
    pub fn check_before_run(&self, scopes: &Scopes<'_>, test: &TestCase) -> PhaseResult {
        let Some(marker) = test.marker() else {
            return Ok(());
        };
        if marker.depends().is_empty() {
            return Ok(());
        }

        // Resolve the requirement first so a bad name is reported even if dependencies passed.
        let requirement = marker.requirement().resolve()?;
        self.check(
            scopes.anchor(marker.scope()),
            test,
            marker.depends(),
            requirement,
        )
    }

    pub(crate) fn check<S: AsRef<str>>(
        &self,
        anchor: &ScopeAnchor,
        test: &TestCase,
        dependencies: &[S],
        requirement: PassRequirement,
    ) -> PhaseResult {
        debug!(
            test = %test.full_name(),
            scope = %anchor.kind(),
            %requirement,
            "checking dependencies"
        );
        anchor
            .registry()
            .check_dependencies(
                test,
                dependencies,
                requirement,
                self.settings.unknown_dependencies(),
            )
            .map_err(|err| {
                info!(test = %test.full_name(), "{err}");
                PhaseError::from(err)
            })
    }
}
