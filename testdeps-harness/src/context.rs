// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    hooks::{DependencyHooks, Scopes},
    suite::TestCase,
};
use testdeps::{
    RequirementSelector, ScopeKind, TestPhase,
    errors::{DependencyCheckError, PassRequirementParseError, TestNameParseError},
};
use thiserror::Error;

/// The result of running one phase of a test.
pub type PhaseResult = Result<(), PhaseError>;

/// A phase that did not pass.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PhaseError {
    /// The phase was skipped.
    #[error("skipped: {message}")]
    Skipped {
        /// Why the phase was skipped.
        message: String,
    },

    /// The phase failed.
    #[error("failed: {message}")]
    Failed {
        /// Why the phase failed.
        message: String,
    },
}

impl PhaseError {
    /// Creates a skip with the given message.
    pub fn skip(message: impl Into<String>) -> Self {
        Self::Skipped {
            message: message.into(),
        }
    }

    /// Creates a failure with the given message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Returns the message.
    pub fn message(&self) -> &str {
        match self {
            Self::Skipped { message } | Self::Failed { message } => message,
        }
    }
}

impl From<DependencyCheckError> for PhaseError {
    fn from(err: DependencyCheckError) -> Self {
        if err.is_skip() {
            Self::skip(err.to_string())
        } else {
            Self::fail(err.to_string())
        }
    }
}

impl From<PassRequirementParseError> for PhaseError {
    fn from(err: PassRequirementParseError) -> Self {
        Self::fail(err.to_string())
    }
}

impl From<TestNameParseError> for PhaseError {
    fn from(err: TestNameParseError) -> Self {
        Self::fail(err.to_string())
    }
}

/// Handed to every phase of a running test.
///
/// Through the context, a test body can check dependencies at runtime, after deciding that it
/// needs them.
pub struct TestContext<'a> {
    hooks: &'a DependencyHooks,
    scopes: Scopes<'a>,
    test: &'a TestCase,
    phase: TestPhase,
}

impl<'a> TestContext<'a> {
    pub(crate) fn new(
        hooks: &'a DependencyHooks,
        scopes: Scopes<'a>,
        test: &'a TestCase,
        phase: TestPhase,
    ) -> Self {
        Self {
            hooks,
            scopes,
            test,
            phase,
        }
    }

    /// Returns the running test.
    pub fn test(&self) -> &'a TestCase {
        self.test
    }

    /// Returns the phase being run.
    pub fn phase(&self) -> TestPhase {
        self.phase
    }

    /// Requires every test recorded under each of `dependencies` to have succeeded.
    ///
    /// Returns an error that skips the test if they didn't, or fails it if a dependency is
    /// unknown. Propagate it with `?`.
    pub fn depends<S: AsRef<str>>(&self, dependencies: &[S]) -> PhaseResult {
        self.depends_with(dependencies, RequirementSelector::default())
    }

    /// Like [`depends`](Self::depends), but with the given pass requirement.
    pub fn depends_with<S: AsRef<str>>(
        &self,
        dependencies: &[S],
        requirement: impl Into<RequirementSelector>,
    ) -> PhaseResult {
        let requirement = requirement.into().resolve()?;
        let scope = self
            .test
            .marker()
            .map_or(ScopeKind::default(), |marker| marker.scope());
        self.hooks.check(
            self.scopes.anchor(scope),
            self.test,
            dependencies,
            requirement,
        )
    }
}
