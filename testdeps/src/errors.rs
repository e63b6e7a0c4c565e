// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by dependency tracking.

use crate::{PassRequirement, ScopeKind};
use smol_str::SmolStr;
use thiserror::Error;

/// A test's display name did not have the form `[Group::]name[[params]]`.
///
/// Hosts are expected to always hand out well-formed names, so this indicates a bug in the host
/// rather than in the test.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("malformed test name `{name}` (expected `[Group::]name[[params]]`)")]
pub struct TestNameParseError {
    name: String,
}

impl TestNameParseError {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the name that failed to parse.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An error that occurs while resolving a [`PassRequirement`] from its name.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error(
    "unrecognized pass requirement: {input}\n(known values: {})",
    PassRequirement::variants().join(", "),
)]
pub struct PassRequirementParseError {
    input: String,
}

impl PassRequirementParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the input that failed to resolve.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// An error that occurs while parsing a [`ScopeKind`] from a string.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error(
    "unrecognized dependency scope: {input}\n(known values: {})",
    ScopeKind::variants().join(", "),
)]
pub struct ScopeKindParseError {
    input: String,
}

impl ScopeKindParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// The dependencies of a test do not allow it to run.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum DependencyCheckError {
    /// All dependencies are known, but their outcomes don't meet the pass requirement.
    ///
    /// The dependent test should be skipped.
    #[error("{test_name} depends on {}", .dependencies.join(", "))]
    Unsatisfied {
        /// The qualified name of the requesting test.
        test_name: String,

        /// The full list of dependencies the test declared.
        dependencies: Vec<SmolStr>,
    },

    /// Some dependencies were never recorded in this scope.
    ///
    /// The dependent test should fail.
    #[error("{test_name} has unknown dependencies: {}", .unknown.join(", "))]
    UnknownDependencies {
        /// The qualified name of the requesting test.
        test_name: String,

        /// The identifiers that have no recorded results.
        unknown: Vec<SmolStr>,
    },
}

impl DependencyCheckError {
    /// Returns true if the dependent test should be skipped rather than failed.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Unsatisfied { .. })
    }

    /// Returns the qualified name of the test whose check failed.
    pub fn test_name(&self) -> &str {
        match self {
            Self::Unsatisfied { test_name, .. } | Self::UnknownDependencies { test_name, .. } => {
                test_name
            }
        }
    }
}
