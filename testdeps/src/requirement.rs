// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{ResultSet, errors::PassRequirementParseError};
use smol_str::SmolStr;
use std::{fmt, str::FromStr};

/// How many dependency successes a test needs before it may run.
///
/// A requirement is evaluated over one [`ResultSet`] per known dependency identifier.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum PassRequirement {
    /// Every test recorded under every dependency identifier succeeded.
    ///
    /// This is the default.
    #[default]
    All,

    /// At least one dependency identifier has a successful test.
    Any,

    /// Every dependency identifier has at least one successful test.
    Each,
}

static REQUIREMENTS_BY_NAME: [(&str, PassRequirement); 3] = [
    ("all", PassRequirement::All),
    ("any", PassRequirement::Any),
    ("each", PassRequirement::Each),
];

impl PassRequirement {
    /// Returns the names of all known requirements.
    pub fn variants() -> [&'static str; 3] {
        REQUIREMENTS_BY_NAME.map(|(name, _)| name)
    }

    /// Returns the name of this requirement.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
            Self::Each => "each",
        }
    }

    /// Evaluates this requirement over the given result sets.
    ///
    /// Over an empty list, `All` and `Each` hold vacuously while `Any` does not.
    pub fn evaluate(self, result_sets: &[ResultSet<'_>]) -> bool {
        match self {
            Self::All => result_sets.iter().all(|set| set.all_succeeded()),
            Self::Any => result_sets.iter().any(|set| set.any_succeeded()),
            Self::Each => result_sets.iter().all(|set| set.any_succeeded()),
        }
    }
}

impl FromStr for PassRequirement {
    type Err = PassRequirementParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REQUIREMENTS_BY_NAME
            .iter()
            .find_map(|(name, requirement)| (*name == s).then_some(*requirement))
            .ok_or_else(|| PassRequirementParseError::new(s))
    }
}

impl fmt::Display for PassRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pass requirement as declared on a test: either by name or directly.
///
/// Names are resolved with [`resolve`](Self::resolve) before any dependency is looked at, so a
/// misspelled name is reported even when every dependency passed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequirementSelector {
    /// A requirement referred to by name, such as `"each"`.
    Named(SmolStr),

    /// A requirement given directly.
    Requirement(PassRequirement),
}

impl RequirementSelector {
    /// Resolves this selector to a requirement.
    pub fn resolve(&self) -> Result<PassRequirement, PassRequirementParseError> {
        match self {
            Self::Named(name) => name.parse(),
            Self::Requirement(requirement) => Ok(*requirement),
        }
    }
}

impl Default for RequirementSelector {
    fn default() -> Self {
        Self::Requirement(PassRequirement::default())
    }
}

impl From<PassRequirement> for RequirementSelector {
    fn from(requirement: PassRequirement) -> Self {
        Self::Requirement(requirement)
    }
}

impl From<&str> for RequirementSelector {
    fn from(name: &str) -> Self {
        Self::Named(name.into())
    }
}
