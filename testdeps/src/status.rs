// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

/// A stage of a test's execution lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum TestPhase {
    /// Fixtures and dependency checks run before the test body.
    Setup,

    /// The test body itself.
    Call,

    /// Cleanup after the test body.
    Teardown,
}

impl TestPhase {
    /// All phases, in execution order.
    pub const ALL: [TestPhase; 3] = [Self::Setup, Self::Call, Self::Teardown];

    /// Returns the lowercase name of this phase.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Call => "call",
            Self::Teardown => "teardown",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Setup => 0,
            Self::Call => 1,
            Self::Teardown => 2,
        }
    }
}

impl fmt::Display for TestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of a single phase.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum TestOutcome {
    /// The phase completed successfully.
    Passed,

    /// The phase failed.
    Failed,

    /// The phase was skipped.
    Skipped,
}

impl TestOutcome {
    /// Returns the lowercase name of this outcome.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recorded phase outcomes of a single test item.
///
/// There is exactly one status per test item (per qualified name) in a registry, no matter how
/// many identifiers it is known by.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OutcomeStatus {
    outcomes: [Option<TestOutcome>; 3],
}

impl OutcomeStatus {
    /// Creates a status with no recorded phases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a phase, replacing any earlier outcome for the same phase.
    pub fn record(&mut self, phase: TestPhase, outcome: TestOutcome) {
        self.outcomes[phase.index()] = Some(outcome);
    }

    /// Returns the recorded outcome of a phase, if any.
    pub fn outcome(&self, phase: TestPhase) -> Option<TestOutcome> {
        self.outcomes[phase.index()]
    }

    /// Returns true if all three phases were recorded as passed.
    pub fn is_success(&self) -> bool {
        self.outcomes
            .iter()
            .all(|outcome| *outcome == Some(TestOutcome::Passed))
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status(")?;
        for (i, phase) in TestPhase::ALL.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.outcome(phase) {
                Some(outcome) => write!(f, "{phase}: {outcome}")?,
                None => write!(f, "{phase}: unset")?,
            }
        }
        write!(f, ")")
    }
}

/// The statuses registered under a single dependency identifier.
#[derive(Clone, Debug)]
pub struct ResultSet<'a> {
    identifier: &'a str,
    statuses: Vec<&'a OutcomeStatus>,
}

impl<'a> ResultSet<'a> {
    /// Creates a new result set.
    pub fn new(identifier: &'a str, statuses: Vec<&'a OutcomeStatus>) -> Self {
        Self {
            identifier,
            statuses,
        }
    }

    /// Returns the identifier this set was looked up by.
    pub fn identifier(&self) -> &'a str {
        self.identifier
    }

    /// Iterates over the statuses in this set.
    pub fn statuses(&self) -> impl ExactSizeIterator<Item = &'a OutcomeStatus> + '_ {
        self.statuses.iter().copied()
    }

    /// Returns the number of statuses in this set.
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Returns true if this set has no statuses.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Returns true if every status in this set succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.statuses.iter().all(|status| status.is_success())
    }

    /// Returns true if at least one status in this set succeeded.
    pub fn any_succeeded(&self) -> bool {
        self.statuses.iter().any(|status| status.is_success())
    }
}
