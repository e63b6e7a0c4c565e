// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    OutcomeStatus, PassRequirement, ResultSet, ScopeKind, TestItem, TestOutcome, TestPhase,
    canonical_name,
    errors::{DependencyCheckError, TestNameParseError},
    parse_test_name,
};
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// What to do with dependency identifiers that have no recorded results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UnknownDependencies {
    /// Fail the dependent test, naming the unknown identifiers.
    ///
    /// This is the default.
    #[default]
    Fail,

    /// Drop unknown identifiers and evaluate the requirement over the known ones only.
    Ignore,
}

/// The results of every test recorded within one scope.
///
/// Statuses live in an insertion-ordered arena keyed by qualified name. A separate index maps
/// every identifier a test is known by to the arena slots recorded under it. Entries are only
/// ever added, so arena indexes stay valid for the manager's lifetime.
#[derive(Clone, Debug, Default)]
pub struct DependencyManager {
    kind: ScopeKind,
    // Invariant: every index stored in `by_identifier` is a valid index into `results`.
    results: IndexMap<SmolStr, OutcomeStatus>,
    by_identifier: HashMap<SmolStr, BTreeSet<usize>>,
}

impl DependencyManager {
    /// Creates an empty manager for the given kind of scope.
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            results: IndexMap::new(),
            by_identifier: HashMap::new(),
        }
    }

    /// Returns the kind of scope this manager belongs to.
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Records the outcome of a phase of `item`.
    ///
    /// The test's status is indexed under its qualified name, group, bare function name,
    /// parametrization suffix and, if provided, `explicit_name`. A session-scoped manager also
    /// indexes it under the module-qualified name.
    pub fn add_result(
        &mut self,
        item: &dyn TestItem,
        explicit_name: Option<&str>,
        phase: TestPhase,
        outcome: TestOutcome,
    ) -> Result<(), TestNameParseError> {
        let qualified = canonical_name(item);
        let parts = parse_test_name(&qualified)?;

        let key: SmolStr = match self.kind {
            ScopeKind::Module => qualified.as_str().into(),
            ScopeKind::Session => format!("{}::{qualified}", item.module()).into(),
        };

        let entry = self.results.entry(key.clone());
        let index = entry.index();
        let status = entry.or_default();
        status.record(phase, outcome);
        debug!(
            test = %key,
            %phase,
            %outcome,
            %status,
            "recorded test outcome"
        );

        let identifiers = [
            explicit_name,
            parts.group,
            Some(parts.function),
            parts.params,
            Some(qualified.as_str()),
            Some(key.as_str()),
        ];
        for identifier in identifiers.into_iter().flatten() {
            // An empty parametrization suffix (`test[]`) isn't a useful identifier.
            if identifier.is_empty() {
                continue;
            }
            self.by_identifier
                .entry(identifier.into())
                .or_default()
                .insert(index);
        }

        Ok(())
    }

    /// Returns the statuses recorded under `identifier`, or `None` if it was never recorded.
    pub fn results_for<'a>(&'a self, identifier: &'a str) -> Option<ResultSet<'a>> {
        let indexes = self.by_identifier.get(identifier)?;
        let statuses = indexes
            .iter()
            .filter_map(|index| self.results.get_index(*index).map(|(_, status)| status))
            .collect();
        Some(ResultSet::new(identifier, statuses))
    }

    /// Returns the status of the test with the given qualified (or, in session scope,
    /// module-qualified) name.
    pub fn status(&self, key: &str) -> Option<&OutcomeStatus> {
        self.results.get(key)
    }

    /// Returns the number of distinct test items recorded.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Decides whether `item` may run given its declared `dependencies`.
    ///
    /// Returns `Ok(())` if the test may proceed. Otherwise, the error says whether the test
    /// should be skipped (the dependencies ran but don't meet `requirement`) or failed (some
    /// dependencies are unknown and `on_unknown` is [`UnknownDependencies::Fail`]).
    pub fn check_dependencies<S: AsRef<str>>(
        &self,
        item: &dyn TestItem,
        dependencies: &[S],
        requirement: PassRequirement,
        on_unknown: UnknownDependencies,
    ) -> Result<(), DependencyCheckError> {
        let mut known = Vec::with_capacity(dependencies.len());
        let mut unknown = Vec::new();
        for dependency in dependencies {
            let dependency = dependency.as_ref();
            match self.results_for(dependency) {
                Some(set) => known.push(set),
                None => unknown.push(SmolStr::from(dependency)),
            }
        }

        let test_name = canonical_name(item);
        if !unknown.is_empty() {
            match on_unknown {
                UnknownDependencies::Fail => {
                    return Err(DependencyCheckError::UnknownDependencies { test_name, unknown });
                }
                UnknownDependencies::Ignore => {
                    warn!(
                        test = %test_name,
                        unknown = %unknown.join(", "),
                        "ignoring unknown dependencies"
                    );
                }
            }
        }

        if requirement.evaluate(&known) {
            debug!(test = %test_name, %requirement, "dependencies satisfied");
            Ok(())
        } else {
            debug!(test = %test_name, %requirement, "dependencies not satisfied");
            Err(DependencyCheckError::Unsatisfied {
                test_name,
                dependencies: dependencies
                    .iter()
                    .map(|dependency| SmolStr::from(dependency.as_ref()))
                    .collect(),
            })
        }
    }
}
