// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Outcome bookkeeping and dependency resolution between test cases.
//!
//! A test can declare that it depends on other tests. Before it runs, the host asks a
//! [`DependencyManager`] whether those tests have already run and satisfied a
//! [`PassRequirement`]. If they have not, the dependent test is skipped; if a dependency was
//! never seen at all, the dependent test fails.
//!
//! Every test is recorded under several identifiers at once, so a dependency can name:
//!
//! * an explicit alias chosen by the user,
//! * the qualified name, such as `Group::test_name[1-2]`,
//! * the owning group, such as `Group`,
//! * the bare function name, such as `test_name` (this matches every parametrized variant),
//! * the parametrization suffix, such as `1-2`.
//!
//! Registries are owned by [`ScopeAnchor`]s, which stand in for the host's modules and sessions.
//! The `testdeps-harness` crate wires all of this into a small sequential test harness.

pub mod errors;
mod item;
mod manager;
mod name;
mod requirement;
mod scope;
mod status;

pub use item::{TestItem, canonical_name};
pub use manager::{DependencyManager, UnknownDependencies};
pub use name::{TestNameParts, parse_test_name};
pub use requirement::{PassRequirement, RequirementSelector};
pub use scope::{ScopeAnchor, ScopeKind};
pub use status::{OutcomeStatus, ResultSet, TestOutcome, TestPhase};
