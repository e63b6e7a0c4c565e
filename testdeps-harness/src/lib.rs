// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! A sequential test harness where tests can depend on each other.
//!
//! Tests are grouped into [`TestModule`]s inside a [`TestSession`]. Every test runs through a
//! setup, call and teardown phase. A test carrying a [`DependencyMarker`] has the outcome of each
//! phase recorded; if it declares dependencies, they are checked before its setup phase and the
//! test is skipped unless they passed.
//!
//! Use the harness from a test target with `harness = false`:
//!
//! ```no_run
//! use std::process::ExitCode;
//! use testdeps_harness::{DependencyMarker, TestCase, TestModule, TestSession, run_main};
//!
//! fn main() -> ExitCode {
//!     let module = TestModule::new("basic")
//!         .with_test(
//!             TestCase::new("test_a", |_| Ok(())).with_marker(DependencyMarker::new()),
//!         )
//!         .with_test(
//!             TestCase::new("test_b", |_| Ok(()))
//!                 .with_marker(DependencyMarker::new().depends_on(["test_a"])),
//!         );
//!     run_main(TestSession::new().with_module(module))
//! }
//! ```

mod cli;
mod config;
mod context;
pub mod errors;
mod hooks;
mod junit;
mod marker;
mod output;
mod reporter;
mod runner;
mod suite;
mod test_filter;

pub use cli::{HarnessExitCode, HarnessOpts, run_main};
pub use config::{DEFAULT_CONFIG_PATH, DependencySettings, parse_bool_setting};
pub use context::{PhaseError, PhaseResult, TestContext};
pub use hooks::{DependencyHooks, Scopes};
pub use junit::JunitReporter;
pub use marker::DependencyMarker;
pub use output::{Color, LOG_ENV};
pub use reporter::TestReporter;
pub use runner::{RunEvent, RunStats, TestResult, TestRunner, TestStatus};
pub use suite::{TestCase, TestModule, TestSession};
pub use test_filter::{FilterMatch, MismatchReason, TestFilter};
pub use testdeps;
