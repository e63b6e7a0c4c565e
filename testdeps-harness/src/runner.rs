// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the tests of a session, one at a time.

use crate::{
    context::{PhaseError, PhaseResult, TestContext},
    hooks::{DependencyHooks, Scopes},
    suite::{PhaseFn, TestCase, TestSession},
    test_filter::TestFilter,
};
use smol_str::SmolStr;
use std::{
    any::Any,
    convert::Infallible,
    panic::{self, AssertUnwindSafe},
    time::{Duration, Instant},
};
use testdeps::{OutcomeStatus, TestItem, TestOutcome, TestPhase};
use tracing::debug;

/// The final status of a test.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TestStatus {
    /// Every phase that ran passed.
    Passed,

    /// The test was skipped, for example because its dependencies weren't satisfied.
    Skipped {
        /// The first skip message.
        message: String,
    },

    /// A phase failed.
    Failed {
        /// The first phase that failed.
        phase: TestPhase,

        /// The failure message.
        message: String,
    },
}

/// The result of running a single test.
#[derive(Clone, Debug)]
pub struct TestResult {
    /// The module the test belongs to.
    pub module: SmolStr,

    /// The qualified name of the test: `Group::name` or `name`.
    pub name: String,

    /// The final status.
    pub status: TestStatus,

    /// The outcome of each phase. Phases that didn't run are unset.
    pub phases: OutcomeStatus,

    /// The time taken by all phases.
    pub elapsed: Duration,
}

impl TestResult {
    /// Returns the full name of the test: `module::Group::name`.
    pub fn full_name(&self) -> String {
        format!("{}::{}", self.module, self.name)
    }
}

/// Statistics for a test run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RunStats {
    /// The total number of tests that were expected to be run at the beginning.
    pub initial_run_count: usize,

    /// The total number of tests that finished running.
    pub finished_count: usize,

    /// The number of tests that passed.
    pub passed: usize,

    /// The number of tests that failed.
    pub failed: usize,

    /// The number of tests that were skipped at runtime.
    pub skipped: usize,

    /// The number of tests excluded by the filter.
    pub filtered_out: usize,
}

impl RunStats {
    /// Returns true if no test failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    fn on_test_finished(&mut self, status: &TestStatus) {
        self.finished_count += 1;
        match status {
            TestStatus::Passed => self.passed += 1,
            TestStatus::Skipped { .. } => self.skipped += 1,
            TestStatus::Failed { .. } => self.failed += 1,
        }
    }
}

/// An event that occurs during a test run.
#[derive(Clone, Debug)]
pub enum RunEvent<'a> {
    /// The run started.
    RunStarted {
        /// The number of tests that will be run.
        test_count: usize,
    },

    /// A test started running.
    TestStarted {
        /// The test.
        test: &'a TestCase,
    },

    /// A test finished running.
    TestFinished {
        /// The test.
        test: &'a TestCase,

        /// Its result.
        result: TestResult,
    },

    /// The run finished.
    RunFinished {
        /// Statistics for the run.
        stats: RunStats,

        /// The time taken by the whole run.
        elapsed: Duration,
    },
}

/// Context for running tests.
#[derive(Debug)]
pub struct TestRunner<'a> {
    session: &'a TestSession,
    hooks: DependencyHooks,
    filter: TestFilter,
}

impl<'a> TestRunner<'a> {
    /// Creates a runner for `session` that matches every test.
    pub fn new(session: &'a TestSession, hooks: DependencyHooks) -> Self {
        Self {
            session,
            hooks,
            filter: TestFilter::any(),
        }
    }

    /// Sets the filter used to select tests.
    pub fn with_filter(mut self, filter: TestFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Returns the number of tests that match the filter.
    pub fn run_count(&self) -> usize {
        self.matching_tests().count()
    }

    /// Iterates over the tests that match the filter, in run order.
    pub fn matching_tests(&self) -> impl Iterator<Item = &'a TestCase> + '_ {
        self.session
            .modules()
            .flat_map(|module| module.tests())
            .filter(|test| self.filter.filter_match(&test.full_name()).is_match())
    }

    /// Executes the matching tests in order, each through all of its phases.
    ///
    /// The callback is called with each event of the run.
    pub fn execute<F>(&self, mut callback: F) -> RunStats
    where
        F: FnMut(RunEvent<'a>),
    {
        let res = self.try_execute::<Infallible, _>(|event| {
            callback(event);
            Ok(())
        });
        match res {
            Ok(stats) => stats,
            Err(never) => match never {},
        }
    }

    /// Executes the matching tests in order, each through all of its phases.
    ///
    /// Accepts a callback that is called with each event of the run. If the callback returns an
    /// error, the run stops and the error is returned.
    pub fn try_execute<E, F>(&self, mut callback: F) -> Result<RunStats, E>
    where
        F: FnMut(RunEvent<'a>) -> Result<(), E>,
    {
        let run_start = Instant::now();
        let mut stats = RunStats {
            initial_run_count: self.run_count(),
            ..RunStats::default()
        };
        callback(RunEvent::RunStarted {
            test_count: stats.initial_run_count,
        })?;

        for module in self.session.modules() {
            let scopes = Scopes::new(self.session, module);
            for test in module.tests() {
                let filter_match = self.filter.filter_match(&test.full_name());
                if !filter_match.is_match() {
                    stats.filtered_out += 1;
                    continue;
                }

                callback(RunEvent::TestStarted { test })?;
                let result = self.run_test(&scopes, test);
                stats.on_test_finished(&result.status);
                callback(RunEvent::TestFinished { test, result })?;
            }
        }

        callback(RunEvent::RunFinished {
            stats,
            elapsed: run_start.elapsed(),
        })?;
        Ok(stats)
    }

    fn run_test(&self, scopes: &Scopes<'a>, test: &'a TestCase) -> TestResult {
        let start = Instant::now();
        let mut state = TestState::default();

        let setup = self
            .hooks
            .check_before_run(scopes, test)
            .and_then(|()| self.run_phase(scopes, test, TestPhase::Setup, test.setup_fn()));
        self.finish_phase(scopes, test, TestPhase::Setup, setup, &mut state);

        // The body only runs if setup passed, but teardown always runs.
        if state.failure.is_none() && state.skip.is_none() {
            let call = self.run_phase(scopes, test, TestPhase::Call, Some(test.call_fn()));
            self.finish_phase(scopes, test, TestPhase::Call, call, &mut state);
        }

        let teardown = self.run_phase(scopes, test, TestPhase::Teardown, test.teardown_fn());
        self.finish_phase(scopes, test, TestPhase::Teardown, teardown, &mut state);

        let status = match (state.failure, state.skip) {
            (Some((phase, message)), _) => TestStatus::Failed { phase, message },
            (None, Some(message)) => TestStatus::Skipped { message },
            (None, None) => TestStatus::Passed,
        };
        TestResult {
            module: test.module().into(),
            name: test.qualified_name(),
            status,
            phases: state.phases,
            elapsed: start.elapsed(),
        }
    }

    fn run_phase(
        &self,
        scopes: &Scopes<'a>,
        test: &'a TestCase,
        phase: TestPhase,
        phase_fn: Option<&PhaseFn>,
    ) -> PhaseResult {
        let Some(phase_fn) = phase_fn else {
            return Ok(());
        };
        let ctx = TestContext::new(&self.hooks, *scopes, test, phase);
        match panic::catch_unwind(AssertUnwindSafe(|| phase_fn(&ctx))) {
            Ok(result) => result,
            Err(payload) => Err(PhaseError::fail(panic_message(payload.as_ref()))),
        }
    }

    fn finish_phase(
        &self,
        scopes: &Scopes<'a>,
        test: &'a TestCase,
        phase: TestPhase,
        result: PhaseResult,
        state: &mut TestState,
    ) {
        let outcome = match &result {
            Ok(()) => TestOutcome::Passed,
            Err(PhaseError::Skipped { .. }) => TestOutcome::Skipped,
            Err(PhaseError::Failed { .. }) => TestOutcome::Failed,
        };
        debug!(test = %test.full_name(), %phase, %outcome, "phase finished");
        state.phases.record(phase, outcome);

        match result {
            Ok(()) => {}
            Err(PhaseError::Skipped { message }) => {
                state.skip.get_or_insert(message);
            }
            Err(PhaseError::Failed { message }) => {
                state.failure.get_or_insert((phase, message));
            }
        }

        if let Err(error) = self.hooks.record_outcome(scopes, test, phase, outcome) {
            state.failure.get_or_insert((phase, error.to_string()));
        }
    }
}

#[derive(Debug, Default)]
struct TestState {
    phases: OutcomeStatus,
    failure: Option<(TestPhase, String)>,
    skip: Option<String>,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("test panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("test panicked: {message}")
    } else {
        "test panicked".to_owned()
    }
}
