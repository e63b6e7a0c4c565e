// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use pretty_assertions::assert_eq;
use std::{cell::Cell, rc::Rc};
use testdeps_harness::{
    DependencyMarker, DependencySettings, PhaseError, TestCase, TestModule, TestSession,
    TestStatus,
    testdeps::{TestOutcome, TestPhase},
};

#[test]
fn dependent_runs_after_passing_dependency() {
    let session = TestSession::new().with_module(
        TestModule::new("basic")
            .with_test(marked(passing("test_a")))
            .with_test(
                passing("test_b").with_marker(DependencyMarker::new().depends_on(["test_a"])),
            ),
    );

    let run = run(&session, DependencySettings::new());
    assert_eq!(run.status("basic::test_b"), &TestStatus::Passed);
    assert_eq!(run.stats.passed, 2);
    assert!(run.stats.is_success());
}

#[test]
fn dependent_skipped_after_failing_dependency() {
    let session = TestSession::new().with_module(
        TestModule::new("basic")
            .with_test(marked(failing("test_a")))
            .with_test(
                passing("test_b").with_marker(DependencyMarker::new().depends_on(["test_a"])),
            ),
    );

    let run = run(&session, DependencySettings::new());
    assert_eq!(
        run.status("basic::test_a"),
        &TestStatus::Failed {
            phase: TestPhase::Call,
            message: "assertion failed".to_owned(),
        }
    );
    assert_eq!(
        run.status("basic::test_b"),
        &skipped("test_b depends on test_a")
    );

    // The body of a skipped test never runs.
    let phases = &run.result("basic::test_b").phases;
    assert_eq!(phases.outcome(TestPhase::Setup), Some(TestOutcome::Skipped));
    assert_eq!(phases.outcome(TestPhase::Call), None);
    assert_eq!(phases.outcome(TestPhase::Teardown), Some(TestOutcome::Passed));
    assert_eq!(
        (run.stats.passed, run.stats.failed, run.stats.skipped),
        (0, 1, 1)
    );
}

#[test]
fn skips_propagate_through_chains() {
    let session = TestSession::new().with_module(
        TestModule::new("chain")
            .with_test(marked(failing("test_a")))
            .with_test(
                passing("test_b").with_marker(DependencyMarker::new().depends_on(["test_a"])),
            )
            .with_test(
                passing("test_c").with_marker(DependencyMarker::new().depends_on(["test_b"])),
            ),
    );

    let run = run(&session, DependencySettings::new());
    assert_eq!(
        run.status("chain::test_c"),
        &skipped("test_c depends on test_b")
    );
}

#[test]
fn teardown_failure_fails_dependency() {
    let teardown_ran = Rc::new(Cell::new(false));
    let teardown_flag = teardown_ran.clone();
    let session = TestSession::new().with_module(
        TestModule::new("teardown")
            .with_test(marked(passing("test_a")).with_teardown(move |_| {
                teardown_flag.set(true);
                Err(PhaseError::fail("could not clean up"))
            }))
            .with_test(
                passing("test_b").with_marker(DependencyMarker::new().depends_on(["test_a"])),
            ),
    );

    let run = run(&session, DependencySettings::new());
    assert!(teardown_ran.get());
    assert_eq!(
        run.status("teardown::test_a"),
        &TestStatus::Failed {
            phase: TestPhase::Teardown,
            message: "could not clean up".to_owned(),
        }
    );
    assert_eq!(
        run.status("teardown::test_b"),
        &skipped("test_b depends on test_a")
    );
}

#[test]
fn teardown_runs_after_setup_failure() {
    let teardown_ran = Rc::new(Cell::new(false));
    let teardown_flag = teardown_ran.clone();
    let session = TestSession::new().with_module(
        TestModule::new("setup").with_test(
            marked(passing("test_a"))
                .with_setup(|_| Err(PhaseError::fail("no database")))
                .with_teardown(move |_| {
                    teardown_flag.set(true);
                    Ok(())
                }),
        ),
    );

    let run = run(&session, DependencySettings::new());
    assert!(teardown_ran.get());
    let result = run.result("setup::test_a");
    assert_eq!(
        result.status,
        TestStatus::Failed {
            phase: TestPhase::Setup,
            message: "no database".to_owned(),
        }
    );
    assert_eq!(result.phases.outcome(TestPhase::Call), None);
    assert!(!result.phases.is_success());
}

#[test]
fn panics_are_failures() {
    let session = TestSession::new().with_module(
        TestModule::new("panics")
            .with_test(marked(TestCase::new("test_a", |_| panic!("kaboom"))))
            .with_test(
                passing("test_b").with_marker(DependencyMarker::new().depends_on(["test_a"])),
            ),
    );

    let run = run(&session, DependencySettings::new());
    assert_eq!(
        run.status("panics::test_a"),
        &TestStatus::Failed {
            phase: TestPhase::Call,
            message: "test panicked: kaboom".to_owned(),
        }
    );
    assert_eq!(
        run.status("panics::test_b"),
        &skipped("test_b depends on test_a")
    );
}

#[test]
fn skipped_dependency_is_not_success() {
    let session = TestSession::new().with_module(
        TestModule::new("skips")
            .with_test(marked(TestCase::new("test_a", |_| {
                Err(PhaseError::skip("not on this platform"))
            })))
            .with_test(
                passing("test_b").with_marker(DependencyMarker::new().depends_on(["test_a"])),
            ),
    );

    let run = run(&session, DependencySettings::new());
    assert_eq!(
        run.status("skips::test_a"),
        &skipped("not on this platform")
    );
    assert_eq!(
        run.status("skips::test_b"),
        &skipped("test_b depends on test_a")
    );
}

#[test]
fn unknown_dependency_fails_or_is_ignored() {
    let session = || {
        TestSession::new().with_module(
            TestModule::new("unknown").with_test(
                passing("test_b")
                    .with_marker(DependencyMarker::new().depends_on(["test_missing"])),
            ),
        )
    };

    let run_default = run(&session(), DependencySettings::new());
    assert_eq!(
        run_default.status("unknown::test_b"),
        &TestStatus::Failed {
            phase: TestPhase::Setup,
            message: "test_b has unknown dependencies: test_missing".to_owned(),
        }
    );
    assert!(!run_default.stats.is_success());

    let run_ignore = run(
        &session(),
        DependencySettings::new().with_ignore_unknown(true),
    );
    assert_eq!(run_ignore.status("unknown::test_b"), &TestStatus::Passed);
}

#[test]
fn unmarked_tests_are_unknown_unless_automarked() {
    let session = || {
        TestSession::new().with_module(
            TestModule::new("automark")
                .with_test(passing("test_a"))
                .with_test(
                    passing("test_b").with_marker(DependencyMarker::new().depends_on(["test_a"])),
                ),
        )
    };

    let run_default = run(&session(), DependencySettings::new());
    assert!(matches!(
        run_default.status("automark::test_b"),
        TestStatus::Failed { phase: TestPhase::Setup, .. }
    ));

    let run_automark = run(&session(), DependencySettings::new().with_automark(true));
    assert_eq!(run_automark.status("automark::test_b"), &TestStatus::Passed);
}

#[test]
fn explicit_name_and_bare_function_family() {
    let session = TestSession::new().with_module(
        TestModule::new("family")
            .with_tests(
                TestCase::parametrized("test_load", ["small", "large"], |_, _| Ok(()))
                    .into_iter()
                    .map(marked),
            )
            .with_test(
                passing("test_setup_db")
                    .with_group("Database")
                    .with_marker(DependencyMarker::new().with_name("database")),
            )
            .with_test(passing("test_query").with_marker(
                DependencyMarker::new().depends_on(["test_load", "database", "large"]),
            ))
            .with_test(passing("test_group").with_marker(
                DependencyMarker::new().depends_on(["Database", "Database::test_setup_db"]),
            )),
    );

    let run = run(&session, DependencySettings::new());
    assert_eq!(run.status("family::test_query"), &TestStatus::Passed);
    assert_eq!(run.status("family::test_group"), &TestStatus::Passed);
}

#[test]
fn one_failing_variant_fails_the_family() {
    let session = TestSession::new().with_module(
        TestModule::new("family")
            .with_tests(
                TestCase::parametrized("test_load", [1, 2, 3], |_, param| {
                    if *param == 2 {
                        Err(PhaseError::fail("variant 2 failed"))
                    } else {
                        Ok(())
                    }
                })
                .into_iter()
                .map(marked),
            )
            .with_test(
                passing("test_all").with_marker(DependencyMarker::new().depends_on(["test_load"])),
            )
            .with_test(
                passing("test_one")
                    .with_marker(DependencyMarker::new().depends_on(["test_load[1]"])),
            ),
    );

    let run = run(&session, DependencySettings::new());
    assert_eq!(
        run.status("family::test_all"),
        &skipped("test_all depends on test_load")
    );
    assert_eq!(run.status("family::test_one"), &TestStatus::Passed);
}

#[test]
fn malformed_name_fails_the_test() {
    let session = TestSession::new()
        .with_module(TestModule::new("names").with_test(marked(passing("not a name"))));

    let run = run(&session, DependencySettings::new());
    let result = run.result("names::not a name");
    match &result.status {
        TestStatus::Failed { phase, message } => {
            assert_eq!(*phase, TestPhase::Setup);
            assert!(message.contains("malformed test name"), "message: {message}");
        }
        other => panic!("expected failure, found {other:?}"),
    }
    assert_eq!(result.phases.outcome(TestPhase::Call), None);
}
