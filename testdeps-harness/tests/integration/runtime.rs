// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use pretty_assertions::assert_eq;
use testdeps_harness::{
    DependencySettings, TestCase, TestModule, TestSession, TestStatus,
    testdeps::{PassRequirement, TestOutcome, TestPhase},
};

#[test]
fn depends_in_body_skips() {
    let session = TestSession::new().with_module(
        TestModule::new("runtime")
            .with_test(marked(failing("test_a")))
            .with_test(marked(passing("test_b")))
            .with_test(TestCase::new("test_c", |ctx| {
                ctx.depends(&["test_b"])?;
                ctx.depends(&["test_a"])?;
                panic!("unreachable: test_a failed");
            })),
    );

    let run = run(&session, DependencySettings::new());
    let result = run.result("runtime::test_c");
    assert_eq!(result.status, skipped("test_c depends on test_a"));
    assert_eq!(
        result.phases.outcome(TestPhase::Call),
        Some(TestOutcome::Skipped)
    );
}

#[test]
fn depends_with_requirement() {
    let session = TestSession::new().with_module(
        TestModule::new("runtime")
            .with_test(marked(failing("test_a")))
            .with_test(marked(passing("test_b")))
            .with_test(TestCase::new("test_c", |ctx| {
                ctx.depends_with(&["test_a", "test_b"], PassRequirement::Any)
            }))
            .with_test(TestCase::new("test_d", |ctx| {
                ctx.depends_with(&["test_a", "test_b"], "each")
            })),
    );

    let run = run(&session, DependencySettings::new());
    assert_eq!(run.status("runtime::test_c"), &TestStatus::Passed);
    assert_eq!(
        run.status("runtime::test_d"),
        &skipped("test_d depends on test_a, test_b")
    );
}

#[test]
fn depends_on_unknown_fails() {
    let session = TestSession::new().with_module(
        TestModule::new("runtime").with_test(
            TestCase::new("test_setup", |_| Ok(())).with_setup(|ctx| ctx.depends(&["nothing"])),
        ),
    );

    let run = run(&session, DependencySettings::new());
    assert_eq!(
        run.status("runtime::test_setup"),
        &TestStatus::Failed {
            phase: TestPhase::Setup,
            message: "test_setup has unknown dependencies: nothing".to_owned(),
        }
    );
}

#[test]
fn context_knows_test_and_phase() {
    let session = TestSession::new().with_module(
        TestModule::new("runtime").with_test(
            TestCase::new("test_ctx", |ctx| {
                assert_eq!(ctx.phase(), TestPhase::Call);
                assert_eq!(ctx.test().full_name(), "runtime::test_ctx");
                Ok(())
            })
            .with_teardown(|ctx| {
                assert_eq!(ctx.phase(), TestPhase::Teardown);
                Ok(())
            }),
        ),
    );

    let run = run(&session, DependencySettings::new());
    assert_eq!(run.status("runtime::test_ctx"), &TestStatus::Passed);
}
