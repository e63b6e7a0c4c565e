// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use pretty_assertions::assert_eq;
use test_case::test_case;
use testdeps_harness::{
    DependencyMarker, DependencySettings, PhaseError, TestCase, TestModule, TestSession,
    TestStatus,
    testdeps::{PassRequirement, TestPhase},
};

// g1 has two passing variants, g2 has one passing and one failing variant.
fn groups_module(dependent: TestCase) -> TestSession {
    let g1 = TestCase::parametrized("test_g1", [1, 2], |_, _| Ok(()));
    let g2 = TestCase::parametrized("test_g2", [1, 2], |_, param| {
        if *param == 2 {
            Err(PhaseError::fail("second variant fails"))
        } else {
            Ok(())
        }
    });
    TestSession::new().with_module(
        TestModule::new("groups")
            .with_tests(g1.into_iter().chain(g2).map(marked))
            .with_test(dependent),
    )
}

#[test_case(PassRequirement::All, false ; "all")]
#[test_case(PassRequirement::Each, true ; "each")]
#[test_case(PassRequirement::Any, true ; "any")]
fn requirement_over_groups(requirement: PassRequirement, satisfied: bool) {
    let session = groups_module(passing("test_dependent").with_marker(
        DependencyMarker::new()
            .depends_on(["test_g1", "test_g2"])
            .with_requirement(requirement),
    ));

    let run = run(&session, DependencySettings::new());
    let expected = if satisfied {
        TestStatus::Passed
    } else {
        skipped("test_dependent depends on test_g1, test_g2")
    };
    assert_eq!(run.status("groups::test_dependent"), &expected);
}

#[test_case("all", false ; "all")]
#[test_case("each", true ; "each")]
#[test_case("any", true ; "any")]
fn requirement_by_name(name: &str, satisfied: bool) {
    let session = groups_module(passing("test_dependent").with_marker(
        DependencyMarker::new()
            .depends_on(["test_g1", "test_g2"])
            .with_requirement(name),
    ));

    let run = run(&session, DependencySettings::new());
    assert_eq!(
        run.status("groups::test_dependent") == &TestStatus::Passed,
        satisfied
    );
}

#[test]
fn each_needs_a_success_in_every_group() {
    let session = TestSession::new().with_module(
        TestModule::new("each")
            .with_test(marked(passing("test_a")))
            .with_test(marked(failing("test_b")))
            .with_test(
                passing("test_c").with_marker(
                    DependencyMarker::new()
                        .depends_on(["test_a", "test_b"])
                        .with_requirement(PassRequirement::Each),
                ),
            ),
    );

    let run = run(&session, DependencySettings::new());
    assert_eq!(
        run.status("each::test_c"),
        &skipped("test_c depends on test_a, test_b")
    );
}

#[test_case(PassRequirement::All, true ; "all is vacuously true")]
#[test_case(PassRequirement::Each, true ; "each is vacuously true")]
#[test_case(PassRequirement::Any, false ; "any is vacuously false")]
fn only_ignored_unknown_dependencies(requirement: PassRequirement, satisfied: bool) {
    let session = TestSession::new().with_module(
        TestModule::new("ignored").with_test(
            passing("test_dependent").with_marker(
                DependencyMarker::new()
                    .depends_on(["test_missing", "test_also_missing"])
                    .with_requirement(requirement),
            ),
        ),
    );

    let run = run(
        &session,
        DependencySettings::new().with_ignore_unknown(true),
    );
    let expected = if satisfied {
        TestStatus::Passed
    } else {
        // The message names every declared dependency, not just the last one looked at.
        skipped("test_dependent depends on test_missing, test_also_missing")
    };
    assert_eq!(run.status("ignored::test_dependent"), &expected);
}

#[test]
fn unknown_requirement_name_is_a_setup_error() {
    let session = TestSession::new().with_module(
        TestModule::new("bad")
            .with_test(marked(passing("test_a")))
            .with_test(
                passing("test_b").with_marker(
                    DependencyMarker::new()
                        .depends_on(["test_a"])
                        .with_requirement("most"),
                ),
            ),
    );

    let run = run(&session, DependencySettings::new());
    match run.status("bad::test_b") {
        TestStatus::Failed { phase, message } => {
            assert_eq!(*phase, TestPhase::Setup);
            assert_eq!(
                message,
                "unrecognized pass requirement: most\n(known values: all, any, each)"
            );
        }
        other => panic!("expected setup failure, found {other:?}"),
    }
}
