// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use camino_tempfile::Utf8TempDir;
use clap::Parser;
use indoc::indoc;
use pretty_assertions::assert_eq;
use testdeps_harness::{DependencyMarker, HarnessOpts, TestModule, TestSession};

fn session() -> TestSession {
    TestSession::new()
        .with_module(
            TestModule::new("alpha")
                .with_test(failing("test_a"))
                .with_test(
                    passing("test_b").with_marker(DependencyMarker::new().depends_on(["test_a"])),
                ),
        )
        .with_module(TestModule::new("beta").with_test(marked(passing("test_c"))))
}

fn exec(args: &[&str], session: &TestSession) -> (testdeps_harness::RunStats, String) {
    let opts = HarnessOpts::try_parse_from(
        ["harness", "--color", "never"]
            .into_iter()
            .chain(args.iter().copied()),
    )
    .expect("arguments parse");
    let mut output = Vec::new();
    let stats = opts.exec(session, &mut output).expect("harness runs");
    (stats, String::from_utf8(output).expect("output is UTF-8"))
}

#[test]
fn list() {
    let session = session();
    let (_, output) = exec(&["--list"], &session);
    assert_eq!(
        output,
        indoc! {"
            alpha::test_a: test
            alpha::test_b: test
            beta::test_c: test

            3 tests, 0 benchmarks
        "}
    );

    let (stats, output) = exec(&["--list", "--format", "terse", "beta"], &session);
    assert_eq!(output, "beta::test_c: test\n");
    assert_eq!(stats.initial_run_count, 1);
}

#[test]
fn config_file_enables_automark() {
    let session = session();
    let (stats, output) = exec(&[], &session);
    // test_a is not marked, so test_b's dependency is unknown.
    assert_eq!((stats.passed, stats.failed), (1, 2), "output: {output}");
    assert!(output.contains("test_b has unknown dependencies: test_a"), "output: {output}");

    let dir = Utf8TempDir::new().expect("temp dir created");
    let config_file = dir.path().join("testdeps.toml");
    std::fs::write(
        &config_file,
        indoc! {r#"
            [dependency]
            automark = "yes"
        "#},
    )
    .expect("config written");

    let session = self::session();
    let (stats, output) = exec(&["--config-file", config_file.as_str()], &session);
    assert_eq!(
        (stats.passed, stats.failed, stats.skipped),
        (1, 1, 1),
        "output: {output}"
    );
    assert!(
        output.contains("SKIP [") && output.contains("alpha::test_b: test_b depends on test_a"),
        "output: {output}"
    );

    // Command-line flags override the config file.
    let session = self::session();
    let (stats, _) = exec(
        &[
            "--config-file",
            config_file.as_str(),
            "--automark-dependency=false",
            "--ignore-unknown-dependency",
        ],
        &session,
    );
    assert_eq!((stats.passed, stats.failed), (2, 1));
}

#[test]
fn filtered_out_dependency_is_unknown() {
    let session = session();
    let (stats, output) = exec(&["--automark-dependency", "--skip", "test_a"], &session);
    assert_eq!(stats.filtered_out, 1);
    assert_eq!(stats.failed, 1, "output: {output}");
    assert!(
        output.contains("test_b has unknown dependencies: test_a"),
        "output: {output}"
    );
    assert!(output.contains("1 filtered out"), "output: {output}");
}

#[test]
fn junit_report() {
    let dir = Utf8TempDir::new().expect("temp dir created");
    let junit_path = dir.path().join("junit.xml");

    let session = session();
    let (stats, _) = exec(&["--junit", junit_path.as_str()], &session);
    assert!(!stats.is_success());

    let xml = std::fs::read_to_string(&junit_path).expect("report written");
    assert!(xml.contains(r#"<testsuite name="alpha""#), "xml: {xml}");
    assert!(xml.contains(r#"<testsuite name="beta""#), "xml: {xml}");
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = Utf8TempDir::new().expect("temp dir created");
    let missing = dir.path().join("missing.toml");
    let opts = HarnessOpts::try_parse_from(["harness", "--config-file", missing.as_str()])
        .expect("arguments parse");
    let err = opts
        .exec(&session(), std::io::sink())
        .expect_err("config file must exist");
    assert!(err.to_string().contains("missing.toml"), "error: {err}");
}
