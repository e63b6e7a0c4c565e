// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The command line of a test binary built on this harness.
//!
//! The options are a subset of the standard libtest ones, so that `cargo test` and
//! `cargo nextest` can drive the binary, plus options for dependency tracking.

use crate::{
    config::{DependencySettings, parse_bool_setting},
    errors::{HarnessError, WriteReportError},
    hooks::DependencyHooks,
    junit::JunitReporter,
    output::OutputOpts,
    reporter::TestReporter,
    runner::{RunStats, TestRunner},
    suite::TestSession,
    test_filter::TestFilter,
};
use camino::Utf8PathBuf;
use clap::Parser;
use std::{
    error::Error,
    io::{self, Write},
    process::ExitCode,
};
use tracing::{debug, error};

/// Documented exit codes for test binaries built on this harness.
pub enum HarnessExitCode {}

impl HarnessExitCode {
    /// All tests passed or were skipped.
    pub const OK: u8 = 0;

    /// The config could not be loaded.
    pub const SETUP_ERROR: u8 = 96;

    /// One or more tests failed. Matches libtest.
    pub const TEST_RUN_FAILED: u8 = 101;

    /// Writing output or a report produced an error.
    pub const WRITE_OUTPUT_ERROR: u8 = 110;
}

/// Command-line options for a test binary.
#[derive(Debug, Parser)]
#[command(version, about = "Runs tests, skipping those whose dependencies did not pass")]
pub struct HarnessOpts {
    /// Run only tests whose full names contain one of these filters
    #[arg(value_name = "FILTERS")]
    filters: Vec<String>,

    /// Match filters exactly against full test names
    #[arg(long)]
    exact: bool,

    /// Skip tests whose full names contain this filter (may be repeated)
    #[arg(long, value_name = "FILTER")]
    skip: Vec<String>,

    /// List matching tests instead of running them
    #[arg(long)]
    list: bool,

    /// Config file [default: .config/testdeps.toml if it exists]
    #[arg(long, value_name = "PATH", env = "TESTDEPS_CONFIG_FILE")]
    config_file: Option<Utf8PathBuf>,

    /// Ignore dependencies that were never recorded instead of failing the dependent test
    #[arg(
        long,
        value_name = "BOOL",
        env = "TESTDEPS_IGNORE_UNKNOWN_DEPENDENCY",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_bool_setting,
    )]
    ignore_unknown_dependency: Option<bool>,

    /// Record the outcome of every test, even those without a dependency marker
    #[arg(
        long,
        value_name = "BOOL",
        env = "TESTDEPS_AUTOMARK_DEPENDENCY",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_bool_setting,
    )]
    automark_dependency: Option<bool>,

    /// Write a JUnit XML report to this path
    #[arg(long, value_name = "PATH")]
    junit: Option<Utf8PathBuf>,

    /// Run only ignored tests (no test is ignored by this harness)
    #[arg(long, hide = true, conflicts_with = "include_ignored")]
    ignored: bool,

    /// Run ignored and non-ignored tests
    #[arg(long, hide = true)]
    include_ignored: bool,

    /// Accepted for libtest compatibility; output is never captured
    #[arg(long, hide = true)]
    nocapture: bool,

    /// Accepted for libtest compatibility; tests always run one at a time
    #[arg(long, hide = true, value_name = "N")]
    test_threads: Option<usize>,

    /// Listing format; only `terse` changes anything
    #[arg(long, hide = true, value_name = "FORMAT")]
    format: Option<String>,

    #[command(flatten)]
    output: OutputOpts,
}

impl HarnessOpts {
    /// Parses options from the process arguments.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Returns the dependency settings: the config file, overridden by command-line flags.
    pub fn settings(&self) -> Result<DependencySettings, HarnessError> {
        let mut settings = DependencySettings::from_sources(self.config_file.as_deref())?;
        if let Some(ignore_unknown) = self.ignore_unknown_dependency {
            settings = settings.with_ignore_unknown(ignore_unknown);
        }
        if let Some(automark) = self.automark_dependency {
            settings = settings.with_automark(automark);
        }
        Ok(settings)
    }

    fn filter(&self) -> TestFilter {
        TestFilter::new(&self.filters, self.exact, &self.skip).with_ignored_only(self.ignored)
    }

    /// Runs (or lists) the tests of `session`, writing human-readable output to `writer`.
    pub fn exec(
        self,
        session: &TestSession,
        mut writer: impl Write,
    ) -> Result<RunStats, HarnessError> {
        let output = self.output.init();
        let settings = self.settings()?;
        debug!(
            ?settings,
            nocapture = self.nocapture,
            test_threads = ?self.test_threads,
            "starting harness"
        );

        let runner =
            TestRunner::new(session, DependencyHooks::new(settings)).with_filter(self.filter());

        if self.list {
            let mut count = 0;
            for test in runner.matching_tests() {
                writeln!(writer, "{}: test", test.full_name()).map_err(WriteReportError::Io)?;
                count += 1;
            }
            if self.format.as_deref() != Some("terse") {
                writeln!(writer).map_err(WriteReportError::Io)?;
                writeln!(writer, "{count} tests, 0 benchmarks").map_err(WriteReportError::Io)?;
            }
            return Ok(RunStats {
                initial_run_count: count,
                ..RunStats::default()
            });
        }

        let mut reporter = TestReporter::new(writer);
        if output.color.should_colorize(supports_color::Stream::Stdout) {
            reporter.colorize();
        }
        reporter.set_verbose(output.verbose);
        let mut junit = self.junit.map(JunitReporter::new);

        let stats = runner.try_execute(|event| {
            reporter.report_event(&event)?;
            if let Some(junit) = &mut junit {
                junit.report_event(&event)?;
            }
            Ok::<_, WriteReportError>(())
        })?;
        Ok(stats)
    }
}

/// Parses the process arguments, runs `session`, and returns the exit code for `main`.
///
/// ```no_run
/// use std::process::ExitCode;
/// use testdeps_harness::{TestCase, TestModule, TestSession, run_main};
///
/// fn main() -> ExitCode {
///     let session = TestSession::new()
///         .with_module(TestModule::new("basic").with_test(TestCase::new("test_a", |_| Ok(()))));
///     run_main(session)
/// }
/// ```
pub fn run_main(session: TestSession) -> ExitCode {
    let opts = HarnessOpts::from_args();
    match opts.exec(&session, io::stdout().lock()) {
        Ok(stats) if stats.is_success() => ExitCode::from(HarnessExitCode::OK),
        Ok(_) => ExitCode::from(HarnessExitCode::TEST_RUN_FAILED),
        Err(err) => {
            error!("{err}");
            let mut source = err.source();
            while let Some(cause) = source {
                error!("  caused by: {cause}");
                source = cause.source();
            }
            let code = match err {
                HarnessError::Config(_) => HarnessExitCode::SETUP_ERROR,
                HarnessError::WriteReport(_) => HarnessExitCode::WRITE_OUTPUT_ERROR,
            };
            ExitCode::from(code)
        }
    }
}
