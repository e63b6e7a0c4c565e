// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-readable output for a test run.

use crate::runner::{RunEvent, RunStats, TestResult, TestStatus};
use owo_colors::{OwoColorize, Style};
use std::{io, io::Write, time::Duration};

/// Writes a line per finished test and a summary at the end of the run.
#[derive(Debug)]
pub struct TestReporter<W> {
    writer: W,
    styles: Styles,
    verbose: bool,
}

impl<W: Write> TestReporter<W> {
    /// Creates a reporter writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            styles: Styles::default(),
            verbose: false,
        }
    }

    /// Colorizes the output.
    pub fn colorize(&mut self) {
        self.styles.colorize();
    }

    /// Also prints the outcome of every phase after each test.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Reports a single run event.
    pub fn report_event(&mut self, event: &RunEvent<'_>) -> io::Result<()> {
        match event {
            RunEvent::RunStarted { test_count } => {
                writeln!(self.writer, "------------")?;
                writeln!(
                    self.writer,
                    "{:>12} {} {}",
                    "Starting".style(self.styles.pass),
                    test_count.style(self.styles.count),
                    tests_str(*test_count),
                )?;
            }
            RunEvent::TestStarted { .. } => {}
            RunEvent::TestFinished { result, .. } => {
                self.write_status_line(result)?;
            }
            RunEvent::RunFinished { stats, elapsed } => {
                self.write_summary(stats, *elapsed)?;
            }
        }
        self.writer.flush()
    }

    fn write_status_line(&mut self, result: &TestResult) -> io::Result<()> {
        match &result.status {
            TestStatus::Passed => {
                write!(self.writer, "{:>12} ", "PASS".style(self.styles.pass))?;
            }
            TestStatus::Skipped { .. } => {
                write!(self.writer, "{:>12} ", "SKIP".style(self.styles.skip))?;
            }
            TestStatus::Failed { .. } => {
                write!(self.writer, "{:>12} ", "FAIL".style(self.styles.fail))?;
            }
        }
        self.write_duration(result.elapsed)?;
        write!(
            self.writer,
            "{}::{}",
            result.module.style(self.styles.module),
            result.name.style(self.styles.name),
        )?;

        match &result.status {
            TestStatus::Passed => writeln!(self.writer)?,
            TestStatus::Skipped { message } => writeln!(self.writer, ": {message}")?,
            TestStatus::Failed { phase, message } => {
                writeln!(self.writer, " ({phase}): {message}")?;
            }
        }

        if self.verbose {
            writeln!(self.writer, "{:>12} {}", "", result.phases)?;
        }
        Ok(())
    }

    fn write_summary(&mut self, stats: &RunStats, elapsed: Duration) -> io::Result<()> {
        let summary_style = if !stats.is_success() {
            self.styles.fail
        } else if stats.finished_count == 0 {
            self.styles.skip
        } else {
            self.styles.pass
        };
        write!(
            self.writer,
            "------------\n{:>12} ",
            "Summary".style(summary_style)
        )?;
        self.write_duration(elapsed)?;
        write!(
            self.writer,
            "{} {} run: ",
            stats.finished_count.style(self.styles.count),
            tests_str(stats.finished_count),
        )?;

        write!(
            self.writer,
            "{} {}",
            stats.passed.style(self.styles.count),
            "passed".style(self.styles.pass),
        )?;
        if stats.failed > 0 {
            write!(
                self.writer,
                ", {} {}",
                stats.failed.style(self.styles.count),
                "failed".style(self.styles.fail),
            )?;
        }
        if stats.skipped > 0 {
            write!(
                self.writer,
                ", {} {}",
                stats.skipped.style(self.styles.count),
                "skipped".style(self.styles.skip),
            )?;
        }
        if stats.filtered_out > 0 {
            write!(
                self.writer,
                ", {} filtered out",
                stats.filtered_out.style(self.styles.count),
            )?;
        }
        writeln!(self.writer)
    }

    fn write_duration(&mut self, duration: Duration) -> io::Result<()> {
        // * > means right-align.
        // * 8 is the number of characters to pad to.
        // * .3 means print three digits after the decimal point.
        write!(self.writer, "[{:>8.3?}s] ", duration.as_secs_f64())
    }
}

fn tests_str(count: usize) -> &'static str {
    if count == 1 { "test" } else { "tests" }
}

#[derive(Debug, Default)]
struct Styles {
    count: Style,
    pass: Style,
    fail: Style,
    skip: Style,
    module: Style,
    name: Style,
}

impl Styles {
    fn colorize(&mut self) {
        self.count = Style::new().bold();
        self.pass = Style::new().green().bold();
        self.fail = Style::new().red().bold();
        self.skip = Style::new().yellow().bold();
        self.module = Style::new().magenta().bold();
        self.name = Style::new().blue().bold();
    }
}
