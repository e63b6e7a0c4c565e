// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JUnit XML output, with one test suite per module.

use crate::{
    errors::WriteReportError,
    runner::{RunEvent, TestResult, TestStatus},
};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use quick_junit::{NonSuccessKind, Report, TestCase, TestCaseStatus, TestSuite};
use smol_str::SmolStr;
use std::fs::File;

/// Collects finished tests and writes a JUnit report when the run finishes.
#[derive(Debug)]
pub struct JunitReporter {
    path: Utf8PathBuf,
    report_name: String,
    test_suites: IndexMap<SmolStr, TestSuite>,
}

impl JunitReporter {
    /// Creates a reporter that writes to `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            report_name: "testdeps-run".to_owned(),
            test_suites: IndexMap::new(),
        }
    }

    /// Returns the path the report is written to.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Records a single run event, writing out the report once the run finishes.
    pub fn report_event(&mut self, event: &RunEvent<'_>) -> Result<(), WriteReportError> {
        match event {
            RunEvent::RunStarted { .. } | RunEvent::TestStarted { .. } => {}
            RunEvent::TestFinished { result, .. } => {
                let testcase = testcase_for(result);
                self.test_suites
                    .entry(result.module.clone())
                    .or_insert_with(|| TestSuite::new(result.module.as_str()))
                    .add_test_case(testcase);
            }
            RunEvent::RunFinished { elapsed, .. } => {
                let mut report = Report::new(self.report_name.as_str());
                report
                    .set_time(*elapsed)
                    .add_test_suites(self.test_suites.drain(..).map(|(_, testsuite)| testsuite));

                if let Some(junit_dir) = self.path.parent().filter(|dir| !dir.as_str().is_empty())
                {
                    std::fs::create_dir_all(junit_dir).map_err(|error| WriteReportError::Fs {
                        file: junit_dir.to_path_buf(),
                        error,
                    })?;
                }

                let f = File::create(&self.path).map_err(|error| WriteReportError::Fs {
                    file: self.path.clone(),
                    error,
                })?;
                report
                    .serialize(f)
                    .map_err(|error| WriteReportError::Junit {
                        file: self.path.clone(),
                        error: Box::new(error),
                    })?;
            }
        }

        Ok(())
    }
}

fn testcase_for(result: &TestResult) -> TestCase {
    let status = match &result.status {
        TestStatus::Passed => TestCaseStatus::success(),
        TestStatus::Skipped { message } => {
            let mut status = TestCaseStatus::skipped();
            status.set_message(message.as_str());
            status
        }
        TestStatus::Failed { phase, message } => {
            let mut status = TestCaseStatus::non_success(NonSuccessKind::Failure);
            status
                .set_message(message.as_str())
                .set_type(format!("{phase} failure"));
            status
        }
    };

    let mut testcase = TestCase::new(result.name.as_str(), status);
    testcase
        .set_classname(result.module.as_str())
        .set_time(result.elapsed);
    testcase
}
