// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code to generate JUnit XML reports from a [`TestReport`].
//!
//! Entries are grouped into one test suite per class name, in order of first appearance. Entries
//! without a class name are placed in a suite named after the report.

use crate::{
    config::JunitConfig,
    errors::WriteReportError,
    report::{TestEntry, TestReport, TestState},
};
use camino::Utf8Path;
use indexmap::IndexMap;
use quick_junit::{NonSuccessKind, Report, TestCase, TestCaseStatus, TestSuite};
use std::{fs::File, time::Duration};
use tracing::debug;

static FAILURE_TYPE: &str = "test failure";

/// Converts a report into JUnit XML form.
pub fn to_junit(report: &TestReport, config: &JunitConfig) -> Report {
    let mut test_suites: IndexMap<&str, TestSuite> = IndexMap::new();
    let mut total_time = Duration::ZERO;

    for entry in report.iter() {
        let suite_name = entry.class_name().unwrap_or(config.report_name());
        let test_suite = test_suites
            .entry(suite_name)
            .or_insert_with(|| TestSuite::new(suite_name));

        // Durations saturate on overflow, so sums must too.
        let time = entry.duration().as_duration();
        total_time = total_time.saturating_add(time);
        let suite_time = test_suite.time.unwrap_or_default().saturating_add(time);
        test_suite
            .set_time(suite_time)
            .add_test_case(testcase_for(entry, config));
    }

    let mut junit = Report::new(config.report_name());
    junit
        .set_time(total_time)
        .add_test_suites(test_suites.into_values());
    junit
}

/// Converts a report into JUnit XML and writes it out to `path`.
///
/// Any missing parent directories are created.
pub fn write_junit(
    report: &TestReport,
    config: &JunitConfig,
    path: &Utf8Path,
) -> Result<(), WriteReportError> {
    let junit = to_junit(report, config);

    if let Some(junit_dir) = path.parent().filter(|dir| !dir.as_str().is_empty()) {
        std::fs::create_dir_all(junit_dir).map_err(|error| WriteReportError::Fs {
            file: junit_dir.to_path_buf(),
            error,
        })?;
    }

    let f = File::create(path).map_err(|error| WriteReportError::Fs {
        file: path.to_path_buf(),
        error,
    })?;
    junit
        .serialize(f)
        .map_err(|error| WriteReportError::Junit {
            file: path.to_path_buf(),
            error,
        })?;

    debug!("wrote JUnit report to {path}");
    Ok(())
}

fn testcase_for(entry: &TestEntry, config: &JunitConfig) -> TestCase {
    let (status, store_output) = match entry.state() {
        TestState::Pass => (TestCaseStatus::success(), config.store_success_output()),
        TestState::Fail => {
            let mut status = TestCaseStatus::non_success(NonSuccessKind::Failure);
            status.set_type(FAILURE_TYPE);
            (status, config.store_failure_output())
        }
    };

    let mut testcase = TestCase::new(entry.test_name(), status);
    testcase.set_time(entry.duration().as_duration());
    if let Some(class_name) = entry.class_name() {
        testcase.set_classname(class_name);
    }
    if store_output && let Some(output) = entry.captured_output() {
        testcase.set_system_out(output);
    }

    testcase
}
