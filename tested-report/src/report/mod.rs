// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured test results.
//!
//! A [`TestReport`] holds the [`TestEntry`] values for a single test run, split into passed and
//! failed tests. Reports are built by a [`ReportAggregator`] and are immutable afterwards.

mod aggregator;
mod duration;

pub use aggregator::ReportAggregator;
pub use duration::TestDuration;

use crate::errors::WriteReportError;
use serde::Serialize;
use std::fmt;

/// Whether a test passed or failed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestState {
    /// The test passed.
    Pass,

    /// The test failed.
    Fail,
}

impl TestState {
    /// Classifies a status token.
    ///
    /// `PASS`, compared case-insensitively, is a pass. Every other token is a failure.
    pub fn from_status(status: &str) -> Self {
        if status.eq_ignore_ascii_case("PASS") {
            Self::Pass
        } else {
            Self::Fail
        }
    }
}

impl fmt::Display for TestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("PASS"),
            Self::Fail => f.write_str("FAIL"),
        }
    }
}

/// A single test outcome.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestEntry {
    class_name: Option<String>,
    test_name: String,
    duration: TestDuration,
    state: TestState,
    captured_output: Option<String>,
}

impl TestEntry {
    /// Creates a new entry.
    pub fn new(
        class_name: Option<String>,
        test_name: impl Into<String>,
        duration: TestDuration,
        state: TestState,
        captured_output: Option<String>,
    ) -> Self {
        Self {
            class_name,
            test_name: test_name.into(),
            duration,
            state,
            captured_output,
        }
    }

    /// Returns the class or module owning this test, if known.
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Returns the name of this test.
    ///
    /// This is the friendly name from the output, or a label derived from the test's identifier if
    /// the friendly name was empty.
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// Returns how long the test took.
    pub fn duration(&self) -> &TestDuration {
        &self.duration
    }

    /// Returns whether the test passed or failed.
    pub fn state(&self) -> TestState {
        self.state
    }

    /// Returns the text following the duration on the result line, if any.
    pub fn captured_output(&self) -> Option<&str> {
        self.captured_output.as_deref()
    }
}

/// The results of a single test run.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TestReport {
    passed: Vec<TestEntry>,
    failed: Vec<TestEntry>,
}

impl TestReport {
    /// Returns the tests that passed, in the order they appeared in the output.
    pub fn passed(&self) -> &[TestEntry] {
        &self.passed
    }

    /// Returns the tests that failed, in the order they appeared in the output.
    pub fn failed(&self) -> &[TestEntry] {
        &self.failed
    }

    /// Returns all entries: passed tests first, then failed tests.
    pub fn iter(&self) -> impl Iterator<Item = &TestEntry> + '_ {
        self.passed.iter().chain(&self.failed)
    }

    /// Returns the total number of entries.
    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    /// Returns true if no result lines were found.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Returns true if at least one test failed.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Serializes this report to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, WriteReportError> {
        serde_json::to_string_pretty(self).map_err(WriteReportError::Json)
    }
}
