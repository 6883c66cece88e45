// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{TestEntry, TestReport, TestState};

/// Collects entries for a single test run into a [`TestReport`].
///
/// Entries are appended to the passed or failed list according to their state, preserving the
/// order they were pushed in. Identical entries are kept, not deduplicated.
#[derive(Clone, Debug, Default)]
pub struct ReportAggregator {
    passed: Vec<TestEntry>,
    failed: Vec<TestEntry>,
}

impl ReportAggregator {
    /// Creates a new, empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    pub fn push(&mut self, entry: TestEntry) {
        match entry.state() {
            TestState::Pass => self.passed.push(entry),
            TestState::Fail => self.failed.push(entry),
        }
    }

    /// Returns the number of entries pushed so far.
    pub fn len(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    /// Returns true if no entries have been pushed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the aggregator, producing the finished report.
    pub fn finish(self) -> TestReport {
        TestReport {
            passed: self.passed,
            failed: self.failed,
        }
    }
}

impl Extend<TestEntry> for ReportAggregator {
    fn extend<T: IntoIterator<Item = TestEntry>>(&mut self, iter: T) {
        for entry in iter {
            self.push(entry);
        }
    }
}
