// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning captured output into a [`TestReport`].

use crate::{
    config::CollateConfig,
    naming::{NamingPolicy, NamingStrategy},
    record::{RawRecord, RecordMatcher},
    report::{ReportAggregator, TestDuration, TestEntry, TestReport, TestState},
};
use tracing::debug;

/// Parses the console output of a test run into a [`TestReport`].
///
/// A parser owns its patterns and naming strategy, and can be reused across runs. Parsing is a
/// single forward pass over the lines of the output: lines that aren't result lines are skipped,
/// and no state is carried from one line to the next.
#[derive(Clone, Debug)]
pub struct ReportParser<N> {
    matcher: RecordMatcher,
    naming: N,
}

impl<N: NamingStrategy> ReportParser<N> {
    /// Creates a new parser with the default record pattern and the given naming strategy.
    pub fn new(naming: N) -> Self {
        Self::with_matcher(RecordMatcher::new(), naming)
    }

    /// Creates a new parser with a custom record matcher.
    pub fn with_matcher(matcher: RecordMatcher, naming: N) -> Self {
        Self { matcher, naming }
    }

    /// Returns the naming strategy used by this parser.
    pub fn naming(&self) -> &N {
        &self.naming
    }

    /// Parses `output` into a report.
    ///
    /// This never fails: if nothing in the output looks like a result line, the report is empty.
    pub fn parse(&self, output: &str) -> TestReport {
        let mut aggregator = ReportAggregator::new();
        aggregator.extend(self.entries(output));
        let report = aggregator.finish();

        debug!(
            "parsed {} test results ({} passed, {} failed)",
            report.total(),
            report.passed().len(),
            report.failed().len(),
        );
        report
    }

    /// Returns an iterator over the entries in `output`, in the order they appear.
    pub fn entries<'a>(&'a self, output: &'a str) -> impl Iterator<Item = TestEntry> + 'a {
        self.matcher
            .matches(output)
            .filter_map(move |record| self.entry_for(record))
    }

    fn entry_for(&self, record: RawRecord<'_>) -> Option<TestEntry> {
        // The default pattern only admits valid durations, but custom patterns might not.
        let duration = TestDuration::parse(record.duration)?;
        let state = TestState::from_status(record.status);
        let normalized = self.naming.normalize(record.identifier);

        let test_name = if record.friendly_name.is_empty() {
            normalized.label
        } else {
            record.friendly_name.to_owned()
        };

        Some(TestEntry::new(
            normalized.class_name,
            test_name,
            duration,
            state,
            record.trailing.map(|s| s.to_owned()),
        ))
    }
}

impl ReportParser<NamingPolicy> {
    /// Creates a parser using the naming strategy selected in `config`.
    pub fn from_config(config: &CollateConfig) -> Self {
        Self::new(NamingPolicy::new(config.naming()))
    }
}
