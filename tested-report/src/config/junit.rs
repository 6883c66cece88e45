// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::Deserialize;

/// JUnit configuration, stored within a [`CollateConfig`](super::CollateConfig).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct JunitConfig {
    report_name: String,
    store_success_output: bool,
    store_failure_output: bool,
}

impl JunitConfig {
    /// Creates a new JUnit configuration.
    pub fn new(
        report_name: impl Into<String>,
        store_success_output: bool,
        store_failure_output: bool,
    ) -> Self {
        Self {
            report_name: report_name.into(),
            store_success_output,
            store_failure_output,
        }
    }

    /// Returns the name of the JUnit report.
    pub fn report_name(&self) -> &str {
        &self.report_name
    }

    /// Returns true if captured output should be stored for passing tests.
    pub fn store_success_output(&self) -> bool {
        self.store_success_output
    }

    /// Returns true if captured output should be stored for failing tests.
    pub fn store_failure_output(&self) -> bool {
        self.store_failure_output
    }
}
