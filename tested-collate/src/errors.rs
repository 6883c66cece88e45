// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::StderrStyles;
use camino::Utf8PathBuf;
use owo_colors::OwoColorize;
use std::error::Error;
use tested_report::errors::{ConfigParseError, WriteReportError};
use thiserror::Error;
use tracing::error;

/// Documented exit codes for `tested-collate` failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum CollateExitCode {}

impl CollateExitCode {
    /// No errors occurred and tested-collate exited normally.
    pub const OK: i32 = 0;

    /// No test results were found in the output, and `--fail-on-empty` was passed in.
    pub const NO_TESTS_FOUND: i32 = 4;

    /// One or more tests failed.
    pub const TEST_RUN_FAILED: i32 = 100;

    /// A user issue happened while setting up the invocation, such as a bad config file or a
    /// missing input file.
    pub const SETUP_ERROR: i32 = 96;

    /// Writing data to stdout, stderr or a report file produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An expected error: something went wrong with the input or environment, not in tested-collate
/// itself.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("failed to read test output")]
    InputReadFailed {
        path: Option<Utf8PathBuf>,
        #[source]
        err: std::io::Error,
    },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("error writing report")]
    WriteReportError {
        #[from]
        err: WriteReportError,
    },
    #[error("error writing output")]
    WriteOutputError {
        #[source]
        err: std::io::Error,
    },
    #[error("test run failed")]
    TestRunFailed { failed: usize, total: usize },
    #[error("no test results found")]
    NoTestsFound,
}

impl ExpectedError {
    pub(crate) fn input_read_failed(path: Option<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::InputReadFailed { path, err }
    }

    pub(crate) fn write_output_error(err: std::io::Error) -> Self {
        Self::WriteOutputError { err }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::InputReadFailed { .. } | Self::ConfigParseError { .. } => {
                CollateExitCode::SETUP_ERROR
            }
            Self::WriteReportError { .. } | Self::WriteOutputError { .. } => {
                CollateExitCode::WRITE_OUTPUT_ERROR
            }
            Self::TestRunFailed { .. } => CollateExitCode::TEST_RUN_FAILED,
            Self::NoTestsFound => CollateExitCode::NO_TESTS_FOUND,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::InputReadFailed { path, err } => {
                match path {
                    Some(path) => error!(
                        "failed to read test output from `{}`",
                        path.style(styles.bold)
                    ),
                    None => error!("failed to read test output from standard input"),
                }
                Some(err as &dyn Error)
            }
            Self::ConfigParseError { err } => {
                error!("{err}");
                err.source()
            }
            Self::WriteReportError { err } => {
                error!("failed to write report");
                Some(err as &dyn Error)
            }
            Self::WriteOutputError { err } => {
                error!("failed to write output");
                Some(err as &dyn Error)
            }
            Self::TestRunFailed { failed, total } => {
                error!(
                    "test run failed: {} out of {} tests failed",
                    failed.style(styles.bold),
                    total,
                );
                None
            }
            Self::NoTestsFound => {
                error!("no test results found in output");
                None
            }
        };

        while let Some(err) = next_error {
            error!(target: "tested_collate::no_heading", "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
