// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by tested-report.
//!
//! Parsing itself never fails: lines that don't match are skipped, and identifiers that can't be
//! normalized degrade to a fallback name. The errors here come from constructing parsers with
//! custom patterns, reading configuration, and writing reports out.

use crate::naming::NamingStrategyKind;
use camino::Utf8PathBuf;
use config::ConfigError;
use std::{error::Error, fmt};
use thiserror::Error;

/// An error that occurred while compiling a custom record or identifier pattern.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// The pattern is not a valid regular expression.
    #[error("invalid pattern `{pattern}`")]
    InvalidRegex {
        /// The pattern that failed to compile.
        pattern: String,

        /// The underlying error.
        #[source]
        error: regex::Error,
    },

    /// The pattern compiled, but is missing a named capture group that is required.
    #[error("pattern `{pattern}` is missing the named group `{group}`")]
    MissingGroup {
        /// The pattern that was checked.
        pattern: String,

        /// The name of the group that was not found.
        group: &'static str,
    },
}

impl PatternError {
    pub(crate) fn invalid_regex(pattern: impl Into<String>, error: regex::Error) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
            error,
        }
    }

    pub(crate) fn missing_group(pattern: impl Into<String>, group: &'static str) -> Self {
        Self::MissingGroup {
            pattern: pattern.into(),
            group,
        }
    }
}

/// Error returned while parsing a [`NamingStrategyKind`] value from a string.
#[derive(Clone, Debug, Error)]
#[error(
    "unrecognized value for naming strategy: {input}\n(known values: {})",
    NamingStrategyKind::variants().join(", "),
)]
pub struct NamingStrategyParseError {
    input: String,
}

impl NamingStrategyParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse tested-collate config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8PathBuf {
        &self.config_file
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while parsing a config.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the config.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),
}

/// An error that occurred while writing a report out.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteReportError {
    /// An error occurred while operating on the file system.
    #[error("error writing to path `{file}`")]
    Fs {
        /// The file being written to.
        file: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// An error occurred while producing JUnit XML.
    #[error("error writing JUnit output to `{file}`")]
    Junit {
        /// The output file.
        file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: quick_junit::SerializeError,
    },

    /// An error occurred while producing JSON.
    #[error("error serializing report to JSON")]
    Json(#[source] serde_json::Error),
}

/// Displays an error along with the chain of errors that caused it.
///
/// Each source is printed on its own line, prefixed with `caused by:`.
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain` for the given error.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E> fmt::Display for DisplayErrorChain<E>
where
    E: Error,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        let mut current = self.error.source();
        while let Some(error) = current {
            write!(f, "\n  caused by: {error}")?;
            current = error.source();
        }

        Ok(())
    }
}
