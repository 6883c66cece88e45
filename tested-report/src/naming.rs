// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recovering class names and display labels from test identifiers.
//!
//! The identifier printed between parentheses on each result line is generated by the D compiler
//! and is not meant for humans. A [`NamingStrategy`] turns it into something that can be shown in a
//! report. Two strategies are provided:
//!
//! * [`MangledNames`] understands the compiler's `__unittestL<line>_<index>` mangling.
//! * [`DottedNames`] splits the identifier at its first `.`.
//!
//! The two produce different results for the same multi-segment identifier, and are kept as
//! separate policies. [`NamingPolicy`] selects between them at runtime.

use crate::errors::{NamingStrategyParseError, PatternError};
use regex::Regex;
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// The class name used by [`MangledNames`] when the identifier can't be parsed.
pub const UNKNOWN_CLASS_NAME: &str = "Unknown";

/// The pattern used by [`MangledNames`] to pick apart an identifier.
pub const DEFAULT_MANGLED_PATTERN: &str =
    r"^(?:.+\.)?(?P<class>.+)\.__unittestL(?P<line>\d+)_(?P<index>\d+)$";

/// The result of normalizing an identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NormalizedName {
    /// The class or module that owns the test, if one could be recovered.
    pub class_name: Option<String>,

    /// A label for the test, used when the test has no friendly name.
    pub label: String,
}

/// A policy mapping an identifier token to a class name and a display label.
///
/// Normalization never fails: identifiers the strategy doesn't understand produce a degraded name
/// instead.
pub trait NamingStrategy {
    /// Normalizes the given identifier.
    fn normalize(&self, identifier: &str) -> NormalizedName;
}

impl<N: NamingStrategy + ?Sized> NamingStrategy for &N {
    fn normalize(&self, identifier: &str) -> NormalizedName {
        (**self).normalize(identifier)
    }
}

/// Normalizes identifiers of the form `[anything.]ClassName.__unittestL<line>_<index>`.
///
/// On a match, the class name is `ClassName` and the label is `ClassName:<line>`. Otherwise the
/// class name is [`UNKNOWN_CLASS_NAME`] and the label is the identifier itself.
#[derive(Clone, Debug)]
pub struct MangledNames {
    pattern: Regex,
}

impl MangledNames {
    /// Creates a new strategy using [`DEFAULT_MANGLED_PATTERN`].
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_MANGLED_PATTERN)
                .expect("default mangled-name pattern is valid"),
        }
    }

    /// Creates a new strategy with a custom pattern.
    ///
    /// The pattern must define the named groups `class` and `line`.
    pub fn with_pattern(pattern: &str) -> Result<Self, PatternError> {
        let regex =
            Regex::new(pattern).map_err(|error| PatternError::invalid_regex(pattern, error))?;
        for group in ["class", "line"] {
            if !regex.capture_names().flatten().any(|name| name == group) {
                return Err(PatternError::missing_group(pattern, group));
            }
        }

        Ok(Self { pattern: regex })
    }
}

impl Default for MangledNames {
    fn default() -> Self {
        Self::new()
    }
}

impl NamingStrategy for MangledNames {
    fn normalize(&self, identifier: &str) -> NormalizedName {
        let parts = self.pattern.captures(identifier).and_then(|captures| {
            Some((
                captures.name("class")?.as_str(),
                captures.name("line")?.as_str(),
            ))
        });

        match parts {
            Some((class_name, line)) => NormalizedName {
                class_name: Some(class_name.to_owned()),
                label: format!("{class_name}:{line}"),
            },
            None => NormalizedName {
                class_name: Some(UNKNOWN_CLASS_NAME.to_owned()),
                label: identifier.to_owned(),
            },
        }
    }
}

/// Normalizes identifiers by splitting them at the first `.`.
///
/// The part before the first `.` is the class name, and the rest is the label. If there's no `.`,
/// or the only `.` ends the identifier, the whole identifier is the label and there is no class
/// name.
#[derive(Clone, Copy, Debug, Default)]
pub struct DottedNames;

impl NamingStrategy for DottedNames {
    fn normalize(&self, identifier: &str) -> NormalizedName {
        match identifier.split_once('.') {
            Some((class_name, label)) if !label.is_empty() => NormalizedName {
                class_name: Some(class_name.to_owned()),
                label: label.to_owned(),
            },
            _ => NormalizedName {
                class_name: None,
                label: identifier.to_owned(),
            },
        }
    }
}

/// Which naming strategy to use, as specified in configuration or on the command line.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum NamingStrategyKind {
    /// Use [`MangledNames`].
    #[default]
    Mangled,

    /// Use [`DottedNames`].
    Dotted,
}

impl NamingStrategyKind {
    /// Returns all the known values, in the order they should be displayed.
    pub fn variants() -> &'static [&'static str] {
        &["mangled", "dotted"]
    }

    /// Returns the string used for this kind in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mangled => "mangled",
            Self::Dotted => "dotted",
        }
    }
}

impl FromStr for NamingStrategyKind {
    type Err = NamingStrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let val = match s {
            "mangled" => Self::Mangled,
            "dotted" => Self::Dotted,
            other => return Err(NamingStrategyParseError::new(other)),
        };
        Ok(val)
    }
}

impl fmt::Display for NamingStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A naming strategy selected at runtime.
#[derive(Clone, Debug)]
pub enum NamingPolicy {
    /// See [`MangledNames`].
    Mangled(MangledNames),

    /// See [`DottedNames`].
    Dotted(DottedNames),
}

impl NamingPolicy {
    /// Creates the policy corresponding to `kind`, with default patterns.
    pub fn new(kind: NamingStrategyKind) -> Self {
        match kind {
            NamingStrategyKind::Mangled => Self::Mangled(MangledNames::new()),
            NamingStrategyKind::Dotted => Self::Dotted(DottedNames),
        }
    }

    /// Returns the kind of this policy.
    pub fn kind(&self) -> NamingStrategyKind {
        match self {
            Self::Mangled(_) => NamingStrategyKind::Mangled,
            Self::Dotted(_) => NamingStrategyKind::Dotted,
        }
    }
}

impl From<NamingStrategyKind> for NamingPolicy {
    fn from(kind: NamingStrategyKind) -> Self {
        Self::new(kind)
    }
}

impl NamingStrategy for NamingPolicy {
    fn normalize(&self, identifier: &str) -> NormalizedName {
        match self {
            Self::Mangled(strategy) => strategy.normalize(identifier),
            Self::Dotted(strategy) => strategy.normalize(identifier),
        }
    }
}
