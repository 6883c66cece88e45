// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recognizes result lines in `tested` console output.
//!
//! `tested`'s console reporter prints one line per test:
//!
//! ```text
//! PASS "adds numbers" (mymod.Calculator.__unittestL10_3) after 0.002 s
//! FAIL "" (mymod.Thing.__unittestL5_1) after 1.230 s
//! ```
//!
//! Anything else in the captured output (compiler messages, `dub` progress, the test program's own
//! prints) is skipped without being reported.

use crate::errors::PatternError;
use regex::{Captures, Regex};
use std::str::Split;

/// The pattern matched against each line of output.
///
/// The duration must have digits on both sides of the decimal point: `after 2 s` does not match.
pub const DEFAULT_RECORD_PATTERN: &str = r#"^(?P<status>PASS|FAIL) "(?P<name>.*)" \((?P<identifier>.+)\) after (?P<duration>\d+\.\d+) s(?P<trailing>.+)?$"#;

const REQUIRED_GROUPS: [&str; 5] = ["status", "name", "identifier", "duration", "trailing"];

// A `\r\n` pair splits into a line and an empty line, which never matches.
const LINE_TERMINATORS: [char; 5] = ['\n', '\r', '\u{85}', '\u{2028}', '\u{2029}'];

/// Matches individual result lines against the record format.
///
/// The pattern is compiled once when the matcher is created, and reused for every line.
#[derive(Clone, Debug)]
pub struct RecordMatcher {
    pattern: Regex,
}

impl RecordMatcher {
    /// Creates a new matcher using [`DEFAULT_RECORD_PATTERN`].
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_RECORD_PATTERN).expect("default record pattern is valid"),
        }
    }

    /// Creates a new matcher with a custom pattern.
    ///
    /// The pattern must define the named groups `status`, `name`, `identifier`, `duration` and
    /// `trailing`. It should be anchored at both ends, since it's applied to a single line at a
    /// time.
    pub fn with_pattern(pattern: &str) -> Result<Self, PatternError> {
        let regex =
            Regex::new(pattern).map_err(|error| PatternError::invalid_regex(pattern, error))?;
        if let Some(group) = REQUIRED_GROUPS
            .into_iter()
            .find(|group| !regex.capture_names().flatten().any(|name| name == *group))
        {
            return Err(PatternError::missing_group(pattern, group));
        }

        Ok(Self { pattern: regex })
    }

    /// Matches a single line, returning the raw record if the line is a result line.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<RawRecord<'a>> {
        self.pattern
            .captures(line)
            .and_then(|captures| RawRecord::from_captures(&captures))
    }

    /// Returns an iterator over the result lines in `output`.
    ///
    /// Lines end at `\n`, `\r\n`, a lone `\r`, or one of the Unicode line terminators U+0085,
    /// U+2028 and U+2029. The iterator is lazy and can be cloned to restart matching from the current position.
    pub fn matches<'m, 'a>(&'m self, output: &'a str) -> RecordMatches<'m, 'a> {
        RecordMatches {
            matcher: self,
            lines: output.split(LINE_TERMINATORS),
        }
    }
}

impl Default for RecordMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// The raw fields of a single result line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RawRecord<'a> {
    /// The status token, `PASS` or `FAIL` with the default pattern.
    pub status: &'a str,

    /// The friendly name between the quotes. May be empty.
    pub friendly_name: &'a str,

    /// The identifier token between the parentheses.
    pub identifier: &'a str,

    /// The duration, in seconds, as written in the output.
    pub duration: &'a str,

    /// Any text following the ` s` after the duration, verbatim.
    pub trailing: Option<&'a str>,
}

impl<'a> RawRecord<'a> {
    fn from_captures(captures: &Captures<'a>) -> Option<Self> {
        // A custom pattern can make groups optional, so check for each of them.
        Some(Self {
            status: captures.name("status")?.as_str(),
            friendly_name: captures.name("name")?.as_str(),
            identifier: captures.name("identifier")?.as_str(),
            duration: captures.name("duration")?.as_str(),
            trailing: captures.name("trailing").map(|m| m.as_str()),
        })
    }
}

/// An iterator over the result lines of some output, returned by [`RecordMatcher::matches`].
#[derive(Clone, Debug)]
pub struct RecordMatches<'m, 'a> {
    matcher: &'m RecordMatcher,
    lines: Split<'a, [char; 5]>,
}

impl<'a> Iterator for RecordMatches<'_, 'a> {
    type Item = RawRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let matcher = self.matcher;
        self.lines.by_ref().find_map(|line| matcher.match_line(line))
    }
}
