// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Serialize, Serializer};
use std::{fmt, time::Duration};

const NANOS_DIGITS: usize = 9;

/// The time a test took, as reported on its result line.
///
/// The duration is parsed exactly from a fixed-point `seconds.fraction` token, without going
/// through floating point. Digits past nanosecond precision are dropped from
/// [`as_duration`](Self::as_duration), but kept in [`as_str`](Self::as_str). Seconds that don't
/// fit in a [`Duration`] saturate to [`Duration::MAX`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TestDuration {
    text: String,
    duration: Duration,
}

impl TestDuration {
    /// Parses a `seconds.fraction` token such as `0.002` or `12.5`.
    ///
    /// Returns `None` unless there are ASCII digits on both sides of a single decimal point.
    pub fn parse(text: &str) -> Option<Self> {
        let (secs, fraction) = text.split_once('.')?;
        if !is_digits(secs) || !is_digits(fraction) {
            return None;
        }

        // All digits, so the only way this fails is overflow.
        let duration = match secs.parse::<u64>() {
            Ok(secs) => {
                let nanos = fraction
                    .bytes()
                    .chain(std::iter::repeat(b'0'))
                    .take(NANOS_DIGITS)
                    .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'));
                Duration::new(secs, nanos)
            }
            Err(_) => Duration::MAX,
        };

        Some(Self {
            text: text.to_owned(),
            duration,
        })
    }

    /// Returns the duration as written in the output.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the duration as a [`Duration`].
    pub fn as_duration(&self) -> Duration {
        self.duration
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for TestDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.text)
    }
}

impl Serialize for TestDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
