// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collate the console output of a [`tested`](https://code.dlang.org/packages/tested) run into a
//! structured report.
//!
//! `tested-collate` reads the captured output of `dub test` from a file or from standard input,
//! and prints a summary, a JSON report, and optionally writes JUnit XML for a CI system to pick
//! up. The parsing itself lives in the [`tested_report`] crate.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::OutputWriter;
