// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for turning the console output of a
//! [`tested`](https://code.dlang.org/packages/tested) run into a structured test report.
//!
//! The flow is a single forward pass over the captured output:
//!
//! 1. [`record::RecordMatcher`] picks out the `PASS`/`FAIL` result lines and ignores everything
//!    else (build logs, warnings).
//! 2. A [`naming::NamingStrategy`] recovers a class name and a display label from the
//!    compiler-generated test identifier.
//! 3. [`report::TestState::from_status`] classifies the line as a pass or a failure.
//! 4. [`report::ReportAggregator`] collects the entries into a [`report::TestReport`].
//!
//! [`parser::ReportParser`] ties these steps together. The resulting report can be converted to
//! JUnit XML with the [`junit`] module, or serialized to JSON.

pub mod config;
pub mod errors;
pub mod junit;
pub mod naming;
pub mod parser;
pub mod record;
pub mod report;
