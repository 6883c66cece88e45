// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::DUB_TEST_OUTPUT;
use color_eyre::eyre::{Result, ensure};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::time::Duration;
use tested_report::{
    config::CollateConfig,
    naming::{DottedNames, MangledNames, NamingPolicy, NamingStrategyKind},
    parser::ReportParser,
    report::{TestEntry, TestState},
};

fn summarize(entries: &[TestEntry]) -> Vec<(Option<&str>, &str, &str)> {
    entries
        .iter()
        .map(|entry| {
            (
                entry.class_name(),
                entry.test_name(),
                entry.duration().as_str(),
            )
        })
        .collect()
}

#[test]
fn friendly_name_with_mangled_identifier() {
    let report = ReportParser::new(MangledNames::new())
        .parse(r#"PASS "adds numbers" (mymod.Calculator.__unittestL10_3) after 0.002 s"#);

    assert!(report.failed().is_empty());
    assert_eq!(
        summarize(report.passed()),
        [(Some("Calculator"), "adds numbers", "0.002")]
    );
    assert_eq!(
        report.passed()[0].duration().as_duration(),
        Duration::from_millis(2)
    );
    assert_eq!(report.passed()[0].state(), TestState::Pass);
}

#[test]
fn empty_friendly_name_uses_label() {
    let report = ReportParser::new(MangledNames::new())
        .parse(r#"FAIL "" (mymod.Thing.__unittestL5_1) after 1.230 s"#);

    assert!(report.passed().is_empty());
    assert_eq!(summarize(report.failed()), [(Some("Thing"), "Thing:5", "1.230")]);
    assert_eq!(report.failed()[0].captured_output(), None);
}

#[test]
fn dotted_splits_at_first_dot() {
    let line = r#"FAIL "" (pkg.sub.Class.testFoo) after 0.500 s"#;

    let dotted = ReportParser::new(DottedNames).parse(line);
    assert_eq!(
        summarize(dotted.failed()),
        [(Some("pkg"), "sub.Class.testFoo", "0.500")]
    );

    // The mangled strategy doesn't understand this identifier at all.
    let mangled = ReportParser::new(MangledNames::new()).parse(line);
    assert_eq!(
        summarize(mangled.failed()),
        [(Some("Unknown"), "pkg.sub.Class.testFoo", "0.500")]
    );
}

#[test]
fn interleaved_states_keep_order() {
    let report = ReportParser::new(MangledNames::new()).parse(indoc! {r#"
        PASS "first" (m.A.__unittestL1_0) after 0.001 s
        FAIL "second" (m.A.__unittestL2_1) after 0.002 s
        PASS "third" (m.A.__unittestL3_2) after 0.003 s
    "#});

    assert_eq!(
        summarize(report.passed()),
        [
            (Some("A"), "first", "0.001"),
            (Some("A"), "third", "0.003")
        ]
    );
    assert_eq!(summarize(report.failed()), [(Some("A"), "second", "0.002")]);
}

#[test]
fn integer_duration_is_dropped() {
    let report = ReportParser::new(MangledNames::new()).parse(indoc! {r#"
        PASS "whole seconds" (m.A.__unittestL1_0) after 2 s
        PASS "fractional" (m.A.__unittestL2_1) after 2.0 s
    "#});

    assert_eq!(report.total(), 1);
    assert_eq!(report.passed()[0].test_name(), "fractional");
}

#[test]
fn oversized_duration_is_kept() {
    let report = ReportParser::new(MangledNames::new()).parse(indoc! {r#"
        PASS "a" (m.A.__unittestL1_0) after 99999999999999999999.5 s
        PASS "b" (m.A.__unittestL2_1) after 0.5 s
    "#});

    assert_eq!(
        summarize(report.passed()),
        [
            (Some("A"), "a", "99999999999999999999.5"),
            (Some("A"), "b", "0.5")
        ]
    );
    assert_eq!(report.passed()[0].duration().as_duration(), Duration::MAX);
}

#[test]
fn lone_carriage_returns_split_lines() {
    let report = ReportParser::new(MangledNames::new())
        .parse("Building...\rPASS \"a\" (m.A.__unittestL1_0) after 0.5 s\rFAIL \"b\" (m.A.__unittestL2_1) after 0.1 s\r");

    assert_eq!(summarize(report.passed()), [(Some("A"), "a", "0.5")]);
    assert_eq!(summarize(report.failed()), [(Some("A"), "b", "0.1")]);
}

#[test]
fn no_results_is_empty_report() {
    let report = ReportParser::new(MangledNames::new()).parse(indoc! {"
        Performing \"unittest\" build using /usr/bin/dmd for x86_64.
        Error: linker exited with status 1
    "});

    assert!(report.is_empty());
    assert!(!report.has_failures());
}

#[test]
fn dub_output_with_noise() -> Result<()> {
    let parser = ReportParser::from_config(&CollateConfig::default_config());
    let report = parser.parse(DUB_TEST_OUTPUT);

    ensure!(report.total() == 6, "expected 6 entries, found {}", report.total());
    assert_eq!(
        summarize(report.passed()),
        [
            (Some("Calculator"), "adds numbers", "0.002"),
            (Some("Calculator"), "Calculator:31", "0.000"),
            (Some("Tokenizer"), "Tokenizer:7", "0.104"),
            (Some("Unknown"), "round trip", "2.500"),
        ]
    );
    assert_eq!(
        summarize(report.failed()),
        [
            (Some("Calculator"), "divides by zero", "0.013"),
            (Some("Tokenizer"), "Tokenizer:66", "1.230"),
        ]
    );
    assert_eq!(
        report.failed()[0].captured_output(),
        Some(": core.exception.AssertError@source/calc/ops.d(52): Assertion failure")
    );

    Ok(())
}

#[test]
fn dub_output_with_dotted_policy() {
    let parser = ReportParser::new(NamingPolicy::new(NamingStrategyKind::Dotted));
    let report = parser.parse(DUB_TEST_OUTPUT);

    assert_eq!(
        summarize(report.passed()),
        [
            (Some("calc"), "adds numbers", "0.002"),
            (Some("calc"), "ops.Calculator.__unittestL31_4", "0.000"),
            (Some("calc"), "parse.Tokenizer.__unittestL7_0", "0.104"),
            (Some("calc"), "round trip", "2.500"),
        ]
    );
}

#[test]
fn json_output() -> Result<()> {
    let report = ReportParser::new(MangledNames::new()).parse(indoc! {r#"
        PASS "one" (m.A.__unittestL1_0) after 0.001 s
        FAIL "" (m.B.__unittestL2_1) after 0.020 s: boom
        PASS "three" (m.A.__unittestL3_2) after 0.300 s
    "#});

    insta::assert_snapshot!(report.to_json()?, @r#"
    {
      "passed": [
        {
          "class-name": "A",
          "test-name": "one",
          "duration": "0.001",
          "state": "pass",
          "captured-output": null
        },
        {
          "class-name": "A",
          "test-name": "three",
          "duration": "0.300",
          "state": "pass",
          "captured-output": null
        }
      ],
      "failed": [
        {
          "class-name": "B",
          "test-name": "B:2",
          "duration": "0.020",
          "state": "fail",
          "captured-output": ": boom"
        }
      ]
    }
    "#);

    Ok(())
}
