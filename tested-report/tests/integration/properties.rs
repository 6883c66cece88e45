// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use proptest::{collection::vec, option, prelude::*};
use tested_report::{
    naming::{NamingPolicy, NamingStrategyKind, UNKNOWN_CLASS_NAME},
    parser::ReportParser,
    report::{TestEntry, TestReport, TestState},
};
use test_strategy::proptest;

#[derive(Clone, Debug)]
struct ResultLine {
    state: TestState,
    identifier: String,
    // The class name a mangled identifier carries, if the identifier is mangled.
    mangled_class: Option<String>,
    secs: u32,
    millis: u32,
}

impl ResultLine {
    // Friendly names are made unique by index so that order can be checked by name.
    fn friendly_name(index: usize) -> String {
        format!("test {index}")
    }

    fn render(&self, index: usize) -> String {
        format!(
            "{} \"{}\" ({}) after {}.{:03} s",
            self.state,
            Self::friendly_name(index),
            self.identifier,
            self.secs,
            self.millis,
        )
    }
}

fn identifier() -> impl Strategy<Value = (String, Option<String>)> {
    prop_oneof![
        "[a-z]{1,6}(\\.[A-Za-z_]{1,8}){0,3}".prop_map(|identifier| (identifier, None::<String>)),
        (
            "[a-z]{1,6}(\\.[a-z]{1,6}){0,2}",
            "[A-Z][A-Za-z0-9]{0,8}",
            1u32..2000,
            0u32..50,
        )
            .prop_map(|(module, class, line, index)| (
                format!("{module}.{class}.__unittestL{line}_{index}"),
                Some(class),
            )),
    ]
}

fn result_line() -> impl Strategy<Value = ResultLine> {
    (
        prop_oneof![Just(TestState::Pass), Just(TestState::Fail)],
        identifier(),
        0u32..100,
        0u32..1000,
    )
        .prop_map(
            |(state, (identifier, mangled_class), secs, millis)| ResultLine {
                state,
                identifier,
                mangled_class,
                secs,
                millis,
            },
        )
}

fn naming_kind() -> impl Strategy<Value = NamingStrategyKind> {
    prop_oneof![
        Just(NamingStrategyKind::Mangled),
        Just(NamingStrategyKind::Dotted)
    ]
}

// Never starts with PASS or FAIL, so it can't be a result line.
fn noise_line() -> impl Strategy<Value = String> {
    "[#>~ a-z][ -~]{0,40}"
}

fn parse(output: &str, kind: NamingStrategyKind) -> TestReport {
    ReportParser::new(NamingPolicy::new(kind)).parse(output)
}

fn expected_names(lines: &[ResultLine], state: TestState) -> Vec<String> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.state == state)
        .map(|(index, _)| ResultLine::friendly_name(index))
        .collect()
}

fn entries(report: &TestReport, state: TestState) -> &[TestEntry] {
    match state {
        TestState::Pass => report.passed(),
        TestState::Fail => report.failed(),
    }
}

fn actual_names(report: &TestReport, state: TestState) -> Vec<String> {
    entries(report, state)
        .iter()
        .map(|e| e.test_name().to_owned())
        .collect()
}

#[proptest(cases = 128)]
fn well_formed_lines_all_parsed(
    #[strategy(vec(result_line(), 0..24))] lines: Vec<ResultLine>,
    #[strategy(naming_kind())] kind: NamingStrategyKind,
) {
    let output = lines
        .iter()
        .enumerate()
        .map(|(index, line)| line.render(index))
        .collect::<Vec<_>>()
        .join("\n");
    let report = parse(&output, kind);

    assert_eq!(report.total(), lines.len());
    for state in [TestState::Pass, TestState::Fail] {
        assert_eq!(
            actual_names(&report, state),
            expected_names(&lines, state),
            "entries in the {state} bucket match input order"
        );
    }
    assert!(report.iter().all(|entry| entry.duration().as_str().contains('.')));

    if kind == NamingStrategyKind::Mangled {
        for state in [TestState::Pass, TestState::Fail] {
            let expected: Vec<_> = lines
                .iter()
                .filter(|line| line.state == state)
                .map(|line| line.mangled_class.as_deref().unwrap_or(UNKNOWN_CLASS_NAME))
                .collect();
            let actual: Vec<_> = entries(&report, state)
                .iter()
                .map(|entry| entry.class_name().unwrap_or_default())
                .collect();
            assert_eq!(actual, expected, "class names in the {state} bucket");
        }
    }
}

#[proptest(cases = 128)]
fn noise_lines_contribute_nothing(
    #[strategy(vec((result_line(), option::of(noise_line())), 0..24))] lines: Vec<(
        ResultLine,
        Option<String>,
    )>,
    #[strategy(option::of(noise_line()))] leading: Option<String>,
    #[strategy(naming_kind())] kind: NamingStrategyKind,
) {
    let mut clean = Vec::new();
    let mut noisy = Vec::new();
    noisy.extend(leading);
    for (index, (line, noise)) in lines.iter().enumerate() {
        clean.push(line.render(index));
        noisy.push(line.render(index));
        noisy.extend(noise.clone());
    }

    assert_eq!(
        parse(&noisy.join("\n"), kind),
        parse(&clean.join("\n"), kind)
    );
}

#[proptest(cases = 64)]
fn parsing_is_deterministic(
    #[strategy(vec(result_line(), 0..16))] lines: Vec<ResultLine>,
    #[strategy(naming_kind())] kind: NamingStrategyKind,
) {
    let output = lines
        .iter()
        .enumerate()
        .map(|(index, line)| line.render(index))
        .collect::<Vec<_>>()
        .join("\n");

    let parser = ReportParser::new(NamingPolicy::new(kind));
    assert_eq!(parser.parse(&output), parser.parse(&output));
}
