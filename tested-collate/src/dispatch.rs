// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::ExpectedError,
    output::{OutputContext, OutputOpts, OutputWriter, ReportStyles},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{
    Args, ValueEnum,
    builder::{PossibleValuesParser, TypedValueParser},
};
use itertools::Itertools;
use owo_colors::OwoColorize;
use std::io::{Read, Write};
use tested_report::{
    config::CollateConfig,
    junit::write_junit,
    naming::{NamingPolicy, NamingStrategyKind},
    parser::ReportParser,
    report::{TestReport, TestState},
};
use tracing::{debug, info, warn};

/// Collate the console output of a `tested` run into a structured report.
///
/// Reads captured test output from INPUT (or standard input), prints the results, and optionally
/// writes a JUnit XML report.
#[derive(Debug, clap::Parser)]
#[command(
    version,
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct TestedCollateApp {
    /// File containing the captured output; `-` or absent reads standard input
    #[arg(value_name = "INPUT")]
    input: Option<Utf8PathBuf>,

    #[clap(flatten)]
    config_opts: ConfigOpts,

    #[clap(flatten)]
    report_opts: ReportOpts,

    #[clap(flatten)]
    output: OutputOpts,
}

impl TestedCollateApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app.
    pub fn exec(
        self,
        output: OutputContext,
        output_writer: &mut OutputWriter,
    ) -> Result<(), ExpectedError> {
        let input = read_input(self.input.as_deref())?;
        let config = self.config_opts.make_config()?;

        let naming = self.config_opts.naming.unwrap_or(config.naming());
        debug!("using {naming} naming");

        let report = ReportParser::new(NamingPolicy::new(naming)).parse(&input);

        if let Some(junit_path) = &self.report_opts.junit {
            write_junit(&report, config.junit(), junit_path)?;
            info!("wrote JUnit report to `{junit_path}`");
        }

        let mut writer = output_writer.stdout_writer();
        match self.report_opts.message_format {
            MessageFormat::Human => {
                let styles = ReportStyles::new(output.color);
                write_human(&report, &styles, output.verbose, &mut writer)
                    .map_err(ExpectedError::write_output_error)?;
            }
            MessageFormat::Json => {
                let json = report.to_json()?;
                writeln!(writer, "{json}").map_err(ExpectedError::write_output_error)?;
            }
        }
        writer.flush().map_err(ExpectedError::write_output_error)?;

        if report.is_empty() {
            if self.report_opts.fail_on_empty {
                return Err(ExpectedError::NoTestsFound);
            }
            warn!("no test results found in output");
        } else if report.has_failures() {
            return Err(ExpectedError::TestRunFailed {
                failed: report.failed().len(),
                total: report.total(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Config options")]
struct ConfigOpts {
    /// Config file [default: workspace-dir/.config/tested.toml]
    #[arg(long, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,

    /// Directory to look for `.config/tested.toml` in
    #[arg(long, value_name = "DIR", default_value = ".")]
    workspace_dir: Utf8PathBuf,

    /// How to derive class names from test identifiers [default: from config]
    #[arg(
        long,
        value_name = "STRATEGY",
        value_parser = PossibleValuesParser::new(NamingStrategyKind::variants().iter().copied())
            .try_map(|s| s.parse::<NamingStrategyKind>()),
    )]
    naming: Option<NamingStrategyKind>,
}

impl ConfigOpts {
    fn make_config(&self) -> Result<CollateConfig, ExpectedError> {
        let config = CollateConfig::from_sources(
            &self.workspace_dir,
            self.config_file.as_deref(),
            |config_file, unknown| {
                warn!(
                    "ignoring unknown configuration keys in config file {config_file}: {}",
                    unknown.iter().join(", ")
                );
            },
        )?;

        if let Some(config_file) = config.config_file() {
            debug!("read config from `{config_file}`");
        }
        Ok(config)
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Reporter options")]
struct ReportOpts {
    /// Format to print results in
    #[arg(long, value_enum, default_value_t, value_name = "FORMAT")]
    message_format: MessageFormat,

    /// Also write a JUnit XML report to this path
    #[arg(long, value_name = "PATH")]
    junit: Option<Utf8PathBuf>,

    /// Exit with an error if no test results were found
    #[arg(long)]
    fail_on_empty: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum MessageFormat {
    /// One line per test, followed by a summary
    #[default]
    Human,
    /// The full report as JSON
    Json,
}

fn read_input(path: Option<&Utf8Path>) -> Result<String, ExpectedError> {
    let mut buf = Vec::new();
    match path.filter(|path| path.as_str() != "-") {
        Some(path) => {
            buf = std::fs::read(path)
                .map_err(|err| ExpectedError::input_read_failed(Some(path.to_owned()), err))?;
        }
        None => {
            std::io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .map_err(|err| ExpectedError::input_read_failed(None, err))?;
        }
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_human(
    report: &TestReport,
    styles: &ReportStyles,
    verbose: bool,
    mut writer: impl Write,
) -> std::io::Result<()> {
    for entry in report.iter() {
        let (status, style) = match entry.state() {
            TestState::Pass => ("PASS", styles.pass),
            TestState::Fail => ("FAIL", styles.fail),
        };
        write!(
            writer,
            "{:>12} [{:>9}] ",
            status.style(style),
            entry.duration().to_string()
        )?;
        if let Some(class_name) = entry.class_name() {
            write!(writer, "{} ", class_name.style(styles.class_name))?;
        }
        writeln!(writer, "{}", entry.test_name())?;

        if verbose
            && entry.state() == TestState::Fail
            && let Some(output) = entry.captured_output()
        {
            writeln!(writer, "{:>25}{output}", "")?;
        }
    }

    writeln!(
        writer,
        "{} tests: {} passed, {} failed",
        report.total().style(styles.count),
        report.passed().len().style(styles.pass),
        report.failed().len().style(styles.fail),
    )
}
