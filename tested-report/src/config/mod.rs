// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for tested-collate.
//!
//! Configuration is read from TOML and layered on top of a default config that ships with this
//! crate. The settings cover how result lines are turned into reports (the naming strategy), and
//! how reports are handed off as JUnit XML.

mod junit;

pub use junit::JunitConfig;

use crate::{
    errors::{ConfigParseError, ConfigParseErrorKind, DisplayErrorChain},
    naming::NamingStrategyKind,
};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, builder::DefaultState};
use itertools::Itertools;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Overall configuration for tested-collate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateConfig {
    config_file: Option<Utf8PathBuf>,
    naming: NamingStrategyKind,
    junit: JunitConfig,
}

impl CollateConfig {
    /// The default location of the config within a directory: `.config/tested.toml`.
    pub const CONFIG_PATH: &'static str = ".config/tested.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Repository-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../../default-config.toml");

    /// Reads the config, layering it on top of the default config.
    ///
    /// If `file` is provided, it must exist. Otherwise, the config is read from
    /// [`CONFIG_PATH`](Self::CONFIG_PATH) within `dir` if that file exists.
    ///
    /// `unknown_callback` is called with the set of unrecognized keys, if there are any.
    pub fn from_sources(
        dir: impl AsRef<Utf8Path>,
        file: Option<&Utf8Path>,
        mut unknown_callback: impl FnMut(&Utf8Path, &BTreeSet<String>),
    ) -> Result<Self, ConfigParseError> {
        let (config_file, source) = match file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = dir.as_ref().join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };

        let builder = Self::make_default_config().add_source(source);
        let (deserialized, unknown) = Self::build_and_deserialize_config(builder)
            .map_err(|kind| ConfigParseError::new(&config_file, kind))?;

        if !unknown.is_empty() {
            unknown_callback(&config_file, &unknown);
        }

        let config_file = (file.is_some() || config_file.is_file()).then_some(config_file);
        Ok(deserialized.into_config(config_file))
    }

    /// Returns the default config.
    ///
    /// This does not read anything from disk.
    pub fn default_config() -> Self {
        let (deserialized, unknown) =
            Self::build_and_deserialize_config(Self::make_default_config()).unwrap_or_else(
                |error| {
                    panic!(
                        "default config should be valid: {}",
                        DisplayErrorChain::new(error)
                    )
                },
            );

        // Make sure there aren't any unknown keys in the default config, since it is
        // embedded/shipped with this binary.
        if !unknown.is_empty() {
            panic!(
                "found unknown keys in default config: {}",
                unknown.iter().join(", ")
            );
        }

        deserialized.into_config(None)
    }

    /// Returns the config file that was read, if any.
    pub fn config_file(&self) -> Option<&Utf8Path> {
        self.config_file.as_deref()
    }

    /// Returns the naming strategy to use.
    pub fn naming(&self) -> NamingStrategyKind {
        self.naming
    }

    /// Returns the JUnit configuration.
    pub fn junit(&self) -> &JunitConfig {
        &self.junit
    }

    // ---
    // Helper methods
    // ---

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build_and_deserialize_config(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<(CollateConfigDeserialize, BTreeSet<String>), ConfigParseErrorKind> {
        let config = builder
            .build()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let deserialized: CollateConfigDeserialize = serde_path_to_error::deserialize(ignored_de)
            .map_err(|error| {
                // The config crate reports the key as well as serde_path_to_error. Drop the key
                // from the config error so it's only printed once.
                let path = error.path().clone();
                let error = match error.into_inner() {
                    ConfigError::At { error, .. } => *error,
                    other => other,
                };
                ConfigParseErrorKind::DeserializeError(Box::new(serde_path_to_error::Error::new(
                    path, error,
                )))
            })?;

        Ok((deserialized, ignored))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CollateConfigDeserialize {
    naming: NamingStrategyKind,
    junit: JunitConfig,
}

impl CollateConfigDeserialize {
    fn into_config(self, config_file: Option<Utf8PathBuf>) -> CollateConfig {
        CollateConfig {
            config_file,
            naming: self.naming,
            junit: self.junit,
        }
    }
}
