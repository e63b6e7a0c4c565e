// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide dependency settings.
//!
//! Settings are resolved once at startup, in this order (highest priority first):
//!
//! 1. CLI arguments (e.g. `--ignore-unknown-dependency`)
//! 2. Environment variables (e.g. `TESTDEPS_IGNORE_UNKNOWN_DEPENDENCY=1`)
//! 3. The config file, `.config/testdeps.toml` by default
//! 4. Built-in defaults

use crate::errors::{ConfigParseError, FALSE_VALUES, InvalidBoolSetting, TRUE_VALUES};
use camino::Utf8Path;
use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::fmt;
use testdeps::UnknownDependencies;
use tracing::debug;

/// The config file looked up when no path is given explicitly, relative to the current
/// directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/testdeps.toml";

/// Settings that apply to every test in a run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DependencySettings {
    automark: bool,
    ignore_unknown: bool,
}

impl DependencySettings {
    /// The default config, embedded in the binary.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// Creates settings with both options turned off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from `config_file`, or from [`DEFAULT_CONFIG_PATH`] if it exists.
    ///
    /// An explicitly provided file must exist.
    pub fn from_sources(config_file: Option<&Utf8Path>) -> Result<Self, ConfigParseError> {
        match config_file {
            Some(path) => Self::from_file(path, true),
            None => Self::from_file(Utf8Path::new(DEFAULT_CONFIG_PATH), false),
        }
    }

    fn from_file(path: &Utf8Path, required: bool) -> Result<Self, ConfigParseError> {
        let config = Config::builder()
            .add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::new(path.as_str(), FileFormat::Toml).required(required))
            .build()
            .map_err(|err| ConfigParseError::new(path, err))?;
        let deserialized: TestdepsConfigDeserialize = config
            .try_deserialize()
            .map_err(|err| ConfigParseError::new(path, err))?;

        let settings = Self {
            automark: deserialized.dependency.automark.0,
            ignore_unknown: deserialized.dependency.ignore_unknown.0,
        };
        debug!(config_file = %path, ?settings, "loaded dependency settings");
        Ok(settings)
    }

    /// Sets whether every test is tracked, even without a dependency marker.
    pub fn with_automark(mut self, automark: bool) -> Self {
        self.automark = automark;
        self
    }

    /// Sets whether unknown dependency identifiers are ignored rather than failing the test.
    pub fn with_ignore_unknown(mut self, ignore_unknown: bool) -> Self {
        self.ignore_unknown = ignore_unknown;
        self
    }

    /// Returns true if every test is tracked.
    pub fn automark(&self) -> bool {
        self.automark
    }

    /// Returns true if unknown dependency identifiers are ignored.
    pub fn ignore_unknown(&self) -> bool {
        self.ignore_unknown
    }

    /// Returns the unknown-dependency mode to check dependencies with.
    pub fn unknown_dependencies(&self) -> UnknownDependencies {
        if self.ignore_unknown {
            UnknownDependencies::Ignore
        } else {
            UnknownDependencies::Fail
        }
    }
}

/// Parses an INI-style truth value.
///
/// Matching is case-insensitive, and an empty string is false.
pub fn parse_bool_setting(input: &str) -> Result<bool, InvalidBoolSetting> {
    if input.is_empty() {
        return Ok(false);
    }
    let lower = input.to_ascii_lowercase();
    if TRUE_VALUES.contains(&lower.as_str()) {
        Ok(true)
    } else if FALSE_VALUES.contains(&lower.as_str()) {
        Ok(false)
    } else {
        Err(InvalidBoolSetting::new(input))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TestdepsConfigDeserialize {
    dependency: DeserializedDependencySettings,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedDependencySettings {
    #[serde(default)]
    automark: BoolSetting,
    #[serde(default)]
    ignore_unknown: BoolSetting,
}

#[derive(Clone, Copy, Debug, Default)]
struct BoolSetting(bool);

impl<'de> Deserialize<'de> for BoolSetting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;

        impl serde::de::Visitor<'_> for V {
            type Value = BoolSetting;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a boolean or a truth value such as \"yes\" or \"off\"")
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(BoolSetting(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                parse_bool_setting(v)
                    .map(BoolSetting)
                    .map_err(serde::de::Error::custom)
            }

            // Note that TOML uses i64, not u64.
            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                match v {
                    0 => Ok(BoolSetting(false)),
                    1 => Ok(BoolSetting(true)),
                    _ => Err(serde::de::Error::invalid_value(
                        serde::de::Unexpected::Signed(v),
                        &self,
                    )),
                }
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                match v {
                    0 => Ok(BoolSetting(false)),
                    1 => Ok(BoolSetting(true)),
                    _ => Err(serde::de::Error::invalid_value(
                        serde::de::Unexpected::Unsigned(v),
                        &self,
                    )),
                }
            }
        }

        deserializer.deserialize_any(V)
    }
}
