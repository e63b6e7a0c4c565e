// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by the harness.

use camino::Utf8PathBuf;
use config::ConfigError;
use thiserror::Error;

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse testdeps config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    err: ConfigError,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, err: ConfigError) -> Self {
        Self {
            config_file: config_file.into(),
            err,
        }
    }

    /// Returns the config file that failed to parse.
    pub fn config_file(&self) -> &Utf8PathBuf {
        &self.config_file
    }
}

/// A boolean setting had a value that is neither truthy nor falsy.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error(
    "invalid truth value `{input}`\n(known values: {}, {})",
    TRUE_VALUES.join(", "),
    FALSE_VALUES.join(", "),
)]
pub struct InvalidBoolSetting {
    input: String,
}

pub(crate) static TRUE_VALUES: [&str; 6] = ["1", "yes", "y", "true", "t", "on"];
pub(crate) static FALSE_VALUES: [&str; 6] = ["0", "no", "n", "false", "f", "off"];

impl InvalidBoolSetting {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// An error that occurred while writing a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteReportError {
    /// An error occurred while writing to the output stream.
    #[error("error writing test report")]
    Io(#[from] std::io::Error),

    /// An error occurred while creating or writing a file.
    #[error("error writing to {file}")]
    Fs {
        /// The file being written.
        file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// An error occurred while producing JUnit XML.
    #[error("error writing JUnit output to {file}")]
    Junit {
        /// The output file.
        file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// An error that stops the harness before or after running tests.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HarnessError {
    /// The config could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigParseError),

    /// A report could not be written.
    #[error(transparent)]
    WriteReport(#[from] WriteReportError),
}
