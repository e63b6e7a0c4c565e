// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

/// A filter for tests, matched against full test names (`module::Group::name`).
#[derive(Clone, Debug, Default)]
pub struct TestFilter {
    patterns: Vec<String>,
    exact: bool,
    skip: Vec<String>,
    ignored_only: bool,
}

impl TestFilter {
    /// Creates a new `TestFilter` from the given patterns.
    ///
    /// If no patterns are passed, the filter matches all test names. With `exact`, patterns must
    /// equal the full name; otherwise a substring match is enough. Names containing any of the
    /// `skip` patterns never match.
    pub fn new(
        patterns: impl IntoIterator<Item = impl Into<String>>,
        exact: bool,
        skip: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            exact,
            skip: skip.into_iter().map(Into::into).collect(),
            ignored_only: false,
        }
    }

    /// Creates a new `TestFilter` that matches every test.
    pub fn any() -> Self {
        Self::default()
    }

    /// Only matches ignored tests. No test in this harness is ignored, so nothing matches.
    pub fn with_ignored_only(mut self, ignored_only: bool) -> Self {
        self.ignored_only = ignored_only;
        self
    }

    /// Returns an enum describing the match status of this filter.
    pub fn filter_match(&self, full_name: &str) -> FilterMatch {
        if self.ignored_only {
            return FilterMatch::Mismatch {
                reason: MismatchReason::Ignored,
            };
        }
        if self.skip.iter().any(|skip| full_name.contains(skip.as_str())) {
            return FilterMatch::Mismatch {
                reason: MismatchReason::Skipped,
            };
        }

        let string_match = self.patterns.is_empty()
            || self.patterns.iter().any(|pattern| {
                if self.exact {
                    full_name == pattern
                } else {
                    full_name.contains(pattern.as_str())
                }
            });
        if string_match {
            FilterMatch::Matches
        } else {
            FilterMatch::Mismatch {
                reason: MismatchReason::String,
            }
        }
    }
}

/// An enum describing whether a test matches a filter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterMatch {
    /// This test matches this filter.
    Matches,

    /// This test does not match this filter.
    ///
    /// The `MismatchReason` inside describes the reason this filter isn't matched.
    Mismatch {
        /// The reason the test doesn't match.
        reason: MismatchReason,
    },
}

impl FilterMatch {
    /// Returns true if the filter matches.
    pub fn is_match(&self) -> bool {
        matches!(self, FilterMatch::Matches)
    }
}

/// The reason for why a test doesn't match a filter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MismatchReason {
    /// Only ignored tests were requested.
    Ignored,

    /// This test matches one of the `--skip` patterns.
    Skipped,

    /// This test does not match the provided string filters.
    String,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchReason::Ignored => write!(f, "is not ignored"),
            MismatchReason::Skipped => write!(f, "matches a skip pattern"),
            MismatchReason::String => write!(f, "does not match the provided string filters"),
        }
    }
}
