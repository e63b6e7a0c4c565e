// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::TestNameParseError;
use regex::Regex;
use std::sync::LazyLock;

static TEST_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<group>\w+)::)?(?P<function>\w+)(?:\[(?P<params>(?s:.*))\])?$")
        .expect("test name regex is valid")
});

/// The components of a test's display name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TestNameParts<'a> {
    /// The owning group, if the name had a `Group::` prefix.
    pub group: Option<&'a str>,

    /// The bare function name.
    pub function: &'a str,

    /// The text between the brackets of a parametrized name, if any.
    pub params: Option<&'a str>,
}

/// Splits a display name of the form `[Group::]name[[params]]` into its parts.
///
/// The parametrization suffix runs from the first `[` after the function name up to the final
/// `]`, so it may itself contain brackets or line breaks.
pub fn parse_test_name(name: &str) -> Result<TestNameParts<'_>, TestNameParseError> {
    let captures = TEST_NAME_REGEX
        .captures(name)
        .ok_or_else(|| TestNameParseError::new(name))?;
    let function = captures
        .name("function")
        .ok_or_else(|| TestNameParseError::new(name))?
        .as_str();

    Ok(TestNameParts {
        group: captures.name("group").map(|m| m.as_str()),
        function,
        params: captures.name("params").map(|m| m.as_str()),
    })
}
