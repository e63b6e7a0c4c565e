// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// The view of a host test item that dependency tracking needs.
pub trait TestItem {
    /// The display name of the test, including any parametrization suffix, such as
    /// `test_add[1-2]`.
    fn name(&self) -> &str;

    /// The group the test belongs to, if any.
    ///
    /// Groups play the role of test classes: tests in a group are additionally known by
    /// `Group::name`.
    fn group(&self) -> Option<&str>;

    /// The module the test was declared in.
    fn module(&self) -> &str;
}

/// Returns the qualified name of a test item: `Group::name` if it belongs to a group, otherwise
/// just `name`.
pub fn canonical_name(item: &dyn TestItem) -> String {
    match item.group() {
        Some(group) => format!("{group}::{}", item.name()),
        None => item.name().to_owned(),
    }
}
