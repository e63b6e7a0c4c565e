// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: sessions run through the runner, dependency hooks included.

mod cli;
mod requirements;
mod runtime;
mod tracking;
