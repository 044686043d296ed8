// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - A scripted in-memory gateway that records every call

mod fixtures;
mod gateway;

#[allow(unused_imports)]
pub use fixtures::{OTHER_USER, USER, at, logged_in, logged_out, numbered_events, test_event};
#[allow(unused_imports)]
pub use gateway::{Call, ScriptedGateway};
