// ABOUTME: Shared test helpers for planner integration tests
// ABOUTME: Exports scripted oracle doubles and failing storage doubles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

pub mod failing_stores;
pub mod scripted_oracles;
