// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for the planner CLI
// ABOUTME: Provides access to the targets and projection commands

pub mod project;
pub mod targets;
