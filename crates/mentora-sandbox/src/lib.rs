// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code execution for teaching exercises.
//!
//! Submitted source is written into a fresh temp directory and run as a
//! subprocess under a wall-clock timeout. That is the entire isolation
//! story: no memory, CPU, or network confinement. Deploy behind an outer
//! sandbox if untrusted users can reach this.

pub mod runner;

pub use runner::{ExecutionResult, Language, Sandbox};
