//! ouiscan library
//!
//! This module exposes the driver, CLI, matcher, and registry modules for use
//! in integration tests.

pub mod app;
pub mod cli;
pub mod mac;
pub mod registry;
