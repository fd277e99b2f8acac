//! persist-cli library entry point.
//!
//! Shares the argument definitions and command execution between the
//! `app-persist` binary and its tests.

pub mod cli;
pub mod commands;
