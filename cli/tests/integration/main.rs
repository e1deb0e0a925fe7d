//! Integration tests for the onevm CLI
//!
//! These tests spawn the actual binary or talk HTTP to a mock daemon.
//! They are slower and should be run separately from unit tests.

mod cli_tests;
mod rpc_commands;
mod support;
