//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module holds all I/O-performing code: HTTP calls to the daemon,
//! XML-RPC encoding, and config file access.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod gateway;
pub mod pool;
pub mod xmlrpc;
