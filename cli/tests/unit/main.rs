//! Unit tests for the onevm CLI
//!
//! These tests use hand-written port fakes and run fast without external I/O.

mod create_service;
mod lifecycle_service;
mod property_tests;
