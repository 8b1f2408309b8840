//! Shared test utilities for phonecheck integration tests.

pub mod harness;

pub use harness::TestHarness;
