//! Test support utilities and fixtures for jsmv integration tests

pub mod harness;

pub use harness::TestWorkspace;
