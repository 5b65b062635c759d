//! CLI integration tests driving fake build tools.
//!
//! The fakes are POSIX shell scripts, so the suite is Unix-only.

#![cfg(unix)]

mod run_tests;
