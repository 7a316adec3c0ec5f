//! Shared utilities for vaultenv
//!
//! Logging setup and file helpers used by the reader, writer and binary.

pub mod atomic_file;
pub mod tracing;

pub use atomic_file::*;
