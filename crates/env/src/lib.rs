//! Environment file handling for vaultenv
//!
//! Reads a `KEY=VALUE` file, decides which entries are secret references,
//! and writes the merged result back out.

pub mod reader;
pub mod references;
pub mod writer;

pub use reader::read_env_file;
pub use references::{load_source, EnvSource, SourceMode};
pub use writer::{copy_env_file, merge, serialize, write_env_file};
