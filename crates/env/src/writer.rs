//! Merging resolved secrets back in and writing the result

use std::fs;
use std::path::Path;
use tracing::info;
use vaultenv_core::{EnvironmentVariables, Error, Result};
use vaultenv_utils::{write_atomic, write_atomic_string};

/// Combine base variables with resolved secrets, resolved values winning
#[must_use]
pub fn merge(base: &EnvironmentVariables, resolved: &EnvironmentVariables) -> EnvironmentVariables {
    let mut merged = base.clone();
    merged.merge(resolved.clone());
    merged
}

/// Render variables as an env file, one `KEY=VALUE` per line sorted by key
#[must_use]
pub fn serialize(vars: &EnvironmentVariables) -> String {
    let mut content = String::new();
    for (key, value) in vars.sorted() {
        content.push_str(key);
        content.push('=');
        content.push_str(&quote_value(value));
        content.push('\n');
    }
    content
}

/// Replace the file at `path` with the serialized variables
pub fn write_env_file(path: &Path, vars: &EnvironmentVariables) -> Result<()> {
    write_atomic_string(path, &serialize(vars))?;
    info!(path = %path.display(), count = vars.len(), "wrote env file");
    Ok(())
}

/// Replace the file at `target` with the exact bytes of `source`
///
/// Used when a full env file holds no references, so comments, ordering and
/// quoting survive untouched.
pub fn copy_env_file(source: &Path, target: &Path) -> Result<()> {
    let content = fs::read(source).map_err(|e| Error::file_system(source, "read", e))?;
    write_atomic(target, &content)?;
    info!(path = %target.display(), "copied env file unchanged");
    Ok(())
}

fn quote_value(value: &str) -> String {
    if value.parse::<i64>().is_ok() {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '$' => quoted.push_str("\\$"),
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
