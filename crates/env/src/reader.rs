//! Loading `KEY=VALUE` files

use std::path::Path;
use tracing::debug;
use vaultenv_core::{EnvironmentVariables, Error, Result};

/// Read every variable from an env file
///
/// Comments, blank lines and quoting follow the usual dotenv rules.
/// Duplicate keys keep the last value. The process environment is not
/// modified.
pub fn read_env_file(path: &Path) -> Result<EnvironmentVariables> {
    let iter = dotenv::from_path_iter(path)
        .map_err(|e| Error::env_file_with_source(path, "unable to open file", e))?;

    let mut vars = EnvironmentVariables::new();
    for item in iter {
        let (key, value) =
            item.map_err(|e| Error::env_file_with_source(path, "unable to parse file", e))?;
        vars.insert(key, value);
    }

    debug!(path = %path.display(), count = vars.len(), "read env file");
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reads_plain_and_quoted_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secrets.env");
        fs::write(
            &path,
            "# references\nDB_PASS=db-secret\nAPI_KEY=\"api-secret\"\n\nNAME='single quoted'\n",
        )
        .unwrap();

        let vars = read_env_file(&path).unwrap();

        assert_eq!(vars.len(), 3);
        assert_eq!(vars.get("DB_PASS").unwrap(), "db-secret");
        assert_eq!(vars.get("API_KEY").unwrap(), "api-secret");
        assert_eq!(vars.get("NAME").unwrap(), "single quoted");
    }

    #[test]
    fn test_last_duplicate_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secrets.env");
        fs::write(&path, "KEY=first\nKEY=second\n").unwrap();

        let vars = read_env_file(&path).unwrap();

        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("KEY").unwrap(), "second");
    }

    #[test]
    fn test_empty_file_yields_no_variables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secrets.env");
        fs::write(&path, "").unwrap();

        assert!(read_env_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_env_file_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.env");

        let err = read_env_file(&path).unwrap_err();

        assert!(matches!(err, Error::EnvFile { .. }));
        assert!(err.to_string().contains("absent.env"));
    }

    #[test]
    fn test_malformed_line_is_env_file_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secrets.env");
        fs::write(&path, "GOOD=1\nthis line has no separator\n").unwrap();

        let err = read_env_file(&path).unwrap_err();

        assert!(matches!(err, Error::EnvFile { .. }));
    }
}
