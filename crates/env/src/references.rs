//! Deciding which entries of an env file are secret references

use crate::reader::read_env_file;
use std::path::Path;
use tracing::debug;
use vaultenv_core::{EnvironmentVariables, Error, ReferenceSet, Result, SecretReference};

/// How the input file marks secret references
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceMode {
    /// Every entry maps a local key to a secret name
    #[default]
    References,
    /// A full env file where only `keyvault://` values are references
    Prefixed,
}

/// What the reader hands to the rest of the pipeline
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    /// Variables that are written out even if no secret resolves
    pub base: EnvironmentVariables,
    /// Entries that must be fetched from the vault
    pub references: ReferenceSet,
}

/// Read an env file and split it into base variables and references
pub fn load_source(path: &Path, mode: SourceMode) -> Result<EnvSource> {
    let vars = read_env_file(path)?;
    let source = match mode {
        SourceMode::References => EnvSource {
            base: EnvironmentVariables::new(),
            references: references_only(path, vars)?,
        },
        SourceMode::Prefixed => {
            let references = scan_prefixed(path, &vars)?;
            EnvSource {
                base: vars,
                references,
            }
        }
    };

    debug!(
        path = %path.display(),
        ?mode,
        references = source.references.len(),
        passthrough = source.base.len(),
        "loaded secret source"
    );
    Ok(source)
}

/// Treat every entry as `KEY=secret-name[/version]`
pub fn references_only(path: &Path, vars: EnvironmentVariables) -> Result<ReferenceSet> {
    vars.into_iter()
        .map(|(key, value)| {
            let reference = parse_reference(path, &key, &value)?;
            Ok((key, reference))
        })
        .collect()
}

/// Collect the entries whose value starts with the reference marker
pub fn scan_prefixed(path: &Path, vars: &EnvironmentVariables) -> Result<ReferenceSet> {
    let mut references = ReferenceSet::new();
    for (key, value) in vars.iter() {
        if let Some(raw) = SecretReference::strip_marker(value) {
            references.insert(key.clone(), parse_reference(path, key, raw)?);
        }
    }
    Ok(references)
}

fn parse_reference(path: &Path, key: &str, raw: &str) -> Result<SecretReference> {
    SecretReference::parse(raw)
        .map_err(|e| Error::env_file_with_source(path, format!("invalid reference for '{key}'"), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("input.env");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_references_mode_uses_every_entry() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "DB_PASS=db-secret\nAPI_KEY=api-secret/abc123\n");

        let source = load_source(&path, SourceMode::References).unwrap();

        assert!(source.base.is_empty());
        assert_eq!(source.references.len(), 2);
        assert_eq!(
            source.references.get("DB_PASS"),
            Some(&SecretReference::latest("db-secret"))
        );
        assert_eq!(
            source.references.get("API_KEY"),
            Some(&SecretReference::pinned("api-secret", "abc123"))
        );
    }

    #[test]
    fn test_prefixed_mode_keeps_plain_values_as_base() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "PORT=8080\nDB_PASS=keyvault://db-secret\nLOG_LEVEL=debug\n",
        );

        let source = load_source(&path, SourceMode::Prefixed).unwrap();

        assert_eq!(source.base.len(), 3);
        assert_eq!(source.references.len(), 1);
        assert_eq!(
            source.references.get("DB_PASS"),
            Some(&SecretReference::latest("db-secret"))
        );
        assert!(!source.references.contains_key("PORT"));
    }

    #[test]
    fn test_prefixed_mode_without_markers_has_no_references() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "PORT=8080\n");

        let source = load_source(&path, SourceMode::Prefixed).unwrap();

        assert!(source.references.is_empty());
        assert_eq!(source.base.get("PORT").unwrap(), "8080");
    }

    #[test]
    fn test_empty_reference_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "DB_PASS=keyvault://\n");

        let err = load_source(&path, SourceMode::Prefixed).unwrap_err();

        assert!(matches!(err, Error::EnvFile { .. }));
    }

    #[test]
    fn test_references_mode_rejects_empty_value() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "DB_PASS=\n");

        assert!(load_source(&path, SourceMode::References).is_err());
    }
}
