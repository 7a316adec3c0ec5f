//! Secret references and the set of them resolved in one run

use crate::constants::{SECRET_REFERENCE_PREFIX, SECRET_VERSION_SEPARATOR};
use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// A secret stored in the vault, addressed by name and optionally pinned to a version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretReference {
    name: String,
    version: Option<String>,
}

impl SecretReference {
    /// Reference the latest version of a secret
    #[must_use]
    pub fn latest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Reference a specific version of a secret
    #[must_use]
    pub fn pinned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// Parse `name` or `name/version`
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (name, version) = match raw.split_once(SECRET_VERSION_SEPARATOR) {
            Some((name, version)) => (name, Some(version)),
            None => (raw, None),
        };

        if name.is_empty() {
            return Err(Error::configuration(format!(
                "invalid secret reference '{raw}': secret name is empty"
            )));
        }

        match version {
            Some("") => Err(Error::configuration(format!(
                "invalid secret reference '{raw}': version is empty"
            ))),
            Some(version) => Ok(Self::pinned(name, version)),
            None => Ok(Self::latest(name)),
        }
    }

    /// Strip the reference marker from a value, if present
    #[must_use]
    pub fn strip_marker(value: &str) -> Option<&str> {
        value.strip_prefix(SECRET_REFERENCE_PREFIX)
    }

    /// Check if a value carries the reference marker
    #[must_use]
    pub fn is_secret_reference(value: &str) -> bool {
        value.starts_with(SECRET_REFERENCE_PREFIX)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl fmt::Display for SecretReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}{}{}", self.name, SECRET_VERSION_SEPARATOR, version),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Mapping from local environment key to the secret it should be filled from
///
/// Keys are unique, so every resolution unit owns exactly one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet(HashMap<String, SecretReference>);

impl ReferenceSet {
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Insert a reference, returning the previous one for the key if any
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        reference: SecretReference,
    ) -> Option<SecretReference> {
        self.0.insert(key.into(), reference)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SecretReference> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, String, SecretReference> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, SecretReference)> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = (String, SecretReference)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ReferenceSet {
    type Item = (String, SecretReference);
    type IntoIter = std::collections::hash_map::IntoIter<String, SecretReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
