//! Environment variable lookups.

use std::collections::BTreeMap;

/// Where environment variables are read from.
///
/// Empty values are treated exactly like unset variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// The live process environment.
    Process,
    /// A fixed set of variables, isolating a load from the process.
    Snapshot(BTreeMap<String, String>),
}

impl Environment {
    /// Look up `key`, returning `None` for unset or empty variables.
    ///
    /// Variables that are not valid Unicode are treated as unset.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(key).ok(),
            Self::Snapshot(vars) => vars.get(key).cloned(),
        }
        .filter(|value| !value.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Snapshot(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
