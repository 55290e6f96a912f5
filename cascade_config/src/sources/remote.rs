//! Pre-fetched remote parameters.
//!
//! The resolver never talks to a parameter store itself. A
//! [`ParameterStore`] client is paged through once, before resolution, and
//! the results are kept in a [`RemoteParams`] map keyed by the parameter name
//! with the requested path prefix removed.

use std::collections::BTreeMap;
use std::error::Error;

use crate::error::{CascadeError, CascadeResult};

/// A single parameter returned by a store.
///
/// Stores may omit either half; such entries are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    /// Fully-qualified parameter name, including the path prefix.
    pub name: Option<String>,
    /// Decrypted parameter value.
    pub value: Option<String>,
}

impl Parameter {
    /// Convenience constructor for a complete parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPage {
    /// Parameters on this page.
    pub parameters: Vec<Parameter>,
    /// Token for the next page, absent on the last page.
    pub next_token: Option<String>,
}

/// Client for a hierarchical parameter store.
///
/// Implementations own transport, credentials, decryption and retries; the
/// resolver only pages through the results.
pub trait ParameterStore {
    /// List the parameters stored under `path`, continuing from `next_token`.
    ///
    /// # Errors
    ///
    /// Returns any client error; it aborts [`RemoteParams::fetch`].
    fn parameters_by_path(
        &self,
        path: &str,
        next_token: Option<&str>,
    ) -> Result<ParameterPage, Box<dyn Error + Send + Sync>>;
}

/// Read-only map of remote parameter keys to values.
///
/// # Examples
///
/// ```
/// use cascade_config::RemoteParams;
///
/// let params: RemoteParams = [("DB_HOST", "db.internal")].into_iter().collect();
/// assert_eq!(params.get("DB_HOST"), Some("db.internal"));
/// assert_eq!(params.get("DB_PORT"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteParams {
    values: BTreeMap<String, String>,
}

impl RemoteParams {
    /// Page through every parameter under `path` and strip `path/` from each
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::RemoteFetch`] when the store fails on any page.
    pub fn fetch<S>(store: &S, path: &str) -> CascadeResult<Self>
    where
        S: ParameterStore + ?Sized,
    {
        let prefix = format!("{path}/");
        let mut params = Self::default();
        let mut token: Option<String> = None;
        loop {
            let page = store
                .parameters_by_path(path, token.as_deref())
                .map_err(|source| CascadeError::RemoteFetch {
                    path: path.to_owned(),
                    source,
                })?;
            for parameter in page.parameters {
                let (Some(name), Some(value)) = (parameter.name, parameter.value) else {
                    continue;
                };
                let key = name.strip_prefix(&prefix).unwrap_or(&name).to_owned();
                params.values.insert(key, value);
            }
            token = page.next_token;
            if token.is_none() {
                break;
            }
        }
        tracing::debug!(path, count = params.len(), "fetched remote parameters");
        Ok(params)
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Insert or replace a value before the map is handed to a loader.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Number of stored parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no parameter was fetched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RemoteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
