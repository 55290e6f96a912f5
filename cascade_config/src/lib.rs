//! Layered configuration loading for nested Rust records.
//!
//! A record deriving [`CascadeConfig`] is populated field by field from, in
//! increasing precedence: default literals, a pre-fetched remote parameter
//! map, the process environment, and a directory of secret files. Nested
//! records are walked recursively and empty collections of records grow by
//! probing indexed keys until a source runs dry.
//!
//! ```no_run
//! use cascade_config::CascadeConfig;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, PartialEq, Deserialize, CascadeConfig)]
//! struct Database {
//!     #[cascade_config(env = "DB_HOST", default = "localhost")]
//!     host: String,
//!     #[cascade_config(required)]
//!     port: u16,
//! }
//!
//! let db = Database::load()?;
//! println!("{}:{}", db.host, db.port);
//! # Ok::<(), cascade_config::CascadeError>(())
//! ```

pub use cascade_config_macros::CascadeConfig;

mod basic;
pub mod coerce;
mod descriptor;
mod error;
mod expand;
mod path;
mod resolve;
mod sources;
mod value;
mod walk;

pub use basic::{Basic, ENV_LOCAL, ENV_PRODUCTION, ENV_TESTNET_DEV, ENV_TESTNET_PROD};
pub use descriptor::{FieldDescriptor, KeyOverrides, Shape};
pub use error::{CascadeError, CascadeResult, CoerceError};
pub use path::NamePath;
pub use resolve::{Origin, Resolved};
pub use sources::{
    Environment, Parameter, ParameterPage, ParameterStore, RemoteParams, SecretReadPolicy,
    SecretStore, Sources,
};
pub use value::FieldValue;
pub use walk::{DEFAULT_PROBE_LIMIT, Loader};

use camino::Utf8Path;

/// Items referenced by `#[derive(CascadeConfig)]` output. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use serde::de::DeserializeOwned;
}

/// Secret directory consulted by [`load`].
pub const DEFAULT_SECRET_DIR: &str = "/run/secrets";

/// Normalize a prefix by trimming trailing underscores and converting
/// to lowercase ASCII.
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    prefix.trim_end_matches('_').to_ascii_lowercase()
}

/// A record whose fields can be populated by a [`Loader`].
///
/// Normally derived. A hand-written implementation calls
/// [`Loader::field`] once per field with a [`FieldDescriptor`]; it must also
/// implement [`FieldValue`] so the record can be nested inside others.
///
/// ```
/// use cascade_config::{
///     CascadeConfig, CascadeResult, CoerceError, Environment, FieldDescriptor, FieldValue,
///     Loader, NamePath, Shape, Sources,
/// };
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, PartialEq, Deserialize)]
/// struct Limits {
///     burst: u32,
/// }
///
/// const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new("burst", "burst")];
///
/// impl FieldValue for Limits {
///     const SHAPE: Shape = Shape::Record;
///
///     fn coerce(raw: &str) -> Result<Self, CoerceError> {
///         cascade_config::coerce::structured(raw)
///     }
///
///     fn walk(&mut self, loader: &Loader<'_>, path: &NamePath) -> CascadeResult<()> {
///         self.walk_fields(loader, path)
///     }
/// }
///
/// impl CascadeConfig for Limits {
///     fn walk_fields(&mut self, loader: &Loader<'_>, path: &NamePath) -> CascadeResult<()> {
///         loader.field(&mut self.burst, &FIELDS[0], path)
///     }
///
///     fn fields() -> &'static [FieldDescriptor] {
///         FIELDS
///     }
/// }
///
/// let env: Environment = [("BURST", "20")].into_iter().collect();
/// let mut limits = Limits::default();
/// Loader::new(Sources::new().with_env(env)).load(&mut limits)?;
/// assert_eq!(limits.burst, 20);
/// # Ok::<(), cascade_config::CascadeError>(())
/// ```
pub trait CascadeConfig: FieldValue + serde::de::DeserializeOwned {
    /// Populate each field of `self`, which lives at `path`.
    ///
    /// # Errors
    ///
    /// Returns the first [`CascadeError`] raised by a field.
    fn walk_fields(&mut self, loader: &Loader<'_>, path: &NamePath) -> CascadeResult<()>;

    /// Descriptor table in field declaration order.
    #[must_use]
    fn fields() -> &'static [FieldDescriptor];

    /// Root name segment for top-level loads.
    #[must_use]
    fn prefix() -> &'static str {
        ""
    }

    /// Build a fresh value from field defaults, the process environment and
    /// [`DEFAULT_SECRET_DIR`].
    ///
    /// # Errors
    ///
    /// Returns a [`CascadeError`] if any field fails to resolve.
    fn load() -> CascadeResult<Self> {
        let mut config = Self::default();
        load(&mut config)?;
        Ok(config)
    }
}

/// Populate `target` from the environment and [`DEFAULT_SECRET_DIR`].
///
/// # Errors
///
/// Returns a [`CascadeError`] if any field fails to resolve.
pub fn load<T: CascadeConfig>(target: &mut T) -> CascadeResult<()> {
    load_env_and_secret(target, DEFAULT_SECRET_DIR)
}

/// Populate `target` from the environment and the secret files in
/// `secret_dir`.
///
/// # Errors
///
/// Returns a [`CascadeError`] if any field fails to resolve.
pub fn load_env_and_secret<T: CascadeConfig>(
    target: &mut T,
    secret_dir: impl AsRef<Utf8Path>,
) -> CascadeResult<()> {
    let sources = Sources::new()
        .with_env(Environment::Process)
        .with_secrets(SecretStore::open(secret_dir.as_ref())?);
    Loader::new(sources).load(target)
}

/// Populate `target` from field defaults and the environment only.
///
/// # Errors
///
/// Returns a [`CascadeError`] if any field fails to resolve.
pub fn load_env<T: CascadeConfig>(target: &mut T) -> CascadeResult<()> {
    Loader::new(Sources::new().with_env(Environment::Process)).load(target)
}

/// Populate `target` from `remote`, the environment and the secret files in
/// `secret_dir`.
///
/// # Errors
///
/// Returns a [`CascadeError`] if any field fails to resolve.
pub fn load_with_remote<T: CascadeConfig>(
    target: &mut T,
    secret_dir: impl AsRef<Utf8Path>,
    remote: &RemoteParams,
) -> CascadeResult<()> {
    let sources = Sources::new()
        .with_remote(remote)
        .with_env(Environment::Process)
        .with_secrets(SecretStore::open(secret_dir.as_ref())?);
    Loader::new(sources).load(target)
}

/// Fetch every parameter under `path` from `store`, then behave like
/// [`load_with_remote`].
///
/// # Errors
///
/// Returns [`CascadeError::RemoteFetch`] if the store fails, or any error
/// raised while resolving fields.
pub fn load_with_param_store<T, S>(
    target: &mut T,
    secret_dir: impl AsRef<Utf8Path>,
    store: &S,
    path: &str,
) -> CascadeResult<()>
where
    T: CascadeConfig,
    S: ParameterStore + ?Sized,
{
    let remote = RemoteParams::fetch(store, path)?;
    load_with_remote(target, secret_dir, &remote)
}
