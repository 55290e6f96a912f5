//! Source precedence for a single field.
//!
//! Sources are consulted from lowest to highest precedence and each later
//! source replaces the candidate when it produces a non-empty value:
//! default literal, remote parameters, environment, secret file.

use std::fmt;

use crate::descriptor::{FieldDescriptor, Shape};
use crate::error::CascadeResult;
use crate::path::NamePath;
use crate::walk::Loader;

/// Source that supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Origin {
    /// The field's default literal.
    Default,
    /// The pre-fetched remote parameter map.
    Remote,
    /// A process environment variable.
    Env,
    /// A file in the secret directory.
    Secret,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Remote => "remote",
            Self::Env => "env",
            Self::Secret => "secret",
        })
    }
}

/// The winning value for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Non-empty raw value.
    pub value: String,
    /// Source that produced it.
    pub origin: Origin,
}

impl Resolved {
    fn new(raw: impl Into<String>, origin: Origin) -> Option<Self> {
        let value = raw.into();
        (!value.is_empty()).then_some(Self { value, origin })
    }
}

impl Loader<'_> {
    /// Resolve `descriptor` at `path` against every active source.
    ///
    /// `shape` is the field type's shape; records never consult the
    /// environment.
    ///
    /// # Errors
    ///
    /// Only a strict secret store can fail; see
    /// [`SecretStore::read`](crate::SecretStore::read).
    ///
    /// # Examples
    ///
    /// ```
    /// use cascade_config::{Environment, FieldDescriptor, Loader, NamePath, Origin, Shape, Sources};
    ///
    /// let env: Environment = [("APP_PORT", "9000")].into_iter().collect();
    /// let loader = Loader::new(Sources::new().with_env(env));
    /// let port = FieldDescriptor::new("port", "port").with_default("8080");
    ///
    /// let resolved = loader
    ///     .resolve(&port, &NamePath::root("app"), Shape::Scalar)?
    ///     .expect("a value");
    /// assert_eq!((resolved.value.as_str(), resolved.origin), ("9000", Origin::Env));
    /// # Ok::<(), cascade_config::CascadeError>(())
    /// ```
    pub fn resolve(
        &self,
        descriptor: &FieldDescriptor,
        path: &NamePath,
        shape: Shape,
    ) -> CascadeResult<Option<Resolved>> {
        let sources = self.sources();
        let mut winner = None;

        if sources.uses_defaults() {
            winner = descriptor
                .default_literal()
                .and_then(|literal| Resolved::new(literal, Origin::Default));
        }
        if let Some(found) = sources
            .remote()
            .and_then(|remote| remote.get(&descriptor.remote_key(path)))
            .and_then(|value| Resolved::new(value, Origin::Remote))
        {
            winner = Some(found);
        }
        if let Some(found) = sources
            .env()
            .filter(|_| !shape.is_record())
            .and_then(|env| env.get(&descriptor.env_key(path)))
            .and_then(|value| Resolved::new(value, Origin::Env))
        {
            winner = Some(found);
        }
        if let Some(secrets) = sources.secrets()
            && let Some(found) = secrets
                .read(&descriptor.secret_key(path))?
                .and_then(|value| Resolved::new(value, Origin::Secret))
        {
            winner = Some(found);
        }
        Ok(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::{Origin, Resolved};
    use crate::descriptor::{FieldDescriptor, Shape};
    use crate::path::NamePath;
    use crate::sources::{Environment, RemoteParams, SecretStore, Sources};
    use crate::walk::Loader;
    use anyhow::{Context, Result, anyhow, ensure};
    use rstest::rstest;
    use test_helpers::secrets::SecretDir;

    const HOST: FieldDescriptor = FieldDescriptor::new("host", "host").with_default("default-host");

    fn secret_dir(files: &[(&str, &str)]) -> Result<(SecretDir, SecretStore)> {
        let dir = SecretDir::with_files(files)?;
        let store = SecretStore::open(dir.path()).map_err(|err| anyhow!(err))?;
        Ok((dir, store))
    }

    fn resolve(loader: &Loader<'_>, shape: Shape) -> Result<Option<Resolved>> {
        loader
            .resolve(&HOST, &NamePath::root("db"), shape)
            .map_err(|err| anyhow!(err))
    }

    fn expect_origin(found: Option<Resolved>, value: &str, origin: Origin) -> Result<()> {
        let winner = found.context("expected a value")?;
        ensure!(
            winner.value == value && winner.origin == origin,
            "expected {value:?} from {origin}, got {winner:?}"
        );
        Ok(())
    }

    #[rstest]
    #[case(false, false, false, "default-host", Origin::Default)]
    #[case(true, false, false, "remote-host", Origin::Remote)]
    #[case(true, true, false, "env-host", Origin::Env)]
    #[case(true, true, true, "secret-host", Origin::Secret)]
    #[case(false, true, true, "secret-host", Origin::Secret)]
    #[case(true, false, true, "secret-host", Origin::Secret)]
    fn later_sources_win(
        #[case] remote_on: bool,
        #[case] env_on: bool,
        #[case] secret_on: bool,
        #[case] value: &str,
        #[case] origin: Origin,
    ) -> Result<()> {
        let remote: RemoteParams = [("DB_HOST", "remote-host")].into_iter().collect();
        let (_temp, secrets) = secret_dir(&[("db_host", "secret-host\n")])?;
        let mut sources = Sources::new();
        if remote_on {
            sources = sources.with_remote(&remote);
        }
        if env_on {
            sources = sources.with_env([("DB_HOST", "env-host")].into_iter().collect());
        }
        if secret_on {
            sources = sources.with_secrets(secrets);
        }
        let loader = Loader::new(sources);
        expect_origin(resolve(&loader, Shape::Scalar)?, value, origin)
    }

    #[test]
    fn records_skip_environment() -> Result<()> {
        let env: Environment = [("DB_HOST", "env-host")].into_iter().collect();
        let loader = Loader::new(Sources::new().with_env(env));
        expect_origin(resolve(&loader, Shape::Record)?, "default-host", Origin::Default)?;
        expect_origin(
            resolve(&loader, Shape::OptionalRecord)?,
            "default-host",
            Origin::Default,
        )?;
        expect_origin(resolve(&loader, Shape::Collection)?, "env-host", Origin::Env)
    }

    #[test]
    fn empty_values_do_not_override() -> Result<()> {
        let remote: RemoteParams = [("DB_HOST", "")].into_iter().collect();
        let env: Environment = [("DB_HOST", "")].into_iter().collect();
        let (_temp, secrets) = secret_dir(&[("db_host", "   ")])?;
        let loader = Loader::new(
            Sources::new()
                .with_remote(&remote)
                .with_env(env)
                .with_secrets(secrets),
        );
        expect_origin(resolve(&loader, Shape::Scalar)?, "default-host", Origin::Default)
    }

    #[test]
    fn empty_remote_entry_keeps_default() -> Result<()> {
        let remote: RemoteParams = [("DB_HOST", "")].into_iter().collect();
        let loader = Loader::new(Sources::new().with_remote(&remote));
        expect_origin(resolve(&loader, Shape::Scalar)?, "default-host", Origin::Default)
    }

    #[test]
    fn nothing_found_is_not_an_error() -> Result<()> {
        let loader = Loader::new(Sources::new().defaults(false).with_env(Environment::Snapshot(
            std::collections::BTreeMap::new(),
        )));
        ensure!(resolve(&loader, Shape::Scalar)?.is_none(), "unexpected value");
        Ok(())
    }

    #[test]
    fn overrides_replace_derived_keys() -> Result<()> {
        let descriptor = FieldDescriptor::new("host", "host")
            .remote("database/host")
            .env("PGHOST")
            .secret("pg-host");
        let remote: RemoteParams = [("database/host", "remote")].into_iter().collect();
        let env: Environment = [("PGHOST", "env")].into_iter().collect();
        let loader = Loader::new(Sources::new().with_remote(&remote).with_env(env));
        let found = loader
            .resolve(&descriptor, &NamePath::root("db"), Shape::Scalar)
            .map_err(|err| anyhow!(err))?;
        expect_origin(found, "env", Origin::Env)
    }
}
