//! Secret files read from a directory, one value per file.
//!
//! Reads go through a `cap-std` directory handle, so a key can never reach
//! outside the configured directory.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::error::{CascadeError, CascadeResult};

/// How unreadable secret files are handled.
///
/// A missing file is always "no value". This policy only governs other
/// failures such as permission errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecretReadPolicy {
    /// Log the failure and treat the secret as absent.
    #[default]
    Lenient,
    /// Abort the load with [`CascadeError::SourceRead`].
    Strict,
}

/// A directory of secret files such as `/run/secrets`.
#[derive(Debug)]
pub struct SecretStore {
    root: Utf8PathBuf,
    dir: Option<Dir>,
    policy: SecretReadPolicy,
}

impl SecretStore {
    /// Open `root` with the lenient read policy.
    ///
    /// A missing directory yields a store that never finds anything.
    ///
    /// # Errors
    ///
    /// Never fails under the lenient policy; see [`Self::open_with_policy`].
    pub fn open(root: impl Into<Utf8PathBuf>) -> CascadeResult<Self> {
        Self::open_with_policy(root, SecretReadPolicy::Lenient)
    }

    /// Open `root`, applying `policy` to the directory and every later read.
    ///
    /// # Errors
    ///
    /// Under [`SecretReadPolicy::Strict`], returns
    /// [`CascadeError::SourceRead`] when the directory exists but cannot be
    /// opened.
    pub fn open_with_policy(
        root: impl Into<Utf8PathBuf>,
        policy: SecretReadPolicy,
    ) -> CascadeResult<Self> {
        let path = root.into();
        let dir = match Dir::open_ambient_dir(&path, ambient_authority()) {
            Ok(dir) => Some(dir),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(dir = %path, "secret directory not present");
                None
            }
            Err(err) => {
                Self::soft_fail(policy, path.as_str(), err)?;
                None
            }
        };
        Ok(Self {
            root: path,
            dir,
            policy,
        })
    }

    /// Directory the store reads from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Read policy in effect.
    #[must_use]
    pub const fn policy(&self) -> SecretReadPolicy {
        self.policy
    }

    /// Read the secret named `key`, trimmed of surrounding whitespace.
    ///
    /// Missing files and files that are empty after trimming yield `None`.
    ///
    /// # Errors
    ///
    /// Under [`SecretReadPolicy::Strict`], returns
    /// [`CascadeError::SourceRead`] for failures other than a missing file.
    pub fn read(&self, key: &str) -> CascadeResult<Option<String>> {
        let Some(dir) = &self.dir else {
            return Ok(None);
        };
        match dir.read_to_string(key) {
            Ok(contents) => {
                let trimmed = contents.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_owned()))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Self::soft_fail(self.policy, key, err)?;
                Ok(None)
            }
        }
    }

    fn soft_fail(policy: SecretReadPolicy, key: &str, err: io::Error) -> CascadeResult<()> {
        match policy {
            SecretReadPolicy::Lenient => {
                tracing::error!(key, error = %err, "read secret file error");
                Ok(())
            }
            SecretReadPolicy::Strict => Err(CascadeError::SourceRead {
                key: key.to_owned(),
                source: err,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SecretReadPolicy, SecretStore};
    use crate::error::CascadeError;
    use anyhow::{Result, anyhow, ensure};
    use rstest::{fixture, rstest};
    use test_helpers::secrets::SecretDir;

    #[fixture]
    fn secret_dir() -> Result<SecretDir> {
        let dir = SecretDir::with_files(&[("db_password", "  hunter2\n"), ("blank", " \n\t")])?;
        dir.write_unreadable("a_directory")?;
        Ok(dir)
    }

    #[rstest]
    fn reads_and_trims(secret_dir: Result<SecretDir>) -> Result<()> {
        let dir = secret_dir?;
        let store = SecretStore::open(dir.path()).map_err(|err| anyhow!(err))?;
        let value = store.read("db_password").map_err(|err| anyhow!(err))?;
        ensure!(value.as_deref() == Some("hunter2"), "unexpected value {value:?}");
        Ok(())
    }

    #[rstest]
    #[case("missing")]
    #[case("blank")]
    #[case("a_directory")]
    fn lenient_reads_yield_none(
        secret_dir: Result<SecretDir>,
        #[case] key: &str,
    ) -> Result<()> {
        let dir = secret_dir?;
        let store = SecretStore::open(dir.path()).map_err(|err| anyhow!(err))?;
        let value = store.read(key).map_err(|err| anyhow!(err))?;
        ensure!(value.is_none(), "{key} produced {value:?}");
        Ok(())
    }

    #[rstest]
    fn strict_policy_surfaces_read_errors(
        secret_dir: Result<SecretDir>,
    ) -> Result<()> {
        let dir = secret_dir?;
        let store = SecretStore::open_with_policy(dir.path(), SecretReadPolicy::Strict)
            .map_err(|err| anyhow!(err))?;
        ensure!(
            store.read("missing").map_err(|err| anyhow!(err))?.is_none(),
            "missing file should still be absent"
        );
        match store.read("a_directory") {
            Err(CascadeError::SourceRead { key, .. }) => {
                ensure!(key == "a_directory", "unexpected key {key}");
                Ok(())
            }
            other => Err(anyhow!("expected SourceRead, got {other:?}")),
        }
    }

    #[test]
    fn missing_directory_is_empty() -> Result<()> {
        let store = SecretStore::open_with_policy(
            "/nonexistent/cascade-config/secrets",
            SecretReadPolicy::Strict,
        )
        .map_err(|err| anyhow!(err))?;
        ensure!(
            store.read("anything").map_err(|err| anyhow!(err))?.is_none(),
            "missing directory produced a value"
        );
        Ok(())
    }
}
