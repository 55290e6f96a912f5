//! Temporary secret directories for tests.
//!
//! A [`SecretDir`] owns a fresh temporary directory laid out like
//! `/run/secrets`: one file per secret, named by its lookup key.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory of secret files, removed on drop.
///
/// # Examples
///
/// ```
/// use test_helpers::secrets::SecretDir;
///
/// let dir = SecretDir::with_files(&[("db_password", "hunter2\n")])?;
/// let contents = std::fs::read_to_string(dir.path().join("db_password"))?;
/// assert_eq!(contents, "hunter2\n");
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct SecretDir {
    _temp: TempDir,
    path: Utf8PathBuf,
}

impl SecretDir {
    /// Create an empty secret directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create secret dir")?;
        let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("secret dir is not UTF-8: {}", path.display()))?;
        Ok(Self { _temp: temp, path })
    }

    /// Create a secret directory holding `files` as `(name, contents)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or any file cannot be written.
    pub fn with_files(files: &[(&str, &str)]) -> Result<Self> {
        let dir = Self::new()?;
        for (name, contents) in files {
            dir.write(name, contents)?;
        }
        Ok(dir)
    }

    /// Write the secret `name` with `contents`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<()> {
        std::fs::write(self.path.join(name), contents)
            .with_context(|| format!("write secret {name}"))
    }

    /// Create a directory named `name`, which reads as an unreadable secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn write_unreadable(&self, name: &str) -> Result<()> {
        std::fs::create_dir(self.path.join(name)).with_context(|| format!("create {name}"))
    }

    /// Location of the directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}
