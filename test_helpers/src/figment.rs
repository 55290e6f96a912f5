//! Helpers for running scenarios inside a `figment::Jail`.
//!
//! A jail gives the closure a private working directory and restores every
//! environment variable it touched once the closure returns.

use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Write `files` into a `secrets` directory inside the jail and return its
/// absolute path.
///
/// # Errors
///
/// Returns an error if a file cannot be written or the jail directory is
/// not valid UTF-8.
pub fn jail_secrets(jail: &figment::Jail, files: &[(&str, &str)]) -> Result<Utf8PathBuf> {
    let root = Utf8PathBuf::from_path_buf(jail.directory().join("secrets"))
        .map_err(|path| anyhow!("jail dir is not UTF-8: {}", path.display()))?;
    std::fs::create_dir_all(&root).with_context(|| format!("create {root}"))?;
    for (name, contents) in files {
        std::fs::write(root.join(name), contents).with_context(|| format!("write secret {name}"))?;
    }
    Ok(root)
}

/// Converts any displayable error into a [`figment::Error`].
#[must_use]
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a `map_err` adapter over owned errors"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
