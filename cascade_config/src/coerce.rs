//! Conversion of winning source strings into typed field values.
//!
//! Booleans use a small token table, strings are taken verbatim, and every
//! other type goes through a structured YAML decode so numbers, inline lists
//! and inline maps share one parser.

use serde::de::DeserializeOwned;
use serde_saphyr::Options;

use crate::error::CoerceError;

/// Interpret `raw` as a boolean.
///
/// `""`, `"0"`, `"f"` and `"false"` (in any case) are false; every other
/// value is true.
///
/// # Examples
///
/// ```
/// use cascade_config::coerce::boolean;
///
/// assert!(!boolean("FALSE"));
/// assert!(!boolean("0"));
/// assert!(boolean("yes"));
/// ```
#[must_use]
pub fn boolean(raw: &str) -> bool {
    !matches!(raw.to_lowercase().as_str(), "" | "0" | "f" | "false")
}

/// Decode `raw` into `T` using YAML syntax.
///
/// # Errors
///
/// Returns [`CoerceError::Decode`] when `raw` does not parse as `T`.
///
/// # Examples
///
/// ```
/// use cascade_config::coerce::structured;
///
/// let retries: u32 = structured("3")?;
/// let hosts: Vec<String> = structured("[a, b]")?;
/// assert_eq!(retries, 3);
/// assert_eq!(hosts, ["a", "b"]);
/// # Ok::<(), cascade_config::CoerceError>(())
/// ```
pub fn structured<T: DeserializeOwned>(raw: &str) -> Result<T, CoerceError> {
    serde_saphyr::from_str_with_options(raw, Options::default()).map_err(CoerceError::decode::<T>)
}
