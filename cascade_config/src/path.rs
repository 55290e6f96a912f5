//! Name paths and the lookup keys derived from them.
//!
//! A [`NamePath`] records the snake-case segments from the root record down
//! to the record currently being walked. Collection elements contribute their
//! decimal index as a segment. Keys are rendered per source: upper-case for
//! environment variables and remote parameters, lower-case for secret files.

use std::fmt;

/// Ordered name segments from the root record to the current record.
///
/// Paths are extended by value; every recursive step receives its own copy so
/// siblings never observe each other's segments.
///
/// # Examples
///
/// ```
/// use cascade_config::NamePath;
///
/// let path = NamePath::default().join("database").index(1);
/// assert_eq!(path.upper_key("host"), "DATABASE_1_HOST");
/// assert_eq!(path.lower_key("host"), "database_1_host");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePath {
    segments: Vec<String>,
}

impl NamePath {
    /// Start a path at `prefix`, or an empty path when `prefix` is empty.
    #[must_use]
    pub fn root(prefix: &str) -> Self {
        let prefix = crate::normalize_prefix(prefix);
        if prefix.is_empty() {
            Self::default()
        } else {
            Self {
                segments: vec![prefix],
            }
        }
    }

    /// Return a copy of this path extended by `segment`.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_owned());
        Self { segments }
    }

    /// Return a copy of this path extended by a collection index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.join(&index.to_string())
    }

    /// Segments collected so far.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns `true` when no segment has been pushed yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Key for `leaf` as used by environment variables and remote parameters.
    #[must_use]
    pub fn upper_key(&self, leaf: &str) -> String {
        self.lower_key(leaf).to_uppercase()
    }

    /// Key for `leaf` as used by secret file names.
    #[must_use]
    pub fn lower_key(&self, leaf: &str) -> String {
        self.segments
            .iter()
            .map(String::as_str)
            .chain((!leaf.is_empty()).then_some(leaf))
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
