//! Static per-field metadata consumed by the walker.
//!
//! The derive macro emits one [`FieldDescriptor`] per field in declaration
//! order. Hand-written [`CascadeConfig`](crate::CascadeConfig)
//! implementations build the same descriptors with the `const` builder
//! methods below.

use crate::path::NamePath;

/// Structural category of a field type.
///
/// The walker uses the shape to decide whether the environment is consulted,
/// whether an `Option` is allocated before recursion, and whether an empty
/// collection is probed for elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Leaf value populated by coercion only.
    Scalar,
    /// Nested record walked field by field.
    Record,
    /// `Option` wrapping a record; allocated on demand.
    OptionalRecord,
    /// `Vec` of values; record elements are walked or probed.
    Collection,
}

impl Shape {
    /// Returns `true` for records and optional records.
    #[must_use]
    pub const fn is_record(self) -> bool {
        matches!(self, Self::Record | Self::OptionalRecord)
    }
}

/// Per-source key overrides for a single field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOverrides {
    remote: Option<&'static str>,
    env: Option<&'static str>,
    secret: Option<&'static str>,
}

/// Metadata describing how one field is resolved.
///
/// # Examples
///
/// ```
/// use cascade_config::{FieldDescriptor, NamePath};
///
/// const HOST: FieldDescriptor = FieldDescriptor::new("host", "host")
///     .with_default("localhost")
///     .env("DB_HOST");
///
/// let path = NamePath::root("app");
/// assert_eq!(HOST.env_key(&path), "DB_HOST");
/// assert_eq!(HOST.remote_key(&path), "APP_HOST");
/// assert_eq!(HOST.secret_key(&path), "app_host");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    segment: &'static str,
    default: Option<&'static str>,
    keys: KeyOverrides,
    required: bool,
    flatten: bool,
}

impl FieldDescriptor {
    /// Describe the field `name`, contributing `segment` to descendant paths.
    #[must_use]
    pub const fn new(name: &'static str, segment: &'static str) -> Self {
        Self {
            name,
            segment,
            default: None,
            keys: KeyOverrides {
                remote: None,
                env: None,
                secret: None,
            },
            required: false,
            flatten: false,
        }
    }

    /// Fixed literal used when no other source supplies a value.
    #[must_use]
    pub const fn with_default(mut self, literal: &'static str) -> Self {
        self.default = Some(literal);
        self
    }

    /// Fail the load when the field is still blank after every source.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Walk a nested record without adding this field's segment to the path.
    #[must_use]
    pub const fn flatten(mut self) -> Self {
        self.flatten = true;
        self
    }

    /// Look the field up under `key` in the remote parameter map.
    #[must_use]
    pub const fn remote(mut self, key: &'static str) -> Self {
        self.keys.remote = Some(key);
        self
    }

    /// Look the field up under the environment variable `key`.
    #[must_use]
    pub const fn env(mut self, key: &'static str) -> Self {
        self.keys.env = Some(key);
        self
    }

    /// Read the field from the secret file named `key`.
    #[must_use]
    pub const fn secret(mut self, key: &'static str) -> Self {
        self.keys.secret = Some(key);
        self
    }

    /// Rust name of the field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Name segment contributed to lookup keys.
    #[must_use]
    pub const fn segment(&self) -> &'static str {
        self.segment
    }

    /// Default literal, if any.
    #[must_use]
    pub const fn default_literal(&self) -> Option<&'static str> {
        self.default
    }

    /// Whether a blank field without any source value is an error.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the field shares its parent's key namespace.
    #[must_use]
    pub const fn is_flattened(&self) -> bool {
        self.flatten
    }

    /// Key override table.
    #[must_use]
    pub const fn overrides(&self) -> KeyOverrides {
        self.keys
    }

    /// Remote parameter key for this field under `path`.
    #[must_use]
    pub fn remote_key(&self, path: &NamePath) -> String {
        self.keys
            .remote
            .map_or_else(|| path.upper_key(self.segment), str::to_owned)
    }

    /// Environment variable name for this field under `path`.
    #[must_use]
    pub fn env_key(&self, path: &NamePath) -> String {
        self.keys
            .env
            .map_or_else(|| path.upper_key(self.segment), str::to_owned)
    }

    /// Secret file name for this field under `path`.
    #[must_use]
    pub fn secret_key(&self, path: &NamePath) -> String {
        self.keys
            .secret
            .map_or_else(|| path.lower_key(self.segment), str::to_owned)
    }

    /// Path handed to this field's children.
    #[must_use]
    pub fn child_path(&self, path: &NamePath) -> NamePath {
        if self.flatten {
            path.clone()
        } else {
            path.join(self.segment)
        }
    }
}

impl KeyOverrides {
    /// Remote parameter override.
    #[must_use]
    pub const fn remote(&self) -> Option<&'static str> {
        self.remote
    }

    /// Environment variable override.
    #[must_use]
    pub const fn env(&self) -> Option<&'static str> {
        self.env
    }

    /// Secret file override.
    #[must_use]
    pub const fn secret(&self) -> Option<&'static str> {
        self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldDescriptor, Shape};
    use crate::path::NamePath;
    use rstest::rstest;

    const PLAIN: FieldDescriptor = FieldDescriptor::new("max_conns", "max_conns");

    #[test]
    fn derives_keys_from_path() {
        let path = NamePath::default().join("database");
        assert_eq!(PLAIN.remote_key(&path), "DATABASE_MAX_CONNS");
        assert_eq!(PLAIN.env_key(&path), "DATABASE_MAX_CONNS");
        assert_eq!(PLAIN.secret_key(&path), "database_max_conns");
    }

    #[test]
    fn overrides_ignore_path() {
        let descriptor = PLAIN.remote("POOL").env("POOL_SIZE").secret("pool");
        let path = NamePath::default().join("database");
        assert_eq!(descriptor.remote_key(&path), "POOL");
        assert_eq!(descriptor.env_key(&path), "POOL_SIZE");
        assert_eq!(descriptor.secret_key(&path), "pool");
    }

    #[rstest]
    #[case(PLAIN, &["database", "max_conns"])]
    #[case(PLAIN.flatten(), &["database"])]
    fn child_path_respects_flatten(#[case] descriptor: FieldDescriptor, #[case] expected: &[&str]) {
        let path = NamePath::default().join("database");
        assert_eq!(descriptor.child_path(&path).segments(), expected);
    }

    #[rstest]
    #[case(Shape::Scalar, false)]
    #[case(Shape::Record, true)]
    #[case(Shape::OptionalRecord, true)]
    #[case(Shape::Collection, false)]
    fn record_shapes(#[case] shape: Shape, #[case] expected: bool) {
        assert_eq!(shape.is_record(), expected);
    }
}
