//! Constructors for `CascadeError` used by the walker and sources.

use crate::descriptor::FieldDescriptor;
use crate::path::NamePath;
use crate::resolve::Origin;

use super::{CascadeError, CoerceError};

impl CascadeError {
    /// Build a [`CascadeError::RequiredFieldMissing`] for `descriptor` at
    /// `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cascade_config::{CascadeError, FieldDescriptor, NamePath};
    ///
    /// let descriptor = FieldDescriptor::new("port", "port").required();
    /// let err = CascadeError::required(&descriptor, &NamePath::root("db"));
    /// assert_eq!(err.to_string(), "port is required (looked up as 'DB_PORT')");
    /// ```
    #[must_use]
    pub fn required(descriptor: &FieldDescriptor, path: &NamePath) -> Self {
        Self::RequiredFieldMissing {
            field: descriptor.name().to_owned(),
            key: descriptor.env_key(path),
        }
    }

    /// Wrap a coercion failure with the field and origin it came from.
    #[must_use]
    pub fn coercion(descriptor: &FieldDescriptor, origin: Origin, source: CoerceError) -> Self {
        Self::Coercion {
            field: descriptor.name().to_owned(),
            origin,
            source,
        }
    }

    /// Build a [`CascadeError::InvalidTarget`].
    #[must_use]
    pub fn invalid_target(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Returns the Rust field name when the error concerns a single field.
    #[must_use]
    pub const fn field(&self) -> Option<&str> {
        match self {
            Self::RequiredFieldMissing { field, .. } | Self::Coercion { field, .. } => {
                Some(field.as_str())
            }
            _ => None,
        }
    }
}

impl CoerceError {
    /// Wrap a structured decode failure for type `T`.
    pub(crate) fn decode<T>(source: serde_saphyr::Error) -> Self {
        Self::Decode {
            type_name: std::any::type_name::<T>(),
            source: Box::new(source),
        }
    }
}
