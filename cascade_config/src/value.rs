//! Per-type behaviour the walker relies on.
//!
//! [`FieldValue`] ties a Rust type to its [`Shape`], its coercion rule, and
//! the way its children are walked. The crate implements it for scalars,
//! `String`, `bool`, `Option`, `Vec` and string-keyed maps; records get an
//! implementation from `#[derive(CascadeConfig)]`, and other
//! deserialisable types can opt in with [`structured_field!`](crate::structured_field).

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::de::DeserializeOwned;

use crate::coerce;
use crate::descriptor::Shape;
use crate::error::{CascadeResult, CoerceError};
use crate::expand;
use crate::path::NamePath;
use crate::walk::Loader;

/// A type that can occupy a field of a configuration record.
///
/// `Default::default()` must be the type's blank value: the walker only
/// assigns to fields equal to it, and collection probing stops at the first
/// element that resolves to it.
pub trait FieldValue: Default + PartialEq + Sized {
    /// Structural category of the type.
    const SHAPE: Shape;

    /// Convert a non-empty source string into a value.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] when `raw` does not parse as `Self`.
    fn coerce(raw: &str) -> Result<Self, CoerceError>;

    /// Populate the children of this value, which live at `path`.
    ///
    /// Leaf values have no children, so the default does nothing.
    ///
    /// # Errors
    ///
    /// Propagates any error raised while walking nested records.
    fn walk(&mut self, loader: &Loader<'_>, path: &NamePath) -> CascadeResult<()> {
        let _ = (loader, path);
        Ok(())
    }

    /// Returns `true` when the value equals its blank default.
    fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

impl FieldValue for bool {
    const SHAPE: Shape = Shape::Scalar;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(coerce::boolean(raw))
    }
}

impl FieldValue for String {
    const SHAPE: Shape = Shape::Scalar;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_owned())
    }
}

/// Implement [`FieldValue`] for types populated by structured decode.
///
/// The type must implement `Default`, `PartialEq` and
/// `serde::de::DeserializeOwned`; its `Default` is treated as blank.
///
/// # Examples
///
/// ```
/// use cascade_config::{FieldValue, structured_field};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, PartialEq, Deserialize)]
/// #[serde(rename_all = "lowercase")]
/// enum Level {
///     #[default]
///     Info,
///     Debug,
/// }
///
/// structured_field!(Level);
///
/// assert_eq!(Level::coerce("debug")?, Level::Debug);
/// # Ok::<(), cascade_config::CoerceError>(())
/// ```
#[macro_export]
macro_rules! structured_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FieldValue for $ty {
                const SHAPE: $crate::Shape = $crate::Shape::Scalar;

                fn coerce(raw: &str) -> ::core::result::Result<Self, $crate::CoerceError> {
                    $crate::coerce::structured(raw)
                }
            }
        )+
    };
}

structured_field!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, char, PathBuf,
    Utf8PathBuf,
);

impl<T: FieldValue> FieldValue for Option<T> {
    const SHAPE: Shape = match T::SHAPE {
        Shape::Record | Shape::OptionalRecord => Shape::OptionalRecord,
        other => other,
    };

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        T::coerce(raw).map(Some)
    }

    /// Allocates an empty record so it can be walked, then drops it again if
    /// nothing populated it.
    fn walk(&mut self, loader: &Loader<'_>, path: &NamePath) -> CascadeResult<()> {
        if !T::SHAPE.is_record() {
            return self
                .as_mut()
                .map_or(Ok(()), |inner| inner.walk(loader, path));
        }
        let preset = self.is_some();
        let mut inner = self.take().unwrap_or_default();
        inner.walk(loader, path)?;
        if preset || !inner.is_blank() {
            *self = Some(inner);
        }
        Ok(())
    }
}

impl<T: FieldValue + DeserializeOwned> FieldValue for Vec<T> {
    const SHAPE: Shape = Shape::Collection;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        coerce::structured(raw)
    }

    fn walk(&mut self, loader: &Loader<'_>, path: &NamePath) -> CascadeResult<()> {
        if self.is_empty() {
            expand::probe(self, loader, path)
        } else {
            expand::walk_existing(self, loader, path)
        }
    }
}

impl<V> FieldValue for BTreeMap<String, V>
where
    V: DeserializeOwned + PartialEq,
{
    const SHAPE: Shape = Shape::Scalar;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        coerce::structured(raw)
    }
}

impl<V, S> FieldValue for HashMap<String, V, S>
where
    V: DeserializeOwned + PartialEq,
    S: BuildHasher + Default,
{
    const SHAPE: Shape = Shape::Scalar;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        coerce::structured(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldValue;
    use crate::descriptor::Shape;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;

    #[test]
    fn shapes_follow_wrappers() {
        assert_eq!(<u16 as FieldValue>::SHAPE, Shape::Scalar);
        assert_eq!(<Option<u16> as FieldValue>::SHAPE, Shape::Scalar);
        assert_eq!(<Vec<String> as FieldValue>::SHAPE, Shape::Collection);
        assert_eq!(<Option<Vec<String>> as FieldValue>::SHAPE, Shape::Collection);
    }

    #[rstest]
    #[case("f", Some(false))]
    #[case("on", Some(true))]
    fn optional_bool_uses_token_table(#[case] raw: &str, #[case] expected: Option<bool>) -> Result<()> {
        let value = <Option<bool>>::coerce(raw).map_err(|err| anyhow!(err))?;
        ensure!(value == expected, "{raw:?} coerced to {value:?}");
        Ok(())
    }

    #[test]
    fn strings_are_verbatim() -> Result<()> {
        let raw = "  [not, a, list] # kept ";
        let value = String::coerce(raw).map_err(|err| anyhow!(err))?;
        ensure!(value == raw, "string was altered: {value:?}");
        Ok(())
    }

    #[test]
    fn numbers_use_structured_decode() -> Result<()> {
        ensure!(u32::coerce("3").map_err(|err| anyhow!(err))? == 3, "u32 mismatch");
        ensure!(i64::coerce("-12").map_err(|err| anyhow!(err))? == -12, "i64 mismatch");
        ensure!(u8::coerce("300").is_err(), "u8 overflow accepted");
        Ok(())
    }

    #[test]
    fn blank_matches_default() {
        assert!(0_u32.is_blank());
        assert!(String::new().is_blank());
        assert!(!Some(0_u32).is_blank());
        assert!(Vec::<u8>::new().is_blank());
    }
}
