//! Dynamic collection expansion.
//!
//! Collections already holding elements have their record elements walked
//! in place. Empty collections of records are grown by probing: index `0`,
//! `1`, `2`, … is resolved into a fresh element until one resolves to the
//! blank default. There is no separate length key.

use crate::error::{CascadeError, CascadeResult};
use crate::path::NamePath;
use crate::value::FieldValue;
use crate::walk::Loader;

/// Walk each record element of a pre-populated collection at `path.i`.
///
/// Scalar elements are left untouched.
pub(crate) fn walk_existing<T: FieldValue>(
    items: &mut [T],
    loader: &Loader<'_>,
    path: &NamePath,
) -> CascadeResult<()> {
    if !T::SHAPE.is_record() {
        return Ok(());
    }
    for (index, item) in items.iter_mut().enumerate() {
        item.walk(loader, &path.index(index))?;
    }
    Ok(())
}

/// Grow an empty collection of records by probing successive indices.
///
/// Only plain record elements are probed; optional records and scalars never
/// are.
///
/// # Errors
///
/// Returns [`CascadeError::ProbeLimitReached`] when the element at the
/// loader's probe limit still resolves to something, and propagates any error
/// raised while walking an element.
pub(crate) fn probe<T: FieldValue>(
    items: &mut Vec<T>,
    loader: &Loader<'_>,
    path: &NamePath,
) -> CascadeResult<()> {
    if T::SHAPE != crate::Shape::Record {
        return Ok(());
    }
    let limit = loader.probe_limit();
    for index in 0..=limit {
        let mut element = T::default();
        element.walk(loader, &path.index(index))?;
        if element.is_blank() {
            tracing::debug!(path = %path, count = index, "collection probing finished");
            return Ok(());
        }
        if index == limit {
            break;
        }
        items.push(element);
    }
    Err(CascadeError::ProbeLimitReached {
        path: path.to_string(),
        limit,
    })
}
