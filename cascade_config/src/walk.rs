//! Recursive population of configuration records.

use crate::CascadeConfig;
use crate::descriptor::FieldDescriptor;
use crate::error::{CascadeError, CascadeResult};
use crate::path::NamePath;
use crate::sources::Sources;
use crate::value::FieldValue;

/// Upper bound on the number of elements probed into one collection.
pub const DEFAULT_PROBE_LIMIT: usize = 1024;

/// Drives one resolution call over a fixed set of sources.
///
/// A loader holds no per-call state besides its sources and limits, so it
/// can be reused across several targets.
///
/// # Examples
///
/// ```
/// use cascade_config::{CascadeConfig, Environment, Loader, Sources};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, PartialEq, Deserialize, CascadeConfig)]
/// #[cascade_config(prefix = "APP")]
/// struct App {
///     #[cascade_config(default = 8080)]
///     port: u16,
///     name: String,
/// }
///
/// let env: Environment = [("APP_NAME", "demo")].into_iter().collect();
/// let mut app = App::default();
/// Loader::new(Sources::new().with_env(env)).load(&mut app)?;
/// assert_eq!(app, App { port: 8080, name: "demo".into() });
/// # Ok::<(), cascade_config::CascadeError>(())
/// ```
#[derive(Debug)]
pub struct Loader<'a> {
    sources: Sources<'a>,
    probe_limit: usize,
}

impl<'a> Loader<'a> {
    /// Create a loader over `sources` with the default probe limit.
    #[must_use]
    pub const fn new(sources: Sources<'a>) -> Self {
        Self {
            sources,
            probe_limit: DEFAULT_PROBE_LIMIT,
        }
    }

    /// Cap the number of elements probed into an empty collection.
    #[must_use]
    pub const fn with_probe_limit(mut self, limit: usize) -> Self {
        self.probe_limit = limit;
        self
    }

    /// Probe ceiling in effect.
    #[must_use]
    pub const fn probe_limit(&self) -> usize {
        self.probe_limit
    }

    /// Sources consulted by this loader.
    #[must_use]
    pub const fn sources(&self) -> &Sources<'a> {
        &self.sources
    }

    /// Populate every blank field of `target`.
    ///
    /// The root path is the type's [`prefix`](CascadeConfig::prefix).
    ///
    /// # Errors
    ///
    /// Stops at the first [`CascadeError`]; fields assigned before the
    /// failure keep their values.
    pub fn load<T: CascadeConfig>(&self, target: &mut T) -> CascadeResult<()> {
        target.walk_fields(self, &NamePath::root(T::prefix()))
    }

    /// Resolve, assign and descend into a single field.
    ///
    /// `path` is the path of the record owning the field. This is the call a
    /// hand-written [`CascadeConfig::walk_fields`] makes once per field.
    ///
    /// # Errors
    ///
    /// - [`CascadeError::InvalidTarget`] when `descriptor` cannot describe a
    ///   field of type `F`;
    /// - [`CascadeError::RequiredFieldMissing`] when a required field stays
    ///   blank;
    /// - [`CascadeError::Coercion`] when the winning value does not parse;
    /// - anything raised by the sources or nested fields.
    pub fn field<F: FieldValue>(
        &self,
        slot: &mut F,
        descriptor: &FieldDescriptor,
        path: &NamePath,
    ) -> CascadeResult<()> {
        check_descriptor::<F>(descriptor)?;

        let resolved = self.resolve(descriptor, path, F::SHAPE)?;
        if slot.is_blank() {
            match resolved {
                Some(found) => {
                    *slot = F::coerce(&found.value).map_err(|err| {
                        CascadeError::coercion(descriptor, found.origin, err)
                    })?;
                    tracing::debug!(
                        field = descriptor.name(),
                        source = %found.origin,
                        "loading configuration"
                    );
                }
                None if descriptor.is_required() => {
                    return Err(CascadeError::required(descriptor, path));
                }
                None => {}
            }
        }

        slot.walk(self, &descriptor.child_path(path))
    }
}

fn check_descriptor<F: FieldValue>(descriptor: &FieldDescriptor) -> CascadeResult<()> {
    if descriptor.is_flattened() && !F::SHAPE.is_record() {
        return Err(CascadeError::invalid_target(
            descriptor.name(),
            "only record fields can be flattened",
        ));
    }
    if !descriptor.is_flattened() && descriptor.segment().is_empty() {
        return Err(CascadeError::invalid_target(
            descriptor.name(),
            "field has an empty name segment",
        ));
    }
    Ok(())
}
