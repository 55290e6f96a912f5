//! Primary error enums for resolution flows.

use thiserror::Error;

use crate::resolve::Origin;

/// Errors that abort a resolution call.
///
/// Every variant is fatal: the recursive walk stops at the first error and
/// the target record is left partially populated.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CascadeError {
    /// The descriptor table describes something the walker cannot populate.
    #[error("invalid configuration target '{target}': {reason}")]
    InvalidTarget {
        /// Field or type that failed the structural check.
        target: String,
        /// Why the target cannot be walked.
        reason: String,
    },

    /// A required field is still blank after every source was consulted.
    #[error("{field} is required (looked up as '{key}')")]
    RequiredFieldMissing {
        /// Rust name of the missing field.
        field: String,
        /// Upper-snake lookup key derived for the field.
        key: String,
    },

    /// A value was found but does not parse as the field's type.
    #[error("failed to load '{field}' from {origin}: {source}")]
    Coercion {
        /// Rust name of the field being assigned.
        field: String,
        /// Source that supplied the rejected value.
        origin: Origin,
        /// Underlying decode failure.
        #[source]
        source: CoerceError,
    },

    /// A secret file exists but could not be read under the strict policy.
    #[error("failed to read secret '{key}': {source}")]
    SourceRead {
        /// Secret file name relative to the secret directory.
        key: String,
        /// I/O failure reported by the filesystem.
        #[source]
        source: std::io::Error,
    },

    /// Pre-fetching the remote parameter map failed.
    #[error("failed to fetch remote parameters under '{path}': {source}")]
    RemoteFetch {
        /// Parameter path prefix that was requested.
        path: String,
        /// Error returned by the parameter store client.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Index probing for a collection hit the configured ceiling.
    #[error("collection '{path}' resolved more than {limit} elements")]
    ProbeLimitReached {
        /// Name path of the collection being expanded.
        path: String,
        /// Probe ceiling in effect for the call.
        limit: usize,
    },
}

/// Failure converting a raw string into a typed field value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoerceError {
    /// Structured decode of the text into the target type failed.
    #[error("cannot decode value as {type_name}: {source}")]
    Decode {
        /// Name of the type the value was decoded into.
        type_name: &'static str,
        /// Parser error describing the mismatch.
        #[source]
        source: Box<serde_saphyr::Error>,
    },
}
