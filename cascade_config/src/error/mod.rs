//! Error types produced by the configuration resolver.

mod constructors;
mod types;

pub use types::{CascadeError, CoerceError};

/// Result alias used throughout the resolver.
pub type CascadeResult<T> = Result<T, CascadeError>;
