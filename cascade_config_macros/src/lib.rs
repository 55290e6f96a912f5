//! Procedural macros for `cascade_config`.
//!
//! `#[derive(CascadeConfig)]` turns a struct with named fields into a
//! configuration record: it emits a static descriptor table from the
//! `#[cascade_config(...)]` field attributes and a `walk_fields`
//! implementation that hands each field to the runtime loader in declaration
//! order. Name segments are the `snake_case` form of the field names.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `cascade_config::CascadeConfig` and `cascade_config::FieldValue`.
///
/// Struct attributes: `prefix = "..."` and `crate = "..."`.
/// Field attributes: `default = <literal>`, `required`, `env = "..."`,
/// `remote = "..."`, `secret = "..."`, `flatten` and `skip`.
#[proc_macro_derive(CascadeConfig, attributes(cascade_config))]
pub fn derive_cascade_config(tokens: TokenStream) -> TokenStream {
    let input = parse_macro_input!(tokens as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
