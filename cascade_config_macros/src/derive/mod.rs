//! Expansion pipeline for `#[derive(CascadeConfig)]`.
//!
//! Parsing collects attribute metadata, building turns each field into a
//! descriptor expression, and generation assembles the trait impls.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod build;
mod crate_path;
mod generate;
mod parse;

/// Expand the derive for `input`, or report the first attribute error.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    let fields = build::build_fields(&krate, &parsed)?;
    Ok(generate::record_impls(&krate, &parsed, &fields))
}
