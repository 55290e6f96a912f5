//! Crate path resolution for dependency aliasing.
//!
//! Converts the optional `#[cascade_config(crate = "...")]` attribute into
//! the path prefix used by every generated reference to the runtime crate.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the runtime crate path, defaulting to `::cascade_config`.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::cascade_config }, |path| quote! { #path })
}
