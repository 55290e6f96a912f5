//! Builds the per-field descriptor expressions.
//!
//! Each non-skipped field becomes a `const` `FieldDescriptor` expression
//! chained from `FieldDescriptor::new(name, segment)` through the builder
//! methods matching its attributes.

use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;
use syn::ext::IdentExt;

use super::parse::{FieldAttrs, ParsedInput};

/// A field the generated `walk_fields` hands to the loader.
pub(crate) struct BuiltField {
    pub member: Ident,
    pub descriptor: TokenStream,
}

/// Rust name of a field with any raw-identifier prefix removed.
pub(crate) fn field_name(ident: &Ident) -> String {
    ident.unraw().to_string()
}

/// Name segment contributed by a field to lookup keys.
pub(crate) fn segment(ident: &Ident) -> String {
    field_name(ident).to_snake_case()
}

/// Descriptor expression for one field.
pub(crate) fn descriptor_tokens(krate: &TokenStream, ident: &Ident, attrs: &FieldAttrs) -> TokenStream {
    let name = field_name(ident);
    let key_segment = segment(ident);
    let mut tokens = quote! { #krate::FieldDescriptor::new(#name, #key_segment) };
    if let Some(literal) = &attrs.default {
        tokens = quote! { #tokens.with_default(#literal) };
    }
    if attrs.required {
        tokens = quote! { #tokens.required() };
    }
    if attrs.flatten {
        tokens = quote! { #tokens.flatten() };
    }
    if let Some(key) = &attrs.remote {
        tokens = quote! { #tokens.remote(#key) };
    }
    if let Some(key) = &attrs.env {
        tokens = quote! { #tokens.env(#key) };
    }
    if let Some(key) = &attrs.secret {
        tokens = quote! { #tokens.secret(#key) };
    }
    tokens
}

/// Build descriptors for every field not marked `skip`.
pub(crate) fn build_fields(krate: &TokenStream, parsed: &ParsedInput) -> syn::Result<Vec<BuiltField>> {
    let mut out = Vec::with_capacity(parsed.fields.len());
    for (field, attrs) in parsed.fields.iter().zip(&parsed.field_attrs) {
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "CascadeConfig requires named fields"));
        };
        if attrs.flatten && (attrs.env.is_some() || attrs.remote.is_some() || attrs.secret.is_some()) {
            return Err(syn::Error::new_spanned(
                &ident,
                "flattened fields cannot override lookup keys",
            ));
        }
        let descriptor = descriptor_tokens(krate, &ident, attrs);
        out.push(BuiltField {
            member: ident,
            descriptor,
        });
    }
    Ok(out)
}
