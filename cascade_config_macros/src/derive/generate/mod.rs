//! Trait impl generation for `#[derive(CascadeConfig)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, parse_quote};

use super::build::BuiltField;
use super::parse::ParsedInput;

/// Emit the `FieldValue` and `CascadeConfig` impls for a record.
pub(crate) fn record_impls(
    krate: &TokenStream,
    parsed: &ParsedInput,
    fields: &[BuiltField],
) -> TokenStream {
    let ident = &parsed.ident;
    let generics = bounded_generics(krate, &parsed.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let walk_body = walk_fields_body(krate, fields);
    let descriptors = fields.iter().map(|field| &field.descriptor);
    let prefix_fn = parsed.struct_attrs.prefix.as_ref().map(|prefix| {
        quote! {
            fn prefix() -> &'static str {
                #prefix
            }
        }
    });

    quote! {
        impl #impl_generics #krate::FieldValue for #ident #ty_generics #where_clause {
            const SHAPE: #krate::Shape = #krate::Shape::Record;

            fn coerce(raw: &str) -> ::core::result::Result<Self, #krate::CoerceError> {
                #krate::coerce::structured(raw)
            }

            fn walk(
                &mut self,
                loader: &#krate::Loader<'_>,
                path: &#krate::NamePath,
            ) -> #krate::CascadeResult<()> {
                #krate::CascadeConfig::walk_fields(self, loader, path)
            }
        }

        impl #impl_generics #krate::CascadeConfig for #ident #ty_generics #where_clause {
            fn walk_fields(
                &mut self,
                loader: &#krate::Loader<'_>,
                path: &#krate::NamePath,
            ) -> #krate::CascadeResult<()> {
                #walk_body
            }

            fn fields() -> &'static [#krate::FieldDescriptor] {
                const FIELDS: &[#krate::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            #prefix_fn
        }
    }
}

/// Require every type parameter to be a loadable, deserialisable value.
///
/// The user's `Default`, `PartialEq` and `Deserialize` derives bound the same
/// parameters, so `FieldValue` plus `DeserializeOwned` covers all of them.
fn bounded_generics(krate: &TokenStream, generics: &Generics) -> Generics {
    let mut bounded = generics.clone();
    let params = generics.type_params().map(|param| &param.ident).collect::<Vec<_>>();
    if params.is_empty() {
        return bounded;
    }
    let where_clause = bounded.make_where_clause();
    for param in params {
        where_clause.predicates.push(parse_quote! {
            #param: #krate::FieldValue + #krate::__private::DeserializeOwned
        });
    }
    bounded
}

fn walk_fields_body(krate: &TokenStream, fields: &[BuiltField]) -> TokenStream {
    if fields.is_empty() {
        return quote! {
            let _ = (loader, path);
            ::core::result::Result::Ok(())
        };
    }
    let steps = fields.iter().map(|BuiltField { member, descriptor }| {
        quote! {
            {
                const DESCRIPTOR: #krate::FieldDescriptor = #descriptor;
                loader.field(&mut self.#member, &DESCRIPTOR, path)?;
            }
        }
    });
    quote! {
        #(#steps)*
        ::core::result::Result::Ok(())
    }
}
