//! Input parsing for the `CascadeConfig` derive macro.
//!
//! Gathers the struct identifier, generics, named fields and attribute
//! metadata in one pass so expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields, Generics, Ident};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// Everything the builder and generator need from the user's struct.
pub(crate) struct ParsedInput {
    pub ident: Ident,
    pub generics: Generics,
    pub fields: Vec<syn::Field>,
    pub struct_attrs: StructAttrs,
    pub field_attrs: Vec<FieldAttrs>,
}

/// Parse `input`, rejecting enums, unions, tuple and unit structs.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().cloned().collect::<Vec<_>>(),
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "CascadeConfig requires named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "CascadeConfig can only be derived for structs",
            ));
        }
    };

    let field_attrs = fields
        .iter()
        .map(|field| parse_field_attrs(&field.attrs))
        .collect::<syn::Result<Vec<_>>>()?;
    Ok(ParsedInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        fields,
        struct_attrs,
        field_attrs,
    })
}
