//! Attribute parsing for the `CascadeConfig` derive macro.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Token, parenthesized};

mod input;
mod literals;

pub(crate) use input::{ParsedInput, parse_input};
use literals::{default_literal, flag, lit_str};

/// Struct-level `#[cascade_config(...)]` settings.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Root name segment, already trimmed of trailing underscores and
    /// lower-cased.
    pub prefix: Option<String>,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(CascadeConfig)]`.
///
/// - `default` supplies the literal used when no source has a value.
/// - `required` fails the load when the field stays blank.
/// - `env`, `remote` and `secret` replace the derived lookup key for one
///   source.
/// - `flatten` walks a nested record in the parent's namespace.
/// - `skip` leaves the field out of the descriptor table.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub default: Option<String>,
    pub required: bool,
    pub env: Option<String>,
    pub remote: Option<String>,
    pub secret: Option<String>,
    pub flatten: bool,
    pub skip: bool,
}

/// Iterate all `#[cascade_config(...)]` attributes once and apply a callback.
fn parse_cascade_config<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs
        .iter()
        .filter(|attr| attr.path().is_ident("cascade_config"))
    {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
///
/// A value is parsed as one expression so the following `,` ends it and
/// later keys in the same attribute are still seen.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn normalise_prefix(raw: &str) -> String {
    raw.trim_end_matches('_').to_ascii_lowercase()
}

/// Extracts struct-level metadata.
///
/// Unknown keys are ignored so callers keep compiling when new attributes
/// appear.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_cascade_config(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("prefix") => {
                let value = lit_str(meta, "prefix")?.value();
                out.prefix = Some(normalise_prefix(&value));
                Ok(())
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

fn assign_str(target: &mut Option<String>, meta: &ParseNestedMeta, key: &str) -> syn::Result<bool> {
    let s = lit_str(meta, key)?;
    if s.value().is_empty() {
        return Err(syn::Error::new(s.span(), format!("{key} must not be empty")));
    }
    *target = Some(s.value());
    Ok(true)
}

/// Applies a recognised field attribute, returning `true` if handled.
fn apply_field_attr(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<bool> {
    let Some(ident) = meta.path.get_ident() else {
        return Ok(false);
    };
    match ident.to_string().as_str() {
        "default" => {
            out.default = Some(default_literal(meta)?);
            Ok(true)
        }
        "required" => {
            out.required = flag(meta)?;
            Ok(true)
        }
        "env" => assign_str(&mut out.env, meta, "env"),
        "remote" => assign_str(&mut out.remote, meta, "remote"),
        "secret" => assign_str(&mut out.secret, meta, "secret"),
        "flatten" => {
            out.flatten = flag(meta)?;
            Ok(true)
        }
        "skip" => {
            out.skip = flag(meta)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Parses field-level `#[cascade_config(...)]` attributes.
///
/// Unknown keys are discarded, matching [`parse_struct_attrs`].
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_cascade_config(attrs, |meta| {
        if !apply_field_attr(meta, &mut out)? {
            discard_unknown(meta)?;
        }
        Ok(())
    })?;
    Ok(out)
}
