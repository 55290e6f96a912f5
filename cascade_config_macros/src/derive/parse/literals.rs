//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Expr, ExprLit, ExprUnary, Lit, LitStr, Token, UnOp};

/// Parses a string literal value for `key`.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

/// Parses a bare flag (`required`) or an explicit `required = true`.
pub(crate) fn flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        Ok(meta.value()?.parse::<syn::LitBool>()?.value)
    } else {
        Ok(true)
    }
}

/// Parses a `default = ...` literal into the raw string a source would
/// supply.
///
/// Strings are taken verbatim; integers, floats and booleans use their
/// source text without a type suffix. A leading `-` is kept.
pub(crate) fn default_literal(meta: &ParseNestedMeta) -> syn::Result<String> {
    let expr = meta.value()?.parse::<Expr>()?;
    literal_text(&expr).ok_or_else(|| {
        syn::Error::new_spanned(
            &expr,
            "default must be a string, integer, float or boolean literal",
        )
    })
}

fn literal_text(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Some(s.value()),
            Lit::Int(int) => Some(int.base10_digits().to_owned()),
            Lit::Float(float) => Some(float.base10_digits().to_owned()),
            Lit::Bool(b) => Some(b.value.to_string()),
            _ => None,
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: operand,
            ..
        }) => match operand.as_ref() {
            Expr::Lit(ExprLit {
                lit: Lit::Int(_) | Lit::Float(_),
                ..
            }) => literal_text(operand).map(|digits| format!("-{digits}")),
            _ => None,
        },
        _ => None,
    }
}
