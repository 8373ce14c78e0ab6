//! Property type resolution.
//!
//! Produces the descriptor the converter consumes for one property: the
//! declared type, or the documentation override when the declared type
//! carries no element information, with `self`, `static` and `parent`
//! replaced by concrete class names.

use crate::array::is_array_like;
use crate::context::PropertyScope;
use crate::converter::{error, split_top_level};
use crate::error::TypeResolutionError;
use crate::reflect::{ClassInfo, PropertyInfo};

/// Resolve the descriptor of `property` declared on `class`.
///
/// Returns an empty string when the property has no usable type at all,
/// which the converter turns into `unknown`.
pub fn resolve(property: &PropertyInfo, class: &ClassInfo) -> Result<String, TypeResolutionError> {
    let declared = property.declared_type.as_deref().map(str::trim).unwrap_or("");
    let doc = property
        .doc_type
        .as_deref()
        .map(str::trim)
        .filter(|doc| !doc.is_empty());

    let descriptor = match doc {
        Some(doc) if needs_override(declared) => {
            if is_nullable(declared) {
                make_nullable(doc)
            } else {
                doc.to_string()
            }
        }
        _ => declared.to_string(),
    };

    replace_pseudo_types(&descriptor, property, class)
}

/// The declared type says nothing about its elements: absent, `mixed`, or
/// an array form.
fn needs_override(declared: &str) -> bool {
    let atoms: Vec<&str> = split_top_level(declared, '|')
        .into_iter()
        .map(|atom| atom.trim_start_matches('?').trim())
        .filter(|atom| *atom != "null")
        .collect();

    atoms.is_empty()
        || atoms
            .iter()
            .all(|atom| *atom == "mixed" || is_array_like(atom))
}

fn is_nullable(declared: &str) -> bool {
    split_top_level(declared, '|')
        .into_iter()
        .any(|atom| atom.starts_with('?') || atom == "null")
}

/// `int[]` -> `?int[]`, `int|string` -> `int|string|null`.
fn make_nullable(doc: &str) -> String {
    let atoms = split_top_level(doc, '|');
    if atoms.iter().any(|atom| atom.starts_with('?') || *atom == "null") {
        return doc.to_string();
    }
    match atoms.as_slice() {
        [single] => format!("?{single}"),
        _ => format!("{doc}|null"),
    }
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | ':' | '\\' | '-')
}

/// Replace whole-token `self`, `static` and `parent`.
fn replace_pseudo_types(
    descriptor: &str,
    property: &PropertyInfo,
    class: &ClassInfo,
) -> Result<String, TypeResolutionError> {
    let mut out = String::with_capacity(descriptor.len());
    let mut token = String::new();

    let flush = |token: &mut String, out: &mut String| -> Result<(), TypeResolutionError> {
        match token.as_str() {
            "self" | "static" => out.push_str(&class.fqn),
            "parent" => match &class.parent {
                Some(parent) => out.push_str(parent),
                None => {
                    return Err(error(
                        "class has no parent to resolve",
                        descriptor,
                        Some(PropertyScope::new(property, class)),
                    ));
                }
            },
            other => out.push_str(other),
        }
        token.clear();
        Ok(())
    };

    for c in descriptor.chars() {
        if is_token_char(c) {
            token.push(c);
        } else {
            flush(&mut token, &mut out)?;
            out.push(c);
        }
    }
    flush(&mut token, &mut out)?;

    Ok(out)
}
