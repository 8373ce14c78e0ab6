//! Identifier and string safety for emitted TypeScript.

use crate::reflect::PATH_SEPARATOR;

/// Render a property or enum member name.
///
/// Valid identifiers are emitted bare; anything else becomes a quoted
/// string key.
///
/// ```
/// use typedecl_codegen::ts_prop;
///
/// assert_eq!(ts_prop("userName"), "userName");
/// assert_eq!(ts_prop("user-name"), "\"user-name\"");
/// assert_eq!(ts_prop(""), "\"\"");
/// ```
pub fn ts_prop(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote_string(name)
    }
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Double-quote a string, escaping `\` and `"`.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '\\' || c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Dotted TypeScript path of a fully-qualified class name.
pub fn ts_fqcn(fqn: &str) -> String {
    fqn.split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Namespace segments of a fully-qualified class name (all but the last).
pub fn namespace_parts(fqn: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = fqn
        .split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect();
    parts.pop();
    parts
}
