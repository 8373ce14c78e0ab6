//! Conversion of type descriptors into [`TsType`] nodes.
//!
//! A descriptor is a `|`-joined list of atoms. Each atom may carry a
//! leading `?` and is one of: a scalar keyword, a fully-qualified class
//! name, an array form (`T[]`, `list<T>`, `non-empty-list<T>`,
//! `array<K, V>`) or anything else, which degrades to `unknown`.
//!
//! Per atom, the first matching rule wins:
//!
//! 1. a literal marker on the property,
//! 2. a template marker on the property,
//! 3. an exact entry in the replacement table,
//! 4. a built-in scalar or array form,
//! 5. a class known to the reflector (inline expansion or a reference),
//! 6. `unknown`.

use std::sync::LazyLock;

use regex::Regex;

use crate::array::{is_array_like, parse_array};
use crate::context::{GenerationContext, PropertyScope};
use crate::error::TypeResolutionError;
use crate::naming::quote_string;
use crate::reflect::{ClassInfo, ClassKind, LiteralValue, PropertyInfo};
use crate::resolver::resolve;
use crate::types::{Properties, Scalar, TsType, insert_property};

/// Strings shaped like `Enum.MEMBER` are emitted as references, not quoted.
static ENUM_MEMBER_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-zA-Z0-9]*\.[A-Z_][A-Z0-9_]*$").expect("valid enum member pattern")
});

/// Keywords the converter recognises but cannot express.
const UNSUPPORTED_KEYWORDS: [&str; 5] = ["void", "never", "callable", "iterable", "resource"];

/// Convert a descriptor into a type node.
///
/// `scope` is the property whose descriptor is being converted; its markers
/// apply to every atom of the descriptor, including array element types.
pub fn convert(
    ctx: &mut GenerationContext<'_>,
    text: &str,
    scope: Option<PropertyScope<'_>>,
) -> Result<TsType, TypeResolutionError> {
    let atoms = split_top_level(text, '|');

    let mut members = Vec::with_capacity(atoms.len());
    for atom in atoms {
        members.push(convert_atom(ctx, atom, scope)?);
    }

    Ok(match members.len() {
        0 => TsType::unknown(),
        1 => members.remove(0),
        _ => TsType::Union(members),
    })
}

fn convert_atom(
    ctx: &mut GenerationContext<'_>,
    atom: &str,
    scope: Option<PropertyScope<'_>>,
) -> Result<TsType, TypeResolutionError> {
    let (nullable, atom) = match atom.strip_prefix('?') {
        Some(rest) => (true, rest.trim()),
        None => (false, atom),
    };
    if atom.is_empty() {
        return Ok(TsType::unknown());
    }

    let base = convert_base(ctx, atom, scope)?;
    Ok(if nullable { base.nullable() } else { base })
}

fn convert_base(
    ctx: &mut GenerationContext<'_>,
    atom: &str,
    scope: Option<PropertyScope<'_>>,
) -> Result<TsType, TypeResolutionError> {
    if let Some(scope) = scope {
        if let Some(literal) = scope.property.literal() {
            return Ok(TsType::Raw(format_literal(literal)));
        }
        if let Some(pattern) = scope.property.template() {
            return Ok(TsType::Raw(format_template(pattern)));
        }
    }

    if let Some(replacement) = ctx.replacements.get(atom) {
        return Ok(TsType::Raw(replacement.to_string()));
    }

    if is_array_like(atom) {
        return parse_array(ctx, atom, scope);
    }
    if let Some(scalar) = builtin_scalar(atom) {
        return Ok(TsType::Scalar(scalar));
    }
    if UNSUPPORTED_KEYWORDS.contains(&atom) {
        return Err(error("unsupported scalar type", atom, scope));
    }

    let reflector = ctx.reflector;
    if let Some(class) = reflector.class(atom) {
        let inline = scope.is_some_and(|s| s.property.is_inline());
        if inline && !ctx.inline_stack.iter().any(|name| name == atom) {
            return expand_inline(ctx, class);
        }
        ctx.queue.enqueue(atom);
        return Ok(TsType::Reference(atom.to_string()));
    }

    tracing::debug!(atom, "unresolvable type, falling back to unknown");
    Ok(TsType::unknown())
}

fn builtin_scalar(atom: &str) -> Option<Scalar> {
    Some(match atom {
        "int" | "float" => Scalar::Number,
        "string" => Scalar::String,
        "bool" => Scalar::Boolean,
        "object" => Scalar::Object,
        "mixed" => Scalar::Any,
        "null" => Scalar::Null,
        "true" => Scalar::True,
        "false" => Scalar::False,
        _ => return None,
    })
}

/// Expand a class at the use site.
fn expand_inline(
    ctx: &mut GenerationContext<'_>,
    class: &ClassInfo,
) -> Result<TsType, TypeResolutionError> {
    match &class.kind {
        ClassKind::Enum(cases) => Ok(TsType::InlineEnum(
            cases.iter().map(|case| case.value.clone()).collect(),
        )),
        ClassKind::Record(properties) => {
            ctx.inline_stack.push(class.fqn.clone());
            let expanded = convert_properties(ctx, class, properties);
            ctx.inline_stack.pop();
            Ok(TsType::InlineRecord(expanded?))
        }
    }
}

/// Resolve and convert every property of a record class, each under its
/// own scope.
pub(crate) fn convert_properties(
    ctx: &mut GenerationContext<'_>,
    class: &ClassInfo,
    properties: &[PropertyInfo],
) -> Result<Properties, TypeResolutionError> {
    let mut converted = Properties::new();
    for property in properties {
        let scope = PropertyScope::new(property, class);
        let descriptor = resolve(property, class)?;
        let ty = convert(ctx, &descriptor, Some(scope))?;
        insert_property(&mut converted, property.name.clone(), ty);
    }
    Ok(converted)
}

/// Format a literal marker value as a TypeScript literal type.
pub fn format_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::String(s) if ENUM_MEMBER_REFERENCE.is_match(s) => s.clone(),
        LiteralValue::String(s) => quote_string(s),
        LiteralValue::Int(n) => n.to_string(),
        LiteralValue::Float(f) => f.to_string(),
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Null => "null".to_string(),
        LiteralValue::Raw(expr) => expr.clone(),
    }
}

/// Format a template marker pattern as a template literal type.
pub fn format_template(pattern: &str) -> String {
    let pattern = pattern
        .replace("{string}", "${string}")
        .replace("{number}", "${number}");
    format!("`{pattern}`")
}

pub(crate) fn error(
    message: &str,
    text: &str,
    scope: Option<PropertyScope<'_>>,
) -> TypeResolutionError {
    TypeResolutionError::new(message, text).with_location(scope.map(|s| s.location()))
}

/// Split on `separator` outside of `<>`, `()`, `[]` and `{}`.
///
/// Parts are trimmed and empty parts dropped.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}
