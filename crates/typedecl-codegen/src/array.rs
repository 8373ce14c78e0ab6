//! Array annotation forms.
//!
//! Supported forms:
//!
//! | Descriptor | Result |
//! |------------|--------|
//! | `T[]`, `(A\|B)[]` | `T[]`, `(A \| B)[]` |
//! | `list<T>` | `T[]` |
//! | `non-empty-list<T>` | `[T, ...T[]]` |
//! | `array<int, V>` | `V[]` |
//! | `array<string, V>`, `array<array-key, V>`, `array<int\|string, V>` | `{ [key: string]: V }` |
//!
//! Generic names are matched case-insensitively.

use crate::context::{GenerationContext, PropertyScope};
use crate::converter::{convert, error, split_top_level};
use crate::error::TypeResolutionError;
use crate::types::{ContainerKind, TsType};

/// Key classification of `array<K, V>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    Int,
    String,
    Both,
}

/// Whether a descriptor atom denotes an array: bare `array`, a bracket
/// form, or any `name<...>` generic.
pub fn is_array_like(atom: &str) -> bool {
    atom == "array" || atom.ends_with("[]") || generic_parts(atom).is_some()
}

/// Split `name<args>` into its name and argument text.
fn generic_parts(atom: &str) -> Option<(&str, &str)> {
    let open = atom.find('<')?;
    let args = atom[open + 1..].strip_suffix('>')?;
    let name = &atom[..open];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
        return None;
    }
    Some((name, args))
}

/// Parse an array-like atom into a container node.
pub fn parse_array(
    ctx: &mut GenerationContext<'_>,
    atom: &str,
    scope: Option<PropertyScope<'_>>,
) -> Result<TsType, TypeResolutionError> {
    if let Some(element) = atom.strip_suffix("[]") {
        let element = strip_wrapping_parens(element.trim());
        if element.is_empty() {
            return Err(error("unsupported array type", atom, scope));
        }
        let inner = convert(ctx, element, scope)?;
        return Ok(TsType::container(ContainerKind::List, inner));
    }

    let Some((name, args)) = generic_parts(atom) else {
        return Err(error("unsupported array type", atom, scope));
    };

    match name.to_ascii_lowercase().as_str() {
        "list" => single_argument(ctx, ContainerKind::List, args, atom, scope),
        "non-empty-list" => single_argument(ctx, ContainerKind::NonEmptyList, args, atom, scope),
        "array" => key_value(ctx, args, atom, scope),
        _ => Err(error("unsupported array type", atom, scope)),
    }
}

fn single_argument(
    ctx: &mut GenerationContext<'_>,
    kind: ContainerKind,
    args: &str,
    atom: &str,
    scope: Option<PropertyScope<'_>>,
) -> Result<TsType, TypeResolutionError> {
    let args = split_top_level(args, ',');
    let [element] = args.as_slice() else {
        return Err(error("expected exactly one type argument", atom, scope));
    };
    let inner = convert(ctx, element, scope)?;
    Ok(TsType::container(kind, inner))
}

fn key_value(
    ctx: &mut GenerationContext<'_>,
    args: &str,
    atom: &str,
    scope: Option<PropertyScope<'_>>,
) -> Result<TsType, TypeResolutionError> {
    let args = split_top_level(args, ',');
    let [key, value] = args.as_slice() else {
        return Err(error("expected exactly two type arguments", atom, scope));
    };

    let Some(key_kind) = classify_key(key) else {
        return Err(error("unsupported array key type", atom, scope));
    };
    let inner = convert(ctx, value, scope)?;

    let kind = match key_kind {
        KeyKind::Int => ContainerKind::List,
        KeyKind::String | KeyKind::Both => ContainerKind::StringIndexMap,
    };
    Ok(TsType::container(kind, inner))
}

fn classify_key(key: &str) -> Option<KeyKind> {
    let mut int = false;
    let mut string = false;
    for part in split_top_level(key, '|') {
        match part {
            "int" => int = true,
            "string" => string = true,
            "array-key" => {
                int = true;
                string = true;
            }
            _ => return None,
        }
    }
    match (int, string) {
        (true, true) => Some(KeyKind::Both),
        (true, false) => Some(KeyKind::Int),
        (false, true) => Some(KeyKind::String),
        (false, false) => None,
    }
}

/// `(A|B)` -> `A|B`, when the outer parentheses enclose the whole text.
fn strip_wrapping_parens(text: &str) -> &str {
    let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) else {
        return text;
    };
    let mut depth: usize = 0;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    // `(A)|(B)`: the first paren closes early
                    return text;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    inner.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderContext;
    use crate::queue::WorkQueue;
    use crate::reflect::{ClassInfo, ClassMap};
    use crate::replacements::TypeReplacements;

    fn classes() -> ClassMap {
        [ClassInfo::record("app::User", vec![])].into_iter().collect()
    }

    fn run(text: &str) -> Result<String, TypeResolutionError> {
        let classes = classes();
        let replacements = TypeReplacements::new();
        let mut ctx = GenerationContext::new(WorkQueue::new(), &replacements, &classes);
        let ty = convert(&mut ctx, text, None)?;
        Ok(ty.render(&RenderContext::default()))
    }

    #[test]
    fn test_is_array_like() {
        assert!(is_array_like("array"));
        assert!(is_array_like("int[]"));
        assert!(is_array_like("list<int>"));
        assert!(is_array_like("map<int>"));
        assert!(!is_array_like("int"));
        assert!(!is_array_like("app::User"));
        assert!(!is_array_like("<int>"));
    }

    #[test]
    fn test_equivalent_list_forms() {
        assert_eq!(run("int[]").unwrap(), "number[]");
        assert_eq!(run("list<int>").unwrap(), "number[]");
        assert_eq!(run("array<int, int>").unwrap(), "number[]");
        assert_eq!(run("LIST<int>").unwrap(), "number[]");
    }

    #[test]
    fn test_bracket_forms() {
        assert_eq!(run("int[][]").unwrap(), "number[][]");
        assert_eq!(run("(string|int)[]").unwrap(), "(string | number)[]");
        assert_eq!(run("app::User[]").unwrap(), "app.User[]");
        assert_eq!(run("?int[]").unwrap(), "number[] | null");
    }

    #[test]
    fn test_non_empty_list() {
        assert_eq!(
            run("non-empty-list<string>").unwrap(),
            "[string, ...string[]]"
        );
    }

    #[test]
    fn test_string_keyed_maps() {
        assert_eq!(
            run("array<string, int>").unwrap(),
            "{ [key: string]: number }"
        );
        assert_eq!(
            run("array<int|string, bool>").unwrap(),
            "{ [key: string]: boolean }"
        );
        assert_eq!(
            run("array<array-key, ?int>").unwrap(),
            "{ [key: string]: (number | null) }"
        );
    }

    #[test]
    fn test_nested_generic_arguments() {
        assert_eq!(
            run("array<string, list<array<int, string>>>").unwrap(),
            "{ [key: string]: string[][] }"
        );
        assert_eq!(run("list<int|null>").unwrap(), "(number | null)[]");
    }

    #[test]
    fn test_errors() {
        assert_eq!(run("array").unwrap_err().message, "unsupported array type");
        assert_eq!(
            run("map<int>").unwrap_err().message,
            "unsupported array type"
        );
        assert_eq!(
            run("list<int, string>").unwrap_err().message,
            "expected exactly one type argument"
        );
        assert_eq!(
            run("non-empty-list<>").unwrap_err().message,
            "expected exactly one type argument"
        );
        assert_eq!(
            run("array<int>").unwrap_err().message,
            "expected exactly two type arguments"
        );
        let err = run("array<float, int>").unwrap_err();
        assert_eq!(err.message, "unsupported array key type");
        assert_eq!(err.text, "array<float, int>");
    }

    #[test]
    fn test_strip_wrapping_parens() {
        assert_eq!(strip_wrapping_parens("(a|b)"), "a|b");
        assert_eq!(strip_wrapping_parens("(a)|(b)"), "(a)|(b)");
        assert_eq!(strip_wrapping_parens("a"), "a");
    }
}
