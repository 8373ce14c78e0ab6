//! Source reflection: builds [`ClassInfo`]s from Rust source files.
//!
//! Every struct with named fields and every field-less enum is reflected.
//! Types deriving a marker (`#[derive(TypeScript)]` by default) get the
//! generate flag, which auto-discovery looks for.
//!
//! ## Field types
//!
//! Rust types are translated to type descriptors:
//!
//! | Rust | Descriptor |
//! |------|------------|
//! | integers | `int` |
//! | `f32`, `f64` | `float` |
//! | `String`, `&str`, `char`, `PathBuf`, `SmolStr` | `string` |
//! | `()` | `null` |
//! | `serde_json::Value` | `mixed` |
//! | `Option<T>` | `?T` |
//! | `Vec<T>`, `[T; N]`, `&[T]`, sets and other sequences | `list<T>` |
//! | `HashMap<K, V>`, `BTreeMap<K, V>`, `IndexMap<K, V>` | `array<string, V>` |
//! | `Box<T>`, `Rc<T>`, `Arc<T>`, `Cow<T>` | `T` |
//! | `Self` | `self` |
//!
//! Any other path names a class. Paths are made absolute through the
//! file's `use` items (`crate`, `self` and `super` are understood); a bare
//! name that was not imported is taken to live in the current module.
//! Tuples, function pointers and trait objects have no descriptor.
//!
//! ## Attributes
//!
//! - `#[ts(inline)]`, `#[ts(literal = 42)]`, `#[ts(literal = null)]`,
//!   `#[ts(raw = "typeof x")]`, `#[ts(template = "id-{number}")]` on fields;
//! - `#[ts(extends = "crate::Base")]` on a struct sets its parent class;
//! - `#[ts(value = "x")]` on an enum variant sets its value;
//! - `#[serde(rename = "..")]`, `#[serde(rename_all = "..")]` and
//!   `#[serde(skip)]` are honoured;
//! - `/// @var <type>` in a field's doc comment provides a descriptor that
//!   overrides `mixed` and array types.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Expr, ExprLit, ExprUnary, Fields, GenericArgument, Item, ItemEnum, ItemStruct,
    Lit, Meta, PathArguments, Token, Type, TypePath, UnOp, UseTree, Visibility,
};
use walkdir::WalkDir;

use crate::CodeGenerator;
use crate::converter::split_top_level;
use crate::error::{Error, Result};
use crate::reflect::{
    CaseValue, ClassInfo, EnumCase, LiteralValue, Marker, PATH_SEPARATOR, PropertyInfo,
};

/// Crates whose collection and string types are translated structurally.
const KNOWN_CRATES: &[&str] = &[
    "std", "core", "alloc", "hashbrown", "indexmap", "smallvec", "tinyvec", "arrayvec",
    "thin_vec", "smol_str",
];

/// Per-module context built from `use` items.
struct SourceContext<'a> {
    /// Module path of the items being extracted, crate name first.
    module: Vec<String>,
    /// Local name -> absolute path segments.
    imports: HashMap<String, Vec<String>>,
    markers: &'a [String],
    file: Option<&'a Path>,
}

/// Recursively flatten a `UseTree` into import entries.
fn collect_imports(tree: &UseTree, prefix: &[String], imports: &mut HashMap<String, Vec<String>>) {
    match tree {
        UseTree::Path(p) => {
            let mut new_prefix = prefix.to_vec();
            new_prefix.push(p.ident.to_string());
            collect_imports(&p.tree, &new_prefix, imports);
        }
        UseTree::Name(n) => {
            let name = n.ident.to_string();
            let mut full_path = prefix.to_vec();
            if name == "self" {
                // `use foo::bar::{self}` imports `bar`
                if let Some(last) = prefix.last() {
                    imports.insert(last.clone(), full_path);
                }
                return;
            }
            full_path.push(name.clone());
            imports.insert(name, full_path);
        }
        UseTree::Rename(r) => {
            let mut full_path = prefix.to_vec();
            full_path.push(r.ident.to_string());
            imports.insert(r.rename.to_string(), full_path);
        }
        UseTree::Glob(_) => {
            // Glob imports can't be resolved statically
        }
        UseTree::Group(g) => {
            for item in &g.items {
                collect_imports(item, prefix, imports);
            }
        }
    }
}

impl<'a> SourceContext<'a> {
    fn new(
        module: Vec<String>,
        items: &[Item],
        markers: &'a [String],
        file: Option<&'a Path>,
    ) -> Self {
        let mut raw = HashMap::new();
        for item in items {
            if let Item::Use(item_use) = item {
                collect_imports(&item_use.tree, &[], &mut raw);
            }
        }

        let mut ctx = Self {
            module,
            imports: HashMap::new(),
            markers,
            file,
        };
        ctx.imports = raw
            .into_iter()
            .map(|(name, path)| {
                let absolute = ctx.absolutize(&path);
                (name, absolute)
            })
            .collect();
        ctx
    }

    fn child(&self, name: &str, items: &[Item]) -> SourceContext<'a> {
        let mut module = self.module.clone();
        module.push(name.to_string());
        SourceContext::new(module, items, self.markers, self.file)
    }

    /// Resolve leading `crate`, `self` and `super` segments.
    fn absolutize(&self, segments: &[String]) -> Vec<String> {
        let Some(first) = segments.first() else {
            return Vec::new();
        };
        let (mut base, mut rest) = match first.as_str() {
            "crate" => (self.module.iter().take(1).cloned().collect(), &segments[1..]),
            "self" => (self.module.clone(), &segments[1..]),
            "super" => (self.module.clone(), segments),
            _ => return segments.to_vec(),
        };
        while let Some(("super", tail)) = rest.split_first().map(|(h, t)| (h.as_str(), t)) {
            base.pop();
            rest = tail;
        }
        base.extend(rest.iter().cloned());
        base
    }

    /// Absolute path of a type path as written in this module.
    fn resolve_path(&self, path: &syn::Path) -> Vec<String> {
        let raw: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let Some(first) = raw.first().cloned() else {
            return raw;
        };

        if let Some(import) = self.imports.get(&first) {
            let mut full = import.clone();
            full.extend(raw[1..].iter().cloned());
            return full;
        }
        match first.as_str() {
            "crate" | "self" | "super" => self.absolutize(&raw),
            _ if raw.len() == 1 => {
                let mut full = self.module.clone();
                full.push(first.clone());
                full
            }
            _ => raw,
        }
    }

    fn fqn(&self, name: &str) -> String {
        let mut path = self.module.clone();
        path.push(name.to_string());
        join(&path)
    }

    /// Translate a Rust type into a descriptor.
    fn descriptor(&self, ty: &Type) -> Option<String> {
        match ty {
            Type::Path(TypePath { qself: None, path }) => self.path_descriptor(path),
            Type::Reference(reference) => self.descriptor(&reference.elem),
            Type::Slice(slice) => Some(format!("list<{}>", self.descriptor(&slice.elem)?)),
            Type::Array(array) => Some(format!("list<{}>", self.descriptor(&array.elem)?)),
            Type::Paren(paren) => self.descriptor(&paren.elem),
            Type::Group(group) => self.descriptor(&group.elem),
            Type::Tuple(tuple) if tuple.elems.is_empty() => Some("null".to_string()),
            _ => None,
        }
    }

    fn path_descriptor(&self, path: &syn::Path) -> Option<String> {
        let last = path.segments.last()?;
        let ident = last.ident.to_string();

        if path.segments.len() == 1 && ident == "Self" {
            return Some("self".to_string());
        }

        let first = path.segments.first()?.ident.to_string();
        let imported = self.imports.contains_key(&first);
        let full = self.resolve_path(path);

        let structural = if path.segments.len() == 1 && !imported {
            true
        } else {
            full.first()
                .is_some_and(|root| KNOWN_CRATES.contains(&root.as_str()))
        };

        if full.len() == 2 && full[0] == "serde_json" && full[1] == "Value" {
            return Some("mixed".to_string());
        }

        if structural {
            let args = type_args(last);
            match ident.as_str() {
                "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
                | "u128" | "usize" => return Some("int".to_string()),
                "f32" | "f64" => return Some("float".to_string()),
                "bool" => return Some("bool".to_string()),
                "String" | "str" | "char" | "PathBuf" | "Path" | "OsString" | "SmolStr" => {
                    return Some("string".to_string());
                }
                "Option" => {
                    let inner = self.descriptor(args.first()?)?;
                    return Some(nullable(&inner));
                }
                "Vec" | "VecDeque" | "LinkedList" | "BinaryHeap" | "HashSet" | "BTreeSet"
                | "IndexSet" | "SmallVec" | "TinyVec" | "ArrayVec" | "ThinVec" => {
                    return Some(format!("list<{}>", self.descriptor(args.first()?)?));
                }
                "HashMap" | "BTreeMap" | "IndexMap" => {
                    // JSON object keys are always strings
                    return Some(format!("array<string, {}>", self.descriptor(args.get(1)?)?));
                }
                "Box" | "Rc" | "Arc" | "Cow" => return self.descriptor(args.first()?),
                _ => {}
            }
        }

        Some(join(&full))
    }

    /// Check if an item derives one of the generate markers.
    ///
    /// Unqualified derives are resolved through the imports, so
    /// `use typedecl_codegen::TypeScript as Ts; #[derive(Ts)]` is detected.
    fn has_marker_derive(&self, attrs: &[Attribute]) -> bool {
        for attr in attrs {
            if attr.path().is_ident("derive")
                && let Ok(nested) =
                    attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
            {
                for path in nested {
                    let Some(last) = path.segments.last() else {
                        continue;
                    };
                    let mut name = last.ident.to_string();
                    if path.segments.len() == 1
                        && let Some(import) = self.imports.get(&name)
                        && let Some(imported) = import.last()
                    {
                        name = imported.clone();
                    }
                    if self.markers.contains(&name) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn extract_struct(&self, item: &ItemStruct) -> Option<ClassInfo> {
        let named: Vec<&syn::Field> = match &item.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => return None,
        };

        let serde = metas(&item.attrs, "serde");
        let rule = rename_rule(&serde);

        let mut properties = Vec::new();
        for field in named {
            if !matches!(field.vis, Visibility::Public(_)) {
                continue;
            }
            let Some(ident) = &field.ident else {
                continue;
            };
            let field_serde = metas(&field.attrs, "serde");
            if is_skipped(&field_serde) {
                continue;
            }

            let name = str_value(&field_serde, "rename")
                .unwrap_or_else(|| rule.apply_to_field(&ident.unraw().to_string()));

            let mut property = PropertyInfo::new(name).with_line(ident.span().start().line);
            property.declared_type = self.descriptor(&field.ty);
            property.doc_type = doc_var(&field.attrs);
            property.markers = field_markers(&metas(&field.attrs, "ts"));
            properties.push(property);
        }

        let fqn = self.fqn(&item.ident.unraw().to_string());
        let mut class = ClassInfo::record(fqn, properties)
            .with_generate(self.has_marker_derive(&item.attrs));

        if let Some(parent) = str_value(&metas(&item.attrs, "ts"), "extends") {
            match syn::parse_str::<syn::Path>(&parent) {
                Ok(path) => class.parent = Some(join(&self.resolve_path(&path))),
                Err(err) => {
                    tracing::warn!(class = %class.fqn, %parent, %err, "invalid `extends` path")
                }
            }
        }

        Some(self.located(class, &item.ident))
    }

    fn extract_enum(&self, item: &ItemEnum) -> Option<ClassInfo> {
        let fqn = self.fqn(&item.ident.unraw().to_string());
        if item
            .variants
            .iter()
            .any(|v| !matches!(v.fields, Fields::Unit))
        {
            tracing::warn!(class = %fqn, "skipping enum with data-carrying variants");
            return None;
        }

        let rule = rename_rule(&metas(&item.attrs, "serde"));
        let numeric = item.variants.iter().any(|v| v.discriminant.is_some());

        let mut cases = Vec::new();
        let mut next: i64 = 0;
        for variant in &item.variants {
            let name = variant.ident.unraw().to_string();

            let mut discriminant = next;
            if let Some((_, expr)) = &variant.discriminant {
                match int_expr(expr) {
                    Some(n) => discriminant = n,
                    None => {
                        tracing::warn!(class = %fqn, variant = %name, "unsupported discriminant")
                    }
                }
            }
            next = discriminant.wrapping_add(1);

            let serde = metas(&variant.attrs, "serde");
            if is_skipped(&serde) {
                continue;
            }

            let explicit = metas(&variant.attrs, "ts")
                .iter()
                .find_map(|meta| name_value(meta, "value").and_then(case_value));
            let value = match explicit {
                Some(value) => value,
                None if numeric => CaseValue::Int(discriminant),
                None => CaseValue::String(
                    str_value(&serde, "rename").unwrap_or_else(|| rule.apply_to_variant(&name)),
                ),
            };
            cases.push(EnumCase::new(name, value));
        }

        let class = ClassInfo::enumeration(fqn, cases)
            .with_generate(self.has_marker_derive(&item.attrs));
        Some(self.located(class, &item.ident))
    }

    fn located(&self, mut class: ClassInfo, ident: &syn::Ident) -> ClassInfo {
        class.file = self.file.map(Path::to_path_buf);
        class.line = Some(ident.span().start().line);
        class
    }

    fn extract_items(&self, items: &[Item], out: &mut Vec<ClassInfo>) {
        for item in items {
            match item {
                Item::Struct(s) => out.extend(self.extract_struct(s)),
                Item::Enum(e) => out.extend(self.extract_enum(e)),
                Item::Mod(m) => {
                    if let Some((_, content)) = &m.content {
                        self.child(&m.ident.unraw().to_string(), content)
                            .extract_items(content, out);
                    }
                }
                _ => {}
            }
        }
    }
}

fn join(segments: &[String]) -> String {
    segments
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

/// `int` -> `?int`; `int|string` -> `int|string|null`.
///
/// Already nullable descriptors (`Option<Option<T>>`) are left unchanged.
fn nullable(descriptor: &str) -> String {
    let atoms = split_top_level(descriptor, '|');
    if atoms.iter().any(|atom| atom.starts_with('?') || *atom == "null") {
        return descriptor.to_string();
    }
    if atoms.len() > 1 {
        format!("{descriptor}|null")
    } else {
        format!("?{descriptor}")
    }
}

/// Collect all type arguments from a path segment's angle brackets.
///
/// Unwraps `[T; N]` (for `SmallVec`/`TinyVec`) and skips lifetimes and
/// const arguments.
fn type_args(segment: &syn::PathSegment) -> Vec<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return vec![];
    };

    let mut type_args = Vec::new();
    for arg in &args.args {
        if let GenericArgument::Type(ty) = arg {
            if let Type::Array(array) = ty {
                type_args.push(array.elem.as_ref());
            } else {
                type_args.push(ty);
            }
        }
    }
    type_args
}

/// Nested metas of every `#[name(...)]` attribute.
fn metas(attrs: &[Attribute], name: &str) -> Vec<Meta> {
    let mut out = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident(name) {
            continue;
        }
        match attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated) {
            Ok(nested) => out.extend(nested),
            Err(err) => tracing::warn!(attribute = name, %err, "ignoring malformed attribute"),
        }
    }
    out
}

fn name_value<'m>(meta: &'m Meta, key: &str) -> Option<&'m Expr> {
    match meta {
        Meta::NameValue(nv) if nv.path.is_ident(key) => Some(&nv.value),
        _ => None,
    }
}

fn str_value(metas: &[Meta], key: &str) -> Option<String> {
    metas.iter().find_map(|meta| match name_value(meta, key)? {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Some(s.value()),
        _ => None,
    })
}

fn has_flag(metas: &[Meta], key: &str) -> bool {
    metas
        .iter()
        .any(|meta| matches!(meta, Meta::Path(path) if path.is_ident(key)))
}

fn is_skipped(serde: &[Meta]) -> bool {
    has_flag(serde, "skip") || has_flag(serde, "skip_serializing")
}

/// `42`, `-1`
fn int_expr(expr: &Expr) -> Option<i64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(n), ..
        }) => n.base10_parse().ok(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => int_expr(expr).map(|n| -n),
        Expr::Paren(paren) => int_expr(&paren.expr),
        Expr::Group(group) => int_expr(&group.expr),
        _ => None,
    }
}

fn literal_value(expr: &Expr) -> Option<LiteralValue> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Some(LiteralValue::String(s.value())),
            Lit::Int(n) => n.base10_parse().ok().map(LiteralValue::Int),
            Lit::Float(f) => f.base10_parse().ok().map(LiteralValue::Float),
            Lit::Bool(b) => Some(LiteralValue::Bool(b.value)),
            _ => None,
        },
        Expr::Path(path) if path.path.is_ident("null") => Some(LiteralValue::Null),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => match literal_value(expr)? {
            LiteralValue::Int(n) => Some(LiteralValue::Int(-n)),
            LiteralValue::Float(f) => Some(LiteralValue::Float(-f)),
            _ => None,
        },
        _ => None,
    }
}

fn case_value(expr: &Expr) -> Option<CaseValue> {
    match literal_value(expr)? {
        LiteralValue::String(s) => Some(CaseValue::String(s)),
        LiteralValue::Int(n) => Some(CaseValue::Int(n)),
        _ => None,
    }
}

fn field_markers(ts: &[Meta]) -> Vec<Marker> {
    let mut markers = Vec::new();
    for meta in ts {
        match meta {
            Meta::Path(path) if path.is_ident("inline") => markers.push(Marker::Inline),
            Meta::NameValue(nv) if nv.path.is_ident("literal") => match literal_value(&nv.value) {
                Some(value) => markers.push(Marker::Literal(value)),
                None => tracing::warn!("unsupported `literal` value"),
            },
            Meta::NameValue(nv) if nv.path.is_ident("raw") => {
                if let Some(raw) = str_value(std::slice::from_ref(meta), "raw") {
                    markers.push(Marker::Literal(LiteralValue::Raw(raw)));
                }
            }
            Meta::NameValue(nv) if nv.path.is_ident("template") => {
                if let Some(pattern) = str_value(std::slice::from_ref(meta), "template") {
                    markers.push(Marker::Template(pattern));
                }
            }
            _ => {}
        }
    }
    markers
}

/// The type following `@var` in the doc comment.
fn doc_var(attrs: &[Attribute]) -> Option<String> {
    let mut doc = String::new();
    for attr in attrs {
        if let Meta::NameValue(nv) = &attr.meta
            && nv.path.is_ident("doc")
            && let Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) = &nv.value
        {
            doc.push_str(&s.value());
            doc.push('\n');
        }
    }

    // `@variable` and the like are not tags
    let rest = doc
        .match_indices("@var")
        .map(|(start, tag)| &doc[start + tag.len()..])
        .find(|rest| rest.starts_with(char::is_whitespace))?
        .trim_start();

    // The type ends at the first whitespace outside of brackets.
    let mut depth: usize = 0;
    let mut end = rest.len();
    for (i, c) in rest.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                end = i;
                break;
            }
            _ => {}
        }
    }

    let ty = rest[..end].trim();
    (!ty.is_empty()).then(|| ty.to_string())
}

/// serde's `rename_all` rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenameRule {
    None,
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

fn rename_rule(serde: &[Meta]) -> RenameRule {
    match str_value(serde, "rename_all").as_deref() {
        Some("lowercase") => RenameRule::Lower,
        Some("UPPERCASE") => RenameRule::Upper,
        Some("PascalCase") => RenameRule::Pascal,
        Some("camelCase") => RenameRule::Camel,
        Some("snake_case") => RenameRule::Snake,
        Some("SCREAMING_SNAKE_CASE") => RenameRule::ScreamingSnake,
        Some("kebab-case") => RenameRule::Kebab,
        Some("SCREAMING-KEBAB-CASE") => RenameRule::ScreamingKebab,
        _ => RenameRule::None,
    }
}

impl RenameRule {
    /// Variant names are PascalCase.
    fn apply_to_variant(self, variant: &str) -> String {
        match self {
            RenameRule::None | RenameRule::Pascal => variant.to_string(),
            RenameRule::Lower => variant.to_ascii_lowercase(),
            RenameRule::Upper => variant.to_ascii_uppercase(),
            RenameRule::Camel => {
                let mut chars = variant.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            }
            RenameRule::Snake
            | RenameRule::ScreamingSnake
            | RenameRule::Kebab
            | RenameRule::ScreamingKebab => {
                let mut snake = String::new();
                for (i, c) in variant.char_indices() {
                    if i > 0 && c.is_uppercase() {
                        snake.push('_');
                    }
                    snake.push(c.to_ascii_lowercase());
                }
                match self {
                    RenameRule::Snake => snake,
                    RenameRule::ScreamingSnake => snake.to_ascii_uppercase(),
                    RenameRule::Kebab => snake.replace('_', "-"),
                    _ => snake.to_ascii_uppercase().replace('_', "-"),
                }
            }
        }
    }

    /// Field names are snake_case.
    fn apply_to_field(self, field: &str) -> String {
        match self {
            RenameRule::None | RenameRule::Lower | RenameRule::Snake => field.to_string(),
            RenameRule::Upper | RenameRule::ScreamingSnake => field.to_ascii_uppercase(),
            RenameRule::Kebab => field.replace('_', "-"),
            RenameRule::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
            RenameRule::Pascal | RenameRule::Camel => {
                let mut out = String::new();
                let mut capitalize = self == RenameRule::Pascal;
                for c in field.chars() {
                    if c == '_' {
                        capitalize = true;
                    } else if capitalize {
                        out.push(c.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        out.push(c);
                    }
                }
                out
            }
        }
    }
}

/// Parse `source` as the module `module` (e.g. `"app::models"`) and reflect
/// its structs and enums.
pub fn extract_classes(
    source: &str,
    module: &str,
    markers: &[String],
    file: Option<&Path>,
) -> syn::Result<Vec<ClassInfo>> {
    let parsed = syn::parse_file(source)?;
    let module: Vec<String> = module
        .split(PATH_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    let ctx = SourceContext::new(module, &parsed.items, markers, file);
    let mut classes = Vec::new();
    ctx.extract_items(&parsed.items, &mut classes);
    Ok(classes)
}

/// Module path of `file` inside the crate rooted at `root`.
///
/// `lib.rs`, `main.rs` and `mod.rs` name their directory's module.
pub fn module_path(root: &Path, file: &Path, crate_name: &str) -> String {
    let mut segments = vec![crate_name.replace('-', "_")];
    let relative = file.strip_prefix(root).unwrap_or(file);
    let parts: Vec<String> = relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if let Some((last, dirs)) = parts.split_last() {
        segments.extend(dirs.iter().cloned());
        if !matches!(last.as_str(), "lib" | "main" | "mod") {
            segments.push(last.clone());
        }
    }
    join(&segments)
}

impl CodeGenerator {
    fn add_source(&mut self, source: &str, module: &str, file: Option<&Path>) {
        match extract_classes(source, module, &self.markers, file) {
            Ok(classes) => {
                for class in classes {
                    self.classes.insert(class);
                }
            }
            Err(err) => {
                let file = file.map(|f| f.display().to_string()).unwrap_or_default();
                tracing::warn!(module, %file, %err, "skipping unparsable source");
            }
        }
    }

    /// Parse Rust source from a string as module `module`.
    ///
    /// Source that fails to parse is skipped with a warning.
    pub fn add_source_str(&mut self, module: &str, source: &str) -> &mut Self {
        self.add_source(source, module, None);
        self
    }

    /// Parse a single Rust source file as module `module`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> typedecl_codegen::Result<()> {
    /// use typedecl_codegen::CodeGenerator;
    ///
    /// let mut generator = CodeGenerator::new();
    /// generator.add_source_file("src/models.rs", "app::models")?;
    /// generator.write_to_file("types.d.ts", &["app::models::User"])?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_source_file(&mut self, path: impl AsRef<Path>, module: &str) -> Result<&mut Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_source(&source, module, Some(path));
        Ok(self)
    }

    /// Recursively scan a crate source directory for `.rs` files.
    ///
    /// Module paths follow the file layout below `dir`, rooted at
    /// `crate_name`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> typedecl_codegen::Result<()> {
    /// use typedecl_codegen::CodeGenerator;
    ///
    /// let mut generator = CodeGenerator::new();
    /// generator.add_source_dir("src", "app")?.add_discovery_dir("src");
    /// generator.write_to_file("types.d.ts", &[] as &[&str])?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_source_dir(&mut self, dir: impl AsRef<Path>, crate_name: &str) -> Result<&mut Self> {
        let dir = dir.as_ref();
        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "rs") {
                let module = module_path(dir, path, crate_name);
                self.add_source_file(path, &module)?;
            }
        }
        Ok(self)
    }
}
