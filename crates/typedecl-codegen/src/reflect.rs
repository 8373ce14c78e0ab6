//! Reflected class metadata consumed by the generator.
//!
//! The generator never inspects source code itself while converting types.
//! It queries a [`Reflector`] for a class by fully-qualified name and reads
//! the ordered public properties, enum cases and attached [`Marker`]s.
//!
//! [`ClassMap`] is the in-memory implementation. It can be filled by hand
//! with the builders on [`ClassInfo`] and [`PropertyInfo`], or from Rust
//! source files via `CodeGenerator::add_source_*`.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// Separator between segments of a fully-qualified class name.
pub const PATH_SEPARATOR: &str = "::";

/// A literal value attached to a property with `#[ts(literal = ...)]` or
/// `#[ts(raw = "...")]`.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// A pre-formatted TypeScript expression, emitted verbatim.
    Raw(String),
}

/// A marker attached to a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    /// Replace the property type with a literal type.
    Literal(LiteralValue),
    /// Replace the property type with a template literal type.
    /// `{string}` and `{number}` are placeholders.
    Template(String),
    /// Expand the referenced class at the use site instead of referencing it.
    Inline,
}

/// A public property of a record class.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    pub name: String,
    /// The declared static type, in descriptor syntax (`?int`, `list<string>`).
    pub declared_type: Option<String>,
    /// A type from the documentation comment (`@var int[]`).
    pub doc_type: Option<String>,
    pub markers: Vec<Marker>,
    pub line: Option<usize>,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            doc_type: None,
            markers: Vec::new(),
            line: None,
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.declared_type = Some(ty.into());
        self
    }

    pub fn with_doc_type(mut self, ty: impl Into<String>) -> Self {
        self.doc_type = Some(ty.into());
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// The first literal marker, if any.
    pub fn literal(&self) -> Option<&LiteralValue> {
        self.markers.iter().find_map(|m| match m {
            Marker::Literal(value) => Some(value),
            _ => None,
        })
    }

    /// The first template marker, if any.
    pub fn template(&self) -> Option<&str> {
        self.markers.iter().find_map(|m| match m {
            Marker::Template(pattern) => Some(pattern.as_str()),
            _ => None,
        })
    }

    pub fn is_inline(&self) -> bool {
        self.markers.iter().any(|m| matches!(m, Marker::Inline))
    }
}

/// The value of an enum case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaseValue {
    String(String),
    Int(i64),
}

impl fmt::Display for CaseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseValue::String(s) => f.write_str(s),
            CaseValue::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for CaseValue {
    fn from(value: &str) -> Self {
        CaseValue::String(value.to_string())
    }
}

impl From<i64> for CaseValue {
    fn from(value: i64) -> Self {
        CaseValue::Int(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    pub name: String,
    pub value: CaseValue,
}

impl EnumCase {
    pub fn new(name: impl Into<String>, value: impl Into<CaseValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassKind {
    Record(Vec<PropertyInfo>),
    Enum(Vec<EnumCase>),
}

/// Reflected metadata of one class (a struct or a field-less enum).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassInfo {
    /// Fully-qualified name (e.g. `"app::models::User"`).
    pub fqn: String,
    pub kind: ClassKind,
    /// Fully-qualified name of the parent class, if any.
    pub parent: Option<String>,
    /// Whether the class carries the generate marker (`#[derive(TypeScript)]`).
    pub generate: bool,
    pub file: Option<PathBuf>,
    pub line: Option<usize>,
}

impl ClassInfo {
    fn new(fqn: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            fqn: fqn.into(),
            kind,
            parent: None,
            generate: false,
            file: None,
            line: None,
        }
    }

    /// A record class with the given public properties.
    pub fn record(fqn: impl Into<String>, properties: Vec<PropertyInfo>) -> Self {
        Self::new(fqn, ClassKind::Record(properties))
    }

    /// An enum class with the given cases.
    pub fn enumeration(fqn: impl Into<String>, cases: Vec<EnumCase>) -> Self {
        Self::new(fqn, ClassKind::Enum(cases))
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_generate(mut self, generate: bool) -> Self {
        self.generate = generate;
        self
    }

    pub fn with_source(mut self, file: impl AsRef<Path>, line: Option<usize>) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self.line = line;
        self
    }

    /// The unqualified name: the last `::` segment.
    pub fn short_name(&self) -> &str {
        short_name(&self.fqn)
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, ClassKind::Enum(_))
    }
}

/// Last segment of a fully-qualified name.
pub fn short_name(fqn: &str) -> &str {
    fqn.rsplit(PATH_SEPARATOR).next().unwrap_or(fqn)
}

/// Source of reflected class metadata.
pub trait Reflector {
    /// Look up a class by fully-qualified name.
    fn class(&self, fqn: &str) -> Option<&ClassInfo>;
}

/// Ordered in-memory collection of reflected classes.
#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    classes: IndexMap<String, ClassInfo>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, replacing any previous class with the same name.
    pub fn insert(&mut self, class: ClassInfo) -> &mut Self {
        self.classes.insert(class.fqn.clone(), class);
        self
    }

    pub fn get(&self, fqn: &str) -> Option<&ClassInfo> {
        self.classes.get(fqn)
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.classes.contains_key(fqn)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Class name to source file, for every class with a known file.
    pub fn class_files(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.classes
            .values()
            .filter_map(|c| c.file.as_deref().map(|f| (c.fqn.as_str(), f)))
    }
}

impl Reflector for ClassMap {
    fn class(&self, fqn: &str) -> Option<&ClassInfo> {
        self.get(fqn)
    }
}

impl FromIterator<ClassInfo> for ClassMap {
    fn from_iter<I: IntoIterator<Item = ClassInfo>>(iter: I) -> Self {
        let mut map = ClassMap::new();
        for class in iter {
            map.insert(class);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("app::models::User"), "User");
        assert_eq!(short_name("User"), "User");
        let class = ClassInfo::record("app::Point", vec![]);
        assert_eq!(class.short_name(), "Point");
    }

    #[test]
    fn test_property_markers() {
        let prop = PropertyInfo::new("kind")
            .with_type("string")
            .with_marker(Marker::Template("id-{number}".to_string()))
            .with_marker(Marker::Literal(LiteralValue::Int(1)))
            .with_marker(Marker::Literal(LiteralValue::Int(2)));
        assert_eq!(prop.literal(), Some(&LiteralValue::Int(1)));
        assert_eq!(prop.template(), Some("id-{number}"));
        assert!(!prop.is_inline());
        let prop = PropertyInfo::new("x").with_marker(Marker::Inline);
        assert!(prop.is_inline());
    }

    #[test]
    fn test_class_map_keeps_insertion_order() {
        let map: ClassMap = [
            ClassInfo::record("b::Second", vec![]),
            ClassInfo::enumeration("a::First", vec![EnumCase::new("A", 1)]),
        ]
        .into_iter()
        .collect();
        let names: Vec<_> = map.iter().map(|c| c.fqn.as_str()).collect();
        assert_eq!(names, vec!["b::Second", "a::First"]);
        assert!(map.class("a::First").is_some_and(ClassInfo::is_enum));
        assert!(map.class("missing").is_none());
    }

    #[test]
    fn test_class_files() {
        let mut map = ClassMap::new();
        map.insert(
            ClassInfo::record("app::A", vec![])
                .with_source("src/a.rs", Some(3)),
        );
        map.insert(ClassInfo::record("app::B", vec![]));
        let files: Vec<_> = map.class_files().collect();
        assert_eq!(files, vec![("app::A", Path::new("src/a.rs"))]);
    }
}
