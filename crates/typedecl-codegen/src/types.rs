//! Declaration node model.
//!
//! [`TsType`] is a TypeScript type expression as it appears in property
//! position. [`Declaration`] is a named top-level item placed in the
//! namespace tree. Rendering lives in [`crate::render`].

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::reflect::CaseValue;

/// Built-in TypeScript keyword types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Boolean,
    Number,
    String,
    True,
    False,
    Null,
    Undefined,
    Object,
    Any,
    Unknown,
    Never,
}

impl Scalar {
    pub fn as_str(self) -> &'static str {
        match self {
            Scalar::Boolean => "boolean",
            Scalar::Number => "number",
            Scalar::String => "string",
            Scalar::True => "true",
            Scalar::False => "false",
            Scalar::Null => "null",
            Scalar::Undefined => "undefined",
            Scalar::Object => "object",
            Scalar::Any => "any",
            Scalar::Unknown => "unknown",
            Scalar::Never => "never",
        }
    }

    /// `unknown`, `any` and `null` already admit `null`, so a nullable
    /// request leaves them as they are.
    pub fn is_implicitly_nullable(self) -> bool {
        matches!(self, Scalar::Unknown | Scalar::Any | Scalar::Null)
    }
}

/// Shape of a [`TsType::Container`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// `T[]`
    List,
    /// `[T, ...T[]]`
    NonEmptyList,
    /// `{ [key: string]: T }`
    StringIndexMap,
}

/// Ordered property list: the first insertion of a name wins.
pub type Properties = IndexMap<String, TsType>;

/// A TypeScript type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    Scalar(Scalar),
    /// Emitted verbatim (replacements, literals, templates).
    Raw(String),
    /// Fully-qualified name of another generated declaration.
    Reference(String),
    Union(Vec<TsType>),
    Container {
        kind: ContainerKind,
        inner: Box<TsType>,
    },
    /// Anonymous object type expanded at the use site.
    InlineRecord(Properties),
    /// Union of enum case values expanded at the use site.
    InlineEnum(Vec<CaseValue>),
}

impl TsType {
    pub fn unknown() -> Self {
        TsType::Scalar(Scalar::Unknown)
    }

    pub fn null() -> Self {
        TsType::Scalar(Scalar::Null)
    }

    pub fn container(kind: ContainerKind, inner: TsType) -> Self {
        TsType::Container {
            kind,
            inner: Box::new(inner),
        }
    }

    /// Wrap into `base | null` unless the base already admits `null`.
    pub fn nullable(self) -> Self {
        match self {
            TsType::Scalar(s) if s.is_implicitly_nullable() => self,
            base => TsType::Union(vec![base, TsType::null()]),
        }
    }
}

/// Insert a property unless one with the same name already exists.
///
/// Returns `false` when the name was already taken.
pub fn insert_property(properties: &mut Properties, name: impl Into<String>, ty: TsType) -> bool {
    match properties.entry(name.into()) {
        Entry::Occupied(_) => false,
        Entry::Vacant(slot) => {
            slot.insert(ty);
            true
        }
    }
}

/// A named record declaration (`interface` or object type alias).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub properties: Properties,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Properties::new(),
        }
    }

    pub fn add_property(&mut self, name: impl Into<String>, ty: TsType) -> &mut Self {
        insert_property(&mut self.properties, name, ty);
        self
    }
}

/// A named enum declaration (native `enum` or union type alias).
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub cases: IndexMap<String, CaseValue>,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: IndexMap::new(),
        }
    }

    pub fn add_case(&mut self, name: impl Into<String>, value: CaseValue) -> &mut Self {
        self.cases.entry(name.into()).or_insert(value);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Record(Record),
    Enum(EnumDecl),
}

impl Declaration {
    /// Short (unqualified) name of the declaration.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Record(r) => &r.name,
            Declaration::Enum(e) => &e.name,
        }
    }
}
