//! Per-run generation state and rendering options.

use crate::error::SourceLocation;
use crate::queue::WorkQueue;
use crate::reflect::{ClassInfo, PropertyInfo, Reflector};
use crate::replacements::TypeReplacements;

/// How named enums are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnumStyle {
    /// `export enum Name { A = "a", }`
    #[default]
    NativeEnum,
    /// `export type Name = "a" | "b";`
    UnionOfLiterals,
}

/// How named records are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordStyle {
    /// `export interface Name { .. }`
    #[default]
    Interface,
    /// `export type Name = { .. }`
    TypeAlias,
}

/// The property whose type is being converted, with its declaring class.
///
/// Markers are read from the scope, so only the atoms of that property's
/// own descriptor see them. Inline-expanded classes convert their
/// properties under a fresh scope.
#[derive(Debug, Clone, Copy)]
pub struct PropertyScope<'a> {
    pub property: &'a PropertyInfo,
    pub class: &'a ClassInfo,
}

impl<'a> PropertyScope<'a> {
    pub fn new(property: &'a PropertyInfo, class: &'a ClassInfo) -> Self {
        Self { property, class }
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation {
            class: self.class.fqn.clone(),
            property: self.property.name.clone(),
            file: self.class.file.clone(),
            line: self.property.line.or(self.class.line),
        }
    }
}

/// State owned by a single `generate` call.
pub struct GenerationContext<'a> {
    pub queue: WorkQueue,
    pub replacements: &'a TypeReplacements,
    pub reflector: &'a dyn Reflector,
    /// Classes currently being expanded inline, innermost last.
    pub(crate) inline_stack: Vec<String>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        queue: WorkQueue,
        replacements: &'a TypeReplacements,
        reflector: &'a dyn Reflector,
    ) -> Self {
        Self {
            queue,
            replacements,
            reflector,
            inline_stack: Vec::new(),
        }
    }
}

/// Options threaded through rendering.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub indent: String,
    pub depth: usize,
    pub enum_style: EnumStyle,
    pub record_style: RecordStyle,
}

impl RenderContext {
    pub fn new(
        indent: impl Into<String>,
        enum_style: EnumStyle,
        record_style: RecordStyle,
    ) -> Self {
        Self {
            indent: indent.into(),
            depth: 0,
            enum_style,
            record_style,
        }
    }

    /// A copy one level deeper.
    pub fn increase_depth(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Indentation for `extra` levels below the current depth.
    pub fn indentation(&self, extra: usize) -> String {
        self.indent.repeat(self.depth + extra)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new("\t", EnumStyle::default(), RecordStyle::default())
    }
}
