//! TypeScript text rendering of the declaration tree.

use crate::context::{EnumStyle, RecordStyle, RenderContext};
use crate::namespace::{Namespace, Root};
use crate::naming::{quote_string, ts_fqcn, ts_prop};
use crate::reflect::CaseValue;
use crate::types::{ContainerKind, Declaration, EnumDecl, Record, TsType};

fn case_literal(value: &CaseValue) -> String {
    match value {
        CaseValue::String(s) => quote_string(s),
        CaseValue::Int(n) => n.to_string(),
    }
}

fn literal_union<'a>(values: impl IntoIterator<Item = &'a CaseValue>) -> String {
    let rendered: Vec<String> = values.into_iter().map(case_literal).collect();
    if rendered.is_empty() {
        "never".to_string()
    } else {
        rendered.join(" | ")
    }
}

impl TsType {
    /// Render as the complete type of a property.
    pub fn render(&self, ctx: &RenderContext) -> String {
        match self {
            TsType::InlineEnum(values) => format!("{};", literal_union(values)),
            _ => self.render_member(ctx),
        }
    }

    /// Render as part of a larger type expression.
    fn render_member(&self, ctx: &RenderContext) -> String {
        match self {
            TsType::Scalar(scalar) => scalar.as_str().to_string(),
            TsType::Raw(text) => text.clone(),
            TsType::Reference(fqn) => ts_fqcn(fqn),
            TsType::Union(members) => {
                let mut seen: Vec<String> = Vec::with_capacity(members.len());
                for member in members {
                    let rendered = member.render_member(ctx);
                    if !seen.contains(&rendered) {
                        seen.push(rendered);
                    }
                }
                seen.join(" | ")
            }
            TsType::Container { kind, inner } => {
                let mut element = inner.render_member(ctx);
                let grouped = match inner.as_ref() {
                    TsType::Union(_) => true,
                    TsType::InlineEnum(values) => values.len() > 1,
                    _ => false,
                };
                if grouped {
                    element = format!("({element})");
                }
                match kind {
                    ContainerKind::List => format!("{element}[]"),
                    ContainerKind::NonEmptyList => format!("[{element}, ...{element}[]]"),
                    ContainerKind::StringIndexMap => format!("{{ [key: string]: {element} }}"),
                }
            }
            TsType::InlineRecord(properties) => {
                let inner_ctx = ctx.increase_depth();
                let prop_indent = ctx.indentation(2);
                let mut ts = String::from("{\n");
                for (name, ty) in properties {
                    ts.push_str(&format!(
                        "{prop_indent}{}: {}\n",
                        ts_prop(name),
                        ty.render(&inner_ctx)
                    ));
                }
                ts.push_str(&ctx.indentation(1));
                ts.push('}');
                ts
            }
            TsType::InlineEnum(values) => literal_union(values),
        }
    }
}

impl Record {
    pub fn render(&self, ctx: &RenderContext) -> String {
        let indent = ctx.indentation(0);
        let prop_indent = ctx.indentation(1);

        let mut ts = match ctx.record_style {
            RecordStyle::Interface => format!("{indent}export interface {} {{\n", self.name),
            RecordStyle::TypeAlias => format!("{indent}export type {} = {{\n", self.name),
        };
        for (name, ty) in &self.properties {
            let name = ts_prop(name);
            ts.push_str(&format!("{prop_indent}{name}: {}\n", ty.render(ctx)));
        }
        ts.push_str(&indent);
        ts.push_str("}\n");
        ts
    }
}

impl EnumDecl {
    pub fn render(&self, ctx: &RenderContext) -> String {
        let indent = ctx.indentation(0);

        match ctx.enum_style {
            EnumStyle::NativeEnum => {
                let case_indent = ctx.indentation(1);
                let mut ts = format!("{indent}export enum {} {{\n", self.name);
                for (name, value) in &self.cases {
                    ts.push_str(&format!(
                        "{case_indent}{} = {},\n",
                        ts_prop(name),
                        case_literal(value)
                    ));
                }
                ts.push_str(&indent);
                ts.push_str("}\n");
                ts
            }
            EnumStyle::UnionOfLiterals => format!(
                "{indent}export type {} = {};\n",
                self.name,
                literal_union(self.cases.values())
            ),
        }
    }
}

impl Declaration {
    pub fn render(&self, ctx: &RenderContext) -> String {
        match self {
            Declaration::Record(record) => record.render(ctx),
            Declaration::Enum(decl) => decl.render(ctx),
        }
    }
}

impl Namespace {
    /// `declare namespace` at the top level, `export namespace` below it.
    pub fn render(&self, ctx: &RenderContext) -> String {
        let indent = ctx.indentation(0);
        let keyword = if ctx.depth == 0 {
            "declare namespace"
        } else {
            "export namespace"
        };

        let mut ts = format!("{indent}{keyword} {} {{\n", self.name);
        let inner = ctx.increase_depth();
        for namespace in self.namespaces.values() {
            ts.push_str(&namespace.render(&inner));
        }
        for declaration in self.declarations.values() {
            ts.push_str(&declaration.render(&inner));
        }
        ts.push_str(&indent);
        ts.push_str("}\n");
        ts
    }
}

impl Root {
    pub fn render(&self, ctx: &RenderContext) -> String {
        let mut ts = String::new();
        for namespace in self.namespaces.values() {
            ts.push_str(&namespace.render(ctx));
        }
        for declaration in self.declarations.values() {
            ts.push_str(&declaration.render(ctx));
        }
        ts
    }
}
