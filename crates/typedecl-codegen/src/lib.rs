//! # typedecl-codegen
//!
//! TypeScript declaration (`.d.ts`) generator for Rust data types. Starting
//! from a few root types, it follows every type they reference and emits
//! one `declare namespace` block per module path.
//!
//! ## Usage
//!
//! ### 1. Annotate your types with `#[derive(TypeScript)]`
//!
//! ```rust,ignore
//! use typedecl_codegen::TypeScript;
//!
//! #[derive(TypeScript)]
//! pub struct Person {
//!     pub name: String,
//!     pub age: Option<u32>,
//!     pub status: Status,
//! }
//!
//! #[derive(TypeScript)]
//! pub enum Status {
//!     Active,
//!     Inactive,
//! }
//! ```
//!
//! ### 2. Generate declarations in build.rs
//!
//! ```rust,ignore
//! // build.rs
//! use typedecl_codegen::CodeGenerator;
//!
//! fn main() {
//!     CodeGenerator::new()
//!         .add_source_dir("src", "my_app").unwrap()
//!         .add_discovery_dir("src")
//!         .write_to_file("types/generated.d.ts", &[] as &[&str]).unwrap();
//!
//!     println!("cargo:rerun-if-changed=src");
//! }
//! ```
//!
//! which produces
//!
//! ```text
//! declare namespace my_app {
//! 	export interface Person {
//! 		name: string
//! 		age: number | null
//! 		status: my_app.Status
//! 	}
//! 	export enum Status {
//! 		Active = "Active",
//! 		Inactive = "Inactive",
//! 	}
//! }
//! ```
//!
//! Types can also be described by hand with [`ClassInfo`] and
//! [`PropertyInfo`], whose types use a small descriptor language
//! (`?int`, `list<string>`, `array<string, app::User>`, ...).

mod array;
mod context;
mod converter;
mod discovery;
mod error;
mod extractor;
mod generator;
mod namespace;
mod naming;
mod queue;
mod reflect;
mod render;
mod replacements;
mod resolver;
mod types;

pub use context::{EnumStyle, GenerationContext, PropertyScope, RecordStyle, RenderContext};
pub use converter::{convert, format_literal, format_template, split_top_level};
pub use discovery::discover;
pub use error::{Error, Result, SourceLocation, TypeResolutionError};
pub use extractor::{extract_classes, module_path};
pub use generator::{CodeGenerator, DEFAULT_MARKER, DEFAULT_OUTPUT_PATH, generate_declarations};
pub use namespace::{Namespace, Root};
pub use naming::ts_prop;
pub use queue::WorkQueue;
pub use reflect::{
    CaseValue, ClassInfo, ClassKind, ClassMap, EnumCase, LiteralValue, Marker, PropertyInfo,
    Reflector,
};
pub use replacements::TypeReplacements;
pub use resolver::resolve;
pub use types::{ContainerKind, Declaration, EnumDecl, Properties, Record, Scalar, TsType};

#[cfg(feature = "derive")]
pub use typedecl_derive::TypeScript;
