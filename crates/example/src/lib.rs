//! Example crate demonstrating typedecl-codegen usage.
//!
//! The types below are ordinary serde models. The `#[derive(TypeScript)]`
//! macro is a no-op annotation that marks the roots; the declarations are
//! generated in build.rs with `CodeGenerator` and embedded here.

pub mod shop;
pub mod users;

/// Declarations with native `enum`s.
pub const DECLARATIONS: &str = include_str!(concat!(env!("OUT_DIR"), "/types.d.ts"));

/// Declarations with enums as unions of literals.
pub const LITERAL_DECLARATIONS: &str =
    include_str!(concat!(env!("OUT_DIR"), "/types.literals.d.ts"));
