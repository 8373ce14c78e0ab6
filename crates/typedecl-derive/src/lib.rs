//! Proc-macro providing the `#[derive(TypeScript)]` attribute.
//!
//! This macro is a **no-op annotation** - it doesn't generate any code.
//! It marks a type for auto-discovery by `typedecl-codegen` and registers
//! the `#[ts(...)]` helper attribute so field markers compile.
//!
//! # Usage
//!
//! 1. Annotate your types with `#[derive(TypeScript)]`
//! 2. Use `CodeGenerator` in your build.rs to generate the declarations
//!
//! # Example
//!
//! ```rust,ignore
//! use typedecl_codegen::TypeScript;
//!
//! #[derive(TypeScript)]
//! pub struct Person {
//!     pub name: String,
//!     #[ts(literal = "person")]
//!     pub kind: String,
//!     #[ts(inline)]
//!     pub status: Status,
//! }
//! ```
//!
//! Then in your build.rs:
//!
//! ```rust,ignore
//! use typedecl_codegen::CodeGenerator;
//!
//! fn main() {
//!     let mut generator = CodeGenerator::new();
//!     generator.add_source_dir("src", "app").unwrap();
//!     generator.add_discovery_dir("src");
//!     generator.write_to_file("types.d.ts", &[] as &[&str]).unwrap();
//! }
//! ```

use proc_macro::TokenStream;

/// Marker derive macro for TypeScript declaration generation.
///
/// This macro is a no-op - it doesn't generate any code at compile time.
/// The `ts` helper attribute (`inline`, `literal`, `raw`, `template`,
/// `value`, `extends`) is read from source by `CodeGenerator`.
#[proc_macro_derive(TypeScript, attributes(ts))]
pub fn derive_typescript(_input: TokenStream) -> TokenStream {
    // No-op: declarations are generated from source in build.rs
    TokenStream::new()
}
