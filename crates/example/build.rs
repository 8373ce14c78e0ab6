use std::env;
use std::path::PathBuf;

use typedecl_codegen::{CodeGenerator, EnumStyle, TypeReplacements};

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let src = manifest_dir.join("src");

    let mut codegen = CodeGenerator::new();
    codegen
        .set_indent("  ")
        .set_type_replacements(TypeReplacements::with_builtins())
        .register_type("typedecl_example::shop::Money", "`${number} ${string}`");

    // Every type under src/ with #[derive(TypeScript)] is a root
    codegen
        .add_source_dir(&src, "typedecl_example")
        .expect("Failed to parse sources")
        .add_discovery_dir(&src);

    codegen
        .write_to_file(out_dir.join("types.d.ts"), &[] as &[&str])
        .expect("Failed to write declarations");

    // Union-of-literals flavour for consumers without `enum` support
    codegen.set_enum_style(EnumStyle::UnionOfLiterals);
    codegen
        .write_to_file(out_dir.join("types.literals.d.ts"), &[] as &[&str])
        .expect("Failed to write declarations");

    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=build.rs");
}
