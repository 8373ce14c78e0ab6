use std::fs;

use indoc::indoc;
use typedecl_codegen::{
    ClassInfo, CodeGenerator, EnumCase, EnumStyle, Error, LiteralValue, Marker, PropertyInfo,
    RecordStyle,
};

fn status_enum() -> ClassInfo {
    ClassInfo::enumeration(
        "app::Status",
        vec![EnumCase::new("Active", "active"), EnumCase::new("Banned", "banned")],
    )
}

#[test]
fn test_record_with_native_string_enum() {
    let mut generator = CodeGenerator::new();
    generator
        .set_indent("    ")
        .add_class_info(ClassInfo::record(
            "app::User",
            vec![
                PropertyInfo::new("name").with_type("string"),
                PropertyInfo::new("status").with_type("app::Status"),
            ],
        ))
        .add_class_info(status_enum());

    let expected = indoc! {r#"
        declare namespace app {
            export interface User {
                name: string
                status: app.Status
            }
            export enum Status {
                Active = "active",
                Banned = "banned",
            }
        }
    "#};
    assert_eq!(generator.generate(&["app::User"]).unwrap(), expected);
}

#[test]
fn test_doc_type_overrides_array() {
    let mut generator = CodeGenerator::new();
    generator.set_indent("  ").add_class_info(ClassInfo::record(
        "app::Scores",
        vec![
            PropertyInfo::new("values")
                .with_type("array")
                .with_doc_type("int[]"),
        ],
    ));

    let expected = indoc! {"
        declare namespace app {
          export interface Scores {
            values: number[]
          }
        }
    "};
    assert_eq!(generator.generate(&["app::Scores"]).unwrap(), expected);
}

#[test]
fn test_inline_int_enum_as_literal_union() {
    let mut generator = CodeGenerator::new();
    generator
        .set_indent("  ")
        .set_enum_style(EnumStyle::UnionOfLiterals)
        .add_class_info(ClassInfo::record(
            "app::Holder",
            vec![
                PropertyInfo::new("level")
                    .with_type("app::Level")
                    .with_marker(Marker::Inline),
            ],
        ))
        .add_class_info(ClassInfo::enumeration(
            "app::Level",
            vec![EnumCase::new("Low", 1), EnumCase::new("High", 2)],
        ));

    let expected = indoc! {"
        declare namespace app {
          export interface Holder {
            level: 1 | 2;
          }
        }
    "};
    assert_eq!(generator.generate(&["app::Holder"]).unwrap(), expected);
}

#[test]
fn test_self_reference_cycle() {
    let mut generator = CodeGenerator::new();
    generator.add_class_info(ClassInfo::record(
        "ns::Node",
        vec![
            PropertyInfo::new("value").with_type("int"),
            PropertyInfo::new("next").with_type("?ns::Node"),
        ],
    ));

    let code = generator.generate(&["ns::Node"]).unwrap();
    assert_eq!(code.matches("export interface Node").count(), 1);
    assert!(code.contains("\t\tnext: ns.Node | null\n"));
}

#[test]
fn test_mutual_references_in_discovery_order() {
    let mut generator = CodeGenerator::new();
    generator
        .add_class_info(ClassInfo::record(
            "app::A",
            vec![PropertyInfo::new("b").with_type("app::B")],
        ))
        .add_class_info(ClassInfo::record(
            "app::B",
            vec![
                PropertyInfo::new("a").with_type("app::A"),
                PropertyInfo::new("c").with_type("list<app::C>"),
            ],
        ))
        .add_class_info(ClassInfo::record("app::C", vec![]));

    let code = generator.generate(&["app::A"]).unwrap();
    let a = code.find("interface A").unwrap();
    let b = code.find("interface B").unwrap();
    let c = code.find("interface C").unwrap();
    assert!(a < b && b < c);
    assert!(code.contains("c: app.C[]"));
}

#[test]
fn test_generation_is_idempotent() {
    let mut generator = CodeGenerator::new();
    generator
        .add_class_info(ClassInfo::record(
            "app::User",
            vec![PropertyInfo::new("status").with_type("?app::Status")],
        ))
        .add_class_info(status_enum());

    let first = generator.generate(&["app::User"]).unwrap();
    let second = generator.generate(&["app::User"]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_resolution_precedence() {
    let mut generator = CodeGenerator::new();
    generator
        .register_type("int", "bigint")
        .register_type("app::Status", "string")
        .add_class_info(status_enum())
        .add_class_info(ClassInfo::record(
            "app::Mixed",
            vec![
                PropertyInfo::new("literal")
                    .with_type("int")
                    .with_marker(Marker::Literal(LiteralValue::Int(7))),
                PropertyInfo::new("replaced").with_type("int"),
                PropertyInfo::new("builtin").with_type("float"),
                PropertyInfo::new("replaced_class").with_type("app::Status"),
                PropertyInfo::new("missing").with_type("app::Nowhere"),
                PropertyInfo::new("dupes").with_type("float|float|null"),
                PropertyInfo::new("elided").with_type("?mixed"),
            ],
        ));

    let code = generator.generate(&["app::Mixed"]).unwrap();
    assert!(code.contains("literal: 7\n"));
    assert!(code.contains("replaced: bigint\n"));
    assert!(code.contains("builtin: number\n"));
    assert!(code.contains("replaced_class: string\n"));
    assert!(code.contains("missing: unknown\n"));
    assert!(code.contains("dupes: number | null\n"));
    assert!(code.contains("elided: any\n"));
    assert!(!code.contains("enum Status"));
}

#[test]
fn test_quoted_property_names() {
    let mut generator = CodeGenerator::new();
    generator.add_class_info(ClassInfo::record(
        "app::Headers",
        vec![
            PropertyInfo::new("content-type").with_type("string"),
            PropertyInfo::new("plain").with_type("string"),
        ],
    ));

    let code = generator.generate(&["app::Headers"]).unwrap();
    assert!(code.contains("\"content-type\": string\n"));
    assert!(code.contains("\tplain: string\n"));
}

#[test]
fn test_source_pipeline() {
    let mut generator = CodeGenerator::new();
    generator.set_indent("  ").add_source_str(
        "app::models",
        indoc! {r#"
            use std::collections::HashMap;
            use typedecl_codegen::TypeScript;

            #[derive(TypeScript)]
            #[serde(rename_all = "camelCase")]
            pub struct Account {
                pub user_name: String,
                pub age: Option<u32>,
                pub roles: Vec<Role>,
                pub settings: HashMap<String, bool>,
                #[ts(literal = "account")]
                pub kind: String,
                secret: String,
            }

            #[derive(TypeScript)]
            #[serde(rename_all = "lowercase")]
            pub enum Role {
                Admin,
                Member,
            }
        "#},
    );

    let expected = indoc! {r#"
        declare namespace app {
          export namespace models {
            export interface Account {
              userName: string
              age: number | null
              roles: app.models.Role[]
              settings: { [key: string]: boolean }
              kind: "account"
            }
            export enum Role {
              Admin = "admin",
              Member = "member",
            }
          }
        }
    "#};
    assert_eq!(
        generator.generate(&["app::models::Account"]).unwrap(),
        expected
    );
}

#[test]
fn test_nested_options_stay_nullable() {
    let mut generator = CodeGenerator::new();
    generator.add_source_str(
        "app",
        indoc! {"
            pub struct Patch {
                pub name: Option<Option<String>>,
                pub scores: Option<Option<Vec<i32>>>,
            }
        "},
    );

    let code = generator.generate(&["app::Patch"]).unwrap();
    assert!(code.contains("name: string | null\n"));
    assert!(code.contains("scores: number[] | null\n"));
}

#[test]
fn test_type_alias_records() {
    let mut generator = CodeGenerator::new();
    generator
        .set_indent("  ")
        .set_record_style(RecordStyle::TypeAlias)
        .add_class_info(ClassInfo::record(
            "Point",
            vec![PropertyInfo::new("x").with_type("float")],
        ));

    let code = generator.generate(&["Point"]).unwrap();
    assert_eq!(code, "export type Point = {\n  x: number\n}\n");
}

#[test]
fn test_discovery_from_source_dir() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(
        src.join("lib.rs"),
        indoc! {"
            pub mod shapes;

            pub struct Unmarked {
                pub x: i32,
            }
        "},
    )
    .unwrap();
    fs::write(
        src.join("shapes.rs"),
        indoc! {"
            #[derive(TypeScript)]
            pub struct Circle {
                pub radius: f64,
            }
        "},
    )
    .unwrap();

    let mut generator = CodeGenerator::new();
    generator.add_source_dir(&src, "geo").unwrap().add_discovery_dir(&src);

    let code = generator.generate::<&str>(&[]).unwrap();
    assert!(code.contains("export namespace shapes"));
    assert!(code.contains("radius: number"));
    assert!(!code.contains("Unmarked"));
}

#[test]
fn test_missing_discovery_dir() {
    let dir = tempfile::tempdir().unwrap();
    let mut generator = CodeGenerator::new();
    generator
        .add_class_info(status_enum())
        .add_discovery_dir(dir.path().join("missing"));

    let err = generator.generate(&["app::Status"]).unwrap_err();
    assert!(matches!(err, Error::Discovery { .. }));
}

#[test]
fn test_write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("types.d.ts");

    let mut generator = CodeGenerator::new();
    generator.add_class_info(status_enum());
    generator.write_to_file(&path, &["app::Status"]).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, generator.generate(&["app::Status"]).unwrap());
}

#[test]
fn test_write_to_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.d.ts");

    let mut generator = CodeGenerator::new();
    generator
        .set_output_path(&path)
        .add_class_info(status_enum())
        .add_class("app::Status");
    generator.write::<&str>(&[]).unwrap();

    assert!(fs::read_to_string(&path).unwrap().contains("export enum Status"));
}

#[test]
fn test_read_only_output_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locked.d.ts");
    fs::write(&path, "original").unwrap();
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&path, permissions).unwrap();

    let mut generator = CodeGenerator::new();
    generator.add_class_info(status_enum());
    let err = generator.write_to_file(&path, &["app::Status"]).unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
}

#[test]
fn test_failed_generation_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("types.d.ts");

    let mut generator = CodeGenerator::new();
    generator.add_class_info(ClassInfo::record(
        "app::Bad",
        vec![PropertyInfo::new("handler").with_type("callable")],
    ));

    let err = generator.write_to_file(&path, &["app::Bad"]).unwrap_err();
    assert!(matches!(err, Error::TypeResolution(_)));
    assert!(!path.exists());
}

#[test]
fn test_write_to_writer() {
    let mut generator = CodeGenerator::new();
    generator.add_class_info(status_enum());

    let mut buffer = Vec::new();
    generator.write_to(&mut buffer, &["app::Status"]).unwrap();
    let code = String::from_utf8(buffer).unwrap();
    assert!(code.starts_with("declare namespace app {"));
}
