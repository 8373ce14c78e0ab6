//! Declaration generator: configuration, the expansion loop and output.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::context::{EnumStyle, GenerationContext, RecordStyle, RenderContext};
use crate::converter::convert_properties;
use crate::discovery::discover;
use crate::error::{Error, Result};
use crate::namespace::Root;
use crate::queue::WorkQueue;
use crate::reflect::{ClassInfo, ClassKind, ClassMap, Reflector};
use crate::replacements::TypeReplacements;
use crate::types::{Declaration, EnumDecl, Record};

/// Derive name that marks a type for generation.
pub const DEFAULT_MARKER: &str = "TypeScript";

/// Default output file of [`CodeGenerator::write`].
pub const DEFAULT_OUTPUT_PATH: &str = "generated.d.ts";

/// Generates a TypeScript declaration file from reflected classes.
///
/// Classes come from Rust sources ([`add_source_dir`](CodeGenerator::add_source_dir)
/// and friends) or are added directly with [`add_class_info`](CodeGenerator::add_class_info).
/// Generation starts from the requested classes and follows every class
/// they reference, so only the roots need to be named.
///
/// # Type replacements
///
/// A replacement maps a type descriptor to verbatim TypeScript text. The
/// table starts empty; see [`TypeReplacements`] for the opt-in built-ins.
///
/// # Example
///
/// ```
/// use typedecl_codegen::{ClassInfo, CodeGenerator, PropertyInfo};
///
/// let mut generator = CodeGenerator::new();
/// generator.set_indent("  ").add_class_info(ClassInfo::record(
///     "app::Config",
///     vec![
///         PropertyInfo::new("name").with_type("string"),
///         PropertyInfo::new("retries").with_type("?int"),
///     ],
/// ));
///
/// let code = generator.generate(&["app::Config"]).unwrap();
/// assert!(code.contains("declare namespace app {"));
/// assert!(code.contains("retries: number | null"));
/// ```
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    /// Reflected classes, keyed by fully-qualified name.
    pub(crate) classes: ClassMap,

    pub(crate) replacements: TypeReplacements,

    indent: String,

    output_path: PathBuf,

    enum_style: EnumStyle,

    record_style: RecordStyle,

    /// Directories whose marked classes are generated without being named.
    discovery_dirs: Vec<PathBuf>,

    /// Derive names that set the generate flag on extracted classes.
    pub(crate) markers: Vec<String>,

    /// Classes always generated, in addition to the ones passed to `generate`.
    requested: Vec<String>,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            classes: ClassMap::new(),
            replacements: TypeReplacements::new(),
            indent: "\t".to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            enum_style: EnumStyle::default(),
            record_style: RecordStyle::default(),
            discovery_dirs: Vec::new(),
            markers: vec![DEFAULT_MARKER.to_string()],
            requested: Vec::new(),
        }
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation unit (default: one tab).
    pub fn set_indent(&mut self, indent: impl Into<String>) -> &mut Self {
        self.indent = indent.into();
        self
    }

    /// Replace a type descriptor with verbatim TypeScript.
    ///
    /// The name is matched against whole atoms after `?` is stripped:
    /// a fully-qualified class name (`"app::Money"`) or a scalar keyword
    /// (`"int"`).
    pub fn register_type(
        &mut self,
        name: impl Into<String>,
        typescript: impl Into<String>,
    ) -> &mut Self {
        self.replacements.register(name, typescript);
        self
    }

    pub fn unregister_type(&mut self, name: &str) -> &mut Self {
        self.replacements.unregister(name);
        self
    }

    /// Replace the whole replacement table.
    pub fn set_type_replacements(&mut self, replacements: TypeReplacements) -> &mut Self {
        self.replacements = replacements;
        self
    }

    pub fn replacements(&self) -> &TypeReplacements {
        &self.replacements
    }

    pub fn set_output_path(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.output_path = path.as_ref().to_path_buf();
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn set_enum_style(&mut self, style: EnumStyle) -> &mut Self {
        self.enum_style = style;
        self
    }

    pub fn set_record_style(&mut self, style: RecordStyle) -> &mut Self {
        self.record_style = style;
        self
    }

    /// Generate every marked class whose source file lies under `dir`.
    ///
    /// The directory is checked when generating, not here.
    pub fn add_discovery_dir(&mut self, dir: impl AsRef<Path>) -> &mut Self {
        self.discovery_dirs.push(dir.as_ref().to_path_buf());
        self
    }

    /// Treat another derive name as the generate marker.
    ///
    /// Must be called before sources are added.
    pub fn add_marker(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if !self.markers.contains(&name) {
            self.markers.push(name);
        }
        self
    }

    /// Always generate the given class.
    pub fn add_class(&mut self, fqn: impl Into<String>) -> &mut Self {
        self.requested.push(fqn.into());
        self
    }

    /// Add reflected class metadata directly.
    pub fn add_class_info(&mut self, class: ClassInfo) -> &mut Self {
        self.classes.insert(class);
        self
    }

    /// All reflected classes.
    pub fn classes(&self) -> &ClassMap {
        &self.classes
    }

    fn render_context(&self) -> RenderContext {
        RenderContext::new(self.indent.clone(), self.enum_style, self.record_style)
    }

    /// Seed classes: explicit, then added, then discovered; duplicates removed.
    fn seed_classes<S: AsRef<str>>(&self, classes: &[S]) -> Result<Vec<String>> {
        let mut seeds: Vec<String> = Vec::new();
        let explicit = classes
            .iter()
            .map(|c| c.as_ref().to_string())
            .chain(self.requested.iter().cloned());

        for name in explicit {
            if self.classes.class(&name).is_none() {
                return Err(Error::Configuration(format!("unknown class `{name}`")));
            }
            if !seeds.contains(&name) {
                seeds.push(name);
            }
        }

        if !self.discovery_dirs.is_empty() {
            for name in discover(
                self.discovery_dirs.as_slice(),
                self.classes.class_files(),
                &self.classes,
            )? {
                if !seeds.contains(&name) {
                    seeds.push(name);
                }
            }
        }

        if seeds.is_empty() {
            return Err(Error::Configuration("no classes to generate".to_string()));
        }
        Ok(seeds)
    }

    /// Build the declaration tree for `classes` and everything they reference.
    pub fn generate_declarations<S: AsRef<str>>(&self, classes: &[S]) -> Result<Root> {
        let seeds = self.seed_classes(classes)?;
        generate_declarations(&self.classes, &self.replacements, seeds)
    }

    /// Generate the declaration file text.
    pub fn generate<S: AsRef<str>>(&self, classes: &[S]) -> Result<String> {
        let root = self.generate_declarations(classes)?;
        Ok(root.render(&self.render_context()))
    }

    /// Generate and write to the configured output path.
    pub fn write<S: AsRef<str>>(&self, classes: &[S]) -> Result<()> {
        self.write_to_file(&self.output_path, classes)
    }

    /// Generate and write to `path`.
    ///
    /// Nothing is written when generation fails.
    pub fn write_to_file<S: AsRef<str>>(
        &self,
        path: impl AsRef<Path>,
        classes: &[S],
    ) -> Result<()> {
        let path = path.as_ref();
        let code = self.generate(classes)?;

        let io_error = |source| Error::Io {
            path: Some(path.to_path_buf()),
            source,
        };

        if let Ok(metadata) = fs::metadata(path)
            && metadata.permissions().readonly()
        {
            return Err(io_error(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "output file is read-only",
            )));
        }

        fs::write(path, &code).map_err(io_error)?;
        tracing::info!(path = %path.display(), bytes = code.len(), "wrote declarations");
        Ok(())
    }

    /// Generate and write to any writer.
    pub fn write_to<W: Write, S: AsRef<str>>(&self, mut writer: W, classes: &[S]) -> Result<()> {
        let code = self.generate(classes)?;
        writer
            .write_all(code.as_bytes())
            .map_err(|source| Error::Io { path: None, source })
    }
}

/// Expand `seeds` and every class they reference into a declaration tree.
///
/// Classes are expanded in discovery order. Each is expanded once, so
/// reference cycles terminate.
pub fn generate_declarations<I, S>(
    reflector: &dyn Reflector,
    replacements: &TypeReplacements,
    seeds: I,
) -> Result<Root>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut ctx = GenerationContext::new(WorkQueue::from_names(seeds), replacements, reflector);
    let mut root = Root::new();

    while let Some(name) = ctx.queue.shift() {
        let Some(class) = reflector.class(&name) else {
            return Err(Error::Configuration(format!("unknown class `{name}`")));
        };
        tracing::debug!(class = %name, "expanding");

        let declaration = match &class.kind {
            ClassKind::Record(properties) => Declaration::Record(Record {
                name: class.short_name().to_string(),
                properties: convert_properties(&mut ctx, class, properties)?,
            }),
            ClassKind::Enum(cases) => {
                let mut decl = EnumDecl::new(class.short_name());
                for case in cases {
                    decl.add_case(case.name.clone(), case.value.clone());
                }
                Declaration::Enum(decl)
            }
        };
        root.add_declaration(&name, declaration);
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{EnumCase, Marker, PropertyInfo};

    fn user_and_status() -> CodeGenerator {
        let mut generator = CodeGenerator::new();
        generator
            .add_class_info(ClassInfo::record(
                "app::User",
                vec![
                    PropertyInfo::new("name").with_type("string"),
                    PropertyInfo::new("status").with_type("app::Status"),
                ],
            ))
            .add_class_info(ClassInfo::enumeration(
                "app::Status",
                vec![EnumCase::new("Active", "active"), EnumCase::new("Banned", "banned")],
            ));
        generator
    }

    #[test]
    fn test_generate_follows_references() {
        let code = user_and_status().generate(&["app::User"]).unwrap();
        assert!(code.starts_with("declare namespace app {\n"));
        assert!(code.contains("\texport interface User {\n"));
        assert!(code.contains("\t\tstatus: app.Status\n"));
        assert!(code.contains("\texport enum Status {\n"));
        assert!(code.contains("\t\tActive = \"active\",\n"));
        let status = code.find("enum Status").unwrap();
        assert!(code.find("User").unwrap() < status);
    }

    #[test]
    fn test_generate_styles() {
        let mut generator = user_and_status();
        generator
            .set_indent("  ")
            .set_enum_style(EnumStyle::UnionOfLiterals)
            .set_record_style(RecordStyle::TypeAlias);
        let code = generator.generate(&["app::User"]).unwrap();
        assert!(code.contains("  export type User = {\n"));
        assert!(code.contains("  export type Status = \"active\" | \"banned\";\n"));
    }

    #[test]
    fn test_no_classes_is_configuration_error() {
        let err = CodeGenerator::new().generate::<&str>(&[]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_unknown_class_is_configuration_error() {
        let err = user_and_status().generate(&["app::Missing"]).unwrap_err();
        assert!(matches!(err, Error::Configuration(ref msg) if msg.contains("app::Missing")));
    }

    #[test]
    fn test_add_class_merges_and_dedupes() {
        let mut generator = user_and_status();
        generator.add_class("app::Status").add_class("app::User");
        let code = generator.generate(&["app::User"]).unwrap();
        assert_eq!(code.matches("export interface User").count(), 1);
        assert_eq!(code.matches("export enum Status").count(), 1);
        let status = code.find("enum Status").unwrap();
        assert!(code.find("User").unwrap() < status);
    }

    #[test]
    fn test_type_resolution_error_is_fatal() {
        let mut generator = CodeGenerator::new();
        generator.add_class_info(ClassInfo::record(
            "app::Bad",
            vec![PropertyInfo::new("cb").with_type("callable")],
        ));
        let err = generator.generate(&["app::Bad"]).unwrap_err();
        let Error::TypeResolution(err) = err else {
            panic!("expected a type resolution error");
        };
        assert_eq!(err.text, "callable");
        assert_eq!(err.location.unwrap().class, "app::Bad");
    }

    #[test]
    fn test_register_type() {
        let mut generator = user_and_status();
        generator.register_type("app::Status", "string");
        let code = generator.generate(&["app::User"]).unwrap();
        assert!(code.contains("status: string"));
        assert!(!code.contains("enum Status"));

        generator.unregister_type("app::Status");
        let code = generator.generate(&["app::User"]).unwrap();
        assert!(code.contains("status: app.Status"));
    }

    #[test]
    fn test_inline_class_is_not_declared() {
        let mut generator = CodeGenerator::new();
        generator
            .add_class_info(ClassInfo::record(
                "app::Holder",
                vec![PropertyInfo::new("status")
                    .with_type("app::Status")
                    .with_marker(Marker::Inline)],
            ))
            .add_class_info(ClassInfo::enumeration(
                "app::Status",
                vec![EnumCase::new("On", 1), EnumCase::new("Off", 0)],
            ));
        let code = generator.generate(&["app::Holder"]).unwrap();
        assert!(code.contains("status: 1 | 0;"));
        assert!(!code.contains("enum Status"));
    }

    #[test]
    fn test_write_to() {
        let mut out = Vec::new();
        user_and_status().write_to(&mut out, &["app::Status"]).unwrap();
        let code = String::from_utf8(out).unwrap();
        assert!(code.contains("export enum Status"));
        assert!(!code.contains("User"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_to_failure_is_io_error() {
        let err = user_and_status()
            .write_to(FailingWriter, &["app::Status"])
            .unwrap_err();
        assert!(matches!(err, Error::Io { path: None, .. }));
    }

    #[test]
    fn test_generate_declarations_with_custom_reflector() {
        let classes = user_and_status().classes().clone();
        let root =
            generate_declarations(&classes, &TypeReplacements::new(), ["app::Status"]).unwrap();
        assert!(root.namespaces["app"].declarations.contains_key("Status"));
    }
}
