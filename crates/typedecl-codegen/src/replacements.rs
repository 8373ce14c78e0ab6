//! Explicit type substitutions.
//!
//! A replacement maps a type descriptor (a fully-qualified class name or a
//! scalar keyword) to TypeScript text emitted verbatim. Replacements are
//! consulted after property markers and before built-in and class
//! resolution, so they can take over any type the generator would
//! otherwise translate.

use std::collections::HashMap;

/// A table of descriptor -> TypeScript text substitutions.
///
/// The table starts empty. [`TypeReplacements::with_builtins`] adds
/// mappings for common third-party crates whose values serialize as
/// strings or byte buffers.
///
/// # Built-in mappings
///
/// | Descriptor | TypeScript |
/// |------------|------------|
/// | `uuid::Uuid` | `string` |
/// | `url::Url` | `string` |
/// | `chrono::DateTime` | `string` |
/// | `chrono::NaiveDate` | `string` |
/// | `chrono::NaiveDateTime` | `string` |
/// | `time::OffsetDateTime` | `string` |
/// | `rust_decimal::Decimal` | `string` |
/// | `bytes::Bytes` | `Uint8Array` |
/// | `std::time::Duration` | `{ secs: number; nanos: number }` |
///
/// # Custom mappings
///
/// ```
/// use typedecl_codegen::CodeGenerator;
///
/// let mut generator = CodeGenerator::new();
/// generator.register_type("app::Money", "`${number} ${string}`");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeReplacements {
    mappings: HashMap<String, String>,
}

impl TypeReplacements {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table pre-populated with the built-in mappings.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        table.register_builtins();
        table
    }

    /// Register all built-in mappings.
    pub fn register_builtins(&mut self) {
        for name in [
            "uuid::Uuid",
            "url::Url",
            "chrono::DateTime",
            "chrono::NaiveDate",
            "chrono::NaiveDateTime",
            "time::OffsetDateTime",
            "rust_decimal::Decimal",
        ] {
            self.register(name, "string");
        }

        self.register("bytes::Bytes", "Uint8Array");

        // serde's default representation
        self.register("std::time::Duration", "{ secs: number; nanos: number }");
    }

    /// Register a replacement. An existing entry for `name` is replaced.
    pub fn register(&mut self, name: impl Into<String>, typescript: impl Into<String>) {
        self.mappings.insert(name.into(), typescript.into());
    }

    /// Look up the replacement text for an exact descriptor.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.mappings.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mappings.contains_key(name)
    }

    /// Remove a replacement.
    pub fn unregister(&mut self, name: &str) -> Option<String> {
        self.mappings.remove(name)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TypeReplacements
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, typescript) in iter {
            table.register(name, typescript);
        }
        table
    }
}
