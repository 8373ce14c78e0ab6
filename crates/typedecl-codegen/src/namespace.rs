//! Namespace tree assembly.
//!
//! Declarations are filed under nested namespaces mirroring the module path
//! of their fully-qualified name: `app::models::User` lands in namespace
//! `app`, child namespace `models`, as `User`.

use indexmap::IndexMap;

use crate::naming::namespace_parts;
use crate::types::Declaration;

#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    pub name: String,
    pub namespaces: IndexMap<String, Namespace>,
    pub declarations: IndexMap<String, Declaration>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespaces: IndexMap::new(),
            declarations: IndexMap::new(),
        }
    }
}

/// Top of the declaration tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Root {
    pub namespaces: IndexMap<String, Namespace>,
    /// Declarations whose name has no module path.
    pub declarations: IndexMap<String, Declaration>,
}

impl Root {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `declaration` under the namespaces of `fqn`.
    ///
    /// Namespaces are created on first use and keep their insertion order.
    /// A second declaration with the same short name in the same namespace
    /// is ignored.
    pub fn add_declaration(&mut self, fqn: &str, declaration: Declaration) {
        let mut parts = namespace_parts(fqn).into_iter();

        let declarations = match parts.next() {
            None => &mut self.declarations,
            Some(first) => {
                let mut node = self
                    .namespaces
                    .entry(first.to_string())
                    .or_insert_with(|| Namespace::new(first));
                for part in parts {
                    node = node
                        .namespaces
                        .entry(part.to_string())
                        .or_insert_with(|| Namespace::new(part));
                }
                &mut node.declarations
            }
        };

        declarations
            .entry(declaration.name().to_string())
            .or_insert(declaration);
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty() && self.declarations.is_empty()
    }
}
