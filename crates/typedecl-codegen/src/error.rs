//! Error types for declaration generation.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Where a property whose type failed to resolve was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Fully-qualified name of the declaring class.
    pub class: String,
    /// Name of the property being resolved.
    pub property: String,
    pub file: Option<PathBuf>,
    pub line: Option<usize>,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "for property `{}` in {}", self.property, self.class)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, " ({}:{})", file.display(), line),
            (Some(file), None) => write!(f, " ({})", file.display()),
            (None, _) => Ok(()),
        }
    }
}

/// A type descriptor that could not be turned into a declaration node.
///
/// Raised for unsupported keywords, malformed array annotations and
/// `parent` references on classes without a parent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct TypeResolutionError {
    pub message: String,
    /// The offending descriptor text.
    pub text: String,
    pub location: Option<SourceLocation>,
}

impl TypeResolutionError {
    pub fn new(message: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            text: text.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }
}

impl fmt::Display for TypeResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.message, self.text)?;
        if let Some(location) = &self.location {
            write!(f, " {location}")?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Nothing to generate, or a requested class is unknown.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    TypeResolution(#[from] TypeResolutionError),

    #[error("auto discover directory not found: {}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the output failed. `path` is `None` for arbitrary writers.
    #[error("failed to write generated types{}", output_suffix(.path.as_deref()))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
}

fn output_suffix(path: Option<&Path>) -> String {
    path.map(|path| format!(" to {}", path.display()))
        .unwrap_or_default()
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
