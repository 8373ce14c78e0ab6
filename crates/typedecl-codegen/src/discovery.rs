//! Auto-discovery of marked classes by source location.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::reflect::Reflector;

/// Names of the classes whose source file lies under one of `dirs` and
/// which carry the generate marker.
///
/// Results follow the order of `dirs`, then of `class_files`. A directory
/// that does not exist is an error; a class file that cannot be resolved
/// is skipped.
pub fn discover<'a, D, I>(
    dirs: &[D],
    class_files: I,
    reflector: &dyn Reflector,
) -> Result<Vec<String>>
where
    D: AsRef<Path>,
    I: IntoIterator<Item = (&'a str, &'a Path)>,
{
    let roots = dirs
        .iter()
        .map(|dir| canonical_dir(dir.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let files: Vec<(&str, PathBuf)> = class_files
        .into_iter()
        .filter_map(|(name, file)| match fs::canonicalize(file) {
            Ok(path) => Some((name, path)),
            Err(err) => {
                tracing::debug!(
                    class = name,
                    file = %file.display(),
                    %err,
                    "skipping unresolvable class file"
                );
                None
            }
        })
        .collect();

    let mut found: Vec<String> = Vec::new();
    for root in &roots {
        for (name, file) in &files {
            if !file.starts_with(root) {
                continue;
            }
            let marked = reflector.class(name).is_some_and(|class| class.generate);
            if marked && !found.iter().any(|f| f == name) {
                found.push(name.to_string());
            }
        }
    }
    Ok(found)
}

fn canonical_dir(dir: &Path) -> Result<PathBuf> {
    let canonical = fs::canonicalize(dir).map_err(|source| Error::Discovery {
        path: dir.to_path_buf(),
        source: Some(source),
    })?;
    if !canonical.is_dir() {
        return Err(Error::Discovery {
            path: dir.to_path_buf(),
            source: None,
        });
    }
    Ok(canonical)
}
