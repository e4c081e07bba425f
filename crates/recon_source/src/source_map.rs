//! Mapping from compilation-unit ids to source text for location decoding.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::location::{SourceLocation, SourceUnitId};
use crate::resolved::ResolvedLocation;
use crate::source_file::SourceFile;

/// Owns the source text of every compilation unit of one run and resolves
/// `src` descriptors to `path:line` positions.
///
/// Paths are reported relative to `base` when they lie beneath it, and
/// verbatim otherwise. A relative `base` is taken from the current
/// directory, since artifacts record absolute source paths.
#[derive(Debug, Clone)]
pub struct SourceMap {
    base: PathBuf,
    units: BTreeMap<SourceUnitId, SourceFile>,
}

impl SourceMap {
    /// Creates an empty map whose reported paths are relative to `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: absolute(base.into()),
            units: BTreeMap::new(),
        }
    }

    /// Registers the text of one compilation unit.
    ///
    /// A second registration for the same unit replaces the first.
    pub fn add_unit(&mut self, unit: SourceUnitId, path: impl AsRef<Path>, content: String) {
        let path = path.as_ref();
        let shown = path
            .strip_prefix(&self.base)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf());
        self.units
            .insert(unit, SourceFile::new(unit, shown, content));
    }

    /// Returns the number of registered units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if no unit is registered.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Resolves a location to its file and starting line.
    ///
    /// Returns `None` for unknown units and offsets outside the file.
    pub fn decode(&self, location: &SourceLocation) -> Option<ResolvedLocation> {
        let file = self.units.get(&location.unit)?;
        let (line, col) = file.line_col(location.start)?;
        Some(ResolvedLocation {
            path: file.path.clone(),
            line,
            col,
        })
    }

    /// Parses and resolves a raw `src` descriptor.
    ///
    /// Descriptors of compiler-generated nodes (unit `-1`) yield `None`.
    pub fn decode_src(&self, src: &str) -> Option<ResolvedLocation> {
        self.decode(&src.parse().ok()?)
    }
}

/// Joins a relative path onto the current directory and folds away `.`
/// and `..` components. Keeps the path as given if the current directory
/// cannot be determined.
fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return normalize(&path);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize(&cwd.join(path)),
        Err(_) => path,
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
