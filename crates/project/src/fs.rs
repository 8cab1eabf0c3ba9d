//! Host file primitives
//!
//! Resolution only ever asks two things of the host: "is there a file here?"
//! and "what does this file contain?". Keeping them behind a trait lets the
//! resolver run against a real disk, an editor's virtual file system, or an
//! in-memory tree in tests.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Read-only access to the files the resolver probes
pub trait FileSystem: Send + Sync {
    /// Whether a regular file exists at `path`
    fn is_file(&self, path: &Path) -> bool;

    /// Read a file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Canonical form of an existing path.
    ///
    /// The default is purely lexical (see [`normalize`]).
    fn canonicalize(&self, path: &Path) -> PathBuf {
        normalize(path)
    }
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| normalize(path))
    }
}

/// In-memory [`FileSystem`]; directories exist implicitly through the files
/// stored below them.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: impl AsRef<Path>, contents: impl Into<String>) {
        self.files.insert(normalize(path.as_ref()), contents.into());
    }

    /// Remove a file, returning its contents if it existed
    pub fn remove(&mut self, path: impl AsRef<Path>) -> Option<String> {
        self.files.remove(&normalize(path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSystem for MemoryFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize(path))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(&normalize(path)).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding normal component.
///
/// `..` directly below a root is dropped; leading `..` of a relative path is
/// kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }
    components.iter().collect()
}
