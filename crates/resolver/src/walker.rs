//! Upward directory traversal
//!
//! Every search strategy except the relative one probes a directory and then
//! each of its parents. The walk is an iterator, so it is lazy, always
//! finite, and can be restarted by asking for a new one.

use std::path::{Path, PathBuf};

/// Produces ancestor sequences, optionally bounded by a ceiling directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryWalker {
    ceiling: Option<PathBuf>,
}

impl DirectoryWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop walks at `ceiling` (inclusive) when they start below it.
    ///
    /// Walks starting outside the ceiling run to the root as usual.
    pub fn with_ceiling(ceiling: impl Into<PathBuf>) -> Self {
        Self {
            ceiling: Some(ceiling.into()),
        }
    }

    pub fn ceiling(&self) -> Option<&Path> {
        self.ceiling.as_deref()
    }

    /// `start`, then its parent, and so on up to the root or the ceiling
    pub fn ancestors<'a>(&'a self, start: &'a Path) -> Ancestors<'a> {
        let ceiling = self
            .ceiling
            .as_deref()
            .filter(|ceiling| start.starts_with(ceiling));

        Ancestors {
            next: Some(start),
            ceiling,
        }
    }
}

/// Unbounded ancestor walk starting at `start`
pub fn ancestors(start: &Path) -> Ancestors<'_> {
    Ancestors {
        next: Some(start),
        ceiling: None,
    }
}

/// Iterator over a directory and its ancestors
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a Path>,
    ceiling: Option<&'a Path>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Path;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        self.next = if self.ceiling == Some(current) {
            None
        } else {
            // A relative path's last parent is "", which is not a directory
            current.parent().filter(|parent| !parent.as_os_str().is_empty())
        };

        Some(current)
    }
}

impl std::iter::FusedIterator for Ancestors<'_> {}
